//! Session lifecycle notification hooks.
//!
//! Thin glue between session mutations and the dispatcher. Each hook
//! composes the notification, picks the audience and spawns one dispatch
//! per recipient. The mutation path drops the returned handles: whether
//! any notification was deliverable never influences whether the
//! mutation itself succeeds.

use crate::dispatch::NotificationDispatcher;
use serde_json::json;
use sesh_core::push::Notification;
use sesh_core::session::Session;
use sesh_core::user::{User, UserId};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Lifecycle event names carried in the notification data payload.
const EVENT_CREATED: &str = "session_created";
const EVENT_JOINED: &str = "user_joined";
const EVENT_LEFT: &str = "user_left";
const EVENT_DELETED: &str = "session_deleted";

/// Invokes the dispatcher on session create/join/leave/delete.
pub struct SessionLifecycleHooks {
    dispatcher: Arc<NotificationDispatcher>,
}

impl SessionLifecycleHooks {
    pub fn new(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// A session was created. Private sessions notify their invitees;
    /// public creation has no audience yet.
    pub fn session_created(&self, session: &Session) -> Vec<JoinHandle<()>> {
        if session.is_public {
            return Vec::new();
        }
        let notification = Notification::new(
            "You're invited",
            format!("You're invited: {}", session.name),
        )
        .with_data(event_data(session, EVENT_CREATED));
        self.notify_all(session.invitee_ids.iter().cloned(), notification)
    }

    /// A user joined. The host hears about it.
    pub fn user_joined(&self, session: &Session, user: &User) -> Vec<JoinHandle<()>> {
        let notification = Notification::new(
            "New participant",
            format!("{} joined {}", user.display_name, session.name),
        )
        .with_data(event_data(session, EVENT_JOINED));
        self.notify_all([session.host_id.clone()], notification)
    }

    /// A user left. The host hears about it.
    pub fn user_left(&self, session: &Session, user: &User) -> Vec<JoinHandle<()>> {
        let notification = Notification::new(
            "Participant left",
            format!("{} left {}", user.display_name, session.name),
        )
        .with_data(event_data(session, EVENT_LEFT));
        self.notify_all([session.host_id.clone()], notification)
    }

    /// The host deleted the session. Participants and, for private
    /// sessions, invitees hear about it.
    pub fn session_deleted(&self, session: &Session) -> Vec<JoinHandle<()>> {
        let notification = Notification::new(
            "Session cancelled",
            format!("{} was cancelled", session.name),
        )
        .with_data(event_data(session, EVENT_DELETED));
        let mut recipients: Vec<UserId> = session.participant_ids.iter().cloned().collect();
        if !session.is_public {
            for invitee in &session.invitee_ids {
                if !session.participant_ids.contains(invitee) {
                    recipients.push(invitee.clone());
                }
            }
        }
        self.notify_all(recipients, notification)
    }

    /// One spawned dispatch per recipient. Handles are returned so tests
    /// can await completion; production callers drop them.
    fn notify_all(
        &self,
        recipients: impl IntoIterator<Item = UserId>,
        notification: Notification,
    ) -> Vec<JoinHandle<()>> {
        recipients
            .into_iter()
            .map(|recipient| {
                let dispatcher = Arc::clone(&self.dispatcher);
                let notification = notification.clone();
                tokio::spawn(async move {
                    let report = dispatcher.dispatch_to_user(&recipient, &notification).await;
                    debug!(
                        user = %recipient,
                        delivered = report.delivered,
                        pruned = report.pruned,
                        "lifecycle notification dispatched"
                    );
                })
            })
            .collect()
    }
}

fn event_data(session: &Session, event: &str) -> serde_json::Value {
    json!({
        "session_id": session.id.as_str(),
        "event": event,
    })
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
