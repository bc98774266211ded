//! Push-notification fan-out.
//!
//! `dispatch_to_user` delivers one notification to every device a user has
//! registered and prunes tokens the provider reports as dead. It never
//! returns an error: delivery is best-effort, and the session mutation
//! that triggered it must succeed or fail on its own correctness alone.

use futures::StreamExt;
use sesh_core::device::{DeviceToken, DeviceTokenRegistry};
use sesh_core::push::{Notification, PushProvider};
use sesh_core::user::UserId;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Outcome counters for one dispatch. Consumed by tests and logs only;
/// no caller branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Tokens a send was attempted for.
    pub attempted: usize,
    /// Sends the provider accepted.
    pub delivered: usize,
    /// Tokens pruned after the provider reported them invalid.
    pub pruned: usize,
    /// Sends that failed transiently (token kept).
    pub failed: usize,
}

enum SendOutcome {
    Delivered,
    Pruned,
    Failed,
}

/// Fans a notification out to all of a user's registered devices.
#[derive(Clone)]
pub struct NotificationDispatcher {
    registry: Arc<dyn DeviceTokenRegistry>,
    provider: Arc<dyn PushProvider>,
    /// Upper bound on concurrent per-token sends.
    fanout_concurrency: usize,
}

impl NotificationDispatcher {
    pub fn new(
        registry: Arc<dyn DeviceTokenRegistry>,
        provider: Arc<dyn PushProvider>,
        fanout_concurrency: usize,
    ) -> Self {
        Self {
            registry,
            provider,
            fanout_concurrency: fanout_concurrency.max(1),
        }
    }

    /// Delivers `notification` to every device registered to `user_id`.
    ///
    /// Per-token attempts run concurrently (bounded) and independently:
    /// one token's failure never prevents attempts on the rest. Provider
    /// errors are absorbed here - invalid tokens are pruned from the
    /// registry, anything else is logged and dropped.
    ///
    /// Awaitable for tests and for callers that want the report; the
    /// mutation path goes through [`spawn_dispatch`](Self::spawn_dispatch)
    /// instead and never joins it.
    pub async fn dispatch_to_user(
        &self,
        user_id: &UserId,
        notification: &Notification,
    ) -> DispatchReport {
        let tokens = match self.registry.tokens_for(user_id).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(user = %user_id, error = %err, "token lookup failed, skipping dispatch");
                return DispatchReport::default();
            }
        };
        if tokens.is_empty() {
            debug!(user = %user_id, "no registered devices");
            return DispatchReport::default();
        }

        let attempted = tokens.len();
        let outcomes: Vec<SendOutcome> = futures::stream::iter(tokens)
            .map(|token| self.send_one(token, notification))
            .buffer_unordered(self.fanout_concurrency)
            .collect()
            .await;

        let mut report = DispatchReport {
            attempted,
            ..DispatchReport::default()
        };
        for outcome in outcomes {
            match outcome {
                SendOutcome::Delivered => report.delivered += 1,
                SendOutcome::Pruned => report.pruned += 1,
                SendOutcome::Failed => report.failed += 1,
            }
        }
        debug!(
            user = %user_id,
            attempted = report.attempted,
            delivered = report.delivered,
            pruned = report.pruned,
            failed = report.failed,
            "dispatch complete"
        );
        report
    }

    /// Fire-and-forget variant: spawns [`dispatch_to_user`] and hands back
    /// the handle. The triggering path drops the handle; tests may await
    /// it.
    ///
    /// [`dispatch_to_user`]: Self::dispatch_to_user
    pub fn spawn_dispatch(
        &self,
        user_id: UserId,
        notification: Notification,
    ) -> JoinHandle<DispatchReport> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.dispatch_to_user(&user_id, &notification).await })
    }

    async fn send_one(&self, token: DeviceToken, notification: &Notification) -> SendOutcome {
        match self.provider.send(&token.token, notification).await {
            Ok(()) => SendOutcome::Delivered,
            Err(err) if err.is_token_invalid() => {
                debug!(token = %token.token, code = ?err.code, "pruning invalid token");
                self.prune(&token.token).await;
                SendOutcome::Pruned
            }
            Err(err) => {
                warn!(
                    token = %token.token,
                    code = ?err.code,
                    error = %err,
                    "push delivery failed, keeping token"
                );
                SendOutcome::Failed
            }
        }
    }

    /// Deletes a dead token. A concurrent dispatch may have pruned it
    /// already; that race resolves as a no-op.
    async fn prune(&self, token: &str) {
        match self.registry.unregister(token).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                debug!(token = %token, "token already pruned");
            }
            Err(err) => {
                warn!(token = %token, error = %err, "failed to prune token");
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
