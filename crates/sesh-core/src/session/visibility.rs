//! Pure visibility filter over (session, user, context).
//!
//! "Available" answers "what is mine": host and participants always see
//! their sessions, invitees see private ones. "Nearby" answers "what could
//! I discover here": private sessions show only to explicit invitees, and
//! being host or participant grants nothing. The asymmetry is intentional -
//! nearby search is a discovery surface, not a "my sessions" surface.

use super::model::Session;
use crate::user::UserId;

/// Which discovery surface is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityContext {
    /// Home surface: host/participant status always grants visibility.
    Available,
    /// Explore surface: only publicness or an explicit invitation does.
    Nearby,
}

/// Decides whether `user_id` may see `session` on the given surface.
pub fn is_visible(session: &Session, user_id: &UserId, context: VisibilityContext) -> bool {
    match context {
        VisibilityContext::Available => {
            session.involves(user_id) || session.is_public || session.is_invited(user_id)
        }
        VisibilityContext::Nearby => session.is_public || session.is_invited(user_id),
    }
}
