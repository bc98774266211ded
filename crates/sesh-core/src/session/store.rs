//! Session store trait.
//!
//! Defines the interface for session persistence and radius queries.

use super::model::{Session, SessionId};
use crate::error::Result;
use crate::geo::GeoPoint;
use async_trait::async_trait;

/// An abstract store for sessions.
///
/// This trait decouples discovery and lifecycle logic from the specific
/// storage mechanism (in-memory, document store, remote API).
///
/// # Implementation Notes
///
/// Implementations must honor time-to-live expiry: a session whose end
/// time has passed never appears in any query result, whether or not it
/// has been physically removed yet.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Finds a live session by its ID.
    async fn find_by_id(&self, session_id: &SessionId) -> Result<Option<Session>>;

    /// Saves a session (insert or update).
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no live session has this id.
    async fn delete(&self, session_id: &SessionId) -> Result<()>;

    /// Lists all live sessions.
    async fn find_all(&self) -> Result<Vec<Session>>;

    /// Returns live sessions within `radius_m` of `center`, paired with
    /// their distance in meters, nearest first.
    async fn find_within_radius(
        &self,
        center: &GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<(Session, f64)>>;
}
