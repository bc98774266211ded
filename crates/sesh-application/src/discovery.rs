//! Session discovery use case.
//!
//! Orchestrates the session store, visibility filter and relevance scorer
//! to answer "my sessions", "sessions near me" and "rank these for me".
//! All operations are read-only.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sesh_core::config::DiscoverySettings;
use sesh_core::error::{Result, SeshError};
use sesh_core::geo::GeoPoint;
use sesh_core::scoring::{RelevanceScorer, ScoredSession};
use sesh_core::session::{Session, SessionId, SessionStore, VisibilityContext, is_visible};
use sesh_core::user::{User, UserDirectory, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Typed parameters of a nearby search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl NearbyQuery {
    /// Validates the query against the configured limits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for malformed coordinates or a radius
    /// that is non-finite, non-positive or above the cap.
    pub fn validate(&self, limits: &DiscoverySettings) -> Result<()> {
        // Queries arrive deserialized, so the point may bypass the
        // validating constructor. Re-check it here.
        GeoPoint::new(self.center.longitude, self.center.latitude)?;
        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(SeshError::invalid_argument(
                "radius must be a positive number of meters",
            ));
        }
        if self.radius_meters > limits.max_radius_meters {
            return Err(SeshError::invalid_argument(format!(
                "radius {} exceeds the maximum of {} meters",
                self.radius_meters, limits.max_radius_meters
            )));
        }
        Ok(())
    }
}

/// Read-only discovery over the session universe.
pub struct SessionDiscoveryService {
    store: Arc<dyn SessionStore>,
    directory: Arc<dyn UserDirectory>,
    scorer: RelevanceScorer,
    limits: DiscoverySettings,
}

impl SessionDiscoveryService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        directory: Arc<dyn UserDirectory>,
        limits: DiscoverySettings,
    ) -> Self {
        Self {
            store,
            directory,
            scorer: RelevanceScorer::new(),
            limits,
        }
    }

    /// Returns every session the user may see on the home surface: own
    /// hosted sessions, joined sessions, public sessions, and private
    /// sessions they are invited to.
    ///
    /// An empty session universe yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `user_id` does not resolve to a
    /// real identity.
    pub async fn available_sessions(&self, user_id: &UserId) -> Result<Vec<Session>> {
        self.resolve_known_user(user_id).await?;
        let mut sessions: Vec<Session> = self
            .store
            .find_all()
            .await?
            .into_iter()
            .filter(|session| is_visible(session, user_id, VisibilityContext::Available))
            .collect();
        // Deterministic output: soonest first, id as tie-break.
        sessions.sort_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        debug!(user = %user_id, count = sessions.len(), "available sessions");
        Ok(sessions)
    }

    /// Returns sessions within the query radius that the user may see on
    /// the explore surface: public ones, and private ones they are
    /// explicitly invited to. Host or participant status grants nothing
    /// here. Nearest first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unknown user or a malformed query.
    pub async fn nearby_sessions(
        &self,
        user_id: &UserId,
        query: &NearbyQuery,
    ) -> Result<Vec<Session>> {
        query.validate(&self.limits)?;
        self.resolve_known_user(user_id).await?;
        let sessions: Vec<Session> = self
            .store
            .find_within_radius(&query.center, query.radius_meters)
            .await?
            .into_iter()
            .map(|(session, _distance)| session)
            .filter(|session| is_visible(session, user_id, VisibilityContext::Nearby))
            .collect();
        debug!(user = %user_id, count = sessions.len(), "nearby sessions");
        Ok(sessions)
    }

    /// Ranks candidate sessions for the user, highest relevance first.
    ///
    /// A pure reordering: no visibility filtering happens here, callers
    /// filter first. Sessions whose host no longer resolves are dropped
    /// (a recommendation needs a host to compare interests against).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `user_id` does not resolve.
    pub async fn rank_sessions(
        &self,
        user_id: &UserId,
        sessions: Vec<Session>,
    ) -> Result<Vec<ScoredSession>> {
        let user = self.resolve_known_user(user_id).await?;
        let hosts = self.resolve_hosts(&sessions).await?;
        Ok(self.scorer.rank(&user, sessions, &hosts, Utc::now()))
    }

    /// Nearby search followed by ranking, in that order.
    pub async fn nearby_ranked(
        &self,
        user_id: &UserId,
        query: &NearbyQuery,
    ) -> Result<Vec<ScoredSession>> {
        let nearby = self.nearby_sessions(user_id, query).await?;
        self.rank_sessions(user_id, nearby).await
    }

    /// Resolves a user id that must exist, mapping "unknown" onto the
    /// caller-error taxonomy.
    async fn resolve_known_user(&self, user_id: &UserId) -> Result<User> {
        self.directory
            .resolve(user_id)
            .await?
            .ok_or_else(|| {
                SeshError::invalid_argument(format!("unknown user '{user_id}'"))
            })
    }

    /// Resolves each distinct host once. Hosts that do not resolve are
    /// simply absent from the map.
    async fn resolve_hosts(&self, sessions: &[Session]) -> Result<HashMap<SessionId, User>> {
        let mut by_host: HashMap<&UserId, Option<User>> = HashMap::new();
        for session in sessions {
            if !by_host.contains_key(&session.host_id) {
                let resolved = self.directory.resolve(&session.host_id).await?;
                by_host.insert(&session.host_id, resolved);
            }
        }
        let mut hosts = HashMap::new();
        for session in sessions {
            if let Some(Some(host)) = by_host.get(&session.host_id) {
                hosts.insert(session.id.clone(), host.clone());
            }
        }
        Ok(hosts)
    }
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
