//! In-memory session store with a spatial index and TTL sweep.
//!
//! Backs the discovery engine in tests and single-process deployments.
//! The map and the spatial index are mutated together under one write
//! lock so radius queries never see a location the map does not.
//!
//! Expiry has two layers: a session whose end time has passed is
//! logically gone immediately (no query returns it), and a background
//! sweep physically removes it once a grace period has elapsed on top.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sesh_core::config::StoreSettings;
use sesh_core::error::{Result, SeshError};
use sesh_core::geo::{GeoPoint, SpatialIndex};
use sesh_core::session::{Session, SessionId, SessionStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Default)]
struct Inner {
    sessions: HashMap<SessionId, Session>,
    index: SpatialIndex<SessionId>,
}

/// In-memory `SessionStore` implementation.
#[derive(Clone)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<Inner>>,
    /// How long a session may linger after its end before the sweep
    /// removes it.
    expiry_grace: Duration,
}

impl MemorySessionStore {
    pub fn new(settings: &StoreSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            expiry_grace: Duration::seconds(settings.expiry_grace_secs as i64),
        }
    }

    /// Physically removes sessions whose end time plus the grace period
    /// has elapsed. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.expiry_grace;
        let mut inner = self.inner.write().await;
        let doomed: Vec<SessionId> = inner
            .sessions
            .values()
            .filter(|session| session.is_expired(cutoff))
            .map(|session| session.id.clone())
            .collect();
        for id in &doomed {
            inner.sessions.remove(id);
            inner.index.remove(id);
        }
        doomed.len()
    }

    /// Spawns the periodic TTL sweep. The task is aborted when the
    /// returned guard drops.
    pub fn spawn_ttl_sweep(&self, period: std::time::Duration) -> SweepGuard {
        let store = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = store.purge_expired(Utc::now()).await;
                if removed > 0 {
                    info!(removed, "ttl sweep purged expired sessions");
                } else {
                    debug!("ttl sweep found nothing to purge");
                }
            }
        });
        SweepGuard { handle }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(&StoreSettings::default())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_by_id(&self, session_id: &SessionId) -> Result<Option<Session>> {
        let now = Utc::now();
        let inner = self.inner.read().await;
        Ok(inner
            .sessions
            .get(session_id)
            .filter(|session| !session.is_expired(now))
            .cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.index.insert(session.id.clone(), session.location);
        inner.sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.sessions.remove(session_id).is_none() {
            return Err(SeshError::not_found("session", session_id.as_str()));
        }
        inner.index.remove(session_id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Session>> {
        let now = Utc::now();
        let inner = self.inner.read().await;
        let mut sessions: Vec<Session> = inner
            .sessions
            .values()
            .filter(|session| !session.is_expired(now))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(sessions)
    }

    async fn find_within_radius(
        &self,
        center: &GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<(Session, f64)>> {
        let now = Utc::now();
        let inner = self.inner.read().await;
        Ok(inner
            .index
            .within_radius(center, radius_m)
            .into_iter()
            .filter_map(|(id, distance)| {
                inner
                    .sessions
                    .get(&id)
                    .filter(|session| !session.is_expired(now))
                    .map(|session| (session.clone(), distance))
            })
            .collect())
    }
}

/// Aborts the sweep task on drop.
pub struct SweepGuard {
    handle: JoinHandle<()>,
}

impl Drop for SweepGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[path = "memory_session_store_test.rs"]
mod tests;
