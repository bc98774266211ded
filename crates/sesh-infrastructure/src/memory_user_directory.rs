//! In-memory user directory.
//!
//! The identity subsystem is an external collaborator; this adapter
//! stands in for it in tests and single-process deployments. Seed it
//! with `upsert`.

use async_trait::async_trait;
use sesh_core::error::Result;
use sesh_core::user::{User, UserDirectory, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory `UserDirectory` implementation.
#[derive(Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub async fn upsert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// Removes a user, e.g. to simulate a deleted identity.
    pub async fn remove(&self, user_id: &UserId) {
        self.users.write().await.remove(user_id);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn resolve(&self, user_id: &UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }
}
