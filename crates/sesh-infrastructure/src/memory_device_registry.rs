//! In-memory device token registry.
//!
//! Keyed by the token string, which is what makes the ownership rules
//! fall out naturally: one map entry per token means associating an
//! existing token under a new user is a transfer, never a duplicate.

use async_trait::async_trait;
use chrono::Utc;
use sesh_core::device::{DeviceToken, DeviceTokenRegistry};
use sesh_core::error::{Result, SeshError};
use sesh_core::user::UserId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory `DeviceTokenRegistry` implementation.
#[derive(Clone, Default)]
pub struct MemoryDeviceRegistry {
    tokens: Arc<RwLock<HashMap<String, DeviceToken>>>,
}

impl MemoryDeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceTokenRegistry for MemoryDeviceRegistry {
    async fn associate(&self, user_id: &UserId, token: &str) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        match tokens.get(token).map(|entry| entry.user_id.clone()) {
            // Same owner: nothing to do, registration stays as it was.
            Some(owner) if owner == *user_id => return Ok(()),
            Some(owner) => {
                debug!(
                    token = %token,
                    from = %owner,
                    to = %user_id,
                    "device token ownership transfer"
                );
            }
            None => {}
        }
        tokens.insert(
            token.to_string(),
            DeviceToken::new(token, user_id.clone(), Utc::now()),
        );
        Ok(())
    }

    async fn unregister(&self, token: &str) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        match tokens.remove(token) {
            Some(_) => Ok(()),
            None => Err(SeshError::not_found("device token", token)),
        }
    }

    async fn tokens_for(&self, user_id: &UserId) -> Result<Vec<DeviceToken>> {
        let tokens = self.tokens.read().await;
        let mut owned: Vec<DeviceToken> = tokens
            .values()
            .filter(|entry| entry.user_id == *user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.token.cmp(&b.token));
        Ok(owned)
    }
}
