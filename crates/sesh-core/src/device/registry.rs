//! Device token registry trait.

use super::model::DeviceToken;
use crate::error::Result;
use crate::user::UserId;
use async_trait::async_trait;

/// Mapping from users to their registered device push tokens.
#[async_trait]
pub trait DeviceTokenRegistry: Send + Sync {
    /// Associates a token with a user (upsert).
    ///
    /// If the token already exists under a different user it is re-pointed
    /// to the new one - ownership transfer, not duplication. Associating
    /// the same (user, token) pair repeatedly yields exactly one record.
    async fn associate(&self, user_id: &UserId, token: &str) -> Result<()>;

    /// Deletes a token.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the token is not registered.
    async fn unregister(&self, token: &str) -> Result<()>;

    /// Returns all tokens currently registered to a user (possibly none).
    async fn tokens_for(&self, user_id: &UserId) -> Result<Vec<DeviceToken>>;
}
