//! User directory trait.

use super::model::{User, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Read-only lookup into the identity subsystem.
///
/// # Implementation Notes
///
/// `Ok(None)` means the id does not resolve to a real identity; `Err(_)`
/// is reserved for the directory itself being unreachable.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves a user by id.
    async fn resolve(&self, user_id: &UserId) -> Result<Option<User>>;
}
