//! Device token model.

use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A push-provider token registered by one of a user's devices.
///
/// The token string is opaque and owned by exactly one user at a time.
/// Logging in on a device from a different account re-points its token
/// (last writer wins). Deletion is terminal - re-registering the same
/// string later is conceptually a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceToken {
    pub token: String,
    pub user_id: UserId,
    pub registered_at: DateTime<Utc>,
}

impl DeviceToken {
    pub fn new(token: impl Into<String>, user_id: UserId, registered_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            user_id,
            registered_at,
        }
    }
}
