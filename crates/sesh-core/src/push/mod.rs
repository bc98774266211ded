//! Push provider seam.
//!
//! The dispatcher never matches on vendor error strings; providers map
//! their own vocabulary onto [`PushErrorCode`] and the dispatcher only
//! asks [`PushErrorCode::is_token_invalid`]. Swapping the vendor means
//! writing one new `PushProvider` impl.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The payload delivered to a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Optional structured payload forwarded to the client app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Vendor-neutral categorization of a failed send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushErrorCode {
    /// The token was valid once but the device uninstalled or rotated it.
    UnregisteredToken,
    /// The token never was a valid registration.
    InvalidToken,
    /// The provider rejected the request parameters for this token.
    InvalidArgument,
    /// The recipient addressed by the token cannot receive messages.
    InvalidRecipient,
    /// Transient provider outage.
    Unavailable,
    /// The provider throttled the sender.
    RateLimited,
    /// Anything else the provider reported.
    Other,
}

impl PushErrorCode {
    /// True when the failure means the token is dead and should be pruned
    /// from the registry. Expected steady-state events, not alerts.
    pub fn is_token_invalid(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredToken | Self::InvalidToken | Self::InvalidArgument | Self::InvalidRecipient
        )
    }
}

/// A failed delivery attempt for a single token.
#[derive(Error, Debug, Clone)]
#[error("push delivery failed ({code:?}): {message}")]
pub struct PushError {
    pub code: PushErrorCode,
    pub message: String,
}

impl PushError {
    pub fn new(code: PushErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_token_invalid(&self) -> bool {
        self.code.is_token_invalid()
    }
}

/// Transport to the push vendor.
///
/// One call per token; implementations must not batch, so that per-token
/// failures stay independent.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Attempts delivery of `notification` to a single device token.
    async fn send(&self, token: &str, notification: &Notification) -> Result<(), PushError>;
}
