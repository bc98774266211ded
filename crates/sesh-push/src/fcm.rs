//! FCM push provider.
//!
//! Talks to the Firebase Cloud Messaging legacy HTTP endpoint, one
//! request per token. FCM's error vocabulary is mapped onto the
//! vendor-neutral `PushErrorCode` here; nothing outside this module
//! matches on FCM strings.
//!
//! Configuration priority: explicit constructor > environment variable
//! named in `PushSettings.server_key_env`.

use async_trait::async_trait;
use sesh_core::config::PushSettings;
use sesh_core::error::{Result, SeshError};
use sesh_core::push::{Notification, PushError, PushErrorCode, PushProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// `PushProvider` backed by FCM's legacy HTTP API.
pub struct FcmPushProvider {
    client: reqwest::Client,
    endpoint: String,
    server_key: String,
}

#[derive(Debug, Serialize)]
struct FcmRequest<'a> {
    to: &'a str,
    notification: FcmNotification<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct FcmResponse {
    #[serde(default)]
    results: Vec<FcmResult>,
}

#[derive(Debug, Deserialize)]
struct FcmResult {
    #[serde(default)]
    error: Option<String>,
}

impl FcmPushProvider {
    /// Creates a provider with the default endpoint.
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_FCM_ENDPOINT.to_string(),
            server_key: server_key.into(),
        }
    }

    /// Builds a provider from settings, reading the server key from the
    /// environment variable the settings name.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the environment variable is unset or the
    /// HTTP client cannot be constructed.
    pub fn from_settings(settings: &PushSettings) -> Result<Self> {
        let server_key = std::env::var(&settings.server_key_env).map_err(|_| {
            SeshError::config(format!(
                "push server key not found in environment variable {}",
                settings.server_key_env
            ))
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|err| SeshError::config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            server_key,
        })
    }

    /// Overrides the endpoint, e.g. to point tests at a local stub.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Maps FCM's per-result error strings onto the vendor-neutral codes.
    fn map_error_code(error: &str) -> PushErrorCode {
        match error {
            "NotRegistered" => PushErrorCode::UnregisteredToken,
            "InvalidRegistration" | "MissingRegistration" => PushErrorCode::InvalidToken,
            "InvalidParameters" | "MessageTooBig" | "InvalidDataKey" | "InvalidTtl" => {
                PushErrorCode::InvalidArgument
            }
            "MismatchSenderId" => PushErrorCode::InvalidRecipient,
            "Unavailable" | "InternalServerError" => PushErrorCode::Unavailable,
            "DeviceMessageRateExceeded" | "TopicsMessageRateExceeded" => {
                PushErrorCode::RateLimited
            }
            _ => PushErrorCode::Other,
        }
    }
}

#[async_trait]
impl PushProvider for FcmPushProvider {
    async fn send(
        &self,
        token: &str,
        notification: &Notification,
    ) -> std::result::Result<(), PushError> {
        let request = FcmRequest {
            to: token,
            notification: FcmNotification {
                title: &notification.title,
                body: &notification.body,
            },
            data: notification.data.as_ref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.server_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                PushError::new(PushErrorCode::Unavailable, format!("transport error: {err}"))
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(PushError::new(
                PushErrorCode::Unavailable,
                format!("FCM returned {status}"),
            ));
        }
        if !status.is_success() {
            return Err(PushError::new(
                PushErrorCode::Other,
                format!("FCM returned {status}"),
            ));
        }

        let body: FcmResponse = response.json().await.map_err(|err| {
            PushError::new(PushErrorCode::Other, format!("unreadable FCM response: {err}"))
        })?;

        match body.results.first().and_then(|result| result.error.as_deref()) {
            None => {
                debug!(token = %token, "push accepted");
                Ok(())
            }
            Some(error) => Err(PushError::new(
                Self::map_error_code(error),
                format!("FCM rejected send: {error}"),
            )),
        }
    }
}
