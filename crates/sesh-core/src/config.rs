//! Application configuration model.
//!
//! The domain-side view of `config.toml`. Loading and caching live in the
//! infrastructure layer; every section and field has a default so a
//! missing or partial file still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub discovery: DiscoverySettings,
    pub dispatch: DispatchSettings,
    pub push: PushSettings,
    pub store: StoreSettings,
}

/// Limits for discovery queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Radius used when a nearby query omits one.
    pub default_radius_meters: f64,
    /// Hard cap on requested radii.
    pub max_radius_meters: f64,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            default_radius_meters: 1_000.0,
            max_radius_meters: 50_000.0,
        }
    }
}

/// Notification fan-out tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Upper bound on concurrent per-token sends for one dispatch.
    pub fanout_concurrency: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            fanout_concurrency: 8,
        }
    }
}

/// Push vendor endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushSettings {
    /// Send endpoint. Overridable so tests can point at a local stub.
    pub endpoint: String,
    /// Name of the environment variable holding the server key.
    pub server_key_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PushSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://fcm.googleapis.com/fcm/send".to_string(),
            server_key_env: "SESH_FCM_SERVER_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Session store expiry tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// How often the TTL sweep runs.
    pub sweep_interval_secs: u64,
    /// How long after its end a session may linger before physical removal.
    /// Expired sessions are invisible to queries either way.
    pub expiry_grace_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 60,
            expiry_grace_secs: 300,
        }
    }
}
