//! Application layer for Sesh.
//!
//! This crate provides the use cases of the discovery and engagement
//! engine: read-only session discovery, push-notification fan-out, and
//! the lifecycle hooks that connect session mutations to the dispatcher.

pub mod discovery;
pub mod dispatch;
pub mod hooks;

pub use discovery::{NearbyQuery, SessionDiscoveryService};
pub use dispatch::{DispatchReport, NotificationDispatcher};
pub use hooks::SessionLifecycleHooks;
