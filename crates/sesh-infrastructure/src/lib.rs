//! Infrastructure adapters for Sesh.
//!
//! Concrete implementations of the core traits: in-memory session store
//! with spatial index and TTL sweep, in-memory device registry and user
//! directory, plus configuration loading and path resolution.

pub mod config_service;
pub mod memory_device_registry;
pub mod memory_session_store;
pub mod memory_user_directory;
pub mod paths;

pub use config_service::ConfigService;
pub use memory_device_registry::MemoryDeviceRegistry;
pub use memory_session_store::{MemorySessionStore, SweepGuard};
pub use memory_user_directory::MemoryUserDirectory;
pub use paths::SeshPaths;
