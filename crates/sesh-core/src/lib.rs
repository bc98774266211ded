//! Domain layer for Sesh, a location-based study-session coordinator.
//!
//! This crate holds the entities, pure logic and async seams of the
//! session discovery and engagement engine:
//!
//! - [`session`]: the `Session` entity, visibility rules and store trait
//! - [`user`]: the read-only user view and directory trait
//! - [`geo`]: points, haversine distance and the radius index
//! - [`scoring`]: the multi-factor relevance scorer
//! - [`device`]: device push tokens and their registry trait
//! - [`push`]: the vendor-neutral push provider seam
//! - [`config`]: the application configuration model
//!
//! Use cases live in `sesh-application`; concrete adapters live in
//! `sesh-infrastructure` and `sesh-push`.

pub mod config;
pub mod device;
pub mod error;
pub mod geo;
pub mod push;
pub mod scoring;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{Result, SeshError};
