//! Push-vendor integration for Sesh.
//!
//! Currently one vendor: Firebase Cloud Messaging over its legacy HTTP
//! API. The rest of the system only sees the `PushProvider` trait and
//! the vendor-neutral `PushErrorCode`, so swapping vendors means adding
//! a sibling module here.

pub mod fcm;

pub use fcm::FcmPushProvider;
