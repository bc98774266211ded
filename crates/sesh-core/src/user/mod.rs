//! User domain module.
//!
//! The identity subsystem owns users; this core only reads them. The
//! `UserDirectory` trait is the seam behind which that subsystem lives.

mod directory;
mod model;

pub use directory::UserDirectory;
pub use model::{User, UserId};
