//! User domain model (read-only view).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The slice of a user this core consumes for visibility and scoring.
///
/// Owned and mutated by the identity subsystem; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub faculty: String,
    pub year: u8,
    /// Free-text interests, e.g. "algorithms, climbing, coffee".
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub friend_ids: HashSet<UserId>,
}

impl User {
    pub fn is_friend_of(&self, other: &UserId) -> bool {
        self.friend_ids.contains(other)
    }
}
