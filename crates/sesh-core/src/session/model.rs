//! Session domain model.
//!
//! A session is a time-boxed study meetup at a geographic point. The host
//! is never a member of the invitee or participant sets; the constructor
//! and the join/leave rules enforce that.

use crate::error::{Result, SeshError};
use crate::geo::GeoPoint;
use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Opaque session identifier (UUID format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Input for creating a session, before invariants are checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub host_id: UserId,
    pub location: GeoPoint,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_public: bool,
    pub subject: String,
    pub faculty: String,
    pub year: u8,
    /// Only meaningful for private sessions.
    #[serde(default)]
    pub invitee_ids: HashSet<UserId>,
}

/// A study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub description: Option<String>,
    pub host_id: UserId,
    pub location: GeoPoint,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_public: bool,
    pub subject: String,
    pub faculty: String,
    pub year: u8,
    pub invitee_ids: HashSet<UserId>,
    pub participant_ids: HashSet<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Validates a draft and creates the session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when:
    /// - the name is empty
    /// - `starts_at` is not strictly before `ends_at`
    /// - `ends_at` is not in the future (relative to `now`)
    /// - the host appears in the invitee set
    pub fn new(draft: SessionDraft, now: DateTime<Utc>) -> Result<Self> {
        if draft.name.trim().is_empty() {
            return Err(SeshError::invalid_argument("session name must not be empty"));
        }
        if draft.starts_at >= draft.ends_at {
            return Err(SeshError::invalid_argument(
                "session start must be before its end",
            ));
        }
        if draft.ends_at <= now {
            return Err(SeshError::invalid_argument(
                "session end must be in the future",
            ));
        }
        if draft.invitee_ids.contains(&draft.host_id) {
            return Err(SeshError::invalid_argument(
                "host cannot be an invitee of their own session",
            ));
        }

        Ok(Self {
            id: SessionId::generate(),
            name: draft.name,
            description: draft.description,
            host_id: draft.host_id,
            location: draft.location,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            is_public: draft.is_public,
            subject: draft.subject,
            faculty: draft.faculty,
            year: draft.year,
            invitee_ids: draft.invitee_ids,
            participant_ids: HashSet::new(),
            created_at: now,
        })
    }

    pub fn is_host(&self, user_id: &UserId) -> bool {
        self.host_id == *user_id
    }

    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participant_ids.contains(user_id)
    }

    pub fn is_invited(&self, user_id: &UserId) -> bool {
        self.invitee_ids.contains(user_id)
    }

    /// Host or participant.
    pub fn involves(&self, user_id: &UserId) -> bool {
        self.is_host(user_id) || self.has_participant(user_id)
    }

    /// A session is logically gone the moment its end time passes.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.ends_at
    }

    /// Adds a user to the participant set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the user is the host, is already a
    /// participant, the session has ended, or the session is private and
    /// the user is not invited.
    pub fn join(&mut self, user_id: UserId, now: DateTime<Utc>) -> Result<()> {
        if self.is_expired(now) {
            return Err(SeshError::invalid_argument("session has already ended"));
        }
        if self.is_host(&user_id) {
            return Err(SeshError::invalid_argument(
                "host cannot join their own session",
            ));
        }
        if self.has_participant(&user_id) {
            return Err(SeshError::invalid_argument("user already joined"));
        }
        if !self.is_public && !self.is_invited(&user_id) {
            return Err(SeshError::invalid_argument(
                "private session requires an invitation",
            ));
        }
        self.participant_ids.insert(user_id);
        Ok(())
    }

    /// Removes a user from the participant set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the user is not a participant.
    pub fn leave(&mut self, user_id: &UserId) -> Result<()> {
        if !self.participant_ids.remove(user_id) {
            return Err(SeshError::not_found("participant", user_id.as_str()));
        }
        Ok(())
    }
}
