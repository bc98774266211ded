//! Multi-factor relevance scoring for candidate sessions.
//!
//! # Module Structure
//!
//! - `interests`: tokenization and Jaccard similarity over free-text
//!   interests
//!
//! The scorer is a pure computation: same inputs, same ranking. Callers
//! pass `now` explicitly so imminence does not depend on wall-clock reads
//! mid-scoring.

mod interests;

pub use interests::{interest_tokens, jaccard};

use crate::session::{Session, SessionId};
use crate::user::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of signals in the unweighted mean.
const SIGNAL_COUNT: f64 = 5.0;

/// How far ahead a session start still counts as imminent.
const IMMINENCE_WINDOW_HOURS: i64 = 24;

/// A session paired with its computed relevance for one user.
///
/// Ephemeral - lives for the duration of one discovery response and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSession {
    pub session: Session,
    pub score: f64,
}

/// Deterministic, explainable ranking of candidate sessions for a user.
///
/// Five independent signals, each normalized to [0, 1], averaged without
/// weights: faculty match, social proximity, year match, imminence, and
/// interest similarity with the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer;

impl RelevanceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores one (user, session) pair. `host` must be the resolved host
    /// of `session`.
    pub fn score(&self, user: &User, session: &Session, host: &User, now: DateTime<Utc>) -> f64 {
        let faculty = if session.faculty == user.faculty { 1.0 } else { 0.0 };
        let social = if session
            .participant_ids
            .iter()
            .any(|participant| user.is_friend_of(participant))
        {
            1.0
        } else {
            0.0
        };
        let year = if session.year == user.year { 1.0 } else { 0.0 };
        let imminence = if self.starts_within_window(session, now) {
            1.0
        } else {
            0.0
        };
        let interests = jaccard(&user.interests, &host.interests);

        (faculty + social + year + imminence + interests) / SIGNAL_COUNT
    }

    /// Ranks candidates for `user`, highest score first.
    ///
    /// `hosts` maps session ids to their resolved host users. Sessions
    /// without an entry are dropped - a session with no resolvable host is
    /// not a valid recommendation candidate. Apart from that exclusion the
    /// output is a pure permutation of the input: the sort is stable, so
    /// equal scores keep their input order.
    pub fn rank(
        &self,
        user: &User,
        sessions: Vec<Session>,
        hosts: &HashMap<SessionId, User>,
        now: DateTime<Utc>,
    ) -> Vec<ScoredSession> {
        let mut scored: Vec<ScoredSession> = sessions
            .into_iter()
            .filter_map(|session| {
                let host = hosts.get(&session.id)?;
                let score = self.score(user, &session, host, now);
                Some(ScoredSession { session, score })
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Strictly in the future and within the imminence window.
    fn starts_within_window(&self, session: &Session, now: DateTime<Utc>) -> bool {
        session.starts_at > now
            && session.starts_at - now <= Duration::hours(IMMINENCE_WINDOW_HOURS)
    }
}

#[cfg(test)]
#[path = "scoring_test.rs"]
mod tests;
