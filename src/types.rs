//! Core types and structures for zipforce

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::candidate::SpaceSize;

/// What the attack is asked to recover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackMode {
    UsernameOnly,
    PasswordOnly,
    Both,
}

impl AttackMode {
    pub fn wants_username(&self) -> bool {
        matches!(self, AttackMode::UsernameOnly | AttackMode::Both)
    }

    pub fn wants_password(&self) -> bool {
        matches!(self, AttackMode::PasswordOnly | AttackMode::Both)
    }
}

impl std::fmt::Display for AttackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackMode::UsernameOnly => write!(f, "username_only"),
            AttackMode::PasswordOnly => write!(f, "password_only"),
            AttackMode::Both => write!(f, "both"),
        }
    }
}

/// Which character classes make up an alphabet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetSpec {
    pub digits: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub special: bool,
}

impl CharsetSpec {
    pub fn new(digits: bool, lowercase: bool, uppercase: bool, special: bool) -> Self {
        Self {
            digits,
            lowercase,
            uppercase,
            special,
        }
    }

    /// True when at least one class is enabled
    pub fn any(&self) -> bool {
        self.digits || self.lowercase || self.uppercase || self.special
    }
}

/// Candidate generation parameters for one credential role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePlan {
    pub length: usize,
    pub charset: CharsetSpec,
}

/// A recovered credential pair.
///
/// ZIP archives carry no username, so `username` stays `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: String,
}

impl Credentials {
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            username: None,
            password: password.into(),
        }
    }
}

/// Lifecycle of a single attack run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackStatus {
    Idle,
    Running,
    Succeeded,
    Exhausted,
    Interrupted,
}

impl AttackStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttackStatus::Succeeded | AttackStatus::Exhausted | AttackStatus::Interrupted
        )
    }
}

impl std::fmt::Display for AttackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackStatus::Idle => write!(f, "idle"),
            AttackStatus::Running => write!(f, "running"),
            AttackStatus::Succeeded => write!(f, "succeeded"),
            AttackStatus::Exhausted => write!(f, "exhausted"),
            AttackStatus::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Periodic observation emitted while an attack runs
#[derive(Debug, Clone)]
pub struct AttackProgress {
    pub attempts: u64,
    pub candidate: String,
    pub attempts_per_second: f64,
    pub elapsed: Duration,
    /// Effective number of candidates, when it fits in a `u64`
    pub total: Option<u64>,
}

/// Final result of an attack run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackReport {
    pub status: AttackStatus,
    pub credentials: Option<Credentials>,
    pub attempts: u64,
    /// Candidates the run was allowed to try, after the attempt cap
    pub space: SpaceSize,
    pub elapsed: Duration,
    pub attempts_per_second: f64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AttackReport {
    pub fn succeeded(&self) -> bool {
        self.status == AttackStatus::Succeeded
    }
}

/// Tunables for the attack driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackSettings {
    /// Stop after this many attempts
    pub max_attempts: Option<u64>,
    /// Emit a progress observation every N attempts
    pub progress_interval: u64,
}

impl Default for AttackSettings {
    fn default() -> Self {
        Self {
            max_attempts: Some(10_000),
            progress_interval: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_roles() {
        assert!(AttackMode::Both.wants_username());
        assert!(AttackMode::Both.wants_password());
        assert!(!AttackMode::PasswordOnly.wants_username());
        assert!(!AttackMode::UsernameOnly.wants_password());
    }

    #[test]
    fn test_empty_charset_spec() {
        assert!(!CharsetSpec::default().any());
        assert!(CharsetSpec::new(false, false, false, true).any());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AttackStatus::Exhausted).unwrap();
        assert_eq!(json, "\"exhausted\"");
        assert!(!AttackStatus::Running.is_terminal());
    }
}
