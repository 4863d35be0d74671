//! Per-run attack state

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::candidate::SpaceSize;
use crate::types::{AttackReport, AttackStatus, Credentials};

/// Mutable state of one attack run, owned by the driver loop
#[derive(Debug, Clone)]
pub struct AttackState {
    status: AttackStatus,
    attempts: u64,
    started: Instant,
    started_at: DateTime<Utc>,
    credentials: Option<Credentials>,
}

impl AttackState {
    /// Create a fresh state in the idle status
    pub fn new() -> Self {
        Self {
            status: AttackStatus::Idle,
            attempts: 0,
            started: Instant::now(),
            started_at: Utc::now(),
            credentials: None,
        }
    }

    /// Move from idle to running and restart the clock
    pub fn start(&mut self) {
        debug_assert_eq!(self.status, AttackStatus::Idle);
        self.status = AttackStatus::Running;
        self.attempts = 0;
        self.started = Instant::now();
        self.started_at = Utc::now();
    }

    /// Count one more tested candidate
    pub fn record_attempt(&mut self) -> u64 {
        self.attempts += 1;
        self.attempts
    }

    pub fn succeed(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
        self.status = AttackStatus::Succeeded;
    }

    pub fn exhaust(&mut self) {
        self.status = AttackStatus::Exhausted;
    }

    pub fn interrupt(&mut self) {
        self.status = AttackStatus::Interrupted;
    }

    pub fn status(&self) -> AttackStatus {
        self.status
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Attempts per second since the run started
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }

    /// Freeze the state into a report over the given effective space
    pub fn into_report(self, space: SpaceSize) -> AttackReport {
        AttackReport {
            status: self.status,
            attempts_per_second: self.rate(),
            elapsed: self.elapsed(),
            credentials: self.credentials,
            attempts: self.attempts,
            space,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

impl Default for AttackState {
    fn default() -> Self {
        Self::new()
    }
}
