//! Attack driver - pulls candidates, tests them, stops on first match

use std::sync::atomic::{AtomicBool, Ordering};

use crate::archive::CandidateTester;
use crate::candidate::CandidateGenerator;
use crate::error::{Result, ZipForceError};
use crate::types::{AttackProgress, AttackReport, AttackSettings, AttackStatus, Credentials};

use super::state::AttackState;

/// Sequential exhaustive search against one target
pub struct AttackDriver<T: CandidateTester> {
    tester: T,
    settings: AttackSettings,
}

impl<T: CandidateTester> AttackDriver<T> {
    /// Create a new driver
    pub fn new(tester: T, settings: AttackSettings) -> Result<Self> {
        if settings.progress_interval == 0 {
            return Err(ZipForceError::config("Progress interval must be at least 1"));
        }
        if settings.max_attempts == Some(0) {
            return Err(ZipForceError::config("Max attempts must be at least 1"));
        }
        Ok(Self { tester, settings })
    }

    pub fn tester(&self) -> &T {
        &self.tester
    }

    /// Give the tester back, e.g. to extract the archive after a match
    pub fn into_tester(self) -> T {
        self.tester
    }

    /// Run the search over `candidates`.
    ///
    /// `cancel` is checked before every attempt. `on_progress` is called on the
    /// first attempt and then every `progress_interval` attempts.
    pub fn run<F>(
        &mut self,
        candidates: CandidateGenerator,
        cancel: &AtomicBool,
        mut on_progress: F,
    ) -> Result<AttackReport>
    where
        F: FnMut(&AttackProgress),
    {
        let max_attempts = self.settings.max_attempts;
        let space = candidates.space().effective.capped(max_attempts);
        let total = space.as_u64();
        let mut state = AttackState::new();
        state.start();

        tracing::info!(
            target_file = %self.tester.target(),
            length = candidates.length(),
            space = %space,
            "Starting attack"
        );

        for candidate in candidates {
            if cancel.load(Ordering::Relaxed) {
                state.interrupt();
                break;
            }
            if max_attempts.is_some_and(|cap| state.attempts() >= cap) {
                break;
            }

            let attempts = state.record_attempt();
            if (attempts - 1) % self.settings.progress_interval == 0 {
                on_progress(&AttackProgress {
                    attempts,
                    candidate: candidate.clone(),
                    attempts_per_second: state.rate(),
                    elapsed: state.elapsed(),
                    total,
                });
            }

            if self.tester.test(&candidate)?.is_match() {
                tracing::info!(attempts, "Password found");
                state.succeed(Credentials::password(candidate));
                break;
            }
        }

        if !state.status().is_terminal() {
            tracing::info!(attempts = state.attempts(), "Search space exhausted");
            state.exhaust();
        } else if state.status() == AttackStatus::Interrupted {
            tracing::warn!(attempts = state.attempts(), "Attack interrupted");
        }

        Ok(state.into_report(space))
    }
}
