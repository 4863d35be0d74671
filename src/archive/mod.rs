//! Password testing against protected archives

mod zipfile;

pub use zipfile::ZipPasswordTester;

use crate::error::Result;

/// Outcome of testing one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Match,
    NoMatch,
}

impl TestOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, TestOutcome::Match)
    }
}

/// Trait for anything that can tell whether a password opens a target.
///
/// A wrong password is `Ok(TestOutcome::NoMatch)`. An `Err` means the target
/// itself could not be tested and the search must stop.
pub trait CandidateTester {
    fn test(&mut self, candidate: &str) -> Result<TestOutcome>;

    /// Human readable name of the target
    fn target(&self) -> String;
}
