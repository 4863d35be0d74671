//! zipforce - educational brute-force password recovery for ZIP archives
//!
//! Enumerates every fixed-length candidate over a chosen alphabet, in counting
//! order, and tests each one against a password-protected archive until one
//! opens it or the attempt budget runs out.

pub mod archive;
pub mod attack;
pub mod candidate;
pub mod disclaimer;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ZipForceError};
pub use types::{
    AttackMode, AttackProgress, AttackReport, AttackSettings, AttackStatus, CandidatePlan,
    CharsetSpec, Credentials,
};

// Re-export main functionality
pub use archive::{CandidateTester, TestOutcome, ZipPasswordTester};
pub use attack::AttackDriver;
pub use candidate::{Alphabet, CandidateGenerator, SearchSpace, SpaceSize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

/// Build the candidate generator for a plan, validating it first
pub fn plan_generator(plan: &CandidatePlan, max_attempts: Option<u64>) -> Result<CandidateGenerator> {
    if plan.length == 0 {
        return Err(crate::config_error!("Candidate length must be at least 1"));
    }
    if max_attempts == Some(0) {
        return Err(crate::config_error!("Max attempts must be at least 1"));
    }
    let alphabet = Alphabet::from_spec(&plan.charset)?;
    Ok(CandidateGenerator::new(&alphabet, plan.length, max_attempts))
}
