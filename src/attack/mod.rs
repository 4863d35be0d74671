//! Attack orchestration
//!
//! The driver walks a [`crate::candidate::CandidateGenerator`] one candidate at a
//! time and hands each to a [`crate::archive::CandidateTester`]. All run state
//! lives in an [`AttackState`] created per run.

mod driver;
mod state;

pub use driver::AttackDriver;
pub use state::AttackState;
