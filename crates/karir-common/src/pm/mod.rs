pub mod engine;
pub mod gap;

pub use engine::{evaluate, ActualValues, AspectScore, GapRow, PmComputation};
pub use gap::gap_score;

use thiserror::Error;

/// Preconditions of a profile-matching run. Both block the computation
/// before anything is written.
#[derive(Debug, Error, PartialEq)]
pub enum PmError {
    #[error("AHP weights have not been computed for this job")]
    MissingAhpWeights,
    #[error("no active sub-criteria are configured for this job")]
    NoActiveSubCriteria,
}
