pub mod engine;
pub mod matrix;

pub use engine::{compute_weights, AhpComputation, CONSISTENCY_THRESHOLD};
pub use matrix::{build_comparison_matrix, JudgmentMap};

use thiserror::Error;

/// Validation failures of the weight-derivation pipeline. Both are
/// caller-recoverable: the stored judgment set needs fixing, not the code.
#[derive(Debug, Error, PartialEq)]
pub enum AhpError {
    #[error("at least 2 active criteria are required for AHP, found {count}")]
    InsufficientCriteria { count: usize },
    #[error("comparison matrix is incomplete: criteria {a} and {b} were never compared")]
    IncompleteMatrix { a: i64, b: i64 },
}
