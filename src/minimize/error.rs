//! Minimization error types.

use thiserror::Error;

/// Errors that can occur during minimization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    /// The graph failed the well-formedness check at minimization entry.
    /// Nothing has been computed; the input machine is unchanged.
    #[error("Graph is not well-formed: {0}")]
    InvalidGraph(String),

    /// Partition refinement did not reach a fixed point within the
    /// configured round budget. No partial result is produced.
    #[error("Partition refinement exceeded the budget of {max_rounds} rounds")]
    BudgetExceeded { max_rounds: usize },
}
