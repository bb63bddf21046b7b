//! Traversal history tracking.
//!
//! Records the ordered sequence of transitions a machine has taken since
//! its last reset. The record is append-only: nothing truncates it except
//! an explicit `reset()` on the owning machine.

use super::state::{StateId, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single executed transition.
///
/// # Example
///
/// ```rust
/// use quotient::TraversalStep;
/// use chrono::Utc;
///
/// let step = TraversalStep {
///     from: 1,
///     symbol: "submit".to_string(),
///     to: 2,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(step.from, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraversalStep {
    /// The state being transitioned from
    pub from: StateId,
    /// The input symbol that triggered the transition
    pub symbol: Symbol,
    /// The state being transitioned to
    pub to: StateId,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of executed transitions.
///
/// `record` returns a new history with the step added rather than
/// mutating in place, so a caller can keep a snapshot of an earlier
/// point in the run.
///
/// # Example
///
/// ```rust
/// use quotient::{TraversalHistory, TraversalStep};
/// use chrono::Utc;
///
/// let history = TraversalHistory::new();
/// let history = history.record(TraversalStep {
///     from: 1,
///     symbol: "open".to_string(),
///     to: 2,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(1), vec![1, 2]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalHistory {
    steps: Vec<TraversalStep>,
}

impl TraversalHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, returning a new history.
    pub fn record(&self, step: TraversalStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// All recorded steps in order.
    pub fn steps(&self) -> &[TraversalStep] {
        &self.steps
    }

    /// The sequence of visited state ids, starting with `initial`.
    pub fn path(&self, initial: StateId) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        path.push(initial);
        for step in &self.steps {
            path.push(step.to);
        }
        path
    }

    /// Total duration from the first to the last recorded step.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.steps.first(), self.steps.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether any step has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
