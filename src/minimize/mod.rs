//! State machine minimization.
//!
//! Merges semantically equivalent states via signature-based partition
//! refinement: starting from the acceptance partition, states are
//! regrouped by signature until stable, then a new machine is built with
//! one state per equivalence class. The input machine is never mutated;
//! a failed or aborted run leaves it fully usable.
//!
//! # Example
//!
//! ```rust
//! use quotient::{minimize, MinimizeOptions, StateMachine};
//!
//! let mut machine = StateMachine::new();
//! machine.add_state(1, "start".to_string()).unwrap();
//! machine.add_state(2, "left".to_string()).unwrap();
//! machine.add_state(3, "right".to_string()).unwrap();
//! machine.add_accepting_state(4, "done".to_string()).unwrap();
//! machine.add_transition(1, "a", 2).unwrap();
//! machine.add_transition(1, "b", 3).unwrap();
//! machine.add_transition(2, "x", 4).unwrap();
//! machine.add_transition(3, "x", 4).unwrap();
//! machine.set_initial_state(1).unwrap();
//!
//! let result = minimize(&machine, &MinimizeOptions::default()).unwrap();
//!
//! // States 2 and 3 are indistinguishable and merge.
//! assert_eq!(result.machine.state_count(), 3);
//! assert_eq!(result.state_mapping[&3], 2);
//! ```

mod builder;
mod error;
mod partition;
mod signature;

pub use error::MinimizeError;
pub use signature::NO_TRANSITION_CLASS;

use crate::core::{StateId, StateMachine, StateValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Options controlling a minimization pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimizeOptions {
    /// Prune states unreachable from the initial state before
    /// partitioning, so they are not counted as distinct in reduction
    /// metrics. On by default.
    pub remove_unreachable: bool,
    /// Collect [`MinimizationMetrics`] alongside the minimized machine.
    /// On by default.
    pub collect_metrics: bool,
    /// Drop signature strings from the minimized machine's nodes.
    pub optimize_memory: bool,
    /// Upper bound on refinement rounds. `None` relies on the built-in
    /// termination guarantee of at most `|states|` rounds.
    pub max_rounds: Option<usize>,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            remove_unreachable: true,
            collect_metrics: true,
            optimize_memory: false,
            max_rounds: None,
        }
    }
}

/// Reduction metrics for one minimization pass.
///
/// Reduction ratios are `(original - minimized) / original`, or `0.0`
/// for an empty original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimizationMetrics {
    pub original_state_count: usize,
    pub minimized_state_count: usize,
    pub state_reduction_ratio: f64,
    pub original_transition_count: usize,
    pub minimized_transition_count: usize,
    pub transition_reduction_ratio: f64,
    pub equivalence_class_count: usize,
    /// Refinement rounds executed before the partition stabilized.
    pub rounds: usize,
    pub minimization_time_ms: f64,
}

/// Result of a minimization pass, owned by the caller that requested it.
#[derive(Clone, Debug)]
pub struct Minimization<V: StateValue> {
    /// The minimized machine, ready for traversal.
    pub machine: StateMachine<V>,
    /// Maps every original (post-prune) state id to the id of its
    /// class representative in the minimized machine.
    pub state_mapping: BTreeMap<StateId, StateId>,
    /// Present when [`MinimizeOptions::collect_metrics`] is set.
    pub metrics: Option<MinimizationMetrics>,
}

/// Minimize `machine` according to `options`.
///
/// Fails fast with [`MinimizeError::InvalidGraph`] if the graph has
/// dangling transition targets or no initial state — before any
/// partition computation occurs. The computation is synchronous and
/// CPU-bound, and works on an internal clone: the input machine is
/// never touched.
pub fn minimize<V: StateValue>(
    machine: &StateMachine<V>,
    options: &MinimizeOptions,
) -> Result<Minimization<V>, MinimizeError> {
    machine
        .validate()
        .map_err(|error| MinimizeError::InvalidGraph(error.to_string()))?;
    if machine.initial_state().is_none() {
        return Err(MinimizeError::InvalidGraph(
            "no initial state has been set".to_string(),
        ));
    }

    let started = Instant::now();

    let mut working = machine.clone();
    working.clear_all_minimization_metadata();
    if options.remove_unreachable {
        working
            .remove_unreachable_states()
            .map_err(|error| MinimizeError::InvalidGraph(error.to_string()))?;
    }

    let partition = partition::refine(&working, options.max_rounds)?;
    let (minimized, state_mapping) =
        builder::build_minimized(&working, &partition, options.optimize_memory);

    let metrics = options.collect_metrics.then(|| MinimizationMetrics {
        original_state_count: working.state_count(),
        minimized_state_count: minimized.state_count(),
        state_reduction_ratio: reduction_ratio(working.state_count(), minimized.state_count()),
        original_transition_count: working.transition_count(),
        minimized_transition_count: minimized.transition_count(),
        transition_reduction_ratio: reduction_ratio(
            working.transition_count(),
            minimized.transition_count(),
        ),
        equivalence_class_count: partition.class_count,
        rounds: partition.rounds,
        minimization_time_ms: started.elapsed().as_secs_f64() * 1000.0,
    });

    tracing::debug!(
        "Minimized {} states into {} classes in {} rounds",
        working.state_count(),
        partition.class_count,
        partition.rounds
    );

    Ok(Minimization {
        machine: minimized,
        state_mapping,
        metrics,
    })
}

impl<V: StateValue> StateMachine<V> {
    /// Convenience wrapper around [`minimize`].
    pub fn minimize(&self, options: &MinimizeOptions) -> Result<Minimization<V>, MinimizeError> {
        minimize(self, options)
    }
}

fn reduction_ratio(original: usize, reduced: usize) -> f64 {
    if original == 0 {
        0.0
    } else {
        (original - reduced) as f64 / original as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mergeable_machine() -> StateMachine<()> {
        let mut machine = StateMachine::new();
        for id in 1..=4 {
            machine.add_state(id, ()).unwrap();
        }
        machine.set_accepting(4, true).unwrap();
        machine.add_transition(1, "a", 2).unwrap();
        machine.add_transition(1, "b", 3).unwrap();
        machine.add_transition(2, "x", 4).unwrap();
        machine.add_transition(3, "x", 4).unwrap();
        machine.set_initial_state(1).unwrap();
        machine
    }

    #[test]
    fn distinct_chain_is_not_reduced() {
        let mut machine = StateMachine::new();
        for id in 1..=4 {
            machine.add_state(id, ()).unwrap();
        }
        machine.add_transition(1, "a", 2).unwrap();
        machine.add_transition(2, "b", 3).unwrap();
        machine.add_transition(3, "c", 4).unwrap();
        machine.set_initial_state(1).unwrap();

        let result = minimize(&machine, &MinimizeOptions::default()).unwrap();

        assert_eq!(result.machine.state_count(), 4);
        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.minimized_state_count, 4);
        assert_eq!(metrics.state_reduction_ratio, 0.0);
    }

    #[test]
    fn equivalent_states_merge_onto_lowest_id() {
        let machine = mergeable_machine();

        let result = minimize(&machine, &MinimizeOptions::default()).unwrap();

        assert_eq!(result.machine.state_count(), 3);
        assert_eq!(result.state_mapping[&3], 2);
        assert_eq!(result.state_mapping[&2], 2);
    }

    #[test]
    fn input_machine_is_untouched() {
        let machine = mergeable_machine();
        let snapshot = machine.clone();

        minimize(&machine, &MinimizeOptions::default()).unwrap();

        assert_eq!(machine, snapshot);
    }

    #[test]
    fn dangling_transition_fails_before_partitioning() {
        let mut machine = mergeable_machine();
        machine.remove_state(4);

        let result = minimize(&machine, &MinimizeOptions::default());

        assert!(matches!(result, Err(MinimizeError::InvalidGraph(_))));
    }

    #[test]
    fn missing_initial_state_is_rejected() {
        let mut machine: StateMachine<()> = StateMachine::new();
        machine.add_state(1, ()).unwrap();

        let result = minimize(&machine, &MinimizeOptions::default());

        assert!(matches!(result, Err(MinimizeError::InvalidGraph(_))));
    }

    #[test]
    fn unreachable_states_are_excluded_from_metrics() {
        let mut machine = mergeable_machine();
        machine.add_state(99, ()).unwrap();

        let result = minimize(&machine, &MinimizeOptions::default()).unwrap();

        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.original_state_count, 4);
        assert!(!result.machine.contains(99));
        assert!(!result.state_mapping.contains_key(&99));
    }

    #[test]
    fn metrics_can_be_skipped() {
        let machine = mergeable_machine();
        let options = MinimizeOptions {
            collect_metrics: false,
            ..MinimizeOptions::default()
        };

        let result = minimize(&machine, &options).unwrap();

        assert!(result.metrics.is_none());
    }

    #[test]
    fn minimization_is_idempotent() {
        let machine = mergeable_machine();

        let first = minimize(&machine, &MinimizeOptions::default()).unwrap();
        let second = minimize(&first.machine, &MinimizeOptions::default()).unwrap();

        let metrics = second.metrics.unwrap();
        assert_eq!(metrics.original_state_count, metrics.minimized_state_count);
    }

    #[test]
    fn merged_sources_reach_the_predicted_class() {
        // Two states with identical transitions into a shared target:
        // traversing the symbol from either one lands in the class the
        // shared target's signature predicts.
        let machine = mergeable_machine();
        let result = minimize(&machine, &MinimizeOptions::default()).unwrap();

        let mut minimized = result.machine.clone();
        minimized.reset().unwrap();
        minimized.transition("a").unwrap();
        let via_a = minimized.transition("x").unwrap();

        minimized.reset().unwrap();
        minimized.transition("b").unwrap();
        let via_b = minimized.transition("x").unwrap();

        assert_eq!(via_a, via_b);
        assert_eq!(via_a, result.state_mapping[&4]);
    }

    #[test]
    fn budget_exceeded_surfaces_from_refinement() {
        let mut machine = StateMachine::new();
        for id in 1..=6 {
            machine.add_state(id, ()).unwrap();
        }
        for id in 1..=5 {
            machine.add_transition(id, "n", id + 1).unwrap();
        }
        machine.set_initial_state(1).unwrap();

        let options = MinimizeOptions {
            max_rounds: Some(1),
            ..MinimizeOptions::default()
        };

        assert_eq!(
            minimize(&machine, &options).err(),
            Some(MinimizeError::BudgetExceeded { max_rounds: 1 })
        );
    }
}
