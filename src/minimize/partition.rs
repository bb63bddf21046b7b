//! Partition refinement to a fixed point.
//!
//! Starts from the coarse acceptance partition and repeatedly regroups
//! states by signature until the number of classes stops changing. The
//! class count is monotonically non-decreasing and bounded by the state
//! count, so the loop terminates within at most `|states|` rounds.

use super::error::MinimizeError;
use super::signature::signature_of;
use crate::core::{StateId, StateMachine, StateValue, Symbol};
use std::collections::BTreeMap;

/// A stable partition of the machine's states into equivalence classes.
pub(crate) struct Partition {
    /// Class assignment per state id.
    pub classes: BTreeMap<StateId, usize>,
    /// Number of distinct classes.
    pub class_count: usize,
    /// Refinement rounds executed before reaching the fixed point.
    pub rounds: usize,
    /// Final signature per state id.
    pub signatures: BTreeMap<StateId, String>,
}

/// Refine the acceptance partition of `machine` to a fixed point.
///
/// The initial partition groups states by their accepting flag: two
/// classes when both accepting and non-accepting states exist, a single
/// class otherwise. Machines with no accepting states therefore start
/// from one class and are partitioned purely by transition structure.
/// Class ids are assigned by first occurrence in ascending state-id
/// order, which makes the assignment reproducible across runs.
pub(crate) fn refine<V: StateValue>(
    machine: &StateMachine<V>,
    max_rounds: Option<usize>,
) -> Result<Partition, MinimizeError> {
    let alphabet: Vec<Symbol> = machine.alphabet().into_iter().collect();

    // Initial partition: group by accepting flag, first occurrence first.
    let mut classes: BTreeMap<StateId, usize> = BTreeMap::new();
    let mut flag_class: BTreeMap<bool, usize> = BTreeMap::new();
    for node in machine.states() {
        let next = flag_class.len();
        let class = *flag_class.entry(node.accepting).or_insert(next);
        classes.insert(node.id, class);
    }
    let mut class_count = flag_class.len();

    let mut signatures: BTreeMap<StateId, String> = BTreeMap::new();
    let mut rounds = 0;

    loop {
        if let Some(max) = max_rounds {
            if rounds >= max {
                return Err(MinimizeError::BudgetExceeded { max_rounds: max });
            }
        }
        rounds += 1;

        let mut by_signature: BTreeMap<String, usize> = BTreeMap::new();
        let mut next_classes: BTreeMap<StateId, usize> = BTreeMap::new();
        let mut next_signatures: BTreeMap<StateId, String> = BTreeMap::new();

        for node in machine.states() {
            let signature = signature_of(node, &alphabet, &classes);
            let next = by_signature.len();
            let class = *by_signature.entry(signature.clone()).or_insert(next);
            next_classes.insert(node.id, class);
            next_signatures.insert(node.id, signature);
        }

        let next_count = by_signature.len();
        tracing::debug!(
            "Refinement round {} produced {} classes",
            rounds,
            next_count
        );

        let stable = next_count == class_count;
        classes = next_classes;
        class_count = next_count;
        signatures = next_signatures;

        if stable {
            break;
        }
    }

    Ok(Partition {
        classes,
        class_count,
        rounds,
        signatures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_of_distinct_states_stays_fully_split() {
        let mut machine = StateMachine::new();
        for id in 1..=4 {
            machine.add_state(id, ()).unwrap();
        }
        machine.add_transition(1, "a", 2).unwrap();
        machine.add_transition(2, "b", 3).unwrap();
        machine.add_transition(3, "c", 4).unwrap();
        machine.set_initial_state(1).unwrap();

        let partition = refine(&machine, None).unwrap();

        assert_eq!(partition.class_count, 4);
    }

    #[test]
    fn structurally_identical_states_share_a_class() {
        // 2 and 3 both step to 4 on the same symbol and nothing else.
        let mut machine = StateMachine::new();
        for id in 1..=4 {
            machine.add_state(id, ()).unwrap();
        }
        machine.add_transition(1, "a", 2).unwrap();
        machine.add_transition(1, "b", 3).unwrap();
        machine.add_transition(2, "x", 4).unwrap();
        machine.add_transition(3, "x", 4).unwrap();
        machine.set_initial_state(1).unwrap();

        let partition = refine(&machine, None).unwrap();

        assert_eq!(partition.class_count, 3);
        assert_eq!(partition.classes[&2], partition.classes[&3]);
        assert_eq!(partition.signatures[&2], partition.signatures[&3]);
    }

    #[test]
    fn accepting_and_nonaccepting_states_never_merge() {
        let mut machine = StateMachine::new();
        machine.add_state(1, ()).unwrap();
        machine.add_accepting_state(2, ()).unwrap();
        machine.set_initial_state(1).unwrap();

        let partition = refine(&machine, None).unwrap();

        assert_eq!(partition.class_count, 2);
        assert_ne!(partition.classes[&1], partition.classes[&2]);
    }

    #[test]
    fn machine_without_accepting_states_starts_from_one_class() {
        // All states loop to themselves on the same symbol: one class.
        let mut machine = StateMachine::new();
        for id in 1..=3 {
            machine.add_state(id, ()).unwrap();
            machine.add_transition(id, "tick", id).unwrap();
        }
        machine.set_initial_state(1).unwrap();

        let partition = refine(&machine, None).unwrap();

        assert_eq!(partition.class_count, 1);
    }

    #[test]
    fn round_budget_is_enforced() {
        // A 4-state chain needs more than one round to stabilize.
        let mut machine = StateMachine::new();
        for id in 1..=4 {
            machine.add_state(id, ()).unwrap();
        }
        machine.add_transition(1, "a", 2).unwrap();
        machine.add_transition(2, "b", 3).unwrap();
        machine.add_transition(3, "c", 4).unwrap();
        machine.set_initial_state(1).unwrap();

        let result = refine(&machine, Some(1));

        assert_eq!(result.err(), Some(MinimizeError::BudgetExceeded { max_rounds: 1 }));
    }

    #[test]
    fn refinement_is_deterministic() {
        let mut machine = StateMachine::new();
        for id in 1..=5 {
            machine.add_state(id, ()).unwrap();
        }
        machine.add_transition(1, "a", 2).unwrap();
        machine.add_transition(1, "b", 3).unwrap();
        machine.add_transition(2, "x", 4).unwrap();
        machine.add_transition(3, "x", 4).unwrap();
        machine.add_transition(4, "x", 5).unwrap();
        machine.set_initial_state(1).unwrap();

        let first = refine(&machine, None).unwrap();
        let second = refine(&machine, None).unwrap();

        assert_eq!(first.classes, second.classes);
        assert_eq!(first.signatures, second.signatures);
        assert_eq!(first.rounds, second.rounds);
    }
}
