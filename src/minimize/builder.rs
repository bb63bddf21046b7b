//! Construction of the minimized machine from a stable partition.
//!
//! One state per equivalence class, carrying the representative's value
//! and rewired transitions. The representative of a class is its lowest
//! original state id, which keeps the output reproducible across runs.

use super::partition::Partition;
use crate::core::{StateId, StateMachine, StateNode, StateValue};
use std::collections::BTreeMap;

/// Build the minimized machine and the original-to-representative
/// mapping.
///
/// Every transition `(class, symbol) -> target` is translated through the
/// same mapping, so the minimized machine simulates the original exactly:
/// running any input sequence on both machines ends in states related by
/// the returned mapping.
pub(crate) fn build_minimized<V: StateValue>(
    source: &StateMachine<V>,
    partition: &Partition,
    optimize_memory: bool,
) -> (StateMachine<V>, BTreeMap<StateId, StateId>) {
    // Lowest id per class; source states iterate in ascending id order.
    let mut representatives: BTreeMap<usize, StateId> = BTreeMap::new();
    for node in source.states() {
        if let Some(&class) = partition.classes.get(&node.id) {
            representatives.entry(class).or_insert(node.id);
        }
    }

    let mut mapping: BTreeMap<StateId, StateId> = BTreeMap::new();
    for node in source.states() {
        if let Some(&class) = partition.classes.get(&node.id) {
            if let Some(&representative) = representatives.get(&class) {
                mapping.insert(node.id, representative);
            }
        }
    }

    let mut minimized = StateMachine::with_mode(source.mode());
    for (&class, &representative) in &representatives {
        let Some(node) = source.state(representative) else {
            continue;
        };

        let mut merged = StateNode::new(representative, node.value.clone(), node.accepting);
        merged.minimized = true;
        merged.equivalence_class = Some(class);
        if !optimize_memory {
            merged.signature = partition.signatures.get(&representative).cloned();
        }
        for (symbol, &target) in node.transitions() {
            if let Some(&merged_target) = mapping.get(&target) {
                merged.transitions.insert(symbol.clone(), merged_target);
            }
        }
        minimized.insert_node(merged);
    }

    if let Some(initial) = source.initial_state() {
        if let Some(&merged_initial) = mapping.get(&initial) {
            minimized.set_initial_unchecked(merged_initial);
        }
    }

    (minimized, mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimize::partition::refine;

    fn mergeable_machine() -> StateMachine<String> {
        // 2 and 3 are equivalent; 4 is the shared target.
        let mut machine = StateMachine::new();
        machine.add_state(1, "start".to_string()).unwrap();
        machine.add_state(2, "left".to_string()).unwrap();
        machine.add_state(3, "right".to_string()).unwrap();
        machine.add_accepting_state(4, "done".to_string()).unwrap();
        machine.add_transition(1, "a", 2).unwrap();
        machine.add_transition(1, "b", 3).unwrap();
        machine.add_transition(2, "x", 4).unwrap();
        machine.add_transition(3, "x", 4).unwrap();
        machine.set_initial_state(1).unwrap();
        machine
    }

    #[test]
    fn representative_is_lowest_id_in_class() {
        let machine = mergeable_machine();
        let partition = refine(&machine, None).unwrap();

        let (minimized, mapping) = build_minimized(&machine, &partition, false);

        assert_eq!(minimized.state_count(), 3);
        assert_eq!(mapping[&2], 2);
        assert_eq!(mapping[&3], 2);
        assert!(minimized.contains(2));
        assert!(!minimized.contains(3));
    }

    #[test]
    fn transitions_are_rewired_through_the_mapping() {
        let machine = mergeable_machine();
        let partition = refine(&machine, None).unwrap();

        let (minimized, mapping) = build_minimized(&machine, &partition, false);

        // Both of 1's edges now land on the merged representative.
        let start = minimized.state(1).unwrap();
        assert_eq!(start.target("a"), Some(mapping[&2]));
        assert_eq!(start.target("b"), Some(mapping[&3]));
        assert_eq!(start.target("a"), start.target("b"));
    }

    #[test]
    fn minimized_nodes_carry_class_metadata() {
        let machine = mergeable_machine();
        let partition = refine(&machine, None).unwrap();

        let (minimized, _) = build_minimized(&machine, &partition, false);

        for node in minimized.states() {
            assert!(node.minimized);
            assert!(node.equivalence_class.is_some());
            assert!(node.signature.is_some());
        }
    }

    #[test]
    fn optimize_memory_drops_signatures() {
        let machine = mergeable_machine();
        let partition = refine(&machine, None).unwrap();

        let (minimized, _) = build_minimized(&machine, &partition, true);

        for node in minimized.states() {
            assert!(node.signature.is_none());
        }
    }

    #[test]
    fn initial_state_is_mapped_to_its_representative() {
        let machine = mergeable_machine();
        let partition = refine(&machine, None).unwrap();

        let (minimized, mapping) = build_minimized(&machine, &partition, false);

        assert_eq!(minimized.initial_state(), Some(mapping[&1]));
        assert_eq!(minimized.current_state(), minimized.initial_state());
    }
}
