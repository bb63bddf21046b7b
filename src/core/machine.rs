//! The mutable state-transition graph.
//!
//! `StateMachine` owns a set of states, one designated initial state, and
//! the current pointer used during traversal. Construction is incremental:
//! callers add states and transitions one at a time, then hand the machine
//! to the minimizer or drive it through the traversal API.

use super::error::MachineError;
use super::history::TraversalHistory;
use super::state::{StateId, StateNode, StateValue, Symbol};
use super::traverse::TraversalMode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A deterministic state-transition graph with traversal state.
///
/// The machine performs no internal locking: a single instance must be
/// owned by one thread, or access to it serialized externally.
///
/// # Example
///
/// ```rust
/// use quotient::StateMachine;
///
/// let mut machine = StateMachine::new();
/// machine.add_state(1, "closed".to_string()).unwrap();
/// machine.add_state(2, "open".to_string()).unwrap();
/// machine.add_transition(1, "open", 2).unwrap();
/// machine.set_initial_state(1).unwrap();
///
/// assert_eq!(machine.state_count(), 2);
/// assert_eq!(machine.transition_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateMachine<V: StateValue> {
    states: BTreeMap<StateId, StateNode<V>>,
    initial: Option<StateId>,
    current: Option<StateId>,
    history: TraversalHistory,
    mode: TraversalMode,
}

impl<V: StateValue> StateMachine<V> {
    /// Create an empty machine in strict traversal mode.
    pub fn new() -> Self {
        Self::with_mode(TraversalMode::Strict)
    }

    /// Create an empty machine with an explicit traversal mode.
    pub fn with_mode(mode: TraversalMode) -> Self {
        Self {
            states: BTreeMap::new(),
            initial: None,
            current: None,
            history: TraversalHistory::new(),
            mode,
        }
    }

    /// Add a non-accepting state.
    ///
    /// Fails with [`MachineError::DuplicateState`] if the id is already
    /// taken; the machine is not modified in that case.
    pub fn add_state(&mut self, id: StateId, value: V) -> Result<(), MachineError> {
        self.insert_state(id, value, false)
    }

    /// Add an accepting (terminal) state.
    pub fn add_accepting_state(&mut self, id: StateId, value: V) -> Result<(), MachineError> {
        self.insert_state(id, value, true)
    }

    fn insert_state(&mut self, id: StateId, value: V, accepting: bool) -> Result<(), MachineError> {
        if self.states.contains_key(&id) {
            return Err(MachineError::DuplicateState(id));
        }
        self.states.insert(id, StateNode::new(id, value, accepting));
        Ok(())
    }

    /// Flip the accepting flag of an existing state.
    pub fn set_accepting(&mut self, id: StateId, accepting: bool) -> Result<(), MachineError> {
        let node = self
            .states
            .get_mut(&id)
            .ok_or(MachineError::UnknownState(id))?;
        node.accepting = accepting;
        Ok(())
    }

    /// Add a transition from `from` to `to` on `symbol`.
    ///
    /// Both endpoints must exist; the check happens before any mutation.
    /// Re-adding a transition for an existing symbol overwrites the prior
    /// target, preserving the one-target-per-symbol determinism invariant.
    pub fn add_transition(
        &mut self,
        from: StateId,
        symbol: impl Into<Symbol>,
        to: StateId,
    ) -> Result<(), MachineError> {
        if !self.states.contains_key(&to) {
            return Err(MachineError::UnknownState(to));
        }
        let node = self
            .states
            .get_mut(&from)
            .ok_or(MachineError::UnknownState(from))?;
        node.transitions.insert(symbol.into(), to);
        Ok(())
    }

    /// Designate the initial state.
    ///
    /// Resets the current pointer to it and clears any recorded history,
    /// so the machine starts a fresh run.
    pub fn set_initial_state(&mut self, id: StateId) -> Result<(), MachineError> {
        if !self.states.contains_key(&id) {
            return Err(MachineError::UnknownState(id));
        }
        self.initial = Some(id);
        self.current = Some(id);
        self.history = TraversalHistory::new();
        Ok(())
    }

    /// Remove a state, returning its node if it existed.
    ///
    /// Transitions from other states that pointed at the removed id are
    /// left in place as dangling references; [`StateMachine::validate`]
    /// (and minimization, which calls it) will report them. The initial
    /// and current pointers are cleared if they referenced the removed
    /// state.
    pub fn remove_state(&mut self, id: StateId) -> Option<StateNode<V>> {
        let removed = self.states.remove(&id);
        if removed.is_some() {
            if self.initial == Some(id) {
                self.initial = None;
            }
            if self.current == Some(id) {
                self.current = self.initial;
            }
        }
        removed
    }

    /// Delete every state not reachable from the initial state.
    ///
    /// Reachability is computed by BFS over transitions. Returns the
    /// number of states removed. The minimizer prunes a working copy with
    /// this before partitioning so that unreachable states are not
    /// counted as distinct in reduction metrics.
    pub fn remove_unreachable_states(&mut self) -> Result<usize, MachineError> {
        let initial = self.initial.ok_or(MachineError::NoInitialState)?;

        let mut reachable: BTreeSet<StateId> = BTreeSet::new();
        let mut queue: VecDeque<StateId> = VecDeque::new();
        reachable.insert(initial);
        queue.push_back(initial);

        while let Some(id) = queue.pop_front() {
            if let Some(node) = self.states.get(&id) {
                for &target in node.transitions.values() {
                    if reachable.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
        }

        let before = self.states.len();
        self.states.retain(|id, _| reachable.contains(id));
        let removed = before - self.states.len();

        if removed > 0 {
            tracing::debug!("Removed {} unreachable states", removed);
            if let Some(current) = self.current {
                if !self.states.contains_key(&current) {
                    self.current = self.initial;
                }
            }
        }

        Ok(removed)
    }

    /// Check that the graph is well-formed.
    ///
    /// Reports the first dangling transition target or a missing initial
    /// state reference. Minimization refuses to start on a machine that
    /// fails this check.
    pub fn validate(&self) -> Result<(), MachineError> {
        if let Some(initial) = self.initial {
            if !self.states.contains_key(&initial) {
                return Err(MachineError::UnknownState(initial));
            }
        }
        for node in self.states.values() {
            for (symbol, &target) in &node.transitions {
                if !self.states.contains_key(&target) {
                    return Err(MachineError::DanglingTransition {
                        from: node.id,
                        symbol: symbol.clone(),
                        to: target,
                    });
                }
            }
        }
        Ok(())
    }

    /// The set of all symbols appearing on any transition, sorted.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.states
            .values()
            .flat_map(|node| node.transitions.keys().cloned())
            .collect()
    }

    /// Look up a state by id.
    pub fn state(&self, id: StateId) -> Option<&StateNode<V>> {
        self.states.get(&id)
    }

    /// Iterate all states in ascending id order.
    pub fn states(&self) -> impl Iterator<Item = &StateNode<V>> {
        self.states.values()
    }

    /// Whether a state with this id exists.
    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of transitions across all states.
    pub fn transition_count(&self) -> usize {
        self.states.values().map(StateNode::degree).sum()
    }

    /// The designated initial state, if set.
    pub fn initial_state(&self) -> Option<StateId> {
        self.initial
    }

    /// The configured traversal mode.
    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Switch traversal mode.
    pub fn set_mode(&mut self, mode: TraversalMode) {
        self.mode = mode;
    }

    pub(crate) fn insert_node(&mut self, node: StateNode<V>) {
        self.states.insert(node.id, node);
    }

    pub(crate) fn set_initial_unchecked(&mut self, id: StateId) {
        self.initial = Some(id);
        self.current = Some(id);
    }

    pub(crate) fn current_mut(&mut self) -> &mut Option<StateId> {
        &mut self.current
    }

    pub(crate) fn current_raw(&self) -> Option<StateId> {
        self.current
    }

    pub(crate) fn history_ref(&self) -> &TraversalHistory {
        &self.history
    }

    pub(crate) fn set_history(&mut self, history: TraversalHistory) {
        self.history = history;
    }

    pub(crate) fn clear_all_minimization_metadata(&mut self) {
        for node in self.states.values_mut() {
            node.clear_minimization_metadata();
        }
    }
}

impl<V: StateValue> Default for StateMachine<V> {
    fn default() -> Self {
        Self::new()
    }
}
