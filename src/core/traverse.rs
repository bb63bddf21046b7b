//! Runtime traversal of a state machine.
//!
//! Symbol sequences are executed against the machine's transition table,
//! moving the current pointer and appending to the history. The same API
//! works identically on an original and a minimized machine.

use super::error::MachineError;
use super::history::{TraversalHistory, TraversalStep};
use super::machine::StateMachine;
use super::state::{StateId, StateNode, StateValue};
use crate::cache::{CacheKey, TransitionCache};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Policy for a transition attempt on an undefined symbol.
///
/// Strict mode fails with [`MachineError::NoTransition`]; this is the
/// primary API behavior. Permissive mode holds the current state and
/// records nothing, and must be opted into explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalMode {
    #[default]
    Strict,
    Permissive,
}

impl<V: StateValue> StateMachine<V> {
    /// The current state id, if traversal has started.
    pub fn current_state(&self) -> Option<StateId> {
        self.current_raw()
    }

    /// The node under the current pointer.
    pub fn current_node(&self) -> Option<&StateNode<V>> {
        self.current_raw().and_then(|id| self.state(id))
    }

    /// Whether the current state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.current_node().is_some_and(|node| node.accepting)
    }

    /// Peek at the target of `symbol` from the current state without
    /// moving. Returns `None` when no transition is defined.
    pub fn next_state(&self, symbol: &str) -> Option<StateId> {
        self.current_node().and_then(|node| node.target(symbol))
    }

    /// Execute one transition on `symbol`.
    ///
    /// Moves the current pointer and appends a step to the history. On an
    /// undefined symbol the behavior follows the configured
    /// [`TraversalMode`]: strict mode fails, permissive mode returns the
    /// unchanged current state.
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
    /// assert_eq!(machine.transition("open").unwrap(), 2);
    /// assert!(machine.transition("open").is_err());
    /// ```
    pub fn transition(&mut self, symbol: &str) -> Result<StateId, MachineError> {
        let from = self.current_raw().ok_or(MachineError::NoInitialState)?;
        match self.next_state(symbol) {
            Some(to) => {
                self.apply_move(from, symbol, to);
                Ok(to)
            }
            None => match self.mode() {
                TraversalMode::Strict => Err(MachineError::NoTransition {
                    from,
                    symbol: symbol.to_string(),
                }),
                TraversalMode::Permissive => Ok(from),
            },
        }
    }

    /// Execute a sequence of symbols, returning the final state id.
    pub fn process_sequence<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<StateId, MachineError> {
        for symbol in symbols {
            self.transition(symbol.as_ref())?;
        }
        self.current_raw().ok_or(MachineError::NoInitialState)
    }

    /// Run a sequence from the initial state without touching the current
    /// pointer or history, and report whether it ends in an accepting
    /// state. Undefined symbols follow the configured traversal mode.
    pub fn accepts<S: AsRef<str>>(&self, symbols: &[S]) -> Result<bool, MachineError> {
        let mut state = self.initial_state().ok_or(MachineError::NoInitialState)?;
        for symbol in symbols {
            let symbol = symbol.as_ref();
            let target = self.state(state).and_then(|node| node.target(symbol));
            match target {
                Some(next) => state = next,
                None => match self.mode() {
                    TraversalMode::Strict => {
                        return Err(MachineError::NoTransition {
                            from: state,
                            symbol: symbol.to_string(),
                        })
                    }
                    TraversalMode::Permissive => {}
                },
            }
        }
        Ok(self.state(state).is_some_and(|node| node.accepting))
    }

    /// Restore the current pointer to the initial state and clear the
    /// history. This is the only operation that truncates history.
    pub fn reset(&mut self) -> Result<(), MachineError> {
        let initial = self.initial_state().ok_or(MachineError::NoInitialState)?;
        *self.current_mut() = Some(initial);
        self.set_history(TraversalHistory::new());
        Ok(())
    }

    /// The ordered sequence of visited state ids, starting with the
    /// initial state. Empty when no initial state has been set.
    pub fn state_history(&self) -> Vec<StateId> {
        match self.initial_state() {
            Some(initial) => self.history_ref().path(initial),
            None => Vec::new(),
        }
    }

    /// The recorded transition steps of the current run.
    pub fn history(&self) -> &TraversalHistory {
        self.history_ref()
    }

    /// Execute one transition on `symbol`, consulting `cache` before the
    /// transition table.
    ///
    /// The cache is keyed by `(current state, symbol)`. On a miss the
    /// target is looked up in the transition table and inserted. Only
    /// defined transitions are cached, so strict-mode failures and
    /// permissive-mode holds behave exactly as [`StateMachine::transition`].
    /// A caller that mutates the graph is responsible for clearing the
    /// cache.
    pub fn transition_cached(
        &mut self,
        cache: &mut TransitionCache<StateId>,
        symbol: &str,
    ) -> Result<StateId, MachineError> {
        let from = self.current_raw().ok_or(MachineError::NoInitialState)?;
        let key = CacheKey::new(from, symbol);

        let to = match cache.get(&key).copied() {
            Some(to) => to,
            None => match self.next_state(symbol) {
                Some(to) => {
                    cache.insert_for_transition(key, to, to);
                    to
                }
                None => {
                    return match self.mode() {
                        TraversalMode::Strict => Err(MachineError::NoTransition {
                            from,
                            symbol: symbol.to_string(),
                        }),
                        TraversalMode::Permissive => Ok(from),
                    }
                }
            },
        };

        self.apply_move(from, symbol, to);
        Ok(to)
    }

    fn apply_move(&mut self, from: StateId, symbol: &str, to: StateId) {
        let step = TraversalStep {
            from,
            symbol: symbol.to_string(),
            to,
            timestamp: Utc::now(),
        };
        self.set_history(self.history_ref().record(step));
        *self.current_mut() = Some(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;

    fn door_machine(mode: TraversalMode) -> StateMachine<String> {
        let mut machine = StateMachine::with_mode(mode);
        machine.add_state(1, "closed".to_string()).unwrap();
        machine.add_state(2, "open".to_string()).unwrap();
        machine.add_accepting_state(3, "locked".to_string()).unwrap();
        machine.add_transition(1, "open", 2).unwrap();
        machine.add_transition(2, "close", 1).unwrap();
        machine.add_transition(1, "lock", 3).unwrap();
        machine.set_initial_state(1).unwrap();
        machine
    }

    #[test]
    fn transition_moves_current_and_records_history() {
        let mut machine = door_machine(TraversalMode::Strict);

        assert_eq!(machine.transition("open").unwrap(), 2);
        assert_eq!(machine.transition("close").unwrap(), 1);

        assert_eq!(machine.current_state(), Some(1));
        assert_eq!(machine.state_history(), vec![1, 2, 1]);
    }

    #[test]
    fn strict_mode_fails_on_undefined_symbol() {
        let mut machine = door_machine(TraversalMode::Strict);

        let result = machine.transition("explode");

        assert_eq!(
            result,
            Err(MachineError::NoTransition {
                from: 1,
                symbol: "explode".to_string(),
            })
        );
        assert_eq!(machine.current_state(), Some(1));
        assert_eq!(machine.state_history(), vec![1]);
    }

    #[test]
    fn permissive_mode_holds_position_on_undefined_symbol() {
        let mut machine = door_machine(TraversalMode::Permissive);

        assert_eq!(machine.transition("explode").unwrap(), 1);

        assert_eq!(machine.current_state(), Some(1));
        assert!(machine.history().is_empty());
    }

    #[test]
    fn next_state_peeks_without_moving() {
        let machine = door_machine(TraversalMode::Strict);

        assert_eq!(machine.next_state("open"), Some(2));
        assert_eq!(machine.next_state("explode"), None);
        assert_eq!(machine.current_state(), Some(1));
    }

    #[test]
    fn process_sequence_returns_final_state() {
        let mut machine = door_machine(TraversalMode::Strict);

        let end = machine
            .process_sequence(&["open", "close", "lock"])
            .unwrap();

        assert_eq!(end, 3);
        assert!(machine.is_accepting());
        assert_eq!(machine.state_history(), vec![1, 2, 1, 3]);
    }

    #[test]
    fn accepts_runs_without_mutating_traversal_state() {
        let machine = door_machine(TraversalMode::Strict);

        assert!(machine.accepts(&["lock"]).unwrap());
        assert!(!machine.accepts(&["open"]).unwrap());

        assert_eq!(machine.current_state(), Some(1));
        assert!(machine.history().is_empty());
    }

    #[test]
    fn accepts_in_strict_mode_errors_on_undefined_symbol() {
        let machine = door_machine(TraversalMode::Strict);
        assert!(machine.accepts(&["explode"]).is_err());
    }

    #[test]
    fn accepts_in_permissive_mode_holds_on_undefined_symbol() {
        let machine = door_machine(TraversalMode::Permissive);
        assert!(machine.accepts(&["explode", "lock"]).unwrap());
    }

    #[test]
    fn reset_restores_initial_and_clears_history() {
        let mut machine = door_machine(TraversalMode::Strict);
        machine.process_sequence(&["open", "close"]).unwrap();

        machine.reset().unwrap();

        assert_eq!(machine.current_state(), Some(1));
        assert!(machine.history().is_empty());
        assert_eq!(machine.state_history(), vec![1]);
    }

    #[test]
    fn cached_transition_hits_on_second_traversal() {
        let mut machine = door_machine(TraversalMode::Strict);
        let mut cache = TransitionCache::new(CacheConfig::default());

        assert_eq!(machine.transition_cached(&mut cache, "open").unwrap(), 2);
        machine.reset().unwrap();
        assert_eq!(machine.transition_cached(&mut cache, "open").unwrap(), 2);

        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn cached_transition_does_not_cache_failures() {
        let mut machine = door_machine(TraversalMode::Strict);
        let mut cache = TransitionCache::new(CacheConfig::default());

        assert!(machine.transition_cached(&mut cache, "explode").is_err());

        assert!(cache.is_empty());
    }
}
