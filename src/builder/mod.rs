//! Builder API for ergonomic state machine construction.
//!
//! Provides a fluent builder and a declarative macro for creating
//! machines with minimal boilerplate. Validation happens at `build()`:
//! duplicate ids, unknown transition endpoints, and a missing initial
//! state are all reported before a machine is returned.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::core::{StateId, StateMachine, StateValue, Symbol, TraversalMode};

/// Fluent builder for [`StateMachine`].
///
/// # Example
///
/// ```rust
/// use quotient::builder::StateMachineBuilder;
///
/// let machine = StateMachineBuilder::new()
///     .state(1, "draft".to_string())
///     .state(2, "review".to_string())
///     .accepting_state(3, "published".to_string())
///     .transition(1, "submit", 2)
///     .transition(2, "approve", 3)
///     .initial(1)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.state_count(), 3);
/// assert_eq!(machine.initial_state(), Some(1));
/// ```
pub struct StateMachineBuilder<V: StateValue> {
    mode: TraversalMode,
    initial: Option<StateId>,
    states: Vec<(StateId, V, bool)>,
    accepting: Vec<StateId>,
    transitions: Vec<(StateId, Symbol, StateId)>,
}

impl<V: StateValue> StateMachineBuilder<V> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            mode: TraversalMode::Strict,
            initial: None,
            states: Vec::new(),
            accepting: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the traversal mode (strict by default).
    pub fn mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Declare a non-accepting state.
    pub fn state(mut self, id: StateId, value: V) -> Self {
        self.states.push((id, value, false));
        self
    }

    /// Declare an accepting state.
    pub fn accepting_state(mut self, id: StateId, value: V) -> Self {
        self.states.push((id, value, true));
        self
    }

    /// Mark an already-declared state as accepting.
    pub fn accepting(mut self, id: StateId) -> Self {
        self.accepting.push(id);
        self
    }

    /// Declare a transition.
    pub fn transition(mut self, from: StateId, symbol: impl Into<Symbol>, to: StateId) -> Self {
        self.transitions.push((from, symbol.into(), to));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, id: StateId) -> Self {
        self.initial = Some(id);
        self
    }

    /// Build the state machine.
    ///
    /// Declarations are replayed in order, so the first error reported
    /// matches the first offending call site.
    pub fn build(self) -> Result<StateMachine<V>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = StateMachine::with_mode(self.mode);
        for (id, value, accepting) in self.states {
            if accepting {
                machine.add_accepting_state(id, value)?;
            } else {
                machine.add_state(id, value)?;
            }
        }
        for id in self.accepting {
            machine.set_accepting(id, true)?;
        }
        for (from, symbol, to) in self.transitions {
            machine.add_transition(from, symbol, to)?;
        }
        machine.set_initial_state(initial)?;

        Ok(machine)
    }
}

impl<V: StateValue> Default for StateMachineBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
