//! Errors raised by graph construction and traversal.

use super::state::{StateId, Symbol};
use thiserror::Error;

/// Errors that can occur while building or traversing a state machine.
///
/// Construction errors are surfaced synchronously and always rejected
/// before any mutation takes place, so a failed call leaves the machine
/// exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("State {0} already exists")]
    DuplicateState(StateId),

    #[error("State {0} does not exist")]
    UnknownState(StateId),

    #[error("Transition from state {from} on '{symbol}' points at missing state {to}")]
    DanglingTransition {
        from: StateId,
        symbol: Symbol,
        to: StateId,
    },

    #[error("No transition on symbol '{symbol}' from state {from}")]
    NoTransition { from: StateId, symbol: Symbol },

    #[error("No initial state has been set. Call set_initial_state(id) first")]
    NoInitialState,
}
