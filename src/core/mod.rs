//! Core state machine types.
//!
//! This module contains the transition graph and its runtime:
//! - State nodes and identifiers ([`StateNode`], [`StateId`])
//! - The mutable graph with construction and maintenance operations
//!   ([`StateMachine`])
//! - Traversal of symbol sequences with history tracking

mod error;
mod history;
mod machine;
mod state;
mod traverse;

pub use error::MachineError;
pub use history::{TraversalHistory, TraversalStep};
pub use machine::StateMachine;
pub use state::{StateId, StateNode, StateValue, Symbol};
pub use traverse::TraversalMode;
