//! Quotient: state machine minimization via partition refinement
//!
//! Quotient models deterministic state-transition graphs — UI states,
//! parser states — and merges semantically equivalent states before the
//! machine is used to drive downstream work. Equivalence is computed by
//! signature-based partition refinement: states are grouped by a
//! canonical encoding of their acceptance status and transition
//! structure, and the grouping is refined to a fixed point.
//!
//! # Core Concepts
//!
//! - **StateMachine**: a mutable directed labeled graph with one initial
//!   state and a traversal pointer
//! - **Minimization**: merging all equivalent states into lowest-id
//!   representatives while preserving transition behavior
//! - **Traversal**: running symbol sequences against the original or the
//!   minimized machine, with append-only history
//! - **TransitionCache**: a bounded LRU/LFU/FIFO/TTL cache for computed
//!   transition results
//!
//! # Example
//!
//! ```rust
//! use quotient::{minimize, MinimizeOptions, StateMachine};
//!
//! let mut machine = StateMachine::new();
//! machine.add_state(1, "menu".to_string()).unwrap();
//! machine.add_state(2, "settings".to_string()).unwrap();
//! machine.add_state(3, "preferences".to_string()).unwrap();
//! machine.add_accepting_state(4, "saved".to_string()).unwrap();
//! machine.add_transition(1, "open", 2).unwrap();
//! machine.add_transition(1, "alt", 3).unwrap();
//! machine.add_transition(2, "save", 4).unwrap();
//! machine.add_transition(3, "save", 4).unwrap();
//! machine.set_initial_state(1).unwrap();
//!
//! // Settings and preferences behave identically and merge.
//! let result = minimize(&machine, &MinimizeOptions::default()).unwrap();
//! assert_eq!(result.machine.state_count(), 3);
//!
//! // The minimized machine accepts exactly what the original does.
//! let minimized = result.machine;
//! assert!(minimized.accepts(&["alt", "save"]).unwrap());
//! ```

pub mod builder;
pub mod cache;
pub mod checkpoint;
pub mod core;
pub mod minimize;

// Re-export commonly used types
pub use crate::core::{
    MachineError, StateId, StateMachine, StateNode, StateValue, Symbol, TraversalHistory,
    TraversalMode, TraversalStep,
};
pub use builder::{BuildError, StateMachineBuilder};
pub use cache::{
    CacheConfig, CacheEntry, CacheKey, CacheStatistics, CacheStrategy, TransitionCache,
};
pub use checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
pub use minimize::{
    minimize, Minimization, MinimizationMetrics, MinimizeError, MinimizeOptions,
};
