//! State identifiers, symbols, and graph nodes.
//!
//! A state machine is a directed labeled graph: nodes carry an opaque
//! value payload, edges are keyed by an input symbol. At most one target
//! exists per `(state, symbol)` pair, so the transition structure is
//! deterministic by construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Unique identifier for a state within one machine. Ids are assigned by
/// the caller and stay stable across minimization only through the
/// returned state mapping.
pub type StateId = u64;

/// Input symbol labeling a transition edge. The alphabet of a machine is
/// the set of all symbols appearing on any of its transitions, ordered
/// lexicographically wherever a stable ordering is needed.
pub type Symbol = String;

/// Bounds for the opaque value payload carried by each state.
///
/// This is a marker trait with a blanket implementation: any type that is
/// cloneable, comparable, debuggable, serializable, and thread-safe can be
/// used as a state value.
///
/// # Example
///
/// ```rust
/// use quotient::StateMachine;
///
/// // String payloads satisfy StateValue out of the box.
/// let mut machine: StateMachine<String> = StateMachine::new();
/// machine.add_state(1, "idle".to_string()).unwrap();
/// ```
pub trait StateValue:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

impl<T> StateValue for T where
    T: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

/// A node in the transition graph.
///
/// Besides its identity, value, and outgoing transitions, a node carries
/// minimization metadata (`equivalence_class`, `signature`, `minimized`)
/// which is recomputed on every minimization pass and never read by the
/// traversal engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateNode<V: StateValue> {
    /// Caller-assigned identifier, unique per machine.
    pub id: StateId,
    /// Opaque value payload.
    pub value: V,
    /// Terminal/accepting flag. Machines without any accepting state are
    /// partitioned purely by transition structure.
    pub accepting: bool,
    /// Outgoing transitions, keyed by symbol. Sorted iteration order gives
    /// deterministic alphabet collection.
    pub(crate) transitions: BTreeMap<Symbol, StateId>,
    /// Equivalence class assigned by the last minimization pass.
    pub equivalence_class: Option<usize>,
    /// Signature string from the last minimization pass.
    pub signature: Option<String>,
    /// Whether this node was produced by the minimized-machine builder.
    pub minimized: bool,
}

impl<V: StateValue> StateNode<V> {
    pub(crate) fn new(id: StateId, value: V, accepting: bool) -> Self {
        Self {
            id,
            value,
            accepting,
            transitions: BTreeMap::new(),
            equivalence_class: None,
            signature: None,
            minimized: false,
        }
    }

    /// Target of the transition on `symbol`, if one is defined.
    pub fn target(&self, symbol: &str) -> Option<StateId> {
        self.transitions.get(symbol).copied()
    }

    /// Outgoing transitions in symbol order.
    pub fn transitions(&self) -> &BTreeMap<Symbol, StateId> {
        &self.transitions
    }

    /// Number of outgoing transitions.
    pub fn degree(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn clear_minimization_metadata(&mut self) {
        self.equivalence_class = None;
        self.signature = None;
    }
}
