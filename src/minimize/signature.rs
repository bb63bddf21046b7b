//! State signature computation.
//!
//! A signature is a canonical string encoding of a state's acceptance
//! status and transition structure relative to a class assignment. Two
//! states are equivalent under a partition iff their signatures are
//! identical.

use crate::core::{StateId, StateNode, StateValue, Symbol};
use std::collections::BTreeMap;

/// Sentinel class id encoding "no transition on this symbol". Kept
/// distinct from every real class id so a missing edge never compares
/// equal to an edge into any class.
pub const NO_TRANSITION_CLASS: i64 = -1;

/// Build the signature of `node` under `classes`.
///
/// The format is `<flag>|<class>:<class>:...` where `<flag>` is `A` for
/// accepting states and `N` otherwise, and one class id appears for each
/// symbol of `alphabet` in order. The alphabet must be the full sorted
/// alphabet of the machine; the lexicographic ordering makes signatures
/// reproducible across runs.
pub(crate) fn signature_of<V: StateValue>(
    node: &StateNode<V>,
    alphabet: &[Symbol],
    classes: &BTreeMap<StateId, usize>,
) -> String {
    let mut parts = Vec::with_capacity(alphabet.len());
    for symbol in alphabet {
        let class = node
            .target(symbol)
            .and_then(|target| classes.get(&target))
            .map(|&class| class as i64)
            .unwrap_or(NO_TRANSITION_CLASS);
        parts.push(class.to_string());
    }
    let flag = if node.accepting { 'A' } else { 'N' };
    format!("{}|{}", flag, parts.join(":"))
}
