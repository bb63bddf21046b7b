//! Parser State Deduplication
//!
//! This example models a fragment of an attribute-value tokenizer the
//! way a markup parser would extract it, then minimizes the resulting
//! machine. Parser generators routinely emit structurally duplicated
//! states; minimization folds them before the table drives anything.
//!
//! Run with: cargo run --example parse_states

use quotient::{minimize, state_machine, MinimizeOptions};

fn main() {
    println!("=== Tokenizer State Deduplication ===\n");

    // Two quote styles produce twin scanning states: inside single or
    // double quotes, any character loops, the matching quote closes.
    let machine = state_machine! {
        initial: 1,
        states: {
            1 => "before_value".to_string(),
            2 => "in_double_quoted".to_string(),
            3 => "in_single_quoted".to_string(),
            4 => "after_value".to_string(),
        },
        accepting: [4],
        transitions: {
            1, "dquote" => 2;
            1, "squote" => 3;
            2, "char" => 2;
            3, "char" => 3;
            2, "quote_end" => 4;
            3, "quote_end" => 4;
        }
    }
    .unwrap();

    println!(
        "Original tokenizer: {} states, {} transitions",
        machine.state_count(),
        machine.transition_count()
    );

    let result = minimize(&machine, &MinimizeOptions::default()).unwrap();
    let metrics = result.metrics.unwrap();

    println!(
        "Minimized tokenizer: {} states, {} transitions",
        metrics.minimized_state_count, metrics.minimized_transition_count
    );
    println!(
        "The twin quoted-value states merged: 3 -> {}",
        result.state_mapping[&3]
    );

    // Equivalence classes survive on the minimized nodes for inspection.
    println!("\nEquivalence classes:");
    for node in result.machine.states() {
        println!(
            "  state {} ({}) in class {:?}",
            node.id, node.value, node.equivalence_class
        );
    }

    println!("\n=== Example Complete ===");
}
