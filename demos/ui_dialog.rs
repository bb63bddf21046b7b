//! UI Dialog State Graph Minimization
//!
//! This example builds a transition graph for a dialog widget in which
//! two intermediate states behave identically, minimizes it, and prints
//! the reduction metrics.
//!
//! Key concepts:
//! - Incremental graph construction with the fluent builder
//! - Signature-based equivalence of UI states
//! - Reduction metrics for reporting
//!
//! Run with: cargo run --example ui_dialog

use quotient::builder::StateMachineBuilder;
use quotient::{minimize, MinimizeOptions};

fn main() {
    println!("=== UI Dialog State Graph ===\n");

    // "confirm" and "confirm_alt" are two code paths that ended up with
    // identical behavior: both close the dialog on "ok".
    let machine = StateMachineBuilder::new()
        .state(1, "hidden".to_string())
        .state(2, "visible".to_string())
        .state(3, "confirm".to_string())
        .state(4, "confirm_alt".to_string())
        .accepting_state(5, "closed".to_string())
        .transition(1, "show", 2)
        .transition(2, "ask", 3)
        .transition(2, "ask_alt", 4)
        .transition(3, "ok", 5)
        .transition(4, "ok", 5)
        .initial(1)
        .build()
        .unwrap();

    println!("Original machine:");
    println!("  states:      {}", machine.state_count());
    println!("  transitions: {}", machine.transition_count());

    let result = minimize(&machine, &MinimizeOptions::default()).unwrap();
    let metrics = result.metrics.unwrap();

    println!("\nMinimized machine:");
    println!("  states:      {}", metrics.minimized_state_count);
    println!("  transitions: {}", metrics.minimized_transition_count);
    println!("  classes:     {}", metrics.equivalence_class_count);
    println!("  rounds:      {}", metrics.rounds);
    println!(
        "  state reduction: {:.0}%",
        metrics.state_reduction_ratio * 100.0
    );

    println!("\nState mapping (original -> representative):");
    for (original, representative) in &result.state_mapping {
        println!("  {} -> {}", original, representative);
    }

    // Both ask paths still close the dialog.
    let minimized = result.machine;
    assert!(minimized.accepts(&["show", "ask", "ok"]).unwrap());
    assert!(minimized.accepts(&["show", "ask_alt", "ok"]).unwrap());
    println!("\nBehavior preserved: both ask paths close the dialog");

    println!("\n=== Example Complete ===");
}
