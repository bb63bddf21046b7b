//! Cached Traversal
//!
//! This example drives a machine through repeated runs with a bounded
//! LRU transition cache and prints the observed hit ratio.
//!
//! Run with: cargo run --example cached_traversal

use quotient::builder::StateMachineBuilder;
use quotient::{CacheConfig, CacheStrategy, TransitionCache};

fn main() {
    println!("=== Cached Traversal ===\n");

    let mut machine = StateMachineBuilder::new()
        .state(1, "idle".to_string())
        .state(2, "loading".to_string())
        .state(3, "ready".to_string())
        .transition(1, "fetch", 2)
        .transition(2, "done", 3)
        .transition(3, "refresh", 2)
        .initial(1)
        .build()
        .unwrap();

    let mut cache = TransitionCache::new(CacheConfig {
        capacity: 16,
        strategy: CacheStrategy::Lru,
        default_ttl: None,
    });

    // The same cycle traversed repeatedly: every round after the first
    // is served from the cache.
    for _ in 0..5 {
        machine.reset().unwrap();
        machine.transition_cached(&mut cache, "fetch").unwrap();
        machine.transition_cached(&mut cache, "done").unwrap();
        machine.transition_cached(&mut cache, "refresh").unwrap();
    }

    let stats = cache.stats();
    println!("Cache entries:   {}", cache.len());
    println!("Cache hits:      {}", stats.hits);
    println!("Cache misses:    {}", stats.misses);
    println!("Hit ratio:       {:.2}", stats.hit_ratio());

    println!("\nLast run visited: {:?}", machine.state_history());

    println!("\n=== Example Complete ===");
}
