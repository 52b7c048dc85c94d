// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for underbar
//!
//! Provides deterministic collections and a manually driven scheduler.
//! No test depends on wall-clock time or on an unseeded random generator.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map, Value};
use std::sync::Once;

use underbar::scheduler::{ManualClock, Scheduler, SchedulerConfig};

/// Fixed seed for every shuffle in the suite
pub const SHUFFLE_SEED: u64 = 0x5eed_cafe;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=underbar=trace cargo test`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Scheduler whose time only moves when the returned clock is advanced
pub fn manual_scheduler() -> (ManualClock, Scheduler) {
    init_tracing();
    let clock = ManualClock::new();
    let scheduler = Scheduler::with_clock(
        SchedulerConfig::default().with_name("fixture"),
        clock.clone(),
    );
    (clock, scheduler)
}

/// Deterministic random generator
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(SHUFFLE_SEED)
}

/// Three records with overlapping keys
pub fn stooges() -> Vec<Value> {
    vec![
        json!({"name": "moe", "age": 40}),
        json!({"name": "larry", "age": 50}),
        json!({"name": "curly", "age": 60}),
    ]
}

/// Object used as the destination of extend/defaults tests
pub fn flavor_settings() -> Map<String, Value> {
    match json!({"flavor": "chocolate", "sprinkles": null}) {
        Value::Object(map) => map,
        _ => unreachable!("fixture literal is an object"),
    }
}

/// Object used as a source of extend/defaults tests
pub fn ice_cream_defaults() -> Map<String, Value> {
    match json!({"flavor": "vanilla", "sprinkles": "lots", "cone": "waffle"}) {
        Value::Object(map) => map,
        _ => unreachable!("fixture literal is an object"),
    }
}
