// Copyright (c) 2025 - Cowboy AI, Inc.
//! Functional utilities over sequences and mappings
//!
//! This crate provides a uniform iteration core, higher-order operations built
//! on it, set-like array algorithms, and function decorators driven by a
//! single-threaded timer scheduler.
//!
//! # Layers
//!
//! ```text
//! decorators (once, memoize, delay, throttle)
//!      │                         │
//!      │                    scheduler (timers, clock)
//!      ▼
//! arrays, objects (uniq, flatten, zip, intersection, difference, shuffle, ...)
//!      │
//!      ▼
//! functional (map, filter, reject, reduce, every, some, contains, index_of)
//!      │
//!      ▼
//! collection (Traversable, each)
//! ```

pub mod arrays;
pub mod collection;
pub mod decorators;
pub mod errors;
pub mod functional;
pub mod objects;
pub mod scheduler;

// Re-export commonly used types
pub use collection::{each, JsonCollection, JsonKey, Traversable};
pub use decorators::{
    delay, memoize, once, throttle, try_delay, Memoize, Once, Throttle, ThrottleCall,
};
pub use errors::{UnderbarError, UnderbarResult};
pub use functional::Truthy;
pub use scheduler::{
    Clock, ManualClock, Scheduler, SchedulerConfig, TimerHandle, TimerId, TokioClock,
};
