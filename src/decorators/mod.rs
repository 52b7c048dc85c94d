// Copyright (c) 2025 - Cowboy AI, Inc.
//! Function Decorators
//!
//! Wrappers that change *when* or *how often* a function runs, without
//! changing what it computes.
//!
//! # Decorators
//!
//! ## Once<F, R>
//!
//! Runs the function on the first call and returns that result forever.
//!
//! ## Memoize<F, R>
//!
//! Caches one result per distinct argument list, keyed by the arguments'
//! JSON serialization.
//!
//! ## delay / try_delay
//!
//! Schedules a single invocation on a `Scheduler` after a wait.
//!
//! ## Throttle<F, A>
//!
//! Runs the function at most once per window: immediately on the leading
//! edge, then once more on the trailing edge if calls were suppressed.
//!
//! ```text
//! Time:    ──────────────────────────────────→
//! Calls:   ●●●●●
//! Invoked: ●                 ●
//!          leading           trailing
//! ```
//!
//! # Arguments
//!
//! Every decorated function takes exactly one argument value. Functions of
//! several arguments take a tuple, and a receiver is passed as the tuple's
//! first element.
//!
//! # Scheduling
//!
//! `delay` and `throttle` never block and never spawn threads. Deferred work
//! is queued on a single-threaded `Scheduler` and runs when that scheduler is
//! drained; see [`crate::scheduler`].

pub mod delay;
pub mod memoize;
pub mod once;
pub mod throttle;

pub use delay::{delay, try_delay};
pub use memoize::{memoize, Memoize};
pub use once::{once, Once};
pub use throttle::{throttle, Throttle, ThrottleCall};
