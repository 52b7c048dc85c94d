// Copyright (c) 2025 - Cowboy AI, Inc.
//! Once - Run a function at most one time
//!
//! The wrapped function is consumed by its first call; the result is kept
//! and handed back on every later call.
//!
//! ```text
//! Pending(f) ──call(args)──▶ Called(f(args)) ──call(_)──▶ Called(same)
//! ```

use std::mem;
use tracing::trace;

enum OnceState<F, R> {
    Pending(F),
    Running,
    Called(R),
}

/// Decorator that invokes its function on the first call only
///
/// Arguments are passed as a single value; use a tuple for several, and put
/// a receiver in the tuple when the function needs one.
///
/// # Examples
///
/// ```rust
/// use underbar::decorators::once;
///
/// let mut initialize = once(|(name, size): (&str, usize)| format!("{}:{}", name, size));
///
/// assert_eq!(initialize.call(("cache", 16)), "cache:16");
/// assert_eq!(initialize.call(("other", 99)), "cache:16");
/// ```
pub struct Once<F, R> {
    state: OnceState<F, R>,
}

/// Wrap `func` so it runs at most once
pub fn once<F, R>(func: F) -> Once<F, R> {
    Once::new(func)
}

impl<F, R> Once<F, R> {
    /// Wrap `func` so it runs at most once
    pub fn new(func: F) -> Self {
        Self {
            state: OnceState::Pending(func),
        }
    }

    /// Invoke the function on the first call, then return its stored result
    ///
    /// Later calls ignore `args`.
    ///
    /// # Panics
    ///
    /// If the wrapped function panicked during the first call.
    pub fn call<A>(&mut self, args: A) -> R
    where
        F: FnOnce(A) -> R,
        R: Clone,
    {
        if let OnceState::Pending(_) = self.state {
            if let OnceState::Pending(func) = mem::replace(&mut self.state, OnceState::Running) {
                trace!("invoking once-wrapped function");
                self.state = OnceState::Called(func(args));
            }
        }

        match &self.state {
            OnceState::Called(result) => result.clone(),
            _ => panic!("once-wrapped function panicked on its first call"),
        }
    }

    /// True after the first call completed
    pub fn is_called(&self) -> bool {
        matches!(self.state, OnceState::Called(_))
    }

    /// Stored result, if the function has run
    pub fn result(&self) -> Option<&R> {
        match &self.state {
            OnceState::Called(result) => Some(result),
            _ => None,
        }
    }
}
