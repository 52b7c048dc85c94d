// Copyright (c) 2025 - Cowboy AI, Inc.
//! Clock - Time source for the scheduler
//!
//! The scheduler never reads ambient time directly. It asks a `Clock`, which
//! is either backed by the tokio timer (`TokioClock`) or advanced by hand
//! (`ManualClock`) for deterministic tests.

use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::Instant;

/// Monotonic time source with a way to wait for a deadline
#[async_trait(?Send)]
pub trait Clock {
    /// Current instant
    fn now(&self) -> Instant;

    /// Suspend until `deadline` has been reached
    async fn sleep_until(&self, deadline: Instant);
}

/// Clock backed by the tokio timer
///
/// Honors tokio's paused time, so `#[tokio::test(start_paused = true)]`
/// runs time-based code without real waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait(?Send)]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the scheduler.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Start a manual clock at the current instant
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a manual clock at `origin`
    pub fn starting_at(origin: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(origin)),
        }
    }

    /// Move time forward by `by`
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    async fn sleep_until(&self, deadline: Instant) {
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.advance(Duration::from_millis(250));

        assert_eq!(clock.now() - start, Duration::from_millis(250));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let shared = clock.clone();

        clock.advance(Duration::from_secs(1));

        assert_eq!(clock.now(), shared.now());
    }

    #[test]
    fn test_manual_sleep_jumps_forward_only() {
        let clock = ManualClock::new();
        let start = clock.now();

        tokio_test::block_on(clock.sleep_until(start + Duration::from_millis(40)));
        assert_eq!(clock.now(), start + Duration::from_millis(40));

        tokio_test::block_on(clock.sleep_until(start));
        assert_eq!(clock.now(), start + Duration::from_millis(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_sleeps_in_paused_time() {
        let clock = TokioClock;
        let deadline = clock.now() + Duration::from_secs(60);

        clock.sleep_until(deadline).await;

        assert!(clock.now() >= deadline);
    }
}
