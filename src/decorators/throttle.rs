// Copyright (c) 2025 - Cowboy AI, Inc.
//! Throttle - At most one invocation per time window
//!
//! # Policy
//!
//! - **Leading edge**: the first call of a window invokes the function
//!   immediately and opens a new window of length `wait`.
//! - **Trailing edge**: calls made while the window is open are suppressed.
//!   If there were any, exactly one trailing invocation runs when the window
//!   closes, with the arguments of the most recent suppressed call. The
//!   trailing invocation opens the next window.
//!
//! ```text
//! wait = 100ms
//!
//! calls:   ●●●●●                    ●
//!          0  10ms                  150ms
//! invokes: ▲                ▲       (suppressed)      ▲
//!          0 (leading)      100ms (trailing, args of  200ms (trailing)
//!                                  the 5th call)
//! ```
//!
//! Trailing invocations run on the `Scheduler` the wrapper was built with,
//! so they only happen while that scheduler is being drained. If a new window
//! opens before a due trailing call was drained, the newer call wins and the
//! stale trailing call is skipped.

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::errors::UnderbarResult;
use crate::scheduler::{Scheduler, TimerHandle};

/// What a call to a throttled wrapper did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleCall {
    /// Invoked immediately on the leading edge
    Invoked,
    /// Suppressed; a trailing invocation was scheduled for the window's end
    Deferred,
    /// Suppressed; replaced the arguments of the already scheduled trailing invocation
    Coalesced,
}

struct Window<A> {
    last_invoked: Option<Instant>,
    trailing_args: Option<A>,
    trailing: Option<TimerHandle>,
    /// Bumped whenever a window opens or is canceled; stale trailing timers
    /// compare against it and do nothing
    generation: u64,
}

impl<A> Window<A> {
    fn open(&mut self, now: Instant) {
        self.last_invoked = Some(now);
        self.generation += 1;
        self.trailing_args = None;
        if let Some(handle) = self.trailing.take() {
            handle.cancel();
        }
    }
}

struct Inner<F, A> {
    func: RefCell<F>,
    window: RefCell<Window<A>>,
    scheduler: Scheduler,
    wait: Duration,
}

impl<F, A> Inner<F, A>
where
    F: FnMut(A) + 'static,
    A: 'static,
{
    /// Arm the trailing timer `wait` from now for the current generation
    fn schedule_trailing(self: &Rc<Self>, window: &mut Window<A>, wait: Duration) -> UnderbarResult<()> {
        let generation = window.generation;
        let weak = Rc::downgrade(self);
        let scheduled = self.scheduler.schedule(wait, move || {
            if let Some(inner) = weak.upgrade() {
                inner.fire_trailing(generation);
            }
            Ok(())
        });

        match scheduled {
            Ok(handle) => {
                trace!(
                    scheduler = %self.scheduler.config().name,
                    timer = %handle.id(),
                    "throttle call deferred to trailing edge"
                );
                window.trailing = Some(handle);
                Ok(())
            }
            Err(err) => {
                window.trailing_args = None;
                Err(err)
            }
        }
    }

    fn fire_trailing(self: &Rc<Self>, generation: u64) {
        let (func, args) = {
            let mut window = self.window.borrow_mut();
            if window.generation != generation {
                trace!(scheduler = %self.scheduler.config().name, "stale trailing call skipped");
                return;
            }
            window.trailing = None;
            // The running invocation re-arms the timer when it returns
            let Ok(func) = self.func.try_borrow_mut() else {
                trace!(scheduler = %self.scheduler.config().name, "trailing call waits for running invocation");
                return;
            };
            let Some(args) = window.trailing_args.take() else {
                return;
            };
            window.open(self.scheduler.now());
            (func, args)
        };

        debug!(scheduler = %self.scheduler.config().name, "throttle trailing invocation");
        self.invoke(func, args);
    }

    fn invoke(self: &Rc<Self>, mut func: RefMut<'_, F>, args: A) {
        (*func)(args);
        drop(func);
        self.flush_held_call();
    }

    /// Arguments held while the function was running get a trailing timer
    /// for whatever is left of the window
    fn flush_held_call(self: &Rc<Self>) {
        let mut window = self.window.borrow_mut();
        if window.trailing_args.is_none() || window.trailing.is_some() {
            return;
        }

        let now = self.scheduler.now();
        let elapsed = window
            .last_invoked
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        if let Err(err) = self.schedule_trailing(&mut window, self.wait.saturating_sub(elapsed)) {
            warn!(
                scheduler = %self.scheduler.config().name,
                error = %err,
                "held throttle call dropped"
            );
        }
    }
}

/// Rate-limited wrapper around a function
///
/// Clones share the same window state.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use underbar::decorators::{throttle, ThrottleCall};
/// use underbar::scheduler::{ManualClock, Scheduler, SchedulerConfig};
///
/// let clock = ManualClock::new();
/// let scheduler = Scheduler::with_clock(SchedulerConfig::default(), clock.clone());
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = seen.clone();
/// let save = throttle(&scheduler, move |n: u32| sink.borrow_mut().push(n), Duration::from_millis(100));
///
/// assert_eq!(save.call(1).unwrap(), ThrottleCall::Invoked);
/// assert_eq!(save.call(2).unwrap(), ThrottleCall::Deferred);
/// assert_eq!(save.call(3).unwrap(), ThrottleCall::Coalesced);
///
/// clock.advance(Duration::from_millis(100));
/// scheduler.run_due().unwrap();
/// assert_eq!(*seen.borrow(), vec![1, 3]);
/// ```
pub struct Throttle<F, A> {
    inner: Rc<Inner<F, A>>,
}

impl<F, A> Clone for Throttle<F, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F, A> fmt::Debug for Throttle<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let window = self.inner.window.borrow();
        f.debug_struct("Throttle")
            .field("wait", &self.inner.wait)
            .field("last_invoked", &window.last_invoked)
            .field("trailing_pending", &window.trailing_args.is_some())
            .finish()
    }
}

/// Wrap `func` so it runs at most once per `wait`, leading and trailing
pub fn throttle<F, A>(scheduler: &Scheduler, func: F, wait: Duration) -> Throttle<F, A>
where
    F: FnMut(A) + 'static,
    A: 'static,
{
    Throttle::new(scheduler, func, wait)
}

impl<F, A> Throttle<F, A>
where
    F: FnMut(A) + 'static,
    A: 'static,
{
    /// Wrap `func` so it runs at most once per `wait`, leading and trailing
    pub fn new(scheduler: &Scheduler, func: F, wait: Duration) -> Self {
        Self {
            inner: Rc::new(Inner {
                func: RefCell::new(func),
                window: RefCell::new(Window {
                    last_invoked: None,
                    trailing_args: None,
                    trailing: None,
                    generation: 0,
                }),
                scheduler: scheduler.clone(),
                wait,
            }),
        }
    }

    /// Call the throttled function
    ///
    /// A call made from inside the running function never re-enters it: it
    /// is held like a suppressed call and runs on the trailing edge.
    ///
    /// # Errors
    ///
    /// Scheduling errors for the trailing invocation are reported here; the
    /// suppressed arguments are dropped in that case.
    pub fn call(&self, args: A) -> UnderbarResult<ThrottleCall> {
        let inner = &self.inner;
        let now = inner.scheduler.now();
        let mut window = inner.window.borrow_mut();

        let elapsed = window
            .last_invoked
            .map(|last| now.saturating_duration_since(last));
        let remaining = match elapsed {
            Some(elapsed) if elapsed < inner.wait => inner.wait - elapsed,
            _ => match inner.func.try_borrow_mut() {
                Ok(func) => {
                    window.open(now);
                    drop(window);

                    debug!(scheduler = %inner.scheduler.config().name, "throttle leading invocation");
                    inner.invoke(func, args);
                    return Ok(ThrottleCall::Invoked);
                }
                Err(_) => {
                    trace!(scheduler = %inner.scheduler.config().name, "re-entrant throttle call held");
                    let held = window.trailing_args.replace(args).is_some();
                    return Ok(if held {
                        ThrottleCall::Coalesced
                    } else {
                        ThrottleCall::Deferred
                    });
                }
            },
        };

        window.trailing_args = Some(args);
        if window.trailing.is_some() {
            trace!(scheduler = %inner.scheduler.config().name, "throttle call coalesced");
            return Ok(ThrottleCall::Coalesced);
        }

        inner.schedule_trailing(&mut window, remaining)?;
        Ok(ThrottleCall::Deferred)
    }

    /// Drop a pending trailing invocation
    ///
    /// Returns `true` if one was pending. The current window stays open.
    pub fn cancel(&self) -> bool {
        let mut window = self.inner.window.borrow_mut();
        window.generation += 1;
        if let Some(handle) = window.trailing.take() {
            handle.cancel();
        }
        window.trailing_args.take().is_some()
    }

    /// True while a trailing invocation is waiting for the window to close
    pub fn has_trailing(&self) -> bool {
        self.inner.window.borrow().trailing_args.is_some()
    }
}
