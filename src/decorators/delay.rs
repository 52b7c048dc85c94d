// Copyright (c) 2025 - Cowboy AI, Inc.
//! Delay - Invoke a function once, later

use std::time::Duration;

use crate::errors::UnderbarResult;
use crate::scheduler::{Scheduler, TimerHandle};

/// Call `func(args)` once, `wait` from now, on `scheduler`
///
/// Returns immediately. The call happens when the scheduler is drained past
/// the deadline, unless the returned handle cancels it first.
///
/// # Errors
///
/// Scheduling errors (`InvalidArgument`, `SchedulerFull`) are reported here,
/// at schedule time.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use underbar::decorators::delay;
/// use underbar::scheduler::{ManualClock, Scheduler, SchedulerConfig};
///
/// let clock = ManualClock::new();
/// let scheduler = Scheduler::with_clock(SchedulerConfig::default(), clock.clone());
/// let said = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = said.clone();
/// delay(
///     &scheduler,
///     move |(a, b): (&str, &str)| sink.borrow_mut().push(format!("{}{}", a, b)),
///     Duration::from_millis(500),
///     ("a", "b"),
/// )
/// .unwrap();
///
/// clock.advance(Duration::from_millis(500));
/// scheduler.run_due().unwrap();
/// assert_eq!(*said.borrow(), vec!["ab".to_string()]);
/// ```
pub fn delay<F, A>(
    scheduler: &Scheduler,
    func: F,
    wait: Duration,
    args: A,
) -> UnderbarResult<TimerHandle>
where
    F: FnOnce(A) + 'static,
    A: 'static,
{
    scheduler.schedule(wait, move || {
        func(args);
        Ok(())
    })
}

/// Like `delay`, for a function that can fail
///
/// An error returned by `func` surfaces from the scheduler call that fires
/// it (`run_due` / `run_until_idle`) as `TaskFailed`.
pub fn try_delay<F, A>(
    scheduler: &Scheduler,
    func: F,
    wait: Duration,
    args: A,
) -> UnderbarResult<TimerHandle>
where
    F: FnOnce(A) -> anyhow::Result<()> + 'static,
    A: 'static,
{
    scheduler.schedule(wait, move || func(args))
}
