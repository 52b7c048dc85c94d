// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cooperative Timer Scheduler
//!
//! A single-threaded event loop for deferred work. Timers are kept in a
//! priority queue ordered by deadline and drained on the caller's thread;
//! a deferred body never runs concurrently with anything else.
//!
//! # Ordering
//!
//! ```text
//! deadline ascending, then submission order
//!
//! schedule(30ms, a)  schedule(10ms, b)  schedule(10ms, c)
//!        │                  │                  │
//!        ▼                  ▼                  ▼
//! fires:   b (10ms)  →  c (10ms)  →  a (30ms)
//! ```
//!
//! # Driving the Loop
//!
//! - `run_due()` fires every timer whose deadline has passed and returns
//!   immediately.
//! - `run_until_idle().await` alternates between sleeping on the clock and
//!   firing due timers until the queue is empty.
//!
//! # Cancellation
//!
//! A `TimerHandle` can cancel its timer until the deadline passes. Once the
//! deadline has passed the timer counts as fired: `cancel` is refused even
//! if the loop has not drained it yet. Canceling after it fired is a no-op.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use underbar::scheduler::{ManualClock, Scheduler, SchedulerConfig};
//!
//! let clock = ManualClock::new();
//! let scheduler = Scheduler::with_clock(SchedulerConfig::default(), clock.clone());
//!
//! scheduler.schedule(Duration::from_millis(50), || Ok(())).unwrap();
//! assert_eq!(scheduler.run_due().unwrap(), 0);
//!
//! clock.advance(Duration::from_millis(50));
//! assert_eq!(scheduler.run_due().unwrap(), 1);
//! ```

pub mod clock;
pub mod config;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::SchedulerConfig;

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::errors::{UnderbarError, UnderbarResult};

/// Deferred body owned by the scheduler until it fires
type Task = Box<dyn FnOnce() -> anyhow::Result<()>>;

/// Identifier of a scheduled timer, unique per scheduler
///
/// Identifiers increase with submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw sequence number
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Deadline {
    at: Instant,
    id: TimerId,
}

struct PendingTimer {
    deadline: Instant,
    task: Task,
}

/// Heap of deadlines plus the live tasks
///
/// Canceled entries are skipped when they surface, and the heap is compacted
/// on cancel so it never holds more than twice the live timers.
#[derive(Default)]
struct TimerQueue {
    heap: BinaryHeap<Reverse<Deadline>>,
    pending: HashMap<TimerId, PendingTimer>,
    next_id: u64,
}

impl TimerQueue {
    fn push(&mut self, deadline: Instant, task: Task) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        self.heap.push(Reverse(Deadline { at: deadline, id }));
        self.pending.insert(id, PendingTimer { deadline, task });
        id
    }

    fn pop_due(&mut self, now: Instant) -> Option<(TimerId, Task)> {
        while let Some(Reverse(next)) = self.heap.peek() {
            if next.at > now {
                return None;
            }
            let id = next.id;
            self.heap.pop();
            if let Some(timer) = self.pending.remove(&id) {
                return Some((id, timer.task));
            }
        }
        None
    }

    /// Drop a live timer; rebuilds the heap once dead entries outnumber live ones
    fn cancel(&mut self, id: TimerId) -> bool {
        if self.pending.remove(&id).is_none() {
            return false;
        }
        if self.heap.len() > 2 * self.pending.len() {
            let pending = &self.pending;
            self.heap.retain(|Reverse(entry)| pending.contains_key(&entry.id));
        }
        true
    }

    fn next_deadline(&mut self) -> Option<Instant> {
        while let Some(Reverse(next)) = self.heap.peek() {
            if let Some(timer) = self.pending.get(&next.id) {
                return Some(timer.deadline);
            }
            self.heap.pop();
        }
        None
    }
}

struct Shared {
    config: SchedulerConfig,
    clock: Rc<dyn Clock>,
    queue: RefCell<TimerQueue>,
}

/// Single-threaded, deadline-ordered timer queue
///
/// Cloning a `Scheduler` yields another handle to the same queue.
#[derive(Clone)]
pub struct Scheduler {
    shared: Rc<Shared>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("name", &self.shared.config.name)
            .field("pending", &self.pending())
            .finish()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl Scheduler {
    /// Create a scheduler driven by the tokio clock
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_clock(config, TokioClock)
    }

    /// Create a scheduler driven by `clock`
    pub fn with_clock(config: SchedulerConfig, clock: impl Clock + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                config,
                clock: Rc::new(clock),
                queue: RefCell::new(TimerQueue::default()),
            }),
        }
    }

    /// Configuration this scheduler was built with
    pub fn config(&self) -> &SchedulerConfig {
        &self.shared.config
    }

    /// Current instant according to the scheduler's clock
    pub fn now(&self) -> Instant {
        self.shared.clock.now()
    }

    /// Schedule `task` to run once, `wait` from now
    ///
    /// Returns immediately with a handle that can cancel the timer.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `wait` exceeds the configured `max_wait`
    /// - `SchedulerFull` if `max_pending` timers are already waiting
    pub fn schedule<F>(&self, wait: Duration, task: F) -> UnderbarResult<TimerHandle>
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        let config = &self.shared.config;
        if wait > config.max_wait {
            return Err(UnderbarError::InvalidArgument(format!(
                "wait of {:?} exceeds the maximum of {:?}",
                wait, config.max_wait
            )));
        }

        let deadline = self.now().checked_add(wait).ok_or_else(|| {
            UnderbarError::InvalidArgument(format!("wait of {:?} overflows the clock", wait))
        })?;

        let mut queue = self.shared.queue.borrow_mut();
        if queue.pending.len() >= config.max_pending {
            warn!(
                scheduler = %config.name,
                limit = config.max_pending,
                "scheduler full, timer rejected"
            );
            return Err(UnderbarError::SchedulerFull {
                limit: config.max_pending,
            });
        }

        let id = queue.push(deadline, Box::new(task));
        debug!(
            scheduler = %config.name,
            timer = %id,
            wait_ms = wait.as_millis() as u64,
            "timer scheduled"
        );

        Ok(TimerHandle {
            id,
            deadline,
            shared: Rc::downgrade(&self.shared),
        })
    }

    /// Number of timers waiting to fire
    pub fn pending(&self) -> usize {
        self.shared.queue.borrow().pending.len()
    }

    /// Deadline of the next live timer
    pub fn next_deadline(&self) -> Option<Instant> {
        self.shared.queue.borrow_mut().next_deadline()
    }

    /// Fire every timer whose deadline has passed, in deadline order
    ///
    /// Timers scheduled by a firing body are picked up in the same pass when
    /// they are already due. Returns the number of timers fired.
    ///
    /// # Errors
    ///
    /// `TaskFailed` for the first body that returns an error. Timers after it
    /// stay queued for the next drain.
    pub fn run_due(&self) -> UnderbarResult<usize> {
        let mut fired = 0;
        loop {
            let now = self.now();
            let next = self.shared.queue.borrow_mut().pop_due(now);
            let Some((id, task)) = next else {
                break;
            };

            trace!(scheduler = %self.shared.config.name, timer = %id, "timer firing");
            task().map_err(|err| {
                warn!(
                    scheduler = %self.shared.config.name,
                    timer = %id,
                    error = %err,
                    "timer body failed"
                );
                UnderbarError::task_failed(id, err)
            })?;
            fired += 1;
        }
        Ok(fired)
    }

    /// Sleep between deadlines and fire timers until none remain
    ///
    /// Returns the total number of timers fired.
    pub async fn run_until_idle(&self) -> UnderbarResult<usize> {
        let mut fired = self.run_due()?;
        while let Some(deadline) = self.next_deadline() {
            self.shared.clock.sleep_until(deadline).await;
            fired += self.run_due()?;
        }
        debug!(scheduler = %self.shared.config.name, fired, "scheduler idle");
        Ok(fired)
    }
}

/// Cancellable handle to one scheduled timer
///
/// The handle does not keep the scheduler alive.
#[derive(Clone)]
pub struct TimerHandle {
    id: TimerId,
    deadline: Instant,
    shared: Weak<Shared>,
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl TimerHandle {
    /// Identifier of the timer
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Instant at which the timer fires
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// True while the timer is queued and has not fired or been canceled
    pub fn is_pending(&self) -> bool {
        match self.shared.upgrade() {
            Some(shared) => {
                let pending = shared.queue.borrow().pending.contains_key(&self.id);
                pending
            }
            None => false,
        }
    }

    /// Cancel the timer so it never fires
    ///
    /// Returns `true` if this call canceled it. Returns `false` when it
    /// already fired, was already canceled, its deadline has passed, or the
    /// scheduler is gone.
    pub fn cancel(&self) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };

        if shared.clock.now() >= self.deadline {
            debug!(
                scheduler = %shared.config.name,
                timer = %self.id,
                "deadline passed, cancel refused"
            );
            return false;
        }

        let canceled = shared.queue.borrow_mut().cancel(self.id);
        if canceled {
            debug!(scheduler = %shared.config.name, timer = %self.id, "timer canceled");
        }
        canceled
    }
}
