// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for collection operations, decorators and the scheduler

use thiserror::Error;

use crate::scheduler::TimerId;

/// Errors that can occur in underbar operations
#[derive(Debug, Error)]
pub enum UnderbarError {
    /// Argument has the wrong shape (e.g. a scalar where a collection is expected)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `reduce` called on an empty collection without a seed
    #[error("Cannot reduce an empty collection without an initial accumulator")]
    EmptyReduce,

    /// Argument list could not be serialized into a memo key
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Scheduler refused a timer because it is at capacity
    #[error("Scheduler is full: {limit} timers already pending")]
    SchedulerFull { limit: usize },

    /// A deferred body returned an error when it fired
    #[error("Timer {timer} failed: {source}")]
    TaskFailed {
        timer: TimerId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result type for underbar operations
pub type UnderbarResult<T> = Result<T, UnderbarError>;

impl From<serde_json::Error> for UnderbarError {
    fn from(err: serde_json::Error) -> Self {
        UnderbarError::Serialization(err.to_string())
    }
}

impl UnderbarError {
    /// Wrap the failure of a fired timer
    pub(crate) fn task_failed(timer: TimerId, err: anyhow::Error) -> Self {
        UnderbarError::TaskFailed {
            timer,
            source: err.into(),
        }
    }
}
