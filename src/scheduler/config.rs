// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scheduler configuration
//!
//! Missing fields fall back to their defaults when deserializing, so a
//! partial JSON document such as `{"max_pending": 16}` is a valid config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a `Scheduler`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Name reported in log events
    pub name: String,
    /// Maximum number of timers waiting to fire
    pub max_pending: usize,
    /// Longest accepted wait for a single timer
    pub max_wait: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: "underbar".to_string(),
            max_pending: 10_000,
            max_wait: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl SchedulerConfig {
    /// Set the name reported in log events
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the pending-timer capacity
    pub fn with_max_pending(mut self, max_pending: usize) -> Self {
        self.max_pending = max_pending;
        self
    }

    /// Set the longest accepted wait
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = SchedulerConfig::default()
            .with_name("ui")
            .with_max_pending(2)
            .with_max_wait(Duration::from_secs(5));

        assert_eq!(config.name, "ui");
        assert_eq!(config.max_pending, 2);
        assert_eq!(config.max_wait, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{"name": "ui", "max_pending": 16}"#).unwrap();

        assert_eq!(
            config,
            SchedulerConfig::default().with_name("ui").with_max_pending(16)
        );
    }
}
