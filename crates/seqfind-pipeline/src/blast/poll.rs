//! Job status tokens and the poll backoff schedule

use crate::config::PollConfig;
use std::time::Duration;

/// Status of a submitted similarity-search job
///
/// Anything that is not a recognized token is `Transient` and re-polled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Finished,
    /// Terminal failure carrying the reported status token
    Failed(String),
    /// Unrecognized token, treated as transient
    Transient(String),
}

impl JobStatus {
    /// Parse a status token as returned by the status endpoint
    ///
    /// `FAILURE` is accepted as an alias of `FAILED`; the live service has
    /// been observed returning both spellings.
    pub fn from_token(token: &str) -> Self {
        match token {
            "RUNNING" => JobStatus::Running,
            "FINISHED" => JobStatus::Finished,
            "FAILED" | "FAILURE" | "NOT_FOUND" | "ERROR" => {
                JobStatus::Failed(token.to_string())
            },
            other => JobStatus::Transient(other.to_string()),
        }
    }
}

/// Exponential backoff schedule for the poll loop
///
/// The interval doubles after each RUNNING observation and is capped;
/// transient observations re-use the current interval without doubling.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    max: Duration,
}

impl Backoff {
    pub fn new(config: &PollConfig) -> Self {
        Self {
            current: config.initial_interval,
            max: config.max_interval,
        }
    }

    /// The interval to sleep right now
    pub fn current(&self) -> Duration {
        self.current
    }

    /// The interval to sleep after a RUNNING observation; doubles the
    /// interval for the next round, capped at the maximum.
    pub fn next_after_running(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }
}
