use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Bounded fixed-delay retry policy keyed by HTTP status.
///
/// A status with an entry in `delays_ms` is transient: the request is retried
/// after that delay. Any other failure is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per request, the first one included.
    pub max_attempts: u32,
    pub delays_ms: BTreeMap<u16, u64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 5,
            delays_ms: BTreeMap::from([(429, 2000), (500, 1000), (503, 1000)]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter(Duration),
    /// Transient failure on the final attempt.
    Exhausted,
    /// Failure that is never retried.
    Fail,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        RetryPolicy {
            max_attempts,
            delays_ms: BTreeMap::new(),
        }
    }

    pub fn with_delay(mut self, status: u16, delay: Duration) -> Self {
        self.delays_ms.insert(status, delay.as_millis() as u64);
        self
    }

    /// Backoff for a transient status, `None` when the status is not retryable.
    pub fn delay_for(&self, status: u16) -> Option<Duration> {
        self.delays_ms
            .get(&status)
            .map(|ms| Duration::from_millis(*ms))
    }

    /// Decides what to do after `attempt` (1-based) failed with `status`.
    pub fn decide(&self, status: u16, attempt: u32) -> RetryDecision {
        match self.delay_for(status) {
            Some(delay) if attempt < self.max_attempts => RetryDecision::RetryAfter(delay),
            Some(_) => RetryDecision::Exhausted,
            None => RetryDecision::Fail,
        }
    }
}
