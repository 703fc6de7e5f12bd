//! Retry policy and executor
//!
//! The delay before attempt `k` (k ≥ 2) is `2^(k-2) * base + jitter`, with
//! jitter drawn uniformly from `[0, max_jitter)`. With the defaults attempt 2
//! waits 1–2s and attempt 3 waits 2–3s.

use crate::transport::{HttpReply, HttpRequest, Transport};
use crate::LlmError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Statuses retried automatically: rate limited, internal error, unavailable
pub const TRANSIENT_STATUSES: [u16; 3] = [429, 500, 503];

/// Default number of attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff base (milliseconds)
pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;

/// Default upper bound on jitter (milliseconds, exclusive)
pub const DEFAULT_MAX_JITTER_MS: u64 = 1_000;

/// Retry budget and backoff timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff base in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Exclusive upper bound on random jitter in milliseconds
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY_MS
}

fn default_max_jitter_ms() -> u64 {
    DEFAULT_MAX_JITTER_MS
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_jitter_ms: DEFAULT_MAX_JITTER_MS,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given attempt budget and default timing
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Delay before `attempt` for a given jitter sample
    ///
    /// Attempts below 2 have no delay. Jitter is clamped below `max_jitter_ms`.
    pub fn delay_before(&self, attempt: u32, jitter_ms: u64) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }
        let exponent = (attempt - 2).min(32);
        let backoff = self.base_delay_ms.saturating_mul(1u64 << exponent);
        let jitter = jitter_ms.min(self.max_jitter_ms.saturating_sub(1));
        Duration::from_millis(backoff.saturating_add(jitter))
    }

    /// Delay before `attempt` with a fresh random jitter
    pub fn backoff(&self, attempt: u32) -> Duration {
        let jitter = if self.max_jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..self.max_jitter_ms)
        };
        self.delay_before(attempt, jitter)
    }
}

/// Runs requests through a [`Transport`] under a [`RetryPolicy`]
pub struct RetryingExecutor<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingExecutor<T> {
    /// Create an executor
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// The retry policy in use
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one logical request
    ///
    /// Returns the first reply whose status is not transient. A transient
    /// reply on the final attempt is returned as-is for the caller to
    /// classify. Transport failures on every attempt yield
    /// [`LlmError::Network`].
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpReply, LlmError> {
        let max_retries = self.policy.max_retries.max(1);
        let mut attempt = 1;

        loop {
            match self.transport.send(request).await {
                Ok(reply) if reply.is_transient() && attempt < max_retries => {
                    let delay = self.policy.backoff(attempt + 1);
                    warn!(
                        "Model endpoint returned {}. Retrying in {}ms (attempt {}/{})",
                        reply.status,
                        delay.as_millis(),
                        attempt,
                        max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(reply) => {
                    if reply.is_transient() {
                        warn!(
                            "Model endpoint still returned {} after {} attempt(s), giving up",
                            reply.status, attempt
                        );
                    } else {
                        debug!("Model endpoint returned {} on attempt {}", reply.status, attempt);
                    }
                    return Ok(reply);
                }
                Err(e) if attempt < max_retries => {
                    let delay = self.policy.backoff(attempt + 1);
                    warn!(
                        "Network error on attempt {}/{}: {}. Retrying in {}ms",
                        attempt,
                        max_retries,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!("Network error on final attempt {}: {}", attempt, e);
                    return Err(LlmError::Network {
                        attempts: attempt,
                        message: e.message,
                    });
                }
            }
            attempt += 1;
        }
    }
}
