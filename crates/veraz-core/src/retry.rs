//! Bounded retry with exponential backoff and jitter.
//!
//! The delay before retrying after attempt `k` (zero-based) is
//!
//!   min(initial_delay * backoff_factor^k * (1 + jitter_ratio * u), max_delay),  u ∈ [0, 1)
//!
//! With the defaults that is 1000–1200 ms after the first failure and
//! 2000–2400 ms after the second. No delay follows the final attempt.

use std::{fmt::Display, future::Future, time::Duration};

use tracing::{debug, warn};

use crate::traits::Sleeper;

/// Parameters of the retry loop. Independent of any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Values below 1 are
    /// treated as 1.
    pub max_attempts: u32,
    /// Base delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_factor: f64,
    /// Upper bound of the random extra delay, as a fraction of the base delay.
    pub jitter_ratio: f64,
    /// Ceiling for any single delay, jitter included.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            backoff_factor: 2.0,
            jitter_ratio: 0.2,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after attempt `attempt`, without jitter.
    ///
    /// Saturates at `max_delay`, including when the product overflows or is
    /// not a number.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.backoff_factor.powi(exponent);
        self.capped(secs)
    }

    /// Delay with a caller-chosen jitter sample `unit` (clamped to `[0, 1]`).
    pub fn delay_with_jitter(&self, attempt: u32, unit: f64) -> Duration {
        let base = self.base_delay(attempt);
        let extra = self.capped(base.as_secs_f64() * self.jitter_ratio * unit.clamp(0.0, 1.0));
        base.saturating_add(extra).min(self.max_delay)
    }

    fn capped(&self, secs: f64) -> Duration {
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Delay with a freshly drawn jitter sample.
    pub fn next_delay(&self, attempt: u32) -> Duration {
        self.delay_with_jitter(attempt, fastrand::f64())
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// `op` receives the zero-based attempt index. Success returns
    /// immediately; a failure on the last attempt is returned unchanged.
    /// Between attempts the loop suspends on `sleeper` for `next_delay`.
    pub async fn run<T, E, F, Fut>(&self, sleeper: &dyn Sleeper, mut op: F) -> Result<T, E>
    where
        E: Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match op(attempt).await {
                Ok(value) => {
                    debug!(attempt = attempt + 1, max_attempts, "attempt succeeded");
                    return Ok(value);
                }
                Err(error) if attempt + 1 >= max_attempts => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        error = %error,
                        "final attempt failed, giving up"
                    );
                    return Err(error);
                }
                Err(error) => {
                    let delay = self.next_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        error = %error,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, backing off"
                    );
                    sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
