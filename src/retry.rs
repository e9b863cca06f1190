//! Retry schedules for transient provider failures.

use core::time::Duration;

use backoff::ExponentialBackoffBuilder;

use crate::error::Result;

/// A randomized exponential retry schedule with a fixed attempt budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    initial_interval: Duration,
    max_interval: Duration,
    max_attempts: u32,
}

impl RetryPolicy {
    /// Creates a policy waiting between `initial_interval` and
    /// `max_interval`, giving up after `max_attempts` attempts.
    #[must_use]
    pub const fn new(initial_interval: Duration, max_interval: Duration, max_attempts: u32) -> Self {
        Self {
            initial_interval,
            max_interval,
            max_attempts,
        }
    }

    /// The schedule for embedding requests: 1s to 20s, six attempts.
    #[must_use]
    pub const fn embedding() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(20), 6)
    }

    /// The schedule for vector upserts: 1s to 20s, three attempts.
    #[must_use]
    pub const fn upsert() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(20), 3)
    }

    /// The attempt budget.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn schedule(&self) -> backoff::ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_interval)
            .with_max_interval(self.max_interval)
            .with_max_elapsed_time(None)
            .build()
    }
}

/// Runs `op` until it succeeds or the policy's attempt budget is spent,
/// waiting out the randomized exponential schedule between attempts.
///
/// Each failed attempt is logged; the final failure is returned as-is.
///
/// # Errors
///
/// Returns the error of the last attempt once the budget is exhausted.
pub async fn with_retry<T, Op, Fut>(policy: &RetryPolicy, label: &str, mut op: Op) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let budget = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    backoff::future::retry_notify(
        policy.schedule(),
        || {
            attempt += 1;
            let exhausted = attempt >= budget;
            let fut = op();

            async move {
                fut.await.map_err(|err| {
                    if exhausted {
                        backoff::Error::permanent(err)
                    } else {
                        backoff::Error::transient(err)
                    }
                })
            }
        },
        |err, wait| {
            tracing::warn!(error = %err, ?wait, "{label} request failed; retrying");
        },
    )
    .await
}
