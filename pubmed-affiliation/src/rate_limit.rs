//! Rate limiting for NCBI API compliance
//!
//! NCBI E-utilities rate limits:
//! - 3 requests per second without API key
//! - 10 requests per second with API key
//! - Violations can result in IP blocking

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, instrument};

/// Requests per second NCBI allows without an API key
pub const NCBI_DEFAULT_RATE: f64 = 3.0;

/// Requests per second NCBI allows with an API key
pub const NCBI_API_KEY_RATE: f64 = 10.0;

/// Minimum-interval rate limiter
///
/// Every call to [`acquire`](RateLimiter::acquire) starts at least
/// `1 / rate` seconds after the previous one started. Clones share state, and
/// the lock is held across the wait so concurrent callers queue up instead of
/// bursting.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    state: Arc<Mutex<LimiterState>>,
    min_interval: Duration,
}

#[derive(Debug)]
struct LimiterState {
    last_call: Option<Instant>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified rate
    ///
    /// # Arguments
    ///
    /// * `rate` - Maximum requests per second (e.g., 3.0 for NCBI without API key).
    ///   A non-positive or NaN rate disables spacing; callers are expected to
    ///   validate it beforehand (see [`ClientConfig::validate`](crate::ClientConfig::validate)).
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_affiliation::RateLimiter;
    /// use std::time::Duration;
    ///
    /// let limiter = RateLimiter::new(4.0);
    /// assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    /// ```
    pub fn new(rate: f64) -> Self {
        let min_interval = if rate > 0.0 {
            interval_for_rate(rate).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self::with_min_interval(min_interval)
    }

    /// Create a rate limiter from the spacing between call starts directly
    pub fn with_min_interval(min_interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(LimiterState { last_call: None })),
            min_interval,
        }
    }

    /// Create rate limiter for NCBI API without API key (3 requests/second)
    pub fn ncbi_default() -> Self {
        Self::new(NCBI_DEFAULT_RATE)
    }

    /// Create rate limiter for NCBI API with API key (10 requests/second)
    pub fn ncbi_with_key() -> Self {
        Self::new(NCBI_API_KEY_RATE)
    }

    /// Wait until the next call may start, then record its start time
    ///
    /// The first call never waits.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_affiliation::RateLimiter;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let limiter = RateLimiter::ncbi_default();
    ///
    ///     limiter.acquire().await;
    ///     // Make API call here
    ///
    ///     limiter.acquire().await;
    ///     // Make another API call here, at least 333ms after the first
    /// }
    /// ```
    #[instrument(skip(self))]
    pub async fn acquire(&self) {
        let mut state = self.state.lock().await;

        if let Some(last_call) = state.last_call {
            let elapsed = last_call.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(
                    wait_ms = wait.as_millis() as u64,
                    "Sleeping to respect rate limit"
                );
                sleep(wait).await;
            }
        }

        state.last_call = Some(Instant::now());
    }

    /// Minimum spacing between call starts
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Configured requests per second (infinite when spacing is disabled)
    pub fn rate(&self) -> f64 {
        if self.min_interval.is_zero() {
            f64::INFINITY
        } else {
            1.0 / self.min_interval.as_secs_f64()
        }
    }

    /// Start time of the most recent call, if any
    pub async fn last_call(&self) -> Option<Instant> {
        self.state.lock().await.last_call
    }
}

/// Spacing for `rate` requests per second
///
/// `None` when the rate is not positive or the interval does not fit in a
/// [`Duration`] (e.g. `1e-20` requests per second).
pub fn interval_for_rate(rate: f64) -> Option<Duration> {
    if rate.is_nan() || rate <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / rate).ok()
}
