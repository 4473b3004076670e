use std::time::Duration;

/// Default number of attempts per address.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between attempts for the same address.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default pause between consecutive addresses.
pub const DEFAULT_THROTTLE_DELAY: Duration = Duration::from_secs(1);

/// Default deadline for a single geocoding attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retry and pacing rules for [`AddressResolver`](super::AddressResolver).
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use routewise_core::GeocodingPolicy;
///
/// let policy = GeocodingPolicy::default()
///     .with_max_attempts(5)
///     .with_throttle_delay(Duration::ZERO);
/// assert_eq!(policy.max_attempts, 5);
/// assert_eq!(policy.retry_delay, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodingPolicy {
    /// Total attempts per address on timeout-class failures.
    ///
    /// Zero is treated as one.
    pub max_attempts: u32,
    /// Pause before re-trying an address that timed out.
    pub retry_delay: Duration,
    /// Pause before starting the next address, to respect provider rate
    /// limits.
    pub throttle_delay: Duration,
    /// Deadline applied to each attempt; expiry counts as a timeout.
    pub attempt_timeout: Duration,
}

impl Default for GeocodingPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            throttle_delay: DEFAULT_THROTTLE_DELAY,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl GeocodingPolicy {
    /// Set the total attempts per address.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the pause between attempts.
    #[must_use]
    pub const fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Set the pause between addresses.
    #[must_use]
    pub const fn with_throttle_delay(mut self, throttle_delay: Duration) -> Self {
        self.throttle_delay = throttle_delay;
        self
    }

    /// Set the per-attempt deadline.
    #[must_use]
    pub const fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Attempts actually made, never less than one.
    #[must_use]
    pub const fn effective_attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }
}
