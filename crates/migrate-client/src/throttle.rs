//! Token bucket shared by every outgoing destination request.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use migrate_core::{MigrateError, MigrateResult, UploadConfig};
use std::num::NonZeroU32;

pub struct RequestThrottle {
    limiter: DefaultDirectRateLimiter,
}

impl RequestThrottle {
    pub fn new(requests_per_second: NonZeroU32, burst: NonZeroU32) -> Self {
        let quota = Quota::per_second(requests_per_second).allow_burst(burst);
        Self {
            limiter: RateLimiter::direct(quota),
        }
    }

    pub fn from_config(config: &UploadConfig) -> MigrateResult<Self> {
        let rate = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
            MigrateError::Config("upload.requests_per_second must be positive".to_string())
        })?;
        let burst = NonZeroU32::new(config.burst)
            .ok_or_else(|| MigrateError::Config("upload.burst must be positive".to_string()))?;
        Ok(Self::new(rate, burst))
    }

    /// Waits until a request may be sent.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

impl Default for RequestThrottle {
    /// Eight requests per second with no burst.
    fn default() -> Self {
        Self::new(NonZeroU32::MIN.saturating_add(7), NonZeroU32::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_requests_are_spaced() {
        let throttle = RequestThrottle::default();

        let started = Instant::now();
        for _ in 0..3 {
            throttle.acquire().await;
        }

        // First token is immediate, the next two each wait 125ms.
        assert!(started.elapsed() >= Duration::from_millis(240));
    }

    #[tokio::test]
    async fn test_burst_allows_immediate_requests() {
        let throttle = RequestThrottle::new(
            NonZeroU32::new(1).unwrap(),
            NonZeroU32::new(3).unwrap(),
        );

        let started = Instant::now();
        for _ in 0..3 {
            throttle.acquire().await;
        }
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let config = UploadConfig {
            requests_per_second: 0,
            burst: 1,
        };
        assert!(RequestThrottle::from_config(&config).is_err());
        assert!(RequestThrottle::from_config(&UploadConfig::default()).is_ok());
    }
}
