//! Request pacing shared by every exchange call.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota};

/// Releases requests at least `spacing` apart, one at a time.
///
/// A zero spacing disables pacing.
pub struct RequestPacer {
    limiter: Option<DefaultDirectRateLimiter>,
}

impl RequestPacer {
    pub fn new(spacing: Duration) -> Self {
        let limiter = Quota::with_period(spacing)
            .map(|quota| DefaultDirectRateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));

        Self { limiter }
    }

    /// Wait for the next request slot.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}
