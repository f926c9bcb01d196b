// src/crawl/throttle.rs
// =============================================================================
// Politeness: a minimum interval between two requests to the same host.
//
// Each host gets its own governor bucket with a burst of one, so the first
// request goes out immediately and each following one waits until `interval`
// has passed. Requests to different hosts never wait on each other.
// A zero interval disables throttling.
// =============================================================================

use std::time::Duration;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use url::Url;

pub struct HostThrottle {
    limiter: Option<DefaultKeyedRateLimiter<String>>,
}

impl HostThrottle {
    pub fn new(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval).map(|quota| RateLimiter::keyed(quota));
        Self { limiter }
    }

    /// Waits until a request to `url`'s host is allowed.
    pub async fn wait(&self, url: &str) {
        let Some(limiter) = &self.limiter else {
            return;
        };

        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        limiter.until_key_ready(&host).await;
    }
}
