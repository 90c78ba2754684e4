// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration, Instant};

use crate::client::Plan;

/// Rate limiter for ISBNdb API calls.
///
/// ISBNdb enforces a per-plan requests-per-second ceiling. This implementation
/// uses a semaphore and enforces a minimum delay between requests.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    min_interval: Duration,
    next_send: Arc<tokio::sync::Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified minimum interval between
    /// requests.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            min_interval,
            next_send: Arc::new(tokio::sync::Mutex::new(None)),
        }
    }

    /// Create a rate limiter matching a subscription plan's request ceiling.
    pub fn for_plan(plan: Plan) -> Self {
        Self::new(plan.min_interval())
    }

    /// Wait until a request can be made according to the rate limit.
    ///
    /// The earliest-send deadline is pushed to now + interval on every
    /// permitted send; a deadline already in the past means no wait.
    pub async fn acquire(&self) {
        let _permit = self.semaphore.acquire().await.expect("semaphore closed");

        let mut next_send = self.next_send.lock().await;

        if let Some(deadline) = *next_send {
            let now = Instant::now();
            if now < deadline {
                let wait_time = deadline - now;
                tracing::trace!(
                    target: "isbndb",
                    "rate limiting: waiting {:?}",
                    wait_time
                );
                sleep(wait_time).await;
            }
        }

        *next_send = Some(Instant::now() + self.min_interval);
    }
}
