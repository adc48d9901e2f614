//! Fixed window-and-count rate limiter.
//!
//! Per-client buckets in a `DashMap`: within one window at most
//! `max_requests` are admitted; the first request after the window elapses
//! resets the bucket. No background sweeper; stale buckets are reset on
//! their next hit, which is fine at this site's volume.

use std::time::{Duration, Instant};

use dashmap::DashMap;

#[derive(Debug)]
struct Bucket {
    window_start: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: DashMap<String, Bucket>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            buckets: DashMap::new(),
        }
    }

    /// Admits or rejects one request for `key`. Admitted requests count
    /// against the current window.
    pub fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut bucket = self.buckets.entry(key.to_string()).or_insert(Bucket {
            window_start: now,
            count: 0,
        });

        if now.duration_since(bucket.window_start) >= self.window {
            bucket.window_start = now;
            bucket.count = 0;
        }

        if bucket.count >= self.max_requests {
            return false;
        }
        bucket.count += 1;
        true
    }
}
