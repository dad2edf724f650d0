//! Token bucket.

use std::time::Instant;

/// A bucket that starts full at `burst` tokens and refills at `rps` tokens per
/// second, never holding more than `burst`.
#[derive(Debug, Clone)]
pub(super) struct TokenBucket {
    tokens: f64,
    last: Instant,
}

impl TokenBucket {
    pub(super) fn full(burst: u32, now: Instant) -> Self {
        Self {
            tokens: f64::from(burst),
            last: now,
        }
    }

    /// Take one token if available at `now`.
    pub(super) fn take(&mut self, rps: f64, burst: u32, now: Instant) -> bool {
        let capacity = f64::from(burst);

        if now > self.last {
            let elapsed = now.duration_since(self.last).as_secs_f64();

            self.tokens = (self.tokens + elapsed * rps).min(capacity);
            self.last = now;
        }

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;

            true
        } else {
            false
        }
    }
}
