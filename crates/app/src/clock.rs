//! Injectable wall clock.

use std::sync::Arc;

use jiff::Timestamp;

/// Source of the current time for expiry decisions.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

#[must_use]
pub fn system_clock() -> Clock {
    Arc::new(Timestamp::now)
}
