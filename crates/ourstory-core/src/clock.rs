//! Time source for response timestamps.

use chrono::{DateTime, Utc};

/// Supplies the time recorded against proposal responses. Tests swap in a
/// fixed instant so stored timestamps are predictable.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
