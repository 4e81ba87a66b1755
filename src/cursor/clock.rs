//! Time sources for the live cursor.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::Arc;

/// A source of local wall-clock time.
pub trait Clock: Send + Sync + Debug {
    /// Current local instant.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Host wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hold one handle while the
/// ticker reads another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    /// Creates a clock frozen at `instant`.
    pub fn new(instant: NaiveDateTime) -> Self {
        Self {
            instant: Arc::new(Mutex::new(instant)),
        }
    }

    /// Jumps to `instant`.
    pub fn set(&self, instant: NaiveDateTime) {
        *self.instant.lock() = instant;
    }

    /// Moves forward (or backward, for a negative delta).
    pub fn advance(&self, delta: Duration) {
        let mut instant = self.instant.lock();
        *instant += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.instant.lock()
    }
}
