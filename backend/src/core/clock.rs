//! Wall-clock abstraction
//!
//! The controller reads time through [`Clock`] so tests can pin or step
//! the emulated day instead of depending on when they run.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::{Arc, Mutex};

/// Port for time abstraction
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Clock name for diagnostics
    fn name(&self) -> &str {
        "Clock"
    }
}

/// Real system clock in local time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep a handle while the
/// controller owns another.
///
/// # Example
/// ```
/// use business_day_sim_core_rs::core::clock::{Clock, ManualClock};
/// use chrono::{Duration, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let clock = ManualClock::new(start);
/// let handle = clock.clone();
/// handle.advance(Duration::minutes(30));
/// assert_eq!(clock.now(), start + Duration::minutes(30));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, time: NaiveDateTime) {
        *self.lock() = time;
    }

    /// Move forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self.lock();
        *current += duration;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        // A poisoned lock still holds a valid timestamp
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.lock()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
