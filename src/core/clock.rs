//! Time sources for the session timer and the logger.

use chrono::{DateTime, Local, TimeDelta};
use std::cell::Cell;
use std::rc::Rc;

/// Anything able to tell the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and pass
/// another to a timer or logger:
///
/// ```
/// use chrono::{Local, TimeZone};
/// use worklogger::core::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap());
/// let handle = clock.clone();
/// handle.advance_secs(90.0);
/// assert_eq!(clock.now(), handle.now());
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Local>) {
        self.now.set(instant);
    }

    /// Move the clock by `secs` (millisecond resolution, negative goes back).
    pub fn advance_secs(&self, secs: f64) {
        let delta = TimeDelta::milliseconds((secs * 1000.0).round() as i64);
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}
