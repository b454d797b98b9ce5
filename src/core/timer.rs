//! Session timer: an idle/running state machine accumulating run segments.
//!
//! There is no separate "paused" state: a paused timer is an idle timer with
//! some time already accumulated, and it resumes through `start()`.

use crate::core::clock::{Clock, SystemClock};
use chrono::{DateTime, Local};

#[derive(Debug)]
pub struct SessionTimer<C: Clock = SystemClock> {
    clock: C,
    /// Start of the open run segment; `None` while idle.
    anchor: Option<DateTime<Local>>,
    /// Seconds accrued by closed run segments.
    accumulated: f64,
}

impl SessionTimer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SessionTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SessionTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            anchor: None,
            accumulated: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Seconds accrued by closed segments only.
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Open a run segment. No-op when already running.
    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.clock.now());
        }
    }

    /// Same as `start()`, reads better after a pause.
    pub fn resume(&mut self) {
        self.start();
    }

    /// Close the open run segment, if any.
    pub fn pause(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            self.accumulated += self.segment_since(anchor);
        }
    }

    /// Close the open segment (if any) and return the session total.
    /// On an idle timer this is just the accumulated time.
    pub fn stop(&mut self) -> f64 {
        self.pause();
        self.accumulated
    }

    /// Back to idle with nothing accumulated, whatever the current state.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.accumulated = 0.0;
    }

    /// Total elapsed seconds, including the open segment. Does not mutate.
    pub fn elapsed(&self) -> f64 {
        match self.anchor {
            Some(anchor) => self.accumulated + self.segment_since(anchor),
            None => self.accumulated,
        }
    }

    // A clock stepping backwards yields an empty segment, never a negative one.
    fn segment_since(&self, anchor: DateTime<Local>) -> f64 {
        (self.clock.now() - anchor)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}
