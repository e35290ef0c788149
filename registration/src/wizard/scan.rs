//! Simulated fingerprint capture.
//!
//! The scan is a polled timer rather than a pair of detached callbacks: the
//! host feeds the current time into [`ScanTimer::poll`] and applies whatever
//! event comes out. Cancelling (or dropping) the timer discards anything that
//! has not fired yet.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanSchedule {
    /// Time spent "reading" the finger
    pub scan_duration: Duration,
    /// Pause on the success indicator before moving on
    pub advance_delay: Duration,
}

impl Default for ScanSchedule {
    fn default() -> Self {
        Self {
            scan_duration: Duration::from_millis(3000),
            advance_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanPhase {
    Idle,
    Scanning { started_at: f64 },
    Captured { captured_at: f64 },
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    Captured,
    Advance,
}

#[derive(Debug, Clone)]
pub struct ScanTimer {
    schedule: ScanSchedule,
    phase: ScanPhase,
}

impl ScanTimer {
    pub fn new(schedule: ScanSchedule) -> Self {
        Self {
            schedule,
            phase: ScanPhase::Idle,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, ScanPhase::Scanning { .. } | ScanPhase::Captured { .. })
    }

    /// Returns false if a scan was already started.
    pub fn start(&mut self, now: f64) -> bool {
        if self.phase != ScanPhase::Idle {
            return false;
        }
        self.phase = ScanPhase::Scanning { started_at: now };
        true
    }

    /// Fires at most one event per call. Deadlines are measured from the
    /// previous deadline, not from when the host happened to poll.
    pub fn poll(&mut self, now: f64) -> Option<ScanEvent> {
        match self.phase {
            ScanPhase::Scanning { started_at } => {
                let due = started_at + self.schedule.scan_duration.as_secs_f64();
                (now >= due).then(|| {
                    self.phase = ScanPhase::Captured { captured_at: due };
                    ScanEvent::Captured
                })
            }
            ScanPhase::Captured { captured_at } => {
                let due = captured_at + self.schedule.advance_delay.as_secs_f64();
                (now >= due).then(|| {
                    self.phase = ScanPhase::Done;
                    ScanEvent::Advance
                })
            }
            ScanPhase::Idle | ScanPhase::Done => None,
        }
    }

    /// Fraction of the capture window elapsed, for progress display.
    pub fn progress(&self, now: f64) -> f32 {
        match self.phase {
            ScanPhase::Idle => 0.0,
            ScanPhase::Scanning { started_at } => {
                let total = self.schedule.scan_duration.as_secs_f64();
                if total <= 0.0 {
                    1.0
                } else {
                    ((now - started_at) / total).clamp(0.0, 1.0) as f32
                }
            }
            ScanPhase::Captured { .. } | ScanPhase::Done => 1.0,
        }
    }

    /// Drops any pending transition. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.phase = ScanPhase::Idle;
        was_active
    }
}
