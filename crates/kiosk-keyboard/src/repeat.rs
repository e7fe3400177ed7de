#![forbid(unsafe_code)]

//! Hold-to-repeat timer for the backspace key.
//!
//! The timer is driven by the caller's clock: [`BackspaceRepeat::poll`]
//! takes the current [`Instant`] and reports how many repeat intervals have
//! elapsed since the last poll. Nothing here sleeps or spawns.
//!
//! At most one timer exists at a time. Starting an already-running timer is
//! a no-op, so two overlapping press events (touch and mouse for the same
//! finger) cannot double the repeat rate.
//!
//! # Example
//!
//! ```
//! use kiosk_keyboard::repeat::BackspaceRepeat;
//! use std::time::{Duration, Instant};
//!
//! let mut repeat = BackspaceRepeat::new(Duration::from_millis(100));
//! let t0 = Instant::now();
//! assert!(repeat.start(t0));
//! assert!(!repeat.start(t0));
//! assert_eq!(repeat.poll(t0 + Duration::from_millis(250)), 2);
//! repeat.stop();
//! assert_eq!(repeat.poll(t0 + Duration::from_secs(1)), 0);
//! ```

use std::time::{Duration, Instant};

/// Smallest interval the timer will run at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A single repeating backspace timer.
#[derive(Debug, Clone)]
pub struct BackspaceRepeat {
    interval: Duration,
    next_due: Option<Instant>,
}

impl BackspaceRepeat {
    /// Create a stopped timer. Intervals below one millisecond are raised to
    /// one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the timer. Returns `false` (and changes nothing) if it is already
    /// running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Disarm the timer. Returns `true` if it was running.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of live timers: zero or one.
    pub fn active_timers(&self) -> usize {
        usize::from(self.is_active())
    }

    /// Count the repeats that fell due up to `now` and schedule the next one.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }
        let behind = now.duration_since(due).as_nanos() / self.interval.as_nanos();
        let fired = u32::try_from(behind.saturating_add(1)).unwrap_or(u32::MAX);
        self.next_due = Some(
            due.checked_add(self.interval.saturating_mul(fired))
                .unwrap_or(now + self.interval),
        );
        fired
    }

    /// Time until the next repeat, or `None` when stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
