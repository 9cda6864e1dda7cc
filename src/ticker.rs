use std::time::{Duration, Instant};

/// Interval between countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Longest wait for input before redrawing
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One-second periodic schedule for the countdown.
///
/// Stopping drops the pending tick; starting again schedules the next tick a
/// full interval later.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn start_ticking(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.interval);
        }
    }

    pub fn stop_ticking(&mut self) {
        self.next_tick = None;
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Number of ticks that have come due by `now`; advances the schedule past them
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while let Some(next) = self.next_tick {
            if next > now {
                break;
            }
            due += 1;
            self.next_tick = Some(next + self.interval);
        }
        due
    }

    /// How long the event loop may wait before the next tick is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.next_tick {
            Some(next) => next.saturating_duration_since(now).min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        }
    }
}
