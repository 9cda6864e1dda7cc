use super::phase::Phase;
use super::settings::Settings;

/// Outcome of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is paused; nothing happened
    Stopped,
    /// One second elapsed and time remains
    Counting,
    /// The countdown reached zero and the timer stopped
    Expired(Phase),
}

/// Phase change produced by `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

/// Focus/break countdown state. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    time_remaining: u32,
    is_running: bool,
    completed_focus_count_in_cycle: u32,
}

impl Session {
    /// Fresh session: focus phase, full duration, paused
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: Phase::Focus,
            time_remaining: settings.duration_secs(Phase::Focus),
            is_running: false,
            completed_focus_count_in_cycle: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_focus_count_in_cycle(&self) -> u32 {
        self.completed_focus_count_in_cycle
    }

    /// Start the countdown. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        true
    }

    /// Pause the countdown. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        true
    }

    /// Count down one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Stopped;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.is_running = false;
            TickOutcome::Expired(self.phase)
        } else {
            TickOutcome::Counting
        }
    }

    /// Move to the next phase of the cycle.
    ///
    /// Completing the N-th focus phase of a cycle (N = long break interval)
    /// leads to a long break and restarts the cycle count; any other focus
    /// completion leads to a short break. Breaks always return to focus.
    pub fn advance(&mut self, settings: &Settings) -> Transition {
        let from = self.phase;
        let to = match from {
            Phase::Focus => {
                self.completed_focus_count_in_cycle += 1;
                if self.completed_focus_count_in_cycle % settings.long_break_interval.max(1) == 0 {
                    self.completed_focus_count_in_cycle = 0;
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak => Phase::Focus,
            Phase::LongBreak => {
                self.completed_focus_count_in_cycle = 0;
                Phase::Focus
            }
        };
        self.enter(to, settings);
        Transition { from, to }
    }

    /// Jump straight to `target`. Re-entering focus by hand restarts the cycle count.
    pub fn switch_mode(&mut self, target: Phase, settings: &Settings) {
        if target == Phase::Focus {
            self.completed_focus_count_in_cycle = 0;
        }
        self.enter(target, settings);
    }

    /// Restart at the beginning of a cycle with new durations
    pub fn reset(&mut self, settings: &Settings) {
        self.completed_focus_count_in_cycle = 0;
        self.enter(Phase::Focus, settings);
    }

    /// Remaining time as "MM:SS"
    pub fn formatted_remaining(&self) -> String {
        format!("{:02}:{:02}", self.time_remaining / 60, self.time_remaining % 60)
    }

    fn enter(&mut self, phase: Phase, settings: &Settings) {
        self.phase = phase;
        self.time_remaining = settings.duration_secs(phase);
        self.is_running = false;
    }
}
