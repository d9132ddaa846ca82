//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Which kind of interval the countdown is measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    /// The mode that follows this one once it completes
    pub fn next(self) -> Self {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TimerMode::Focus => "focus",
            TimerMode::Break => "break",
        };
        write!(f, "{label}")
    }
}

/// Countdown state for the current interval.
///
/// `remaining_seconds` never exceeds `total_seconds`, and `total_seconds` is
/// never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: TimerMode,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub running: bool,
}

impl TimerState {
    /// Create an idle timer at the start of an interval
    pub fn idle(mode: TimerMode, total_seconds: u64) -> Self {
        debug_assert!(total_seconds > 0);
        Self {
            mode,
            remaining_seconds: total_seconds,
            total_seconds,
            running: false,
        }
    }

    /// Fraction of the interval already elapsed, in `[0, 1]`
    pub fn progress_ratio(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds - self.remaining_seconds.min(self.total_seconds);
        elapsed as f64 / self.total_seconds as f64
    }

    /// Remaining time as `m:ss`
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// Format a number of seconds the way the timer face shows it
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_of_fresh_interval_is_zero() {
        let timer = TimerState::idle(TimerMode::Focus, 1500);
        assert_eq!(timer.progress_ratio(), 0.0);
    }

    #[test]
    fn progress_reaches_one_at_zero_remaining() {
        let mut timer = TimerState::idle(TimerMode::Break, 300);
        timer.remaining_seconds = 0;
        assert_eq!(timer.progress_ratio(), 1.0);
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn modes_alternate() {
        assert_eq!(TimerMode::Focus.next(), TimerMode::Break);
        assert_eq!(TimerMode::Break.next(), TimerMode::Focus);
    }
}
