//! Focus/break countdown state machine

use std::num::NonZeroU32;

use tracing::{debug, info};

use super::{Playable, SessionSink};
use crate::state::{FocusSessionRecord, TimerMode, TimerState};

pub const DEFAULT_FOCUS_MINUTES: NonZeroU32 = match NonZeroU32::new(25) {
    Some(minutes) => minutes,
    None => unreachable!(),
};

pub const DEFAULT_BREAK_MINUTES: NonZeroU32 = match NonZeroU32::new(5) {
    Some(minutes) => minutes,
    None => unreachable!(),
};

/// Interval lengths used when the controller switches modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub focus_minutes: NonZeroU32,
    pub break_minutes: NonZeroU32,
}

impl TimerSettings {
    pub fn new(focus_minutes: NonZeroU32, break_minutes: NonZeroU32) -> Self {
        Self {
            focus_minutes,
            break_minutes,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

fn minutes_to_seconds(minutes: NonZeroU32) -> u64 {
    u64::from(minutes.get()) * 60
}

/// Outcome of a completion transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedInterval {
    pub finished: TimerMode,
    pub next: TimerMode,
    pub record: Option<FocusSessionRecord>,
}

/// Owns the timer and drives playback and session logging from its transitions
#[derive(Debug)]
pub struct SessionController<P, S> {
    timer: TimerState,
    focus_seconds: u64,
    break_seconds: u64,
    run_epoch: u64,
    success_visible: bool,
    success_generation: u64,
    playable: P,
    sink: S,
}

impl<P: Playable, S: SessionSink> SessionController<P, S> {
    /// Create an idle controller at the start of a focus interval
    pub fn new(settings: TimerSettings, playable: P, sink: S) -> Self {
        let focus_seconds = minutes_to_seconds(settings.focus_minutes);
        Self {
            timer: TimerState::idle(TimerMode::Focus, focus_seconds),
            focus_seconds,
            break_seconds: minutes_to_seconds(settings.break_minutes),
            run_epoch: 0,
            success_visible: false,
            success_generation: 0,
            playable,
            sink,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.running
    }

    /// Identifies the current running stretch; bumped on every start
    pub fn run_epoch(&self) -> u64 {
        self.run_epoch
    }

    pub fn success_visible(&self) -> bool {
        self.success_visible
    }

    pub fn success_generation(&self) -> u64 {
        self.success_generation
    }

    pub fn playable(&self) -> &P {
        &self.playable
    }

    pub fn playable_mut(&mut self) -> &mut P {
        &mut self.playable
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn progress_ratio(&self) -> f64 {
        self.timer.progress_ratio()
    }

    /// Begin counting down. No-op while already running.
    pub fn start(&mut self) {
        if self.timer.running {
            return;
        }
        if self.timer.remaining_seconds == 0 {
            // Should have completed already; finish it and start the next interval
            self.complete();
        }

        self.timer.running = true;
        self.run_epoch += 1;
        info!(
            "Timer started: mode={}, remaining={}s",
            self.timer.mode, self.timer.remaining_seconds
        );
        self.playable.resume();
    }

    /// Stop counting down. No-op while idle.
    pub fn pause(&mut self) {
        if !self.timer.running {
            return;
        }
        self.timer.running = false;
        info!(
            "Timer paused: mode={}, remaining={}s",
            self.timer.mode, self.timer.remaining_seconds
        );
        self.playable.pause();
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the completion when this tick finished the interval.
    pub fn tick(&mut self) -> Option<CompletedInterval> {
        if !self.timer.running {
            debug!("Ignoring tick while idle");
            return None;
        }

        self.timer.remaining_seconds = self.timer.remaining_seconds.saturating_sub(1);
        if self.timer.remaining_seconds == 0 {
            return Some(self.complete());
        }
        None
    }

    /// Finish the current interval, log it if it was a focus interval and
    /// switch to the other mode. Also used for the manual "done" action.
    pub fn complete(&mut self) -> CompletedInterval {
        self.timer.running = false;
        self.playable.pause();

        let finished = self.timer.mode;
        let record = match finished {
            TimerMode::Focus => {
                let record = FocusSessionRecord::completed(self.timer.total_seconds);
                info!(
                    "Focus session complete: {} minutes",
                    record.duration_minutes
                );
                self.sink.on_session_complete(record.clone());
                self.success_visible = true;
                self.success_generation += 1;
                Some(record)
            }
            TimerMode::Break => {
                info!("Break complete");
                None
            }
        };

        let next = finished.next();
        let total = match next {
            TimerMode::Focus => self.focus_seconds,
            TimerMode::Break => self.break_seconds,
        };
        self.timer = TimerState::idle(next, total);

        CompletedInterval {
            finished,
            next,
            record,
        }
    }

    /// Rewind the current interval without changing its length
    pub fn reset(&mut self) {
        self.timer.running = false;
        self.timer.remaining_seconds = self.timer.total_seconds;
        info!("Timer reset: mode={}", self.timer.mode);
        self.playable.pause();
    }

    /// Switch to a fresh focus interval of `minutes`
    pub fn set_duration(&mut self, minutes: NonZeroU32) {
        self.focus_seconds = minutes_to_seconds(minutes);
        self.timer = TimerState::idle(TimerMode::Focus, self.focus_seconds);
        info!("Focus duration set to {} minutes", minutes);
        self.playable.pause();
    }

    /// Hide the success notice raised by completion `generation`.
    ///
    /// Returns false when a newer completion owns the notice.
    pub fn clear_success(&mut self, generation: u64) -> bool {
        if generation != self.success_generation {
            return false;
        }
        self.success_visible = false;
        true
    }
}
