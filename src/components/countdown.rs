// Countdown timer used to drive flicker phases.

use std::time::Duration;

use bevy::prelude::*;

/// One-shot countdown that only advances while running.
///
/// Wraps a Bevy [`Timer`] with an explicit running flag so a phase can be
/// armed, cancelled and re-armed with a fresh duration without losing track of
/// which phase is active.
#[derive(Debug, Clone, Reflect)]
pub struct CountdownTimer {
    timer: Timer,
    running: bool,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl CountdownTimer {
    /// Creates a stopped countdown with the given duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            running: false,
        }
    }

    /// Starts counting down from the full configured duration.
    pub fn start(&mut self) {
        self.timer.reset();
        self.running = true;
    }

    /// Stops the countdown without reporting expiry.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Replaces the duration and rewinds. Does not change the running flag.
    pub fn reset(&mut self, duration: Duration) {
        self.timer.set_duration(duration);
        self.timer.reset();
    }

    /// Advances the countdown by `delta`.
    ///
    /// Returns `true` exactly once, on the tick where a running countdown
    /// reaches zero. The countdown is stopped at that point.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.timer.tick(delta);
        if self.timer.finished() {
            self.running = false;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration(&self) -> Duration {
        self.timer.duration()
    }

    /// Time left before expiry.
    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }
}
