//! LightFlicker component: the flicker timing state machine.
//!
//! The light alternates between a flicker phase (holding its current state)
//! and an off phase, toggling at the end of each. Every completed off phase
//! counts as one cycle; after `repeat_count` cycles the light is frozen at
//! `stay_on_after_complete`.
//!
//! The state machine is engine-agnostic: it is driven by an injected elapsed
//! time, writes the light through [`LightSwitch`], and reports notifications
//! as [`FlickerSignal`]s for the caller to dispatch.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::components::countdown::CountdownTimer;
use crate::resources::flicker_config::FlickerConfig;

/// Anything with an on/off flag the flicker can drive.
pub trait LightSwitch {
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

impl LightSwitch for bool {
    fn is_enabled(&self) -> bool {
        *self
    }

    fn set_enabled(&mut self, enabled: bool) {
        *self = enabled;
    }
}

/// Hidden lights are not rendered. Enabling uses `Inherited` so a hidden
/// parent still hides the light.
impl LightSwitch for Visibility {
    fn is_enabled(&self) -> bool {
        *self != Visibility::Hidden
    }

    fn set_enabled(&mut self, enabled: bool) {
        *self = if enabled {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Notification raised by the state machine, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickerSignal {
    Started,
    Stopped,
    LightOn,
    LightOff,
}

/// Where the sequence currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum FlickerPhase {
    /// Not running: never started, or stopped.
    #[default]
    Idle,
    /// Flicker timer running.
    FlickerOn,
    /// Off timer running.
    FlickerOff,
    /// Ran all cycles; light frozen at `stay_on_after_complete`.
    Complete,
}

/// Flickers the entity's light for a bounded number of cycles.
///
/// The light is the entity's [`Visibility`] when driven by the plugin systems.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Visibility)]
pub struct LightFlicker {
    config: FlickerConfig,
    phase: FlickerPhase,
    current_repeat: u32,
    flicker_timer: CountdownTimer,
    off_timer: CountdownTimer,
}

impl Default for LightFlicker {
    fn default() -> Self {
        Self::new(FlickerConfig::default())
    }
}

impl LightFlicker {
    /// Creates an idle flicker. `config` is expected to have passed
    /// [`FlickerConfig::validate`].
    pub fn new(config: FlickerConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid flicker config");
        Self {
            config,
            phase: FlickerPhase::Idle,
            current_repeat: 0,
            flicker_timer: CountdownTimer::default(),
            off_timer: CountdownTimer::default(),
        }
    }

    pub fn config(&self) -> &FlickerConfig {
        &self.config
    }

    pub fn phase(&self) -> FlickerPhase {
        self.phase
    }

    /// Completed cycles in the current sequence.
    pub fn current_repeat(&self) -> u32 {
        self.current_repeat
    }

    pub fn flicker_timer(&self) -> &CountdownTimer {
        &self.flicker_timer
    }

    pub fn off_timer(&self) -> &CountdownTimer {
        &self.off_timer
    }

    /// True while either phase timer is counting down.
    pub fn is_flickering(&self) -> bool {
        self.flicker_timer.is_running() || self.off_timer.is_running()
    }

    /// Sets the light directly, independent of any running sequence.
    pub fn toggle_light(
        &self,
        light: &mut impl LightSwitch,
        value: bool,
        signals: &mut Vec<FlickerSignal>,
    ) {
        light.set_enabled(value);
        signals.push(if value {
            FlickerSignal::LightOn
        } else {
            FlickerSignal::LightOff
        });
    }

    /// Begins a new sequence from cycle zero.
    pub fn start(&mut self, rng: &mut impl Rng, signals: &mut Vec<FlickerSignal>) {
        self.current_repeat = 0;
        self.off_timer.stop();
        self.arm_flicker(rng);
        signals.push(FlickerSignal::Started);
    }

    /// Halts the sequence and leaves the light at `stay_on_after_complete`.
    pub fn stop(&mut self, light: &mut impl LightSwitch, signals: &mut Vec<FlickerSignal>) {
        self.flicker_timer.stop();
        self.off_timer.stop();
        self.phase = FlickerPhase::Idle;
        light.set_enabled(self.config.stay_on_after_complete);
        signals.push(FlickerSignal::Stopped);
    }

    /// Stop followed by start.
    pub fn reset(
        &mut self,
        light: &mut impl LightSwitch,
        rng: &mut impl Rng,
        signals: &mut Vec<FlickerSignal>,
    ) {
        self.stop(light, signals);
        self.start(rng, signals);
    }

    /// Advances the active phase by `delta`.
    ///
    /// At most one transition happens per call; time left over after a timer
    /// expires is not carried into the next phase.
    pub fn tick(
        &mut self,
        delta: Duration,
        light: &mut impl LightSwitch,
        rng: &mut impl Rng,
        signals: &mut Vec<FlickerSignal>,
    ) {
        // A freshly armed off timer waits for the next call rather than
        // consuming this delta as well.
        if self.flicker_timer.is_running() {
            if self.flicker_timer.tick(delta) {
                self.on_flicker_elapsed(light, rng, signals);
            }
        } else if self.off_timer.is_running() && self.off_timer.tick(delta) {
            self.on_off_elapsed(light, rng, signals);
        }
    }

    fn on_flicker_elapsed(
        &mut self,
        light: &mut impl LightSwitch,
        rng: &mut impl Rng,
        signals: &mut Vec<FlickerSignal>,
    ) {
        let next = !light.is_enabled();
        self.toggle_light(light, next, signals);

        let duration = sample_duration(
            rng,
            self.config.min_off_duration,
            self.config.max_off_duration,
        );
        self.off_timer.reset(duration);
        self.off_timer.start();
        self.phase = FlickerPhase::FlickerOff;
    }

    fn on_off_elapsed(
        &mut self,
        light: &mut impl LightSwitch,
        rng: &mut impl Rng,
        signals: &mut Vec<FlickerSignal>,
    ) {
        let next = !light.is_enabled();
        self.toggle_light(light, next, signals);

        self.current_repeat += 1;
        if self.current_repeat < self.config.repeat_count {
            self.arm_flicker(rng);
        } else {
            light.set_enabled(self.config.stay_on_after_complete);
            self.phase = FlickerPhase::Complete;
            debug!("Flicker complete after {} cycles", self.current_repeat);
        }
    }

    fn arm_flicker(&mut self, rng: &mut impl Rng) {
        let duration = sample_duration(
            rng,
            self.config.min_flicker_duration,
            self.config.max_flicker_duration,
        );
        self.flicker_timer.reset(duration);
        self.flicker_timer.start();
        self.phase = FlickerPhase::FlickerOn;
    }
}

/// Uniform sample in `[min, max]` seconds, inclusive on both ends.
pub fn sample_duration(rng: &mut impl Rng, min: f32, max: f32) -> Duration {
    let secs = if min < max { rng.gen_range(min..=max) } else { min };
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::MAX)
}
