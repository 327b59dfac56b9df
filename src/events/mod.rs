use bevy::prelude::*;

/// Event emitted when a flicker sequence starts on an entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerStarted {
    pub entity: Entity,
}

/// Event emitted when a flicker sequence is stopped (not on natural completion).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerStopped {
    pub entity: Entity,
}

/// Event emitted whenever a flickering light is switched on.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightTurnedOn {
    pub entity: Entity,
}

/// Event emitted whenever a flickering light is switched off.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightTurnedOff {
    pub entity: Entity,
}

/// Control request for a [`LightFlicker`](crate::components::LightFlicker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickerAction {
    Start,
    Stop,
    /// Stop, then start again from cycle zero.
    Reset,
    /// Set the light directly without touching the sequence.
    SetLight(bool),
}

/// Event sent by gameplay systems to drive a flickering light.
#[derive(Event, Debug, Clone, Copy)]
pub struct FlickerCommand {
    /// The entity carrying the LightFlicker component.
    pub entity: Entity,
    pub action: FlickerAction,
}
