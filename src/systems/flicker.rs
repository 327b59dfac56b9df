// Light flicker systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{FlickerSignal, LightFlicker};
use crate::events::{
    FlickerAction, FlickerCommand, FlickerStarted, FlickerStopped, LightTurnedOff, LightTurnedOn,
};
use crate::resources::FlickerRng;

/// Forwards state machine signals to the rest of the app.
///
/// Each signal goes out twice: as a buffered event for reader systems, and as
/// a trigger targeted at the flickering entity for observers attached to it.
#[derive(SystemParam)]
pub struct FlickerNotifier<'w, 's> {
    commands: Commands<'w, 's>,
    started: EventWriter<'w, FlickerStarted>,
    stopped: EventWriter<'w, FlickerStopped>,
    turned_on: EventWriter<'w, LightTurnedOn>,
    turned_off: EventWriter<'w, LightTurnedOff>,
}

impl FlickerNotifier<'_, '_> {
    /// Sends every pending signal for `entity`, in order, and clears the buffer.
    pub fn notify(&mut self, entity: Entity, signals: &mut Vec<FlickerSignal>) {
        for signal in signals.drain(..) {
            debug!("Flicker {:?}: {:?}", entity, signal);
            match signal {
                FlickerSignal::Started => {
                    self.started.send(FlickerStarted { entity });
                    self.commands.trigger_targets(FlickerStarted { entity }, entity);
                }
                FlickerSignal::Stopped => {
                    self.stopped.send(FlickerStopped { entity });
                    self.commands.trigger_targets(FlickerStopped { entity }, entity);
                }
                FlickerSignal::LightOn => {
                    self.turned_on.send(LightTurnedOn { entity });
                    self.commands.trigger_targets(LightTurnedOn { entity }, entity);
                }
                FlickerSignal::LightOff => {
                    self.turned_off.send(LightTurnedOff { entity });
                    self.commands.trigger_targets(LightTurnedOff { entity }, entity);
                }
            }
        }
    }
}

/// System that starts newly added flickers configured with `start_on_spawn`.
pub fn start_flicker_on_spawn(
    mut query: Query<(Entity, &mut LightFlicker), Added<LightFlicker>>,
    mut rng: ResMut<FlickerRng>,
    mut notifier: FlickerNotifier,
    mut signals: Local<Vec<FlickerSignal>>,
) {
    for (entity, mut flicker) in &mut query {
        if !flicker.config().start_on_spawn {
            continue;
        }
        flicker.start(&mut rng.0, &mut signals);
        notifier.notify(entity, &mut signals);
    }
}

/// System that applies FlickerCommand events to their target entities.
pub fn apply_flicker_commands(
    mut requests: EventReader<FlickerCommand>,
    mut query: Query<(&mut LightFlicker, &mut Visibility)>,
    mut rng: ResMut<FlickerRng>,
    mut notifier: FlickerNotifier,
    mut signals: Local<Vec<FlickerSignal>>,
) {
    for request in requests.read() {
        let Ok((mut flicker, mut visibility)) = query.get_mut(request.entity) else {
            warn!(
                "Flicker command {:?} for {:?} ignored: no LightFlicker",
                request.action, request.entity
            );
            continue;
        };

        match request.action {
            FlickerAction::Start => flicker.start(&mut rng.0, &mut signals),
            FlickerAction::Stop => flicker.stop(&mut *visibility, &mut signals),
            FlickerAction::Reset => flicker.reset(&mut *visibility, &mut rng.0, &mut signals),
            FlickerAction::SetLight(value) => {
                flicker.toggle_light(&mut *visibility, value, &mut signals)
            }
        }
        notifier.notify(request.entity, &mut signals);
    }
}

/// System that advances every running flicker by the frame delta.
pub fn tick_light_flickers(
    time: Res<Time>,
    mut query: Query<(Entity, &mut LightFlicker, &mut Visibility)>,
    mut rng: ResMut<FlickerRng>,
    mut notifier: FlickerNotifier,
    mut signals: Local<Vec<FlickerSignal>>,
) {
    let delta = time.delta();

    for (entity, mut flicker, mut visibility) in &mut query {
        // Skip idle flickers so their Visibility isn't marked changed
        if !flicker.is_flickering() {
            continue;
        }

        flicker.tick(delta, &mut *visibility, &mut rng.0, &mut signals);
        notifier.notify(entity, &mut signals);
    }
}

/// System that logs flicker notifications.
pub fn log_flicker_events(
    mut started: EventReader<FlickerStarted>,
    mut stopped: EventReader<FlickerStopped>,
    mut turned_on: EventReader<LightTurnedOn>,
    mut turned_off: EventReader<LightTurnedOff>,
) {
    for event in started.read() {
        info!("Flicker started on {:?}", event.entity);
    }
    for event in stopped.read() {
        info!("Flicker stopped on {:?}", event.entity);
    }
    for event in turned_on.read() {
        debug!("Light on: {:?}", event.entity);
    }
    for event in turned_off.read() {
        debug!("Light off: {:?}", event.entity);
    }
}
