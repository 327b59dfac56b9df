//! Flicker plugin - drives LightFlicker components from the frame clock.
//!
//! Registers the flicker events, the seeded RNG resource, and the systems that
//! start, command and tick every LightFlicker each frame.

use bevy::prelude::*;

use crate::components::LightFlicker;
use crate::events::{FlickerCommand, FlickerStarted, FlickerStopped, LightTurnedOff, LightTurnedOn};
use crate::resources::{FlickerConfig, FlickerRng};
use crate::systems::flicker::{
    apply_flicker_commands, log_flicker_events, start_flicker_on_spawn, tick_light_flickers,
};

/// System set containing all flicker state updates.
/// Order reader systems `.after(FlickerSystems)` to see this frame's events.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlickerSystems;

pub struct FlickerPlugin;

impl Plugin for FlickerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LightFlicker>()
            .register_type::<FlickerConfig>()
            .init_resource::<FlickerRng>()
            .add_event::<FlickerCommand>()
            .add_event::<FlickerStarted>()
            .add_event::<FlickerStopped>()
            .add_event::<LightTurnedOn>()
            .add_event::<LightTurnedOff>()
            .add_systems(
                Update,
                (
                    start_flicker_on_spawn,
                    apply_flicker_commands,
                    tick_light_flickers,
                )
                    .chain()
                    .in_set(FlickerSystems),
            )
            .add_systems(Update, log_flicker_events.after(FlickerSystems));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::components::FlickerPhase;
    use crate::events::FlickerAction;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Seen {
        Started,
        Stopped,
        On,
        Off,
    }

    #[derive(Resource, Default)]
    struct EventLog(Vec<Seen>);

    #[derive(Resource, Default)]
    struct ObservedOff(u32);

    fn record_events(
        mut started: EventReader<FlickerStarted>,
        mut stopped: EventReader<FlickerStopped>,
        mut turned_on: EventReader<LightTurnedOn>,
        mut turned_off: EventReader<LightTurnedOff>,
        mut log: ResMut<EventLog>,
    ) {
        // Stopped before started so a reset reads in the order it happened
        for _ in stopped.read() {
            log.0.push(Seen::Stopped);
        }
        for _ in started.read() {
            log.0.push(Seen::Started);
        }
        for _ in turned_on.read() {
            log.0.push(Seen::On);
        }
        for _ in turned_off.read() {
            log.0.push(Seen::Off);
        }
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(FlickerRng::from_seed(11));
        app.init_resource::<EventLog>();
        app.init_resource::<ObservedOff>();
        app.add_plugins(FlickerPlugin);
        app.add_systems(Update, record_events.after(FlickerSystems));
        app
    }

    fn step(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    fn config(repeat_count: u32, stay_on: bool, start_on_spawn: bool) -> FlickerConfig {
        FlickerConfig::new(0.1..=0.1, 0.05..=0.05, repeat_count, stay_on)
            .unwrap()
            .with_start_on_spawn(start_on_spawn)
    }

    fn send(app: &mut App, entity: Entity, action: FlickerAction) {
        app.world_mut().send_event(FlickerCommand { entity, action });
        step(app, 0);
    }

    #[test]
    fn test_runs_to_completion_on_spawn() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn(LightFlicker::new(config(2, false, true)))
            .id();

        step(&mut app, 0);
        assert_eq!(app.world().resource::<EventLog>().0, vec![Seen::Started]);

        for _ in 0..20 {
            step(&mut app, 50);
        }

        let flicker = app.world().get::<LightFlicker>(entity).unwrap();
        assert_eq!(flicker.phase(), FlickerPhase::Complete);
        assert_eq!(flicker.current_repeat(), 2);
        assert!(!flicker.is_flickering());
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Hidden)
        );

        // Visibility starts enabled, so the first toggle turns it off
        assert_eq!(
            app.world().resource::<EventLog>().0,
            vec![Seen::Started, Seen::Off, Seen::On, Seen::Off, Seen::On]
        );
    }

    #[test]
    fn test_commands_drive_flicker() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn(LightFlicker::new(config(3, true, false)))
            .id();
        step(&mut app, 0);
        assert!(app.world().resource::<EventLog>().0.is_empty());

        send(&mut app, entity, FlickerAction::SetLight(false));
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Hidden)
        );
        let flicker = app.world().get::<LightFlicker>(entity).unwrap();
        assert_eq!(flicker.phase(), FlickerPhase::Idle);
        assert_eq!(flicker.current_repeat(), 0);

        send(&mut app, entity, FlickerAction::Start);
        let flicker = app.world().get::<LightFlicker>(entity).unwrap();
        assert_eq!(flicker.phase(), FlickerPhase::FlickerOn);
        assert!(flicker.flicker_timer().is_running());

        send(&mut app, entity, FlickerAction::Stop);
        let flicker = app.world().get::<LightFlicker>(entity).unwrap();
        assert!(!flicker.is_flickering());
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Inherited)
        );

        send(&mut app, entity, FlickerAction::Reset);
        let flicker = app.world().get::<LightFlicker>(entity).unwrap();
        assert_eq!(flicker.current_repeat(), 0);
        assert!(flicker.flicker_timer().is_running());

        assert_eq!(
            app.world().resource::<EventLog>().0,
            vec![
                Seen::Off,
                Seen::Started,
                Seen::Stopped,
                Seen::Stopped,
                Seen::Started,
            ]
        );
    }

    #[test]
    fn test_command_for_missing_entity_is_ignored() {
        let mut app = test_app();
        let entity = app.world_mut().spawn(Visibility::Visible).id();
        step(&mut app, 0);

        send(&mut app, entity, FlickerAction::Start);

        assert!(app.world().resource::<EventLog>().0.is_empty());
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Visible)
        );
    }

    #[test]
    fn test_entity_observers_receive_triggers() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn(LightFlicker::new(config(1, false, true)))
            .observe(|_trigger: Trigger<LightTurnedOff>, mut seen: ResMut<ObservedOff>| {
                seen.0 += 1;
            })
            .id();

        step(&mut app, 0);
        for _ in 0..10 {
            step(&mut app, 50);
        }

        let flicker = app.world().get::<LightFlicker>(entity).unwrap();
        assert_eq!(flicker.phase(), FlickerPhase::Complete);
        assert_eq!(app.world().resource::<ObservedOff>().0, 1);
    }
}
