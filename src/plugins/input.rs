use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::components::{LightFlicker, LightSwitch};
use crate::events::{FlickerAction, FlickerCommand};
use crate::plugins::flicker::FlickerSystems;

#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum LightAction {
    StartFlicker,
    StopFlicker,
    ResetFlicker,
    ToggleLight,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<LightAction>::default())
            .add_systems(Update, send_light_commands.before(FlickerSystems));
    }
}

pub fn get_default_input_map() -> InputMap<LightAction> {
    let mut input_map = InputMap::default();

    input_map.insert(LightAction::StartFlicker, KeyCode::KeyF);
    input_map.insert(LightAction::StopFlicker, KeyCode::KeyS);
    input_map.insert(LightAction::ResetFlicker, KeyCode::KeyR);
    input_map.insert(LightAction::ToggleLight, KeyCode::KeyT);

    input_map
}

/// Translates key presses on input-mapped lights into FlickerCommand events.
fn send_light_commands(
    query: Query<(Entity, &ActionState<LightAction>, &Visibility), With<LightFlicker>>,
    mut requests: EventWriter<FlickerCommand>,
) {
    for (entity, action_state, visibility) in &query {
        let action = if action_state.just_pressed(&LightAction::StartFlicker) {
            FlickerAction::Start
        } else if action_state.just_pressed(&LightAction::StopFlicker) {
            FlickerAction::Stop
        } else if action_state.just_pressed(&LightAction::ResetFlicker) {
            FlickerAction::Reset
        } else if action_state.just_pressed(&LightAction::ToggleLight) {
            FlickerAction::SetLight(!visibility.is_enabled())
        } else {
            continue;
        };

        requests.send(FlickerCommand { entity, action });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::flicker::FlickerPlugin;
    use crate::resources::{FlickerConfig, FlickerRng};

    #[derive(Resource, Default)]
    struct SentActions(Vec<FlickerAction>);

    fn record_commands(mut requests: EventReader<FlickerCommand>, mut sent: ResMut<SentActions>) {
        for request in requests.read() {
            sent.0.push(request.action);
        }
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(FlickerRng::from_seed(3));
        app.init_resource::<SentActions>();
        app.add_plugins(FlickerPlugin);
        app.add_systems(
            Update,
            (
                send_light_commands.before(FlickerSystems),
                record_commands.after(send_light_commands),
            ),
        );
        app
    }

    #[test]
    fn test_key_presses_become_flicker_commands() {
        let mut app = test_app();
        let config = FlickerConfig::new(0.5..=0.5, 0.1..=0.1, 3, true)
            .unwrap()
            .with_start_on_spawn(false);
        let entity = app
            .world_mut()
            .spawn((LightFlicker::new(config), ActionState::<LightAction>::default()))
            .id();
        app.update();
        assert!(app.world().resource::<SentActions>().0.is_empty());

        // Light starts enabled, so toggling turns it off
        app.world_mut()
            .get_mut::<ActionState<LightAction>>(entity)
            .unwrap()
            .press(&LightAction::ToggleLight);
        app.update();

        assert_eq!(
            app.world().resource::<SentActions>().0,
            vec![FlickerAction::SetLight(false)]
        );
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Hidden)
        );

        {
            let mut action_state = app
                .world_mut()
                .get_mut::<ActionState<LightAction>>(entity)
                .unwrap();
            action_state.release(&LightAction::ToggleLight);
            action_state.press(&LightAction::StopFlicker);
        }
        app.update();

        assert_eq!(
            app.world().resource::<SentActions>().0,
            vec![FlickerAction::SetLight(false), FlickerAction::Stop]
        );
        // Stopping leaves the light at stay_on_after_complete
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Inherited)
        );
    }
}
