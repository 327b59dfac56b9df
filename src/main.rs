use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use light_flicker::components::LightFlicker;
use light_flicker::plugins::flicker::FlickerPlugin;
use light_flicker::plugins::input::{get_default_input_map, InputPlugin};
use light_flicker::resources::{CliArgs, FlickerConfig, FlickerConfigError, FlickerRng};

fn main() -> Result<(), FlickerConfigError> {
    let cli = CliArgs::parse();

    let mut config = FlickerConfig::load_or_default(cli.config.as_deref())?;
    if let Some(repeat) = cli.repeat {
        config.repeat_count = repeat;
    }
    if cli.stay_on {
        config.stay_on_after_complete = true;
    }

    let rng = match cli.seed {
        Some(seed) => FlickerRng::from_seed(seed),
        None => FlickerRng::default(),
    };

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(FlickerPlugin)
        .add_plugins(InputPlugin)
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 40.0,
        })
        .insert_resource(rng)
        .insert_resource(config)
        .add_systems(Startup, setup_scene)
        .run();

    Ok(())
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FlickerConfig>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-4.0, 5.0, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(12.0, 12.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.33, 0.3))),
    ));

    // Something to cast shadows
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.6, 0.2, 0.15))),
        Transform::from_xyz(0.0, 0.5, 0.0),
    ));

    // The faulty bulb
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            color: Color::srgb(1.0, 0.85, 0.6),
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(1.5, 3.0, 1.0),
        LightFlicker::new(config.clone()),
        InputManagerBundle::with_map(get_default_input_map()),
    ));

    info!("Controls: F start, S stop, R reset, T toggle light");
}
