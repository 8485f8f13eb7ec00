use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use constants::path::BOARD_SETTINGS_PATH;

use crate::engine::core::settings::BoardSettings;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::LevelPlugin;
use crate::tools::drop_indicator::DropIndicatorPlugin;
use crate::tools::token_drag::DragInputPlugin;

pub fn create_app() -> App {
    let settings = BoardSettings::load_or_default(BOARD_SETTINGS_PATH);
    let asset_root = settings.asset_root.clone();

    let mut app = App::new();
    app.add_plugins(create_default_plugins(asset_root))
        .insert_resource(settings)
        .add_plugins(LevelPlugin)
        .add_plugins(DropIndicatorPlugin)
        .add_plugins(DragInputPlugin)
        .add_systems(Startup, setup);

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_board_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-2.5, 9.0, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_board_camera(&mut commands);
}

fn create_default_plugins(asset_root: String) -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        file_path: asset_root,
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
