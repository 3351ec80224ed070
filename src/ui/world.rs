//! World setup systems for camera, lighting, road and HUD

use bevy::prelude::*;

use super::components::{Ground, HudText, MainCamera, PlayerVisual};
use crate::simulation::ROAD_WIDTH;

const ROAD_LENGTH: f32 = 400.0;

/// System to setup the world environment (road, lighting, camera, player)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Chase camera; repositioned every frame
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.5, -9.0).looking_at(Vec3::new(0.0, 1.0, 10.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Asphalt strip that follows the player
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ROAD_WIDTH, ROAD_LENGTH))),
        MeshMaterial3d(materials.add(Color::srgb(0.22, 0.22, 0.24))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Unit cube scaled to the vehicle's hitbox each frame
    commands.spawn((
        PlayerVisual,
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.95, 0.8, 0.1))),
        Transform::from_xyz(0.0, 0.5, 0.0),
        Visibility::Hidden,
    ));
}

/// System to setup the heads-up display
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("0 m"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                HudText::Distance,
            ));
            parent.spawn((
                Text::new("0 km/h"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText::Speed,
            ));
            parent.spawn((
                Text::new("Best: ---"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.5)),
                HudText::Best,
            ));
        });

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Auto,
            position_type: PositionType::Absolute,
            top: Val::Px(80.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.4, 0.2)),
                HudText::Flash,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HudText::Status,
            ));
        });
}
