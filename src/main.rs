//! TP Survival - Entry Point
//!
//! Controls:
//! - WASD / left stick: Move
//! - Mouse / right stick: Look around
//! - Right mouse / left trigger: Aim down sights
//! - Shift / left stick press: Sprint
//! - Space / south button: Jump
//! - V / north button: Switch third/first person
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "TP Survival".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(tp_survival::SurvivalPlugin)

        .run();
}
