//! TP Survival - a third/first-person survival character in Bevy.
//!
//! The character switches between a third-person spring-arm camera and a
//! first-person eye camera, walks, sneaks while aiming down sights, and
//! sprints when not aiming.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, data file loading
//! - **Player**: Character state, controller, input bindings, movement
//! - **Camera**: Spring arm, third/first-person cameras
//! - **World**: Test arena
//! - **UI**: On-screen messages, aim reticle, pause menu

pub mod camera;
pub mod core;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SurvivalPlugin;

impl Plugin for SurvivalPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Character state, input and movement
            .add_plugins(player::PlayerPlugin)

            // Camera rig
            .add_plugins(camera::CameraPlugin)

            // Arena and player spawn
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
