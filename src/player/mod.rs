//! Player module - character state, controller, input, and movement.

pub mod collaborators;
mod components;
mod config;
mod controller;
mod input;
mod movement;
mod plugin;

pub use components::*;
pub use config::{PlayerConfig, PLAYER_CONFIG_PATH};
pub use controller::*;
pub use input::{
    dispatch_player_input, release_player_controls, AxisSource, BindingRegistry, ButtonSource,
    DeviceState, InputBindings, INPUT_BINDINGS_PATH,
};
pub use movement::{apply_character_movement, spawn_player, yaw_of_rotation, PlayerBody};
pub use plugin::{PlayerPlugin, PlayerSet};
