//! Player plugin - input dispatch, movement, and player-related systems.

use bevy::prelude::*;

use super::config::load_player_config;
use super::input::{dispatch_player_input, load_input_bindings, release_player_controls};
use super::movement::{apply_character_movement, grab_cursor, release_cursor};
use crate::core::GameState;

/// Ordering for the player's per-frame work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    /// Devices are read and the controller mutates state
    Input,
    /// The body moves using the state input left behind
    Movement,
}

/// Player plugin - handles input, movement, and character state.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Startup, (load_player_config, load_input_bindings))
            .add_systems(OnEnter(GameState::InGame), grab_cursor)
            .add_systems(
                OnExit(GameState::InGame),
                (release_cursor, release_player_controls),
            )
            .configure_sets(Update, (PlayerSet::Input, PlayerSet::Movement).chain())
            .add_systems(
                Update,
                (
                    dispatch_player_input.in_set(PlayerSet::Input),
                    apply_character_movement.in_set(PlayerSet::Movement),
                )
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
