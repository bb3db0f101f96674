//! World plugin - arena and player setup.

use bevy::prelude::*;

use super::arena::spawn_arena;
use crate::core::GameState;
use crate::player::{spawn_player, PlayerConfig};

/// Where the player appears.
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.2, 0.0);

/// World plugin - handles arena setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
        })
        // Pausing leaves and re-enters InGame, so build the world once on leaving Loading
        .add_systems(OnExit(GameState::Loading), setup_world);
    }
}

/// Set up the arena and spawn the player.
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlayerConfig>,
) {
    info!("Building arena");
    spawn_arena(&mut commands, &mut meshes, &mut materials);
    spawn_player(&mut commands, &mut meshes, &mut materials, PLAYER_SPAWN, &config);
}
