//! Camera plugin - places and configures the character's cameras.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_rapier3d::prelude::*;

use super::rig::*;
use crate::player::PlayerSet;

/// Camera plugin - spring arm, first-person eye, and projection sync.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Update, sync_body_visibility.after(PlayerSet::Input))
            // Cameras follow the body after physics has moved it this frame
            .add_systems(
                PostUpdate,
                (follow_spring_arm, follow_first_person, sync_view_cameras)
                    .after(PhysicsSet::Writeback)
                    .before(TransformSystem::TransformPropagate),
            );
    }
}
