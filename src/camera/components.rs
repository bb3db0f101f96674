//! Camera rig components.

use bevy::prelude::*;

use crate::player::collaborators::{BoomRig, CameraView};
use crate::player::PlayerConfig;

/// Boom that holds the third-person camera behind the character.
///
/// Lengths and offsets are centimeters. The offset is applied in the
/// arm's yaw frame as (forward, right, up).
#[derive(Component, Debug, Clone)]
pub struct SpringArm {
    pub target_arm_length: f32,
    pub target_offset: Vec3,
    /// Arm follows the control rotation instead of the body
    pub use_pawn_control_rotation: bool,
    /// Radius kept between the camera and anything the arm hits
    pub probe_radius: f32,
    /// Height of the arm's pivot above the body origin
    pub pivot_height: f32,
}

impl Default for SpringArm {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl SpringArm {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            target_arm_length: config.camera_arm_length,
            target_offset: Vec3::ZERO,
            use_pawn_control_rotation: true,
            probe_radius: config.camera_probe_radius,
            pivot_height: config.boom_pivot_height,
        }
    }
}

impl BoomRig for SpringArm {
    fn set_arm_length(&mut self, length: f32) {
        self.target_arm_length = length;
    }

    fn set_target_offset(&mut self, offset: Vec3) {
        self.target_offset = offset;
    }
}

/// Which of the character's two cameras this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    ThirdPerson,
    FirstPerson,
}

/// Gameplay-facing camera settings, mirrored onto Bevy's `Camera` and `Projection`.
#[derive(Component, Debug, Clone)]
pub struct ViewCamera {
    pub kind: CameraKind,
    pub active: bool,
    /// Horizontal field of view in degrees
    pub field_of_view_deg: f32,
    /// Camera takes the control rotation directly instead of its mount's
    pub use_pawn_control_rotation: bool,
}

impl ViewCamera {
    pub fn third_person(field_of_view_deg: f32) -> Self {
        Self {
            kind: CameraKind::ThirdPerson,
            active: true,
            field_of_view_deg,
            use_pawn_control_rotation: false,
        }
    }

    pub fn first_person(field_of_view_deg: f32) -> Self {
        Self {
            kind: CameraKind::FirstPerson,
            active: false,
            field_of_view_deg,
            use_pawn_control_rotation: true,
        }
    }
}

impl CameraView for ViewCamera {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view_deg = degrees;
    }

    fn set_use_pawn_control_rotation(&mut self, enabled: bool) {
        self.use_pawn_control_rotation = enabled;
    }
}

/// Entity a camera is mounted on.
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowTarget(pub Entity);
