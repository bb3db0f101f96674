//! Capabilities the character controller configures.
//!
//! The controller never owns the pieces it drives. Each trait names one
//! narrow surface (orientation, movement, boom, camera, input, messages)
//! so the Bevy components in this crate and test doubles can both stand
//! in for them.

use bevy::prelude::*;

/// Euler rotation in degrees.
///
/// Positive yaw turns right, positive pitch looks up. At zero rotation the
/// forward axis is Bevy's `-Z` and the right axis is `+X`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Same yaw with pitch and roll cleared.
    pub fn yaw_only(&self) -> Self {
        Self::new(0.0, self.yaw, 0.0)
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Unit vector along the local forward axis.
    pub fn forward(&self) -> Vec3 {
        self.to_quat() * Vec3::NEG_Z
    }

    /// Unit vector along the local right axis.
    pub fn right(&self) -> Vec3 {
        self.to_quat() * Vec3::X
    }
}

/// Source of the player's control rotation (the "look" direction).
pub trait OrientationSource {
    fn control_rotation(&self) -> Rotator;
    fn add_yaw_input(&mut self, degrees: f32);
    fn add_pitch_input(&mut self, degrees: f32);
}

/// Accepts requested movement for the current frame.
pub trait MovementInputSink {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);
}

/// Movement settings the controller toggles.
pub trait MovementTuning {
    fn set_max_walk_speed(&mut self, speed: f32);
    fn set_orient_rotation_to_movement(&mut self, enabled: bool);
    fn set_use_controller_desired_rotation(&mut self, enabled: bool);
    fn set_jump_pressed(&mut self, pressed: bool);
}

/// Spring arm holding the third-person camera.
pub trait BoomRig {
    fn set_arm_length(&mut self, length: f32);
    /// Offset as (forward, right, up) in centimeters.
    fn set_target_offset(&mut self, offset: Vec3);
}

/// A camera that can be switched on and reframed.
pub trait CameraView {
    fn set_active(&mut self, active: bool);
    fn set_field_of_view(&mut self, degrees: f32);
    fn set_use_pawn_control_rotation(&mut self, enabled: bool);
}

/// Discrete character operations an action binding can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterAction {
    Jump,
    StopJumping,
    BeginAim,
    EndAim,
    BeginSprint,
    EndSprint,
    ToggleCameraMode,
}

/// Continuous character operations an axis binding feeds every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterAxis {
    MoveForward,
    MoveRight,
    /// Absolute yaw delta (mouse).
    AddYaw,
    /// Normalized yaw rate (gamepad stick).
    TurnYawAtRate,
    /// Absolute pitch delta (mouse).
    AddPitch,
    /// Normalized pitch rate (gamepad stick).
    TurnPitchAtRate,
}

/// Which transition of a button fires an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEdge {
    Pressed,
    Released,
}

/// Registry the controller declares its named bindings against.
pub trait InputBinder {
    fn bind_action(&mut self, name: &str, edge: InputEdge, action: CharacterAction);
    fn bind_axis(&mut self, name: &str, axis: CharacterAxis);
}

/// Receives short on-screen messages.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, duration_secs: f32, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn zero_rotation_faces_negative_z() {
        assert_vec_near(Rotator::ZERO.forward(), Vec3::NEG_Z);
        assert_vec_near(Rotator::ZERO.right(), Vec3::X);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let rotation = Rotator::new(0.0, 90.0, 0.0);
        assert_vec_near(rotation.forward(), Vec3::X);
        assert_vec_near(rotation.right(), Vec3::Z);
    }

    #[test]
    fn positive_pitch_looks_up() {
        let rotation = Rotator::new(30.0, 0.0, 0.0);
        assert!(rotation.forward().y > 0.0);
    }

    #[test]
    fn yaw_only_keeps_direction_horizontal() {
        let rotation = Rotator::new(-60.0, 45.0, 20.0).yaw_only();
        assert_eq!(rotation.pitch, 0.0);
        assert_eq!(rotation.roll, 0.0);
        assert!(rotation.forward().y.abs() < 1e-6);
        assert!(rotation.right().y.abs() < 1e-6);
        assert!((rotation.forward().length() - 1.0).abs() < 1e-5);
    }
}
