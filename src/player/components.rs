//! Player-related components.

use bevy::prelude::*;

use super::collaborators::{MovementInputSink, MovementTuning, OrientationSource, Rotator};
use super::config::PlayerConfig;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Aim, sprint and camera-mode state plus the speeds they select between.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CharacterState {
    /// True while aim-down-sight is engaged
    pub is_aiming: bool,
    /// Kept for parity with the character's public state; no transition reads or writes it
    pub is_sprinting: bool,
    /// Third-person camera active when true, first-person otherwise
    pub is_third_person: bool,
    pub base_movement_speed: f32,
    pub sneak_movement_speed: f32,
    pub sprint_movement_speed: f32,
    pub turn_rate_deg_per_sec: f32,
    /// Body yaw snaps to control yaw when set
    pub use_controller_rotation_yaw: bool,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl CharacterState {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            is_aiming: false,
            is_sprinting: false,
            is_third_person: true,
            base_movement_speed: config.base_movement_speed,
            sneak_movement_speed: config.sneak_movement_speed,
            sprint_movement_speed: config.sprint_movement_speed,
            turn_rate_deg_per_sec: config.turn_rate_deg_per_sec,
            use_controller_rotation_yaw: false,
        }
    }
}

/// The player's look rotation, separate from the body's facing.
#[derive(Component, Debug, Clone)]
pub struct ControlRotation {
    pub rotation: Rotator,
    pub pitch_limit_deg: f32,
}

impl Default for ControlRotation {
    fn default() -> Self {
        Self {
            rotation: Rotator::ZERO,
            pitch_limit_deg: 89.0,
        }
    }
}

impl OrientationSource for ControlRotation {
    fn control_rotation(&self) -> Rotator {
        self.rotation
    }

    fn add_yaw_input(&mut self, degrees: f32) {
        self.rotation.yaw = (self.rotation.yaw + degrees).rem_euclid(360.0);
    }

    fn add_pitch_input(&mut self, degrees: f32) {
        self.rotation.pitch =
            (self.rotation.pitch + degrees).clamp(-self.pitch_limit_deg, self.pitch_limit_deg);
    }
}

/// Movement requested this frame, consumed by the movement system.
#[derive(Component, Debug, Default, Clone)]
pub struct MovementIntent {
    pub pending: Vec3,
}

impl MovementIntent {
    /// Take the accumulated input, clamped to unit length.
    pub fn consume(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending).clamp_length_max(1.0)
    }
}

impl MovementInputSink for MovementIntent {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending += direction * scale;
    }
}

/// Walking, jumping and body-rotation settings for the character.
#[derive(Component, Debug, Clone)]
pub struct CharacterMovement {
    /// Current top ground speed (cm/s)
    pub max_walk_speed: f32,
    /// Body turns to face the direction it moves
    pub orient_rotation_to_movement: bool,
    /// Body turns toward control yaw at `rotation_rate_deg_per_sec`
    pub use_controller_desired_rotation: bool,
    pub rotation_rate_deg_per_sec: f32,
    pub jump_z_velocity: f32,
    pub gravity: f32,
    pub air_control: f32,
    /// Jump button currently held
    pub jump_pressed: bool,
    /// Current velocity (cm/s)
    pub velocity: Vec3,
    pub is_grounded: bool,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl CharacterMovement {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            max_walk_speed: config.base_movement_speed,
            orient_rotation_to_movement: true,
            use_controller_desired_rotation: false,
            rotation_rate_deg_per_sec: config.rotation_rate_deg_per_sec,
            jump_z_velocity: config.jump_z_velocity,
            gravity: config.gravity,
            air_control: config.air_control,
            jump_pressed: false,
            velocity: Vec3::ZERO,
            is_grounded: true,
        }
    }
}

impl MovementTuning for CharacterMovement {
    fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed;
    }

    fn set_orient_rotation_to_movement(&mut self, enabled: bool) {
        self.orient_rotation_to_movement = enabled;
    }

    fn set_use_controller_desired_rotation(&mut self, enabled: bool) {
        self.use_controller_desired_rotation = enabled;
    }

    fn set_jump_pressed(&mut self, pressed: bool) {
        self.jump_pressed = pressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_state_defaults() {
        let state = CharacterState::default();
        assert!(!state.is_aiming);
        assert!(!state.is_sprinting);
        assert!(state.is_third_person);
        assert_eq!(state.base_movement_speed, 500.0);
        assert_eq!(state.sneak_movement_speed, 150.0);
        assert_eq!(state.sprint_movement_speed, 750.0);
        assert_eq!(state.turn_rate_deg_per_sec, 50.0);
    }

    #[test]
    fn pitch_input_is_clamped() {
        let mut control = ControlRotation::default();
        control.add_pitch_input(120.0);
        assert_eq!(control.rotation.pitch, 89.0);
        control.add_pitch_input(-500.0);
        assert_eq!(control.rotation.pitch, -89.0);
    }

    #[test]
    fn yaw_input_wraps() {
        let mut control = ControlRotation::default();
        control.add_yaw_input(350.0);
        control.add_yaw_input(20.0);
        assert!((control.rotation.yaw - 10.0).abs() < 1e-4);
    }

    #[test]
    fn movement_intent_accumulates_and_clamps() {
        let mut intent = MovementIntent::default();
        intent.add_movement_input(Vec3::NEG_Z, 1.0);
        intent.add_movement_input(Vec3::X, 1.0);
        let consumed = intent.consume();
        assert!((consumed.length() - 1.0).abs() < 1e-5);
        assert_eq!(intent.pending, Vec3::ZERO);
    }

    #[test]
    fn movement_starts_oriented_to_movement() {
        let movement = CharacterMovement::default();
        assert!(movement.orient_rotation_to_movement);
        assert!(!movement.use_controller_desired_rotation);
        assert_eq!(movement.max_walk_speed, 500.0);
    }
}
