//! Character tuning loaded from an external RON file.
//!
//! Allows tweaking speeds, camera rig and jump parameters without
//! recompilation. Distances are centimeters, angles degrees.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::load_or_default;

/// Path of the character tuning file.
pub const PLAYER_CONFIG_PATH: &str = "assets/data/player/character.ron";

/// Character tuning loaded from assets/data/player/character.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    // Movement speeds (cm/s)
    pub base_movement_speed: f32,
    pub sneak_movement_speed: f32,
    pub sprint_movement_speed: f32,
    /// Gamepad turn rate in degrees per second at full deflection
    pub turn_rate_deg_per_sec: f32,
    /// Body yaw rate when turning toward a movement or controller direction
    pub rotation_rate_deg_per_sec: f32,
    /// Control pitch is clamped to +/- this many degrees
    pub pitch_limit_deg: f32,
    // Jumping
    pub jump_z_velocity: f32,
    pub gravity: f32,
    /// Fraction of lateral control available while airborne
    pub air_control: f32,
    // Collision capsule
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    // Camera rig
    pub camera_arm_length: f32,
    /// Radius of the probe that pulls the boom in against geometry
    pub camera_probe_radius: f32,
    /// Height of the boom pivot above the capsule center
    pub boom_pivot_height: f32,
    /// Height of the first-person eye above the capsule center
    pub eye_height: f32,
    pub field_of_view_deg: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_movement_speed: 500.0,
            sneak_movement_speed: 150.0,
            sprint_movement_speed: 750.0,
            turn_rate_deg_per_sec: 50.0,
            rotation_rate_deg_per_sec: 500.0,
            pitch_limit_deg: 89.0,
            jump_z_velocity: 700.0,
            gravity: 980.0,
            air_control: 0.35,
            capsule_radius: 42.0,
            capsule_half_height: 96.0,
            camera_arm_length: 400.0,
            camera_probe_radius: 12.0,
            boom_pivot_height: 60.0,
            eye_height: 70.0,
            field_of_view_deg: 90.0,
        }
    }
}

impl PlayerConfig {
    /// Load character tuning, falling back to defaults.
    pub fn load() -> Self {
        load_or_default(PLAYER_CONFIG_PATH)
    }
}

/// System to load character tuning at startup.
pub fn load_player_config(mut commands: Commands) {
    commands.insert_resource(PlayerConfig::load());
}
