//! Kinematic character movement and body rotation.
//!
//! Consumes the movement requested by the controller each frame and moves
//! the body through Rapier's `KinematicCharacterController`. Tuning is in
//! centimeters and converted to world units at the last step.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::collaborators::Rotator;
use super::components::*;
use super::config::PlayerConfig;
use crate::camera::{spawn_view_cameras, SpringArm};
use crate::core::units::{to_meters, CENTIMETERS_PER_METER};

/// Scales `air_control` into a per-second blend rate while airborne.
const AIR_CONTROL_RESPONSE: f32 = 10.0;

/// Grab and hide cursor when entering gameplay.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Yaw in degrees that faces along `direction` on the ground plane.
pub fn yaw_of_direction(direction: Vec3) -> f32 {
    direction.x.atan2(-direction.z).to_degrees()
}

/// Yaw in degrees of a body rotation.
pub fn yaw_of_rotation(rotation: Quat) -> f32 {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    -yaw.to_degrees()
}

/// Step `current` toward `target` along the shorter arc, at most `max_step` degrees.
pub fn step_yaw_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let difference = (target - current + 540.0).rem_euclid(360.0) - 180.0;
    current + difference.clamp(-max_step, max_step)
}

/// Body yaw after one frame of rotation.
pub fn next_body_yaw(
    current: f32,
    control_yaw: f32,
    input: Vec3,
    state: &CharacterState,
    movement: &CharacterMovement,
    delta_secs: f32,
) -> f32 {
    if state.use_controller_rotation_yaw {
        return control_yaw;
    }

    let max_step = movement.rotation_rate_deg_per_sec * delta_secs;
    if movement.orient_rotation_to_movement {
        if input.length_squared() > f32::EPSILON {
            return step_yaw_toward(current, yaw_of_direction(input), max_step);
        }
    } else if movement.use_controller_desired_rotation {
        return step_yaw_toward(current, control_yaw, max_step);
    }
    current
}

/// Velocity (cm/s) after one frame of walking, jumping and gravity.
pub fn next_velocity(movement: &mut CharacterMovement, input: Vec3, delta_secs: f32) -> Vec3 {
    let desired = Vec3::new(input.x, 0.0, input.z) * movement.max_walk_speed;
    let mut velocity = movement.velocity;

    if movement.is_grounded {
        velocity.x = desired.x;
        velocity.z = desired.z;
        if velocity.y < 0.0 {
            velocity.y = 0.0;
        }
        if movement.jump_pressed {
            velocity.y = movement.jump_z_velocity;
            movement.jump_pressed = false;
        }
    } else {
        let t = (movement.air_control * AIR_CONTROL_RESPONSE * delta_secs).min(1.0);
        velocity.x += (desired.x - velocity.x) * t;
        velocity.z += (desired.z - velocity.z) * t;
        velocity.y -= movement.gravity * delta_secs;
    }

    movement.velocity = velocity;
    velocity
}

/// Move and rotate the player body.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn apply_character_movement(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &mut Transform,
            &CharacterState,
            &ControlRotation,
            &mut MovementIntent,
            &mut CharacterMovement,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let Ok((entity, mut transform, state, control, mut intent, mut movement, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };

    // Ground check just below the capsule bottom
    let half_height = to_meters(config.capsule_half_height);
    movement.is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * (half_height - 0.05);
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(entity),
            )
            .is_some()
    } else {
        true
    };

    let dt = time.delta_secs();
    let input = intent.consume();
    let velocity = next_velocity(&mut movement, input, dt);

    let yaw = next_body_yaw(
        yaw_of_rotation(transform.rotation),
        control.rotation.yaw,
        input,
        state,
        &movement,
        dt,
    );
    transform.rotation = Rotator::new(0.0, yaw, 0.0).to_quat();

    controller.translation = Some(velocity / CENTIMETERS_PER_METER * dt);
}

/// Marker for the visible body mesh.
#[derive(Component)]
pub struct PlayerBody;

/// Spawn the player entity with its camera rig.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    config: &PlayerConfig,
) -> Entity {
    let radius = to_meters(config.capsule_radius);
    // Half height includes the hemispheres; Rapier wants the segment half length
    let segment_half = to_meters(config.capsule_half_height - config.capsule_radius).max(0.0);

    let player = commands
        .spawn((
            Player,
            CharacterState::from_config(config),
            ControlRotation {
                pitch_limit_deg: config.pitch_limit_deg,
                ..default()
            },
            MovementIntent::default(),
            CharacterMovement::from_config(config),
            SpringArm::from_config(config),
            // Transform
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(segment_half, radius),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.45),
                    min_width: CharacterLength::Absolute(0.3),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    let body_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.5, 0.42),
        perceptual_roughness: 0.8,
        ..default()
    });

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            PlayerBody,
            Mesh3d(meshes.add(Capsule3d::new(radius, segment_half * 2.0))),
            MeshMaterial3d(body_material.clone()),
            Transform::default(),
        ));
        // Visor so the body's facing is readable in third person
        parent.spawn((
            PlayerBody,
            Mesh3d(meshes.add(Cuboid::new(radius, 0.08, 0.1))),
            MeshMaterial3d(materials.add(Color::srgb(0.15, 0.15, 0.18))),
            Transform::from_xyz(0.0, to_meters(config.eye_height), -radius),
        ));
    });

    spawn_view_cameras(commands, player, config);

    info!("Spawned player at {:?}", position);
    player
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_of_direction_matches_rotator() {
        for yaw in [0.0_f32, 45.0, 90.0, -135.0] {
            let direction = Rotator::new(0.0, yaw, 0.0).forward();
            assert!((yaw_of_direction(direction) - yaw).abs() < 1e-3, "yaw {yaw}");
            let quat = Rotator::new(0.0, yaw, 0.0).to_quat();
            assert!((yaw_of_rotation(quat) - yaw).abs() < 1e-3, "yaw {yaw}");
        }
    }

    #[test]
    fn yaw_steps_along_shorter_arc() {
        assert_eq!(step_yaw_toward(170.0, -170.0, 5.0), 175.0);
        assert_eq!(step_yaw_toward(-170.0, 170.0, 5.0), -175.0);
        assert_eq!(step_yaw_toward(10.0, 12.0, 5.0), 12.0);
    }

    #[test]
    fn body_snaps_to_control_yaw_while_aiming() {
        let mut state = CharacterState::default();
        state.use_controller_rotation_yaw = true;
        let movement = CharacterMovement::default();
        let yaw = next_body_yaw(0.0, 120.0, Vec3::ZERO, &state, &movement, 0.016);
        assert_eq!(yaw, 120.0);
    }

    #[test]
    fn body_orients_to_movement_at_rotation_rate() {
        let state = CharacterState::default();
        let movement = CharacterMovement::default();
        // 500 deg/s over 0.1s allows 50 degrees
        let yaw = next_body_yaw(0.0, 0.0, Vec3::X, &state, &movement, 0.1);
        assert!((yaw - 50.0).abs() < 1e-3);
        // No input keeps the current facing
        let yaw = next_body_yaw(30.0, 0.0, Vec3::ZERO, &state, &movement, 0.1);
        assert_eq!(yaw, 30.0);
    }

    #[test]
    fn body_follows_controller_desired_rotation() {
        let state = CharacterState::default();
        let mut movement = CharacterMovement::default();
        movement.orient_rotation_to_movement = false;
        movement.use_controller_desired_rotation = true;
        let yaw = next_body_yaw(0.0, -90.0, Vec3::X, &state, &movement, 0.05);
        assert!((yaw + 25.0).abs() < 1e-3);
    }

    #[test]
    fn grounded_velocity_uses_max_walk_speed() {
        let mut movement = CharacterMovement::default();
        movement.max_walk_speed = 750.0;
        let velocity = next_velocity(&mut movement, Vec3::NEG_Z, 0.016);
        assert_eq!(velocity, Vec3::new(0.0, 0.0, -750.0));
    }

    #[test]
    fn jump_fires_once_per_press() {
        let mut movement = CharacterMovement::default();
        movement.jump_pressed = true;
        let velocity = next_velocity(&mut movement, Vec3::ZERO, 0.016);
        assert_eq!(velocity.y, 700.0);
        assert!(!movement.jump_pressed);
    }

    #[test]
    fn airborne_applies_gravity_and_limited_control() {
        let mut movement = CharacterMovement::default();
        movement.is_grounded = false;
        let velocity = next_velocity(&mut movement, Vec3::X, 0.1);
        assert!((velocity.y + 98.0).abs() < 1e-3);
        // 0.35 * 10 * 0.1 closes 35% of the gap
        assert!((velocity.x - 175.0).abs() < 1e-3);
    }
}
