//! Camera rig placement - spring arm, first-person eye, and projection sync.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::units::{to_meters, CENTIMETERS_PER_METER};
use crate::player::collaborators::Rotator;
use crate::player::{
    yaw_of_rotation, CharacterState, ControlRotation, Player, PlayerBody, PlayerConfig,
};

/// Where the boom wants the camera before collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoomPose {
    /// Arm origin in world space, offset applied
    pub pivot: Vec3,
    /// Unit direction from pivot toward the camera
    pub direction: Vec3,
    /// Unobstructed arm length in world units
    pub length: f32,
    /// Rotation of the arm itself
    pub rotation: Rotator,
}

/// Resolve the boom's desired pose from its mount.
pub fn boom_pose(origin: Vec3, body_yaw: f32, control: Rotator, arm: &SpringArm) -> BoomPose {
    let rotation = if arm.use_pawn_control_rotation {
        control
    } else {
        Rotator::new(0.0, body_yaw, 0.0)
    };
    let frame = rotation.yaw_only();
    let offset = arm.target_offset / CENTIMETERS_PER_METER;

    let pivot = origin
        + Vec3::Y * to_meters(arm.pivot_height)
        + frame.forward() * offset.x
        + frame.right() * offset.y
        + Vec3::Y * offset.z;

    BoomPose {
        pivot,
        direction: -rotation.forward(),
        length: to_meters(arm.target_arm_length),
        rotation,
    }
}

/// Horizontal field of view (degrees) to Bevy's vertical fov (radians).
pub fn vertical_fov(horizontal_deg: f32, aspect_ratio: f32) -> f32 {
    let half = (horizontal_deg.to_radians() * 0.5).tan();
    2.0 * (half / aspect_ratio.max(f32::EPSILON)).atan()
}

/// Spawn the third- and first-person cameras mounted on `target`.
pub fn spawn_view_cameras(commands: &mut Commands, target: Entity, config: &PlayerConfig) {
    let fov = config.field_of_view_deg;

    commands.spawn((
        ViewCamera::third_person(fov),
        FollowTarget(target),
        Camera3d::default(),
        Camera {
            is_active: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: vertical_fov(fov, 16.0 / 9.0),
            ..default()
        }),
        Transform::default(),
    ));

    commands.spawn((
        ViewCamera::first_person(fov),
        FollowTarget(target),
        Camera3d::default(),
        Camera {
            is_active: false,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: vertical_fov(fov, 16.0 / 9.0),
            near: 0.05,
            ..default()
        }),
        Transform::default(),
    ));
}

/// Place third-person cameras at the end of their target's spring arm.
///
/// The arm is shortened when geometry lies between pivot and camera.
pub fn follow_spring_arm(
    rapier_context: Query<&RapierContext>,
    target_query: Query<(&Transform, &ControlRotation, &SpringArm), Without<ViewCamera>>,
    mut camera_query: Query<(&ViewCamera, &FollowTarget, &mut Transform)>,
) {
    let context = rapier_context.get_single().ok();

    for (camera, follow, mut transform) in camera_query.iter_mut() {
        if camera.kind != CameraKind::ThirdPerson {
            continue;
        }
        let Ok((target, control, arm)) = target_query.get(follow.0) else {
            continue;
        };

        let body_yaw = yaw_of_rotation(target.rotation);
        let pose = boom_pose(target.translation, body_yaw, control.rotation, arm);

        let probe = to_meters(arm.probe_radius);
        let length = context
            .and_then(|context| {
                context.cast_ray(
                    pose.pivot,
                    pose.direction,
                    pose.length,
                    true,
                    QueryFilter::default().exclude_collider(follow.0),
                )
            })
            .map(|(_, hit)| (hit - probe).max(0.0))
            .unwrap_or(pose.length);

        transform.translation = pose.pivot + pose.direction * length;
        transform.rotation = if camera.use_pawn_control_rotation {
            control.rotation.to_quat()
        } else {
            pose.rotation.to_quat()
        };
    }
}

/// Place first-person cameras at their target's eye.
pub fn follow_first_person(
    config: Res<PlayerConfig>,
    target_query: Query<(&Transform, &ControlRotation), Without<ViewCamera>>,
    mut camera_query: Query<(&ViewCamera, &FollowTarget, &mut Transform)>,
) {
    for (camera, follow, mut transform) in camera_query.iter_mut() {
        if camera.kind != CameraKind::FirstPerson {
            continue;
        }
        let Ok((target, control)) = target_query.get(follow.0) else {
            continue;
        };

        transform.translation = target.translation + Vec3::Y * to_meters(config.eye_height);
        transform.rotation = if camera.use_pawn_control_rotation {
            control.rotation.to_quat()
        } else {
            target.rotation
        };
    }
}

/// Mirror `ViewCamera` settings onto the render camera.
pub fn sync_view_cameras(mut camera_query: Query<(&ViewCamera, &mut Camera, &mut Projection)>) {
    for (view, mut camera, mut projection) in camera_query.iter_mut() {
        if camera.is_active != view.active {
            camera.is_active = view.active;
        }
        let Projection::Perspective(perspective) = &*projection else {
            continue;
        };
        let fov = vertical_fov(view.field_of_view_deg, perspective.aspect_ratio);
        if (perspective.fov - fov).abs() > 1e-4 {
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.fov = fov;
            }
        }
    }
}

/// Hide the body while looking through its eyes.
pub fn sync_body_visibility(
    player_query: Query<&CharacterState, (With<Player>, Changed<CharacterState>)>,
    mut body_query: Query<&mut Visibility, With<PlayerBody>>,
) {
    let Ok(state) = player_query.get_single() else {
        return;
    };

    let visibility = if state.is_third_person {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut body in body_query.iter_mut() {
        body.set_if_neq(visibility);
    }
}
