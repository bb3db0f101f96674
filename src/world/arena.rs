//! Test arena geometry - ground, cover blocks, and a ramp.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Half extent of the square ground plane.
pub const ARENA_HALF_EXTENT: f32 = 30.0;

/// Position, size and tint of a cover block.
struct Block {
    center: Vec3,
    size: Vec3,
    color: Color,
}

fn blocks() -> Vec<Block> {
    let stone = Color::srgb(0.45, 0.43, 0.4);
    let timber = Color::srgb(0.4, 0.3, 0.2);
    vec![
        // Low wall to crouch-aim over
        Block { center: Vec3::new(0.0, 0.5, -8.0), size: Vec3::new(6.0, 1.0, 0.5), color: stone },
        // Tall pillars that pull the camera boom in
        Block { center: Vec3::new(-6.0, 2.0, -4.0), size: Vec3::new(1.0, 4.0, 1.0), color: stone },
        Block { center: Vec3::new(6.0, 2.0, -4.0), size: Vec3::new(1.0, 4.0, 1.0), color: stone },
        // Step-up crates
        Block { center: Vec3::new(4.0, 0.2, 4.0), size: Vec3::new(2.0, 0.4, 2.0), color: timber },
        Block { center: Vec3::new(4.0, 0.6, 6.0), size: Vec3::new(2.0, 1.2, 2.0), color: timber },
    ]
}

/// Spawn the arena's ground, blocks, ramp and lighting.
pub fn spawn_arena(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let ground_size = ARENA_HALF_EXTENT * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ground_size, 0.2, ground_size))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.35, 0.28))),
        Transform::from_xyz(0.0, -0.1, 0.0),
        Collider::cuboid(ARENA_HALF_EXTENT, 0.1, ARENA_HALF_EXTENT),
    ));

    for block in blocks() {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(block.size))),
            MeshMaterial3d(materials.add(block.color)),
            Transform::from_translation(block.center),
            Collider::cuboid(block.size.x / 2.0, block.size.y / 2.0, block.size.z / 2.0),
        ));
    }

    // Ramp at a walkable slope
    let ramp_angle = 20_f32.to_radians();
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(3.0, 0.2, 8.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.5, 0.45, 0.35))),
        Transform::from_xyz(-8.0, 1.2, 6.0).with_rotation(Quat::from_rotation_x(ramp_angle)),
        Collider::cuboid(1.5, 0.1, 4.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
