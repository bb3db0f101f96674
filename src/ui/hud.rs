//! In-game HUD - aim reticle.

use bevy::prelude::*;

use crate::core::GameState;
use crate::player::{CharacterState, Player};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the aim reticle.
#[derive(Component)]
pub struct Crosshair;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(Update, update_crosshair.run_if(in_state(GameState::InGame)));
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Crosshair (center of screen)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
                Visibility::Hidden,
                Crosshair,
            ));
        });
}

/// Show the crosshair only while aiming down sights.
fn update_crosshair(
    player_query: Query<&CharacterState, With<Player>>,
    mut crosshair_query: Query<&mut Visibility, With<Crosshair>>,
) {
    let Ok(state) = player_query.get_single() else {
        return;
    };
    let Ok(mut crosshair) = crosshair_query.get_single_mut() else {
        return;
    };

    crosshair.set_if_neq(if state.is_aiming {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    });
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
