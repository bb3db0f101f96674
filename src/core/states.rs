//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Player input and
//! movement only run in `InGame`; `Paused` keeps the world visible but
//! frozen.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while config and binding files are read
/// - Enter `InGame` once loading completes
/// - `Paused` freezes the character but keeps the world visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
