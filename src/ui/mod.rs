//! UI module - HUD, on-screen messages, and menus.

mod hud;
mod messages;
mod plugin;

pub use messages::{ScreenMessage, ScreenMessages};
pub use plugin::UiPlugin;
