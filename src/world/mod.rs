//! World module - arena geometry and setup.

mod arena;
mod plugin;

pub use plugin::{setup_world, WorldPlugin};
