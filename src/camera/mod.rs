//! Camera module - spring arm, third/first-person cameras.

mod components;
mod plugin;
mod rig;

pub use components::*;
pub use plugin::CameraPlugin;
pub use rig::{boom_pose, spawn_view_cameras, vertical_fov, BoomPose};
