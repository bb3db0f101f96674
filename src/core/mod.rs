//! Core game module - states, data loading, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod error;
mod plugin;
mod states;
pub mod units;

pub use config::{load_or_default, load_ron, parse_ron};
pub use error::ConfigError;
pub use plugin::CorePlugin;
pub use states::*;
