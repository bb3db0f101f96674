//! Shared RON loading for data files under `assets/data`.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ConfigError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    parse_ron(&display, &contents)
}

/// Parse RON text, tagging errors with `origin`.
pub fn parse_ron<T: DeserializeOwned>(origin: &str, contents: &str) -> Result<T, ConfigError> {
    ron::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: origin.to_string(),
        details: e.to_string(),
    })
}

/// Load a RON file, falling back to `T::default()` and logging why.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &str) -> T {
    match load_ron(path) {
        Ok(value) => {
            info!("Loaded {}", path);
            value
        }
        Err(ConfigError::FileNotFound(_)) => {
            warn!("Could not find {}. Using defaults.", path);
            T::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        speed: f32,
        label: String,
    }

    #[test]
    fn parses_partial_struct_with_defaults() {
        let sample: Sample = parse_ron("inline", "(speed: 3.5)").unwrap();
        assert_eq!(sample.speed, 3.5);
        assert!(sample.label.is_empty());
    }

    #[test]
    fn parse_error_carries_origin() {
        let err = parse_ron::<Sample>("broken.ron", "(speed: )").unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert_eq!(path, "broken.ron"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_ron::<Sample>("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
