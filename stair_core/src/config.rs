//! # Configuration Loading
//!
//! Reads a [`StairInput`] from JSON or TOML. The format of a file is picked
//! from its extension (`.json` or `.toml`).
//!
//! ## TOML Example
//!
//! ```rust
//! use stair_core::config::from_toml_str;
//!
//! let input = from_toml_str(r#"
//!     label = "Cellar stair"
//!     stair_type = "l-landing"
//!     stair_width_cm = 90.0
//!
//!     [sizing]
//!     mode = "proportional"
//!     total_height_cm = 270.0
//!
//!     [[ramps]]
//!     num_steps = 8
//!
//!     [[ramps]]
//!     num_steps = 8
//!
//!     [[connectors]]
//!     kind = "landing"
//!     depth_cm = 90.0
//!     turn_angle_deg = 90.0
//! "#).unwrap();
//!
//! assert_eq!(input.ramps.len(), 2);
//! assert!(input.check_compliance);
//! ```

use std::fs;
use std::path::Path;

use crate::calculations::stair::{StairInput, StairModel};
use crate::errors::{StairError, StairResult};

/// Parse a JSON configuration.
pub fn from_json_str(contents: &str) -> StairResult<StairInput> {
    serde_json::from_str(contents)
        .map_err(|e| StairError::serialization(format!("Invalid JSON configuration: {}", e)))
}

/// Parse a TOML configuration.
pub fn from_toml_str(contents: &str) -> StairResult<StairInput> {
    toml::from_str(contents)
        .map_err(|e| StairError::serialization(format!("Invalid TOML configuration: {}", e)))
}

/// Load a configuration file, choosing the format from its extension.
///
/// # Returns
///
/// * `Ok(StairInput)` - Parsed configuration (not yet validated)
/// * `Err(StairError::FileError)` - Unreadable file or unknown extension
/// * `Err(StairError::SerializationError)` - Malformed contents
pub fn load_stair_input(path: &Path) -> StairResult<StairInput> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> StairResult<StairInput> = match extension.as_deref() {
        Some("json") => from_json_str,
        Some("toml") => from_toml_str,
        other => {
            return Err(StairError::file_error(
                "load",
                path.display().to_string(),
                format!("Unsupported extension {:?}, expected .json or .toml", other.unwrap_or("")),
            ));
        }
    };

    let contents = fs::read_to_string(path)
        .map_err(|e| StairError::file_error("read", path.display().to_string(), e.to_string()))?;

    tracing::debug!(path = %path.display(), "loading stair configuration");

    parse(&contents).map_err(|e| match e {
        StairError::SerializationError { reason } => {
            StairError::serialization(format!("{} ({})", reason, path.display()))
        }
        other => other,
    })
}

/// Serialize a model as pretty-printed JSON.
pub fn model_to_json(model: &StairModel) -> StairResult<String> {
    serde_json::to_string_pretty(model).map_err(|e| StairError::serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::stair::{SizingMode, StairType};
    use std::env::temp_dir;
    use std::path::PathBuf;

    const STRAIGHT_JSON: &str = r#"{
        "stair_type": "straight",
        "stair_width_cm": 100.0,
        "sizing": { "mode": "absolute" },
        "ramps": [ { "height_cm": 300.0, "riser_target_cm": 17.0, "tread_target_cm": 28.0 } ]
    }"#;

    fn temp_config_path(name: &str) -> PathBuf {
        temp_dir().join(format!("stair_core_test_{}", name))
    }

    #[test]
    fn test_json_defaults() {
        let input = from_json_str(STRAIGHT_JSON).unwrap();
        assert_eq!(input.stair_type, StairType::Straight);
        assert_eq!(input.sizing, SizingMode::Absolute);
        assert!(input.label.is_empty());
        assert!(input.connectors.is_empty());
        assert!(!input.use_blondel);
        assert!(input.check_compliance);
    }

    #[test]
    fn test_malformed_json() {
        let err = from_json_str("{ \"stair_type\": ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let err = from_json_str(r#"{ "stair_type": "spiral", "stair_width_cm": 1.0, "sizing": { "mode": "absolute" }, "ramps": [] }"#)
            .unwrap_err();
        assert!(matches!(err, StairError::SerializationError { .. }));
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let json_path = temp_config_path("straight.json");
        fs::write(&json_path, STRAIGHT_JSON).unwrap();
        let from_json = load_stair_input(&json_path).unwrap();

        let toml_path = temp_config_path("straight.toml");
        fs::write(
            &toml_path,
            r#"
            stair_type = "straight"
            stair_width_cm = 100.0
            sizing = { mode = "absolute" }

            [[ramps]]
            height_cm = 300.0
            riser_target_cm = 17.0
            tread_target_cm = 28.0
            "#,
        )
        .unwrap();
        let from_toml = load_stair_input(&toml_path).unwrap();

        assert_eq!(from_json, from_toml);

        fs::remove_file(&json_path).ok();
        fs::remove_file(&toml_path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_stair_input(&temp_config_path("does_not_exist.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_unknown_extension() {
        let err = load_stair_input(Path::new("stair.yaml")).unwrap_err();
        assert!(matches!(err, StairError::FileError { .. }));
    }

    #[test]
    fn test_model_to_json() {
        let input = from_json_str(STRAIGHT_JSON).unwrap();
        let model = crate::calculations::stair::assemble(&input).unwrap();
        let json = model_to_json(&model).unwrap();
        assert!(json.contains("\"stair_type\": \"straight\""));
        assert!(json.contains("\"total_risers\": 18"));
    }
}
