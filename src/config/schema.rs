//! Configuration schema types
//!
//! Every section is optional in the TOML file and falls back to the defaults
//! below.

use crate::core::fusion::{DEFAULT_NUMERIC_CATEGORIES, DEFAULT_ZONE_CODE_CATEGORY};
use crate::core::index::{DEFAULT_FALLBACK_HEIGHT, DEFAULT_FALLBACK_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main labelfuse configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelFuseConfig {
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Locations of the two exports
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Category rules and value assignment strategy
    #[serde(default)]
    pub fusion: FusionConfig,

    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LabelFuseConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.fusion.validate()?;
        self.split.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Build the dataset without writing it
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Input export locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// COCO structural export
    #[serde(default = "default_structural_path")]
    pub structural_path: PathBuf,

    /// Label Studio value export
    #[serde(default = "default_values_path")]
    pub values_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            structural_path: default_structural_path(),
            values_path: default_values_path(),
        }
    }
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.structural_path.as_os_str().is_empty() {
            return Err("input.structural_path cannot be empty".to_string());
        }
        if self.values_path.as_os_str().is_empty() {
            return Err("input.values_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Dataset output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Indent the written JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            pretty: true,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("output.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Fusion rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Category that receives zone codes
    #[serde(default = "default_zone_code_category")]
    pub zone_code_category: String,

    /// Categories that receive numeric values
    #[serde(default = "default_numeric_categories")]
    pub numeric_categories: Vec<String>,

    /// positional or spatial
    #[serde(default = "default_value_assignment")]
    pub value_assignment: String,

    /// Page width used when neither export declares one
    #[serde(default = "default_fallback_width")]
    pub fallback_width: u32,

    #[serde(default = "default_fallback_height")]
    pub fallback_height: u32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            zone_code_category: default_zone_code_category(),
            numeric_categories: default_numeric_categories(),
            value_assignment: default_value_assignment(),
            fallback_width: default_fallback_width(),
            fallback_height: default_fallback_height(),
        }
    }
}

impl FusionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.zone_code_category.trim().is_empty() {
            return Err("fusion.zone_code_category cannot be empty".to_string());
        }

        if self.numeric_categories.iter().any(|c| c.trim().is_empty()) {
            return Err("fusion.numeric_categories cannot contain empty names".to_string());
        }

        let valid_assignments = ["positional", "spatial"];
        if !valid_assignments.contains(&self.value_assignment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid fusion.value_assignment '{}'. Must be one of: {}",
                self.value_assignment,
                valid_assignments.join(", ")
            ));
        }

        if self.fallback_width == 0 || self.fallback_height == 0 {
            return Err("fusion.fallback_width and fusion.fallback_height must be > 0".to_string());
        }

        Ok(())
    }
}

/// Train/validation split settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Share of each tier assigned to training
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            train_ratio: default_train_ratio(),
        }
    }
}

impl SplitConfig {
    fn validate(&self) -> Result<(), String> {
        if !(self.train_ratio > 0.0 && self.train_ratio <= 1.0) {
            return Err(format!(
                "split.train_ratio must be in (0.0, 1.0], got {}",
                self.train_ratio
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_structural_path() -> PathBuf {
    PathBuf::from("Zoning-Labels-COCO.json")
}

fn default_values_path() -> PathBuf {
    PathBuf::from("zoning-labels-32pages-full-new.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("ml_training_dataset.json")
}

fn default_zone_code_category() -> String {
    DEFAULT_ZONE_CODE_CATEGORY.to_string()
}

fn default_numeric_categories() -> Vec<String> {
    DEFAULT_NUMERIC_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_value_assignment() -> String {
    "positional".to_string()
}

fn default_fallback_width() -> u32 {
    DEFAULT_FALLBACK_WIDTH
}

fn default_fallback_height() -> u32 {
    DEFAULT_FALLBACK_HEIGHT
}

fn default_seed() -> u64 {
    42
}

fn default_train_ratio() -> f64 {
    0.8
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
            dry_run: false,
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: LabelFuseConfig = toml::from_str("").unwrap();
        assert_eq!(config, LabelFuseConfig::default());
        assert_eq!(config.split.seed, 42);
        assert_eq!(config.split.train_ratio, 0.8);
        assert_eq!(config.fusion.numeric_categories.len(), 7);
        assert_eq!(config.output.path, PathBuf::from("ml_training_dataset.json"));
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section() {
        let config: LabelFuseConfig = toml::from_str(
            r#"
[fusion]
value_assignment = "spatial"

[split]
seed = 7
"#,
        )
        .unwrap();
        assert_eq!(config.fusion.value_assignment, "spatial");
        assert_eq!(config.fusion.zone_code_category, "ZONE_CODE");
        assert_eq!(config.split.seed, 7);
        assert_eq!(config.split.train_ratio, 0.8);
    }

    #[test_case(0.0, false ; "zero")]
    #[test_case(-0.5, false ; "negative")]
    #[test_case(0.8, true ; "default")]
    #[test_case(1.0, true ; "everything to train")]
    #[test_case(1.5, false ; "above one")]
    #[test_case(f64::NAN, false ; "nan")]
    fn test_train_ratio_validation(train_ratio: f64, valid: bool) {
        let config = SplitConfig {
            seed: 42,
            train_ratio,
        };
        assert_eq!(config.validate().is_ok(), valid);
    }

    #[test]
    fn test_fusion_config_validation() {
        let mut config = FusionConfig::default();
        assert!(config.validate().is_ok());

        config.value_assignment = "overlap".to_string();
        assert!(config.validate().is_err());

        config.value_assignment = "Spatial".to_string();
        assert!(config.validate().is_ok());

        config.fallback_width = 0;
        assert!(config.validate().is_err());

        config = FusionConfig {
            zone_code_category: " ".to_string(),
            ..FusionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut config = LabelFuseConfig::default();
        config.output.path = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = LabelFuseConfig::default();
        config.input.values_path = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
