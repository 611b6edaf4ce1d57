//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LabelFuseConfig;
use crate::domain::errors::LabelFuseError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LabelFuseConfig
/// 4. Applies environment variable overrides (LABELFUSE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use labelfuse::config::loader::load_config;
///
/// let config = load_config("labelfuse.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LabelFuseConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LabelFuseError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LabelFuseError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: LabelFuseConfig = toml::from_str(&contents)
        .map_err(|e| LabelFuseError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Loads `path` if it exists, otherwise starts from the built-in defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<LabelFuseConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::warn!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = LabelFuseConfig::default();
    apply_env_overrides(&mut config)?;
    finish(config)
}

fn finish(config: LabelFuseConfig) -> Result<LabelFuseConfig> {
    config.validate().map_err(|e| {
        LabelFuseError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LabelFuseError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comments are copied untouched
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LabelFuseError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: FromStr>(name: &str, val: &str) -> Result<T> {
    val.parse().map_err(|_| {
        LabelFuseError::Configuration(format!("Invalid value '{}' for {}", val, name))
    })
}

/// Applies environment variable overrides using the LABELFUSE_* prefix
///
/// Environment variables follow the pattern: LABELFUSE_<SECTION>_<KEY>
/// For example: LABELFUSE_SPLIT_SEED, LABELFUSE_FUSION_VALUE_ASSIGNMENT
///
/// Unlike string keys, typed keys fail loudly when they cannot be parsed.
fn apply_env_overrides(config: &mut LabelFuseConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("LABELFUSE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = var("LABELFUSE_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("LABELFUSE_APPLICATION_DRY_RUN", &val)?;
    }

    // Input/output overrides
    if let Some(val) = var("LABELFUSE_INPUT_STRUCTURAL_PATH") {
        config.input.structural_path = PathBuf::from(val);
    }
    if let Some(val) = var("LABELFUSE_INPUT_VALUES_PATH") {
        config.input.values_path = PathBuf::from(val);
    }
    if let Some(val) = var("LABELFUSE_OUTPUT_PATH") {
        config.output.path = PathBuf::from(val);
    }
    if let Some(val) = var("LABELFUSE_OUTPUT_PRETTY") {
        config.output.pretty = parse_override("LABELFUSE_OUTPUT_PRETTY", &val)?;
    }

    // Fusion overrides
    if let Some(val) = var("LABELFUSE_FUSION_ZONE_CODE_CATEGORY") {
        config.fusion.zone_code_category = val;
    }
    if let Some(val) = var("LABELFUSE_FUSION_NUMERIC_CATEGORIES") {
        config.fusion.numeric_categories = val
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(val) = var("LABELFUSE_FUSION_VALUE_ASSIGNMENT") {
        config.fusion.value_assignment = val;
    }
    if let Some(val) = var("LABELFUSE_FUSION_FALLBACK_WIDTH") {
        config.fusion.fallback_width = parse_override("LABELFUSE_FUSION_FALLBACK_WIDTH", &val)?;
    }
    if let Some(val) = var("LABELFUSE_FUSION_FALLBACK_HEIGHT") {
        config.fusion.fallback_height = parse_override("LABELFUSE_FUSION_FALLBACK_HEIGHT", &val)?;
    }

    // Split overrides
    if let Some(val) = var("LABELFUSE_SPLIT_SEED") {
        config.split.seed = parse_override("LABELFUSE_SPLIT_SEED", &val)?;
    }
    if let Some(val) = var("LABELFUSE_SPLIT_TRAIN_RATIO") {
        config.split.train_ratio = parse_override("LABELFUSE_SPLIT_TRAIN_RATIO", &val)?;
    }

    // Logging overrides
    if let Some(val) = var("LABELFUSE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LABELFUSE_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("LABELFUSE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LABELFUSE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
