//! Configuration management for labelfuse.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! labelfuse reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LABELFUSE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use labelfuse::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("labelfuse.toml")?;
//!
//! println!("Structural export: {}", config.input.structural_path.display());
//! println!("Seed: {}", config.split.seed);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run
//! - [`InputConfig`] - Paths of the two exports
//! - [`OutputConfig`] - Dataset path and formatting
//! - [`FusionConfig`] - Category rules and value assignment strategy
//! - [`SplitConfig`] - Seed and train ratio
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! structural_path = "Zoning-Labels-COCO.json"
//! values_path = "${LABELFUSE_VALUES}"
//!
//! [fusion]
//! value_assignment = "spatial"
//!
//! [split]
//! seed = 42
//! train_ratio = 0.8
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, FusionConfig, InputConfig, LabelFuseConfig, LoggingConfig, OutputConfig,
    SplitConfig,
};
