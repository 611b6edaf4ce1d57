//! Validate config command implementation

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Structural Export: {}",
            config.input.structural_path.display()
        );
        println!("  Value Export: {}", config.input.values_path.display());
        println!("  Output: {}", config.output.path.display());
        println!("  Zone Code Category: {}", config.fusion.zone_code_category);
        println!(
            "  Numeric Categories: {}",
            config.fusion.numeric_categories.join(", ")
        );
        println!("  Value Assignment: {}", config.fusion.value_assignment);
        println!("  Seed: {}", config.split.seed);
        println!("  Train Ratio: {}", config.split.train_ratio);
        println!();

        for (label, path) in [
            ("Structural export", &config.input.structural_path),
            ("Value export", &config.input.values_path),
        ] {
            if !path.exists() {
                println!("⚠️  {label} not found: {}", path.display());
            }
        }

        Ok(EXIT_OK)
    }
}
