//! Init command implementation
//!
//! Generates a sample `labelfuse.toml`.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "labelfuse.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing labelfuse configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [input] at your COCO and Label Studio exports");
                println!("  2. Validate configuration: labelfuse validate-config");
                println!("  3. Build the dataset: labelfuse build");
                println!("  4. Check it later: labelfuse verify");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# labelfuse configuration

[input]
structural_path = "Zoning-Labels-COCO.json"
values_path = "zoning-labels-32pages-full-new.json"

[output]
path = "ml_training_dataset.json"

[split]
seed = 42
train_ratio = 0.8
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# labelfuse configuration
#
# Every section is optional. Values may reference environment variables with
# ${VAR_NAME}, and LABELFUSE_<SECTION>_<KEY> variables override any value.

[application]
# trace, debug, info, warn, error
log_level = "info"

# Build the dataset without writing it
dry_run = false

[input]
# COCO export with images, categories and annotations
structural_path = "Zoning-Labels-COCO.json"

# Label Studio JSON export with the extracted values
values_path = "zoning-labels-32pages-full-new.json"

[output]
path = "ml_training_dataset.json"
pretty = true

[fusion]
# Category that receives zone code texts, each text at most once per run
zone_code_category = "ZONE_CODE"

# Categories that receive numeric values and units
numeric_categories = [
    "MIN_LOT_AREA",
    "MIN_LOT_WIDTH",
    "FRONT_YARD",
    "SIDE_YARD",
    "REAR_YARD",
    "MAX_HEIGHT_FT",
    "MAX_LOT_COVERAGE",
]

# positional: k-th annotation takes the page value at k % len
# spatial: nearest unclaimed value on the same page
value_assignment = "positional"

# Page resolution used when neither export declares one
fallback_width = 2550
fallback_height = 1650

[split]
seed = 42
# Share of each quality tier that goes to training, in (0.0, 1.0]
train_ratio = 0.8

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}
