//! Verify command implementation

use crate::cli::{exit_code_for, EXIT_CONFIG_ERROR, EXIT_OK, EXIT_VERIFICATION_FAILED};
use crate::config::load_config_or_default;
use crate::core::verification::verify_dataset;
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Dataset to check instead of the configured output path
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

impl VerifyArgs {
    /// Execute the verify command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if let Some(path) = &self.dataset {
            config.output.path = path.clone();
        }

        println!("🔍 Verifying {}", config.output.path.display());
        println!();

        let report = match verify_dataset(&config) {
            Ok(r) => r,
            Err(e) => {
                log_error_with_context!(&e, "Verification failed to run");
                eprintln!("Verification failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("{}", report.format_summary());

        if report.is_success() {
            println!("✅ Dataset matches a fresh rebuild");
            Ok(EXIT_OK)
        } else {
            println!("⚠️  Dataset differs from a fresh rebuild");
            Ok(EXIT_VERIFICATION_FAILED)
        }
    }
}
