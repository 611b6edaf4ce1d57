//! Build command implementation
//!
//! Runs the full pipeline and prints a stage-by-stage summary.

use crate::cli::{exit_code_for, EXIT_CONFIG_ERROR, EXIT_OK};
use crate::config::{load_config_or_default, LabelFuseConfig};
use crate::core::pipeline::{Pipeline, PipelineOutcome};
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Sample zone codes shown after a build
const SAMPLE_ZONE_LIMIT: usize = 10;

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Override the structural (COCO) export path
    #[arg(long)]
    pub structural: Option<PathBuf>,

    /// Override the value (Label Studio) export path
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Override the dataset output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the split seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the value assignment strategy (positional or spatial)
    #[arg(long, value_name = "STRATEGY")]
    pub assignment: Option<String>,

    /// Build the dataset without writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl BuildArgs {
    /// Applies the command-line overrides to `config`
    pub fn apply_overrides(&self, config: &mut LabelFuseConfig) {
        if let Some(path) = &self.structural {
            tracing::info!(path = %path.display(), "Overriding structural export from CLI");
            config.input.structural_path = path.clone();
        }
        if let Some(path) = &self.values {
            tracing::info!(path = %path.display(), "Overriding value export from CLI");
            config.input.values_path = path.clone();
        }
        if let Some(path) = &self.output {
            config.output.path = path.clone();
        }
        if let Some(seed) = self.seed {
            config.split.seed = seed;
        }
        if let Some(assignment) = &self.assignment {
            tracing::info!(assignment = %assignment, "Overriding value assignment from CLI");
            config.fusion.value_assignment = assignment.clone();
        }
        if self.dry_run {
            config.application.dry_run = true;
        }
    }

    /// Execute the build command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting build command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - The dataset will not be written");
            println!();
        }

        let pipeline = match Pipeline::new(config) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to initialize pipeline: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("🚀 Building dataset...");
        println!();

        let outcome = match pipeline.run() {
            Ok(o) => o,
            Err(e) => {
                log_error_with_context!(&e, "Build failed");
                eprintln!("Build failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        print_summary(&outcome);

        Ok(EXIT_OK)
    }
}

fn print_summary(outcome: &PipelineOutcome) {
    let summary = &outcome.summary;
    let metadata = &outcome.envelope.metadata;

    println!("📥 Loaded Exports:");
    println!("  Images: {}", summary.images);
    println!("  Structural annotations: {}", summary.structural_annotations);
    println!("  Categories: {}", summary.categories);
    println!("  Value export tasks: {}", summary.tasks);
    println!();

    if let Some(page) = &summary.sample_page {
        println!("📄 First Page ({}):", page.filename);
        println!("  Rectangles: {}", page.rectangles);
        println!("  Numeric values: {}", page.numeric_values);
        println!("  Zone codes: {}", page.zone_codes);
        println!("  Units: {}", page.units);
        println!();
    }

    println!("🔗 Merge:");
    println!("  Pages indexed: {}", summary.pages_indexed);
    println!("  Annotations merged: {}", summary.fusion.fused);
    println!("  Zone codes assigned: {}", summary.fusion.zone_codes_assigned);
    println!("  Unique zones: {}", summary.fusion.unique_zones);
    println!("  Numeric values assigned: {}", summary.fusion.numeric_assigned);
    println!("  Units assigned: {}", summary.fusion.units_assigned);
    if summary.fusion.without_page_values > 0 {
        println!(
            "  ⚠️  Without page values: {}",
            summary.fusion.without_page_values
        );
    }
    println!();

    println!("🗂️  Tiers:");
    println!("  High quality (with values): {}", summary.high_quality);
    println!("  Medium quality (spatial only): {}", summary.medium_quality);
    println!();

    println!("📊 Dataset Summary:");
    println!("  Total annotations: {}", metadata.total_annotations);
    println!("  Train: {}", metadata.train_count);
    println!("  Validation: {}", metadata.validation_count);
    println!("  Categories: {}", metadata.categories.join(", "));
    println!("  Seed: {}", metadata.seed);
    println!("  Value assignment: {}", metadata.value_assignment);
    println!("  Value coverage: {:.2}%", summary.value_coverage());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    let zones = outcome.envelope.sample_zones(SAMPLE_ZONE_LIMIT);
    if !zones.is_empty() {
        println!("🏷️  Sample zones:");
        for zone in zones {
            println!("  - {zone}");
        }
        println!();
    }

    match &summary.output_path {
        Some(path) => println!("✅ Dataset written to {}", path.display()),
        None => println!("✅ Dry run completed, nothing written"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let args = BuildArgs {
            values: Some(PathBuf::from("ls.json")),
            seed: Some(9),
            assignment: Some("spatial".to_string()),
            dry_run: true,
            ..BuildArgs::default()
        };
        let mut config = LabelFuseConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.input.values_path, PathBuf::from("ls.json"));
        assert_eq!(config.input.structural_path, PathBuf::from("Zoning-Labels-COCO.json"));
        assert_eq!(config.split.seed, 9);
        assert_eq!(config.fusion.value_assignment, "spatial");
        assert!(config.application.dry_run);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = LabelFuseConfig::default();
        BuildArgs::default().apply_overrides(&mut config);
        assert_eq!(config, LabelFuseConfig::default());
    }
}
