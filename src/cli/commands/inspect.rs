//! Inspect command implementation
//!
//! Diagnostic view of the value export: what the indexer extracted per page.

use crate::adapters::loader::load_value_export;
use crate::cli::{exit_code_for, EXIT_CONFIG_ERROR, EXIT_INPUT_ERROR, EXIT_OK};
use crate::config::load_config_or_default;
use crate::core::index::{ValueIndex, ValueIndexer};
use crate::core::pipeline::PageSample;
use crate::domain::{PageKey, PageValueIndex};
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug, Default)]
pub struct InspectArgs {
    /// Override the value (Label Studio) export path
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Only show this page (file name or basename)
    #[arg(long)]
    pub page: Option<String>,

    /// List zone code texts and numbers for each page
    #[arg(long)]
    pub list_values: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let values_path = self
            .values
            .clone()
            .unwrap_or_else(|| config.input.values_path.clone());

        let (export, _) = match load_value_export(&values_path) {
            Ok(loaded) => loaded,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load value export");
                eprintln!("Failed to load value export: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let indexer = ValueIndexer::new(config.fusion.fallback_width, config.fusion.fallback_height);
        let index = indexer.build(&export);

        println!("🔍 Value export: {}", values_path.display());
        println!("  Tasks: {}", export.tasks.len());
        println!("  Pages: {}", index.len());
        println!("  Numeric values: {}", index.total_numeric_values());
        println!("  Zone codes: {}", index.total_zone_codes());
        println!();

        let pages = select_pages(&index, self.page.as_deref());
        if pages.is_empty() {
            if let Some(page) = &self.page {
                println!("❌ Page not found: {page}");
                return Ok(EXIT_INPUT_ERROR);
            }
        }

        for (key, page) in pages {
            self.print_page(key, page);
        }

        Ok(EXIT_OK)
    }

    fn print_page(&self, key: &PageKey, page: &PageValueIndex) {
        let sample = PageSample::from_page(page);
        println!("📄 {key}");
        println!(
            "  rectangles={} numeric={} zones={} units={} raw={}",
            sample.rectangles, sample.numeric_values, sample.zone_codes, sample.units, sample.raw_results
        );

        if self.list_values {
            for zone in &page.zone_codes {
                println!("    zone   {:<12} at ({:.1}, {:.1})", zone.text, zone.x, zone.y);
            }
            for value in &page.normalized_values {
                let number = value
                    .number
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |n| n.to_string());
                println!("    number {:<12} at ({:.1}, {:.1})", number, value.x, value.y);
            }
            for unit in &page.units {
                println!("    unit   {:<12} at ({:.1}, {:.1})", unit.unit, unit.x, unit.y);
            }
        }
    }
}

/// Pages to show, in key order
fn select_pages<'a>(
    index: &'a ValueIndex,
    page: Option<&str>,
) -> Vec<(&'a PageKey, &'a PageValueIndex)> {
    match page {
        Some(name) => {
            let key = PageKey::from_filename(name);
            index.iter().filter(|(k, _)| **k == key).collect()
        }
        None => index.iter().collect(),
    }
}
