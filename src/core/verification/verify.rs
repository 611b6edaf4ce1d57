//! Dataset verification
//!
//! Rebuilds the dataset in memory from the configured inputs and compares it,
//! section by section, with the file at the configured output path.

use crate::config::LabelFuseConfig;
use crate::core::pipeline::Pipeline;
use crate::core::verification::checksum::calculate_checksum;
use crate::core::verification::report::{SectionFailure, VerificationReport};
use crate::domain::{LabelFuseError, Result};
use serde_json::Value;
use std::fs;
use std::time::Instant;

/// Top-level envelope keys that are compared
pub const SECTIONS: [&str; 5] = [
    "train",
    "validation",
    "high_quality",
    "medium_quality",
    "metadata",
];

/// Verifies the dataset at `config.output.path`
///
/// # Errors
///
/// - `MissingFile` if the dataset or either input does not exist
/// - `Verification` if the dataset is not valid JSON
///
/// A checksum mismatch is not an error; it is reported in the returned report.
///
/// # Examples
///
/// ```no_run
/// use labelfuse::config::LabelFuseConfig;
/// use labelfuse::core::verification::verify_dataset;
///
/// # fn example() -> labelfuse::domain::Result<()> {
/// let report = verify_dataset(&LabelFuseConfig::default())?;
/// println!("{}", report.format_summary());
/// # Ok(())
/// # }
/// ```
pub fn verify_dataset(config: &LabelFuseConfig) -> Result<VerificationReport> {
    let start = Instant::now();
    let dataset_path = &config.output.path;

    if !dataset_path.exists() {
        return Err(LabelFuseError::missing_file(dataset_path));
    }

    tracing::info!(path = %dataset_path.display(), "Starting dataset verification");

    let mut rebuild_config = config.clone();
    rebuild_config.application.dry_run = true;
    let rebuilt = Pipeline::new(rebuild_config)?.build()?;
    let expected = serde_json::to_value(&rebuilt.envelope)?;

    let bytes = fs::read(dataset_path).map_err(|e| {
        LabelFuseError::Io(format!("Failed to read {}: {}", dataset_path.display(), e))
    })?;
    let actual: Value = serde_json::from_slice(&bytes).map_err(|e| {
        LabelFuseError::Verification(format!(
            "Dataset {} is not valid JSON: {}",
            dataset_path.display(),
            e
        ))
    })?;

    let mut report = VerificationReport::new(dataset_path.clone());

    for section in SECTIONS {
        let expected_checksum = calculate_checksum(&expected[section])?;

        match actual.get(section) {
            Some(value) => {
                let actual_checksum = calculate_checksum(value)?;
                if actual_checksum == expected_checksum {
                    report.record_pass(section);
                } else {
                    tracing::warn!(section, "Section checksum mismatch");
                    report.record_failure(SectionFailure {
                        section: section.to_string(),
                        expected_checksum,
                        actual_checksum,
                        reason: "Checksum mismatch".to_string(),
                    });
                }
            }
            None => {
                tracing::warn!(section, "Section missing from dataset");
                report.record_failure(SectionFailure {
                    section: section.to_string(),
                    expected_checksum,
                    actual_checksum: String::new(),
                    reason: "Section missing".to_string(),
                });
            }
        }
    }

    report.set_duration(start.elapsed().as_millis() as u64);

    tracing::info!(
        passed = report.passed.len(),
        failed = report.failures.len(),
        duration_ms = report.duration_ms,
        "Verification completed"
    );

    Ok(report)
}
