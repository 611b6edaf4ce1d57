//! Verification report structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of comparing a written dataset with a fresh in-memory rebuild
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// When the verification was performed
    pub verified_at: DateTime<Utc>,

    /// Dataset file that was checked
    pub dataset_path: PathBuf,

    /// Sections whose checksums matched
    pub passed: Vec<String>,

    /// Sections whose checksums differed or that were absent
    pub failures: Vec<SectionFailure>,

    /// Duration of verification in milliseconds
    pub duration_ms: u64,
}

/// Details of a section that did not match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFailure {
    /// Top-level envelope key, e.g. `train`
    pub section: String,

    /// Checksum of the rebuilt section
    pub expected_checksum: String,

    /// Checksum of the section on disk, empty if the section is missing
    pub actual_checksum: String,

    pub reason: String,
}

impl VerificationReport {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            verified_at: Utc::now(),
            dataset_path: dataset_path.into(),
            passed: Vec::new(),
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Record a matching section
    pub fn record_pass(&mut self, section: impl Into<String>) {
        self.passed.push(section.into());
    }

    /// Record a mismatching section
    pub fn record_failure(&mut self, failure: SectionFailure) {
        self.failures.push(failure);
    }

    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Number of sections checked
    pub fn total_verified(&self) -> usize {
        self.passed.len() + self.failures.len()
    }

    /// Check if all sections matched
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("📊 Verification Report\n");
        summary.push_str(&format!("  Dataset: {}\n", self.dataset_path.display()));
        summary.push_str(&format!("  Verified at: {}\n", self.verified_at));
        summary.push_str(&format!("  Duration: {} ms\n", self.duration_ms));
        summary.push_str(&format!("  Sections verified: {}\n", self.total_verified()));
        summary.push_str(&format!("  ✅ Passed: {}\n", self.passed.len()));
        summary.push_str(&format!("  ❌ Failed: {}\n", self.failures.len()));

        if !self.failures.is_empty() {
            summary.push_str("\n❌ Failures:\n");
            for (i, failure) in self.failures.iter().enumerate() {
                summary.push_str(&format!("  {}. Section: {}\n", i + 1, failure.section));
                summary.push_str(&format!("     Expected: {}\n", failure.expected_checksum));
                summary.push_str(&format!("     Actual:   {}\n", failure.actual_checksum));
                summary.push_str(&format!("     Reason: {}\n", failure.reason));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(section: &str) -> SectionFailure {
        SectionFailure {
            section: section.to_string(),
            expected_checksum: "abc123".to_string(),
            actual_checksum: "def456".to_string(),
            reason: "Checksum mismatch".to_string(),
        }
    }

    #[test]
    fn test_verification_report_new() {
        let report = VerificationReport::new("dataset.json");
        assert_eq!(report.total_verified(), 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_record_pass_and_failure() {
        let mut report = VerificationReport::new("dataset.json");
        report.record_pass("train");
        report.record_failure(failure("validation"));

        assert_eq!(report.total_verified(), 2);
        assert_eq!(report.passed, vec!["train"]);
        assert!(!report.is_success());
    }

    #[test]
    fn test_format_summary() {
        let mut report = VerificationReport::new("dataset.json");
        report.record_pass("train");
        report.record_failure(failure("metadata"));
        report.set_duration(15);

        let summary = report.format_summary();
        assert!(summary.contains("Sections verified: 2"));
        assert!(summary.contains("Passed: 1"));
        assert!(summary.contains("Section: metadata"));
        assert!(summary.contains("Duration: 15 ms"));
    }
}
