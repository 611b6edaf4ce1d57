//! Run summary and reporting

use crate::core::fusion::FusionStats;
use crate::domain::PageValueIndex;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Extraction counts for one page of the value index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSample {
    pub filename: String,
    pub rectangles: usize,
    pub numeric_values: usize,
    pub zone_codes: usize,
    pub units: usize,
    pub raw_results: usize,
}

impl PageSample {
    pub fn from_page(page: &PageValueIndex) -> Self {
        Self {
            filename: page.filename.clone(),
            rectangles: page.rectangles.len(),
            numeric_values: page.normalized_values.len(),
            zone_codes: page.zone_codes.len(),
            units: page.units.len(),
            raw_results: page.all_results.len(),
        }
    }
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,

    /// Wall time of the whole run
    #[serde(skip)]
    pub duration: Duration,

    pub images: usize,
    pub structural_annotations: usize,
    pub categories: usize,
    pub tasks: usize,
    pub pages_indexed: usize,

    /// Counts for the first task of the value export
    pub sample_page: Option<PageSample>,

    pub fusion: FusionStats,

    pub high_quality: usize,
    pub medium_quality: usize,
    pub train: usize,
    pub validation: usize,

    /// Where the dataset was written, `None` on a dry run
    pub output_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunSummary {
    /// Create a new empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            images: 0,
            structural_annotations: 0,
            categories: 0,
            tasks: 0,
            pages_indexed: 0,
            sample_page: None,
            fusion: FusionStats::default(),
            high_quality: 0,
            medium_quality: 0,
            train: 0,
            validation: 0,
            output_path: None,
            dry_run: false,
        }
    }

    /// Share of annotations that carry extracted values, as a percentage
    pub fn value_coverage(&self) -> f64 {
        let total = self.high_quality + self.medium_quality;
        if total == 0 {
            return 0.0;
        }
        (self.high_quality as f64 / total as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            annotations = self.structural_annotations,
            pages_indexed = self.pages_indexed,
            high_quality = self.high_quality,
            medium_quality = self.medium_quality,
            train = self.train,
            validation = self.validation,
            unique_zones = self.fusion.unique_zones,
            duration_ms = self.duration.as_millis() as u64,
            value_coverage = format!("{:.2}%", self.value_coverage()),
            dry_run = self.dry_run,
            "Pipeline completed"
        );

        if self.fusion.without_page_values > 0 {
            tracing::warn!(
                annotations = self.fusion.without_page_values,
                "Some annotations have no value export entry for their page"
            );
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_summary_new() {
        let summary = RunSummary::new();
        assert_eq!(summary.train, 0);
        assert!(summary.output_path.is_none());
        assert_eq!(summary.value_coverage(), 0.0);
    }

    #[test]
    fn test_value_coverage() {
        let summary = RunSummary {
            high_quality: 1,
            medium_quality: 3,
            ..RunSummary::new()
        };
        assert_eq!(summary.value_coverage(), 25.0);
    }

    #[test]
    fn test_page_sample() {
        let mut page = PageValueIndex::new("p1.png");
        page.all_results.push(serde_json::json!({"type": "choices"}));
        let sample = PageSample::from_page(&page);
        assert_eq!(sample.filename, "p1.png");
        assert_eq!(sample.raw_results, 1);
        assert_eq!(sample.zone_codes, 0);
    }
}
