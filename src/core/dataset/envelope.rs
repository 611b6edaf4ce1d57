//! Persisted dataset envelope

use crate::adapters::loader::SourceFile;
use crate::core::fusion::ValueAssignment;
use crate::domain::FusedAnnotation;
use serde::{Deserialize, Serialize};

/// Summary fields stored alongside the data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub total_annotations: usize,

    /// Size of the `high_quality` tier
    pub with_values: usize,

    /// Distinct category names, sorted
    pub categories: Vec<String>,

    pub seed: u64,
    pub train_ratio: f64,
    pub train_count: usize,
    pub validation_count: usize,
    pub value_assignment: ValueAssignment,

    /// Input files the dataset was built from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceFile>,
}

/// Final dataset: split, tiers and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEnvelope {
    pub train: Vec<FusedAnnotation>,
    pub validation: Vec<FusedAnnotation>,
    pub high_quality: Vec<FusedAnnotation>,
    pub medium_quality: Vec<FusedAnnotation>,
    pub metadata: DatasetMetadata,
}

impl DatasetEnvelope {
    /// Up to `limit` zone codes from the high-quality tier, in tier order
    pub fn sample_zones(&self, limit: usize) -> Vec<&str> {
        self.high_quality
            .iter()
            .filter_map(|a| a.zone_code.as_deref())
            .take(limit)
            .collect()
    }
}
