//! Dataset builder
//!
//! Tiers fused annotations, performs the seeded split and assembles the
//! [`DatasetEnvelope`]. A fresh [`StdRng`] is seeded at the start of every
//! [`DatasetBuilder::build`] call and threaded through each shuffle in turn.
//!
//! # Example
//!
//! ```rust
//! use labelfuse::core::dataset::{DatasetBuilder, SplitSettings};
//!
//! let envelope = DatasetBuilder::new(SplitSettings::default()).build(Vec::new());
//! assert_eq!(envelope.metadata.total_annotations, 0);
//! assert!(envelope.train.is_empty());
//! ```

pub mod envelope;
pub mod split;

pub use envelope::{DatasetEnvelope, DatasetMetadata};
pub use split::{split_index, split_tiers, Partition, Tiers};

use crate::adapters::loader::SourceFile;
use crate::config::SplitConfig;
use crate::core::fusion::ValueAssignment;
use crate::domain::FusedAnnotation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;
/// Share of each tier that goes to training
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Split parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitSettings {
    pub seed: u64,
    pub train_ratio: f64,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            train_ratio: DEFAULT_TRAIN_RATIO,
        }
    }
}

impl SplitSettings {
    pub fn from_config(config: &SplitConfig) -> Self {
        Self {
            seed: config.seed,
            train_ratio: config.train_ratio,
        }
    }
}

/// Builds the dataset envelope from fused annotations
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    settings: SplitSettings,
    value_assignment: ValueAssignment,
    sources: Vec<SourceFile>,
}

impl DatasetBuilder {
    pub fn new(settings: SplitSettings) -> Self {
        Self {
            settings,
            value_assignment: ValueAssignment::default(),
            sources: Vec::new(),
        }
    }

    /// Records the strategy the annotations were fused with
    pub fn value_assignment(mut self, value_assignment: ValueAssignment) -> Self {
        self.value_assignment = value_assignment;
        self
    }

    /// Records the input files
    pub fn sources(mut self, sources: Vec<SourceFile>) -> Self {
        self.sources = sources;
        self
    }

    /// Tiers, splits and wraps `annotations`
    pub fn build(&self, annotations: Vec<FusedAnnotation>) -> DatasetEnvelope {
        let total_annotations = annotations.len();
        let categories: Vec<String> = annotations
            .iter()
            .map(|a| a.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut tiers = Tiers::partition(annotations);
        tracing::info!(
            high_quality = tiers.high_quality.len(),
            medium_quality = tiers.medium_quality.len(),
            "Tiered annotations"
        );

        let mut rng = StdRng::seed_from_u64(self.settings.seed);
        let partition = split_tiers(&mut tiers, self.settings.train_ratio, &mut rng);

        tracing::info!(
            train = partition.train.len(),
            validation = partition.validation.len(),
            seed = self.settings.seed,
            "Split dataset"
        );

        let metadata = DatasetMetadata {
            total_annotations,
            with_values: tiers.high_quality.len(),
            categories,
            seed: self.settings.seed,
            train_ratio: self.settings.train_ratio,
            train_count: partition.train.len(),
            validation_count: partition.validation.len(),
            value_assignment: self.value_assignment,
            sources: self.sources.clone(),
        };

        DatasetEnvelope {
            train: partition.train,
            validation: partition.validation,
            high_quality: tiers.high_quality,
            medium_quality: tiers.medium_quality,
            metadata,
        }
    }
}
