//! Quality tiers and the seeded train/validation split
//!
//! Every shuffle takes the generator explicitly, so the sequence of shuffles is
//! the whole reproducibility contract: same seed, same inputs, same call order,
//! same output.

use crate::domain::FusedAnnotation;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fused annotations bucketed by completeness
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tiers {
    /// Records with `has_values`
    pub high_quality: Vec<FusedAnnotation>,
    /// All other records
    pub medium_quality: Vec<FusedAnnotation>,
}

impl Tiers {
    /// Splits `annotations` by `has_values`, keeping input order within each tier
    pub fn partition(annotations: Vec<FusedAnnotation>) -> Self {
        let (high_quality, medium_quality): (Vec<_>, Vec<_>) =
            annotations.into_iter().partition(|a| a.has_values);
        Self {
            high_quality,
            medium_quality,
        }
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.high_quality.len() + self.medium_quality.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of elements of a tier of `len` that go to training
///
/// `floor(len * ratio)`, so a single-element tier always lands in validation.
pub fn split_index(len: usize, train_ratio: f64) -> usize {
    let at = (len as f64 * train_ratio).floor() as usize;
    at.min(len)
}

/// Train and validation sets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub train: Vec<FusedAnnotation>,
    pub validation: Vec<FusedAnnotation>,
}

/// Shuffles both tiers in place, splits each, then shuffles the combined sets
pub fn split_tiers<R: Rng + ?Sized>(tiers: &mut Tiers, train_ratio: f64, rng: &mut R) -> Partition {
    tiers.high_quality.shuffle(rng);
    tiers.medium_quality.shuffle(rng);

    let split_hq = split_index(tiers.high_quality.len(), train_ratio);
    let split_mq = split_index(tiers.medium_quality.len(), train_ratio);

    let mut train: Vec<FusedAnnotation> = tiers.high_quality[..split_hq]
        .iter()
        .chain(&tiers.medium_quality[..split_mq])
        .cloned()
        .collect();
    let mut validation: Vec<FusedAnnotation> = tiers.high_quality[split_hq..]
        .iter()
        .chain(&tiers.medium_quality[split_mq..])
        .cloned()
        .collect();

    train.shuffle(rng);
    validation.shuffle(rng);

    tracing::debug!(
        split_hq,
        split_mq,
        train = train.len(),
        validation = validation.len(),
        "Dataset split"
    );

    Partition { train, validation }
}
