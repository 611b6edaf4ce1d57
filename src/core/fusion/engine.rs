//! Fusion engine
//!
//! One call to [`FusionEngine::fuse`] is one fusion run. All state the heuristics
//! depend on (the zone registry, spatial claims, the count of records produced so
//! far) lives in a [`FusionRun`] created at the start of the call and dropped at
//! the end, so runs never influence each other.

use super::registry::ZoneRegistry;
use super::spatial::{centroid_percent, SpatialMatcher};
use super::units::unit_for_category;
use super::{FusionRules, ValueAssignment};
use crate::adapters::coco::StructuralExport;
use crate::core::index::ValueIndex;
use crate::domain::ids::{ImageId, PageKey};
use crate::domain::page::{NumericValue, PageValueIndex};
use crate::domain::{FusedAnnotation, SpatialAnnotation};
use serde::Serialize;
use serde_json::Number;
use std::collections::HashMap;

/// Counters collected during a fusion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FusionStats {
    /// Records produced
    pub fused: usize,
    /// Records with `has_values`
    pub with_values: usize,
    /// Records that received a zone code
    pub zone_codes_assigned: usize,
    /// Distinct zone codes claimed
    pub unique_zones: usize,
    /// Records that received a numeric value
    pub numeric_assigned: usize,
    /// Records that received a unit
    pub units_assigned: usize,
    /// Records whose page has no entry in the value index
    pub without_page_values: usize,
}

/// Result of a fusion run
#[derive(Debug, Clone)]
pub struct FusionOutcome {
    /// One record per structural annotation, in export order
    pub annotations: Vec<FusedAnnotation>,
    pub stats: FusionStats,
}

/// Merges structural annotations with the value index
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    rules: FusionRules,
}

impl FusionEngine {
    pub fn new(rules: FusionRules) -> Self {
        Self { rules }
    }

    /// Fuses every annotation of `structural` against `index`
    ///
    /// Never fails: unknown images, pages without values and categories without
    /// rules all produce a record with nothing assigned.
    pub fn fuse(&self, structural: &StructuralExport, index: &ValueIndex) -> FusionOutcome {
        let spatial = structural.spatial_annotations();
        let mut run = FusionRun::new(&self.rules, structural, index, spatial.len());

        for annotation in &spatial {
            run.fuse_one(annotation);
        }

        let outcome = run.finish();

        tracing::info!(
            fused = outcome.stats.fused,
            with_values = outcome.stats.with_values,
            zone_codes = outcome.stats.zone_codes_assigned,
            unique_zones = outcome.stats.unique_zones,
            without_page_values = outcome.stats.without_page_values,
            strategy = %self.rules.assignment,
            "Merged structural annotations with extracted values"
        );

        outcome
    }
}

/// State of a single fusion run
struct FusionRun<'a> {
    rules: &'a FusionRules,
    index: &'a ValueIndex,
    page_keys: HashMap<ImageId, PageKey>,
    image_sizes: HashMap<ImageId, (f64, f64)>,
    registry: ZoneRegistry,
    matcher: SpatialMatcher,
    fused: Vec<FusedAnnotation>,
    stats: FusionStats,
}

impl<'a> FusionRun<'a> {
    fn new(
        rules: &'a FusionRules,
        structural: &StructuralExport,
        index: &'a ValueIndex,
        capacity: usize,
    ) -> Self {
        Self {
            rules,
            index,
            page_keys: structural.page_keys(),
            image_sizes: structural.image_sizes(),
            registry: ZoneRegistry::new(),
            matcher: SpatialMatcher::new(),
            fused: Vec::with_capacity(capacity),
            stats: FusionStats::default(),
        }
    }

    fn fuse_one(&mut self, annotation: &SpatialAnnotation) {
        let page_key = annotation
            .image_id
            .and_then(|id| self.page_keys.get(&id))
            .cloned()
            .unwrap_or_default();
        let index = self.index;
        let page = index.get(&page_key);

        if page.is_none() {
            self.stats.without_page_values += 1;
            tracing::trace!(
                annotation_id = %annotation.id,
                page = %page_key,
                "No value export entry for page"
            );
        }

        let builder = FusedAnnotation::builder(annotation, page_key.clone());

        let fused = if self.rules.is_zone_code_category(&annotation.category) {
            builder.zone_code(self.claim_zone_code(page)).build()
        } else if self.rules.is_numeric_category(&annotation.category) {
            let values = page.map(|p| p.normalized_values.as_slice()).unwrap_or(&[]);
            let number = self.pick_number(annotation, &page_key, values);
            let unit = match page {
                Some(p) if !p.units.is_empty() => unit_for_category(&annotation.category),
                _ => None,
            };
            builder.normalized_value(number).unit(unit).build()
        } else {
            builder.build()
        };

        self.record(fused);
    }

    /// First zone code on the page that has not been claimed yet in this run
    fn claim_zone_code(&mut self, page: Option<&PageValueIndex>) -> Option<String> {
        let zones = page.map(|p| p.zone_codes.as_slice()).unwrap_or(&[]);
        zones
            .iter()
            .find(|zone| self.registry.claim(&zone.text))
            .map(|zone| zone.text.clone())
    }

    fn pick_number(
        &mut self,
        annotation: &SpatialAnnotation,
        page_key: &PageKey,
        values: &[NumericValue],
    ) -> Option<Number> {
        if values.is_empty() {
            return None;
        }

        match self.rules.assignment {
            ValueAssignment::Positional => {
                let k = self.fused.len();
                values[k % values.len()].number.clone()
            }
            ValueAssignment::Spatial => {
                let (width, height) = annotation
                    .image_id
                    .and_then(|id| self.image_sizes.get(&id))
                    .copied()
                    .unwrap_or((self.rules.fallback_width, self.rules.fallback_height));
                let target = centroid_percent(&annotation.bbox, width, height);
                self.matcher.claim_nearest(page_key, values, target)
            }
        }
    }

    fn record(&mut self, fused: FusedAnnotation) {
        self.stats.fused += 1;
        if fused.has_values {
            self.stats.with_values += 1;
        }
        if fused.zone_code.is_some() {
            self.stats.zone_codes_assigned += 1;
        }
        if fused.normalized_value.is_some() {
            self.stats.numeric_assigned += 1;
        }
        if fused.unit.is_some() {
            self.stats.units_assigned += 1;
        }
        self.fused.push(fused);
    }

    fn finish(mut self) -> FusionOutcome {
        self.stats.unique_zones = self.registry.len();
        FusionOutcome {
            annotations: self.fused,
            stats: self.stats,
        }
    }
}
