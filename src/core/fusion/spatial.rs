//! Nearest-value matching for the `spatial` assignment strategy
//!
//! Value positions in the value export are percentages of the page, so region
//! centroids are converted to the same frame before distances are compared. Each
//! value is handed out at most once per page.

use crate::domain::ids::PageKey;
use crate::domain::page::NumericValue;
use crate::domain::BoundingBox;
use serde_json::Number;
use std::collections::HashMap;

/// Converts a pixel-space bbox centroid to percent of a `width` x `height` page
pub fn centroid_percent(bbox: &BoundingBox, width: f64, height: f64) -> (f64, f64) {
    let (cx, cy) = bbox.centroid();
    (cx / width * 100.0, cy / height * 100.0)
}

/// Greedy nearest match with exclusion, scoped to one fusion run
#[derive(Debug, Clone, Default)]
pub struct SpatialMatcher {
    consumed: HashMap<PageKey, Vec<bool>>,
}

impl SpatialMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the unconsumed value on `page` closest to `target`
    ///
    /// Values without a number are never candidates. Ties go to the value listed
    /// first. Returns `None` once every candidate on the page has been claimed.
    pub fn claim_nearest(
        &mut self,
        page: &PageKey,
        values: &[NumericValue],
        target: (f64, f64),
    ) -> Option<Number> {
        let used = self
            .consumed
            .entry(page.clone())
            .or_insert_with(|| vec![false; values.len()]);
        if used.len() < values.len() {
            used.resize(values.len(), false);
        }

        let (best, _) = values
            .iter()
            .enumerate()
            .filter(|(i, v)| !used[*i] && v.number.is_some())
            .map(|(i, v)| {
                let dx = v.x - target.0;
                let dy = v.y - target.1;
                (i, dx * dx + dy * dy)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        used[best] = true;
        values[best].number.clone()
    }
}
