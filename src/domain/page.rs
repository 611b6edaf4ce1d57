//! Per-page value index model
//!
//! A [`PageValueIndex`] holds everything the value export recorded for one page,
//! split into typed sequences. Sequence order is the order the export lists its
//! results and the fusion engine relies on it.

use serde::Serialize;
use serde_json::Number;

/// Labelled rectangle from the value export
///
/// Geometry is in percent of the page, with the page's pixel resolution kept as
/// the reference frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedRect {
    pub labels: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub original_width: u32,
    pub original_height: u32,
}

/// Numeric field value; `number` may be absent in the export and is kept as written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericValue {
    pub number: Option<Number>,
    pub x: f64,
    pub y: f64,
}

/// Zone-code text value (never empty)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCodeValue {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Unit choice (first selected choice)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitChoice {
    pub unit: String,
    pub x: f64,
    pub y: f64,
}

/// Everything the value export recorded for a single page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageValueIndex {
    /// Filename as given by the task (before basename normalization)
    pub filename: String,

    /// Labelled rectangles
    pub rectangles: Vec<ExtractedRect>,

    /// Numeric values
    pub normalized_values: Vec<NumericValue>,

    /// Zone-code texts
    pub zone_codes: Vec<ZoneCodeValue>,

    /// Unit choices
    pub units: Vec<UnitChoice>,

    /// Every result record of the task, typed or not
    pub all_results: Vec<serde_json::Value>,
}

impl PageValueIndex {
    /// Creates an empty index for `filename`
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// True when no typed value was extracted
    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
            && self.normalized_values.is_empty()
            && self.zone_codes.is_empty()
            && self.units.is_empty()
    }
}
