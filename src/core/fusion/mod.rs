//! Fusion of structural regions with extracted values
//!
//! The engine walks the structural export's annotations in order and, per
//! category, attaches a zone code or a numeric value and unit taken from the
//! value index of the region's page.
//!
//! Two numeric assignment strategies are supported:
//!
//! - **Positional**: the k-th processed annotation takes the page's value at
//!   `k % len`. This is the legacy behaviour and the default.
//! - **Spatial**: each annotation takes the nearest unclaimed value on its page.

pub mod engine;
pub mod registry;
pub mod spatial;
pub mod units;

pub use engine::{FusionEngine, FusionOutcome, FusionStats};
pub use registry::ZoneRegistry;
pub use units::unit_for_category;

use crate::config::FusionConfig;
use crate::domain::{LabelFuseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category that receives zone codes by default
pub const DEFAULT_ZONE_CODE_CATEGORY: &str = "ZONE_CODE";

/// Categories that receive numeric values by default
pub const DEFAULT_NUMERIC_CATEGORIES: [&str; 7] = [
    "MIN_LOT_AREA",
    "MIN_LOT_WIDTH",
    "FRONT_YARD",
    "SIDE_YARD",
    "REAR_YARD",
    "MAX_HEIGHT_FT",
    "MAX_LOT_COVERAGE",
];

/// Numeric value assignment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueAssignment {
    /// Index-modulo assignment by processing order
    #[default]
    Positional,
    /// Nearest unclaimed value by centroid distance
    Spatial,
}

impl ValueAssignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueAssignment::Positional => "positional",
            ValueAssignment::Spatial => "spatial",
        }
    }
}

impl fmt::Display for ValueAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueAssignment {
    type Err = LabelFuseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "positional" | "index" => Ok(Self::Positional),
            "spatial" | "nearest" => Ok(Self::Spatial),
            _ => Err(LabelFuseError::Configuration(format!(
                "Invalid value assignment: {s}. Expected 'positional' or 'spatial'"
            ))),
        }
    }
}

/// Category rules and strategy used by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct FusionRules {
    pub zone_code_category: String,
    pub numeric_categories: Vec<String>,
    pub assignment: ValueAssignment,
    /// Page resolution used when the structural export does not declare one
    pub fallback_width: f64,
    pub fallback_height: f64,
}

impl Default for FusionRules {
    fn default() -> Self {
        Self {
            zone_code_category: DEFAULT_ZONE_CODE_CATEGORY.to_string(),
            numeric_categories: DEFAULT_NUMERIC_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            assignment: ValueAssignment::Positional,
            fallback_width: f64::from(crate::core::index::DEFAULT_FALLBACK_WIDTH),
            fallback_height: f64::from(crate::core::index::DEFAULT_FALLBACK_HEIGHT),
        }
    }
}

impl FusionRules {
    /// Builds the rules from the `[fusion]` configuration section
    pub fn from_config(config: &FusionConfig) -> Result<Self> {
        Ok(Self {
            zone_code_category: config.zone_code_category.clone(),
            numeric_categories: config.numeric_categories.clone(),
            assignment: ValueAssignment::from_str(&config.value_assignment)?,
            fallback_width: f64::from(config.fallback_width),
            fallback_height: f64::from(config.fallback_height),
        })
    }

    /// Sets the assignment strategy
    pub fn with_assignment(mut self, assignment: ValueAssignment) -> Self {
        self.assignment = assignment;
        self
    }

    pub fn is_zone_code_category(&self, category: &str) -> bool {
        category == self.zone_code_category
    }

    pub fn is_numeric_category(&self, category: &str) -> bool {
        self.numeric_categories.iter().any(|c| c == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_assignment_from_str() {
        assert_eq!(
            ValueAssignment::from_str("positional").unwrap(),
            ValueAssignment::Positional
        );
        assert_eq!(
            ValueAssignment::from_str("Spatial").unwrap(),
            ValueAssignment::Spatial
        );
        assert_eq!(
            ValueAssignment::from_str("nearest").unwrap(),
            ValueAssignment::Spatial
        );
        assert!(ValueAssignment::from_str("overlap").is_err());
    }

    #[test]
    fn test_value_assignment_display_roundtrip() {
        for strategy in [ValueAssignment::Positional, ValueAssignment::Spatial] {
            assert_eq!(
                ValueAssignment::from_str(&strategy.to_string()).unwrap(),
                strategy
            );
        }
    }

    #[test]
    fn test_default_rules() {
        let rules = FusionRules::default();
        assert!(rules.is_zone_code_category("ZONE_CODE"));
        assert!(rules.is_numeric_category("MAX_LOT_COVERAGE"));
        assert!(!rules.is_numeric_category("MAX_FLOOR_AREA"));
        assert_eq!(rules.assignment, ValueAssignment::Positional);
        assert_eq!(rules.fallback_width, 2550.0);
    }

    #[test]
    fn test_rules_from_config() {
        let config = FusionConfig {
            value_assignment: "spatial".to_string(),
            ..FusionConfig::default()
        };
        let rules = FusionRules::from_config(&config).unwrap();
        assert_eq!(rules.assignment, ValueAssignment::Spatial);
        assert_eq!(rules.numeric_categories.len(), 7);
    }
}
