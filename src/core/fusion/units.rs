//! Category name to unit inference

use crate::domain::Unit;

/// Infers the unit of a numeric field from its category name
///
/// Matching is by substring and the first matching row wins:
///
/// | contains | unit |
/// |---|---|
/// | `LOT_AREA`, `FLOOR_AREA` | `sqft` |
/// | `HEIGHT_FT`, `YARD`, `WIDTH` | `ft` |
/// | `COVERAGE` | `percent` |
pub fn unit_for_category(category: &str) -> Option<Unit> {
    let has = |needle: &str| category.contains(needle);

    if has("LOT_AREA") || has("FLOOR_AREA") {
        Some(Unit::Sqft)
    } else if has("HEIGHT_FT") || has("YARD") || has("WIDTH") {
        Some(Unit::Ft)
    } else if has("COVERAGE") {
        Some(Unit::Percent)
    } else {
        None
    }
}
