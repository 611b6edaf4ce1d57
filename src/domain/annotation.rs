//! Region annotation models
//!
//! [`SpatialAnnotation`] is a region as read from the structural export, with its
//! category already resolved to a name. [`FusedAnnotation`] is the unified record the
//! fusion engine produces for it, built once through [`FusedAnnotationBuilder`].

use super::ids::{AnnotationId, ImageId, PageKey};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Axis-aligned bounding box in the structural export's pixel space
///
/// Serialized as the COCO `[x, y, width, height]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its components
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a box from a COCO bbox list, padding missing components with zero
    pub fn from_slice(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self::new(at(0), at(1), at(2), at(3))
    }

    /// Width times height
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Center point of the box
    pub fn centroid(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

/// A region from the structural export
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialAnnotation {
    /// Region identifier
    pub id: AnnotationId,

    /// Owning image (page); `None` when the export omits it
    pub image_id: Option<ImageId>,

    /// Resolved category name
    pub category: String,

    /// Region geometry
    pub bbox: BoundingBox,
}

impl SpatialAnnotation {
    /// Bounding-box area
    pub fn area(&self) -> f64 {
        self.bbox.area()
    }
}

/// Measurement unit attached to a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Square feet
    Sqft,
    /// Feet
    Ft,
    /// Percentage
    Percent,
}

impl Unit {
    /// Returns the serialized unit string
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Sqft => "sqft",
            Unit::Ft => "ft",
            Unit::Percent => "percent",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified annotation record produced by the fusion engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedAnnotation {
    /// Identifier copied from the spatial annotation
    pub id: AnnotationId,

    /// Owning image, `null` when the structural export omits it
    pub image_id: Option<ImageId>,

    /// Page key the image resolved to (empty when the image is unknown)
    pub image_filename: PageKey,

    /// Category name
    pub category: String,

    /// Region geometry
    pub bbox: BoundingBox,

    /// Width times height
    pub bbox_area: f64,

    /// Assigned numeric value, as written in the value export
    pub normalized_value: Option<Number>,

    /// Assigned unit
    pub unit: Option<Unit>,

    /// Assigned zone code
    pub zone_code: Option<String>,

    /// True iff a numeric value or a zone code was assigned
    pub has_values: bool,
}

impl FusedAnnotation {
    /// Starts building a fused record for `spatial` on page `page`
    pub fn builder(spatial: &SpatialAnnotation, page: PageKey) -> FusedAnnotationBuilder {
        FusedAnnotationBuilder::new(spatial, page)
    }
}

/// Builder for [`FusedAnnotation`]
///
/// The geometry and identity fields are fixed up front; the assignment fields are
/// optional. `has_values` is derived in [`FusedAnnotationBuilder::build`].
#[derive(Debug)]
pub struct FusedAnnotationBuilder {
    id: AnnotationId,
    image_id: Option<ImageId>,
    image_filename: PageKey,
    category: String,
    bbox: BoundingBox,
    normalized_value: Option<Number>,
    unit: Option<Unit>,
    zone_code: Option<String>,
}

impl FusedAnnotationBuilder {
    fn new(spatial: &SpatialAnnotation, page: PageKey) -> Self {
        Self {
            id: spatial.id,
            image_id: spatial.image_id,
            image_filename: page,
            category: spatial.category.clone(),
            bbox: spatial.bbox,
            normalized_value: None,
            unit: None,
            zone_code: None,
        }
    }

    /// Sets the numeric value
    pub fn normalized_value(mut self, value: Option<Number>) -> Self {
        self.normalized_value = value;
        self
    }

    /// Sets the unit
    pub fn unit(mut self, unit: Option<Unit>) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the zone code
    pub fn zone_code(mut self, zone_code: Option<String>) -> Self {
        self.zone_code = zone_code;
        self
    }

    /// Builds the record
    pub fn build(self) -> FusedAnnotation {
        let has_values = self.normalized_value.is_some() || self.zone_code.is_some();
        FusedAnnotation {
            id: self.id,
            image_id: self.image_id,
            image_filename: self.image_filename,
            category: self.category,
            bbox_area: self.bbox.area(),
            bbox: self.bbox,
            normalized_value: self.normalized_value,
            unit: self.unit,
            zone_code: self.zone_code,
            has_values,
        }
    }
}
