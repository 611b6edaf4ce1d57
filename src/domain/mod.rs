//! Domain models and types for labelfuse.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ImageId`], [`CategoryId`], [`AnnotationId`], [`PageKey`])
//! - **Annotation models** ([`SpatialAnnotation`], [`FusedAnnotation`])
//! - **Per-page value models** ([`PageValueIndex`] and its entries)
//! - **Error types** ([`LabelFuseError`]) and the [`Result`] alias
//!
//! # Builder Pattern
//!
//! Fused records are created exactly once through a builder, which derives
//! `has_values` from what was assigned:
//!
//! ```rust
//! use labelfuse::domain::{AnnotationId, BoundingBox, FusedAnnotation, ImageId, PageKey, SpatialAnnotation};
//!
//! let spatial = SpatialAnnotation {
//!     id: AnnotationId::new(1),
//!     image_id: Some(ImageId::new(1)),
//!     category: "ZONE_CODE".to_string(),
//!     bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
//! };
//! let fused = FusedAnnotation::builder(&spatial, PageKey::from_filename("p1.png"))
//!     .zone_code(Some("R-1".to_string()))
//!     .build();
//! assert!(fused.has_values);
//! ```

pub mod annotation;
pub mod errors;
pub mod ids;
pub mod page;
pub mod result;

// Re-export commonly used types for convenience
pub use annotation::{BoundingBox, FusedAnnotation, FusedAnnotationBuilder, SpatialAnnotation, Unit};
pub use errors::LabelFuseError;
pub use ids::{AnnotationId, CategoryId, ImageId, PageKey};
pub use page::{ExtractedRect, NumericValue, PageValueIndex, UnitChoice, ZoneCodeValue};
pub use result::Result;
