//! Structural (COCO) export models
//!
//! These models mirror the COCO JSON layout. Only the three top-level arrays are
//! required; every per-record field is optional and defaults when absent. An
//! annotation's image and category references stay `None` when absent, since id 0
//! is a real image or category in exports that number from zero.

use crate::domain::ids::{AnnotationId, CategoryId, ImageId, PageKey};
use crate::domain::{BoundingBox, LabelFuseError, Result, SpatialAnnotation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Category name for annotations that carry no category id
pub const UNCATEGORIZED: &str = "category_none";

/// Image (page) entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoImage {
    #[serde(default)]
    pub id: ImageId,

    #[serde(default)]
    pub file_name: String,

    #[serde(default)]
    pub width: Option<f64>,

    #[serde(default)]
    pub height: Option<f64>,
}

/// Category entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoCategory {
    #[serde(default)]
    pub id: CategoryId,

    #[serde(default)]
    pub name: String,
}

/// Region annotation entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoAnnotation {
    #[serde(default)]
    pub id: AnnotationId,

    #[serde(default)]
    pub image_id: Option<ImageId>,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// `[x, y, width, height]`
    #[serde(default)]
    pub bbox: Vec<f64>,
}

/// Parsed structural export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuralExport {
    pub images: Vec<CocoImage>,
    pub categories: Vec<CocoCategory>,
    pub annotations: Vec<CocoAnnotation>,
}

impl StructuralExport {
    /// Builds the export from an already parsed JSON document
    ///
    /// # Errors
    ///
    /// Returns `MalformedExport` if the root is not an object, if one of `images`,
    /// `annotations` or `categories` is missing or not an array, or if a record in
    /// those arrays has a mistyped field.
    pub fn from_value(path: &Path, document: &Value) -> Result<Self> {
        let root = document.as_object().ok_or_else(|| {
            LabelFuseError::malformed(path, "<root>", "expected a JSON object")
        })?;

        Ok(Self {
            images: parse_records(path, root, "images")?,
            categories: parse_records(path, root, "categories")?,
            annotations: parse_records(path, root, "annotations")?,
        })
    }

    /// Image id to page key; later duplicates win
    pub fn page_keys(&self) -> HashMap<ImageId, PageKey> {
        self.images
            .iter()
            .map(|img| (img.id, PageKey::from_filename(&img.file_name)))
            .collect()
    }

    /// Image id to pixel resolution, for images that declare a positive one
    pub fn image_sizes(&self) -> HashMap<ImageId, (f64, f64)> {
        self.images
            .iter()
            .filter_map(|img| match (img.width, img.height) {
                (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some((img.id, (w, h))),
                _ => None,
            })
            .collect()
    }

    /// Category id to name; later duplicates win
    pub fn category_names(&self) -> HashMap<CategoryId, String> {
        self.categories
            .iter()
            .map(|cat| (cat.id, cat.name.clone()))
            .collect()
    }

    /// Annotations in export order with their category resolved to a name
    ///
    /// An id missing from the category table resolves to `category_<id>`, and an
    /// annotation without a category id to `category_none`.
    pub fn spatial_annotations(&self) -> Vec<SpatialAnnotation> {
        let names = self.category_names();
        self.annotations
            .iter()
            .map(|anno| {
                let category = match anno.category_id {
                    Some(id) => match names.get(&id) {
                        Some(name) => name.clone(),
                        None => {
                            tracing::warn!(
                                annotation_id = %anno.id,
                                category_id = %id,
                                "Annotation references an unknown category"
                            );
                            format!("category_{}", id)
                        }
                    },
                    None => {
                        tracing::warn!(annotation_id = %anno.id, "Annotation has no category id");
                        UNCATEGORIZED.to_string()
                    }
                };
                SpatialAnnotation {
                    id: anno.id,
                    image_id: anno.image_id,
                    category,
                    bbox: BoundingBox::from_slice(&anno.bbox),
                }
            })
            .collect()
    }
}

/// Deserializes `root[key]` as an array of `T`, reporting the failing index
fn parse_records<T: DeserializeOwned>(
    path: &Path,
    root: &Map<String, Value>,
    key: &str,
) -> Result<Vec<T>> {
    let items = root
        .get(key)
        .ok_or_else(|| LabelFuseError::malformed(path, key, "missing required key"))?
        .as_array()
        .ok_or_else(|| LabelFuseError::malformed(path, key, "expected an array"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            T::deserialize(item)
                .map_err(|e| LabelFuseError::malformed(path, format!("{key}[{i}]"), e.to_string()))
        })
        .collect()
}
