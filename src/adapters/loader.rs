//! Export loader
//!
//! Reads both exports from disk, validates their top-level shape and records a
//! checksum of each input file for the dataset's provenance metadata.

use super::coco::StructuralExport;
use super::label_studio::ValueExport;
use crate::core::verification::checksum::calculate_checksum_bytes;
use crate::domain::{LabelFuseError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// An input file as it was read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path as given
    pub path: String,

    /// SHA-256 of the raw file contents
    pub sha256: String,
}

/// Both exports, parsed
#[derive(Debug, Clone)]
pub struct LoadedExports {
    pub structural: StructuralExport,
    pub values: ValueExport,
    pub structural_source: SourceFile,
    pub values_source: SourceFile,
}

/// Loads the structural and the value export
///
/// Both paths are checked for existence before either file is parsed, so a
/// missing second file is reported without doing any parsing work.
///
/// # Errors
///
/// - `MissingFile` if either path does not exist
/// - `MalformedExport` if either document is not JSON or has the wrong top-level shape
/// - `Io` if a file exists but cannot be read
pub fn load_exports(
    structural_path: impl AsRef<Path>,
    values_path: impl AsRef<Path>,
) -> Result<LoadedExports> {
    let structural_path = structural_path.as_ref();
    let values_path = values_path.as_ref();

    for path in [structural_path, values_path] {
        if !path.exists() {
            return Err(LabelFuseError::missing_file(path));
        }
    }

    let (structural, structural_source) = load_structural_export(structural_path)?;
    let (values, values_source) = load_value_export(values_path)?;

    tracing::info!(
        images = structural.images.len(),
        annotations = structural.annotations.len(),
        categories = structural.categories.len(),
        tasks = values.tasks.len(),
        "Loaded exports"
    );

    Ok(LoadedExports {
        structural,
        values,
        structural_source,
        values_source,
    })
}

/// Loads only the structural (COCO) export
pub fn load_structural_export(path: impl AsRef<Path>) -> Result<(StructuralExport, SourceFile)> {
    let path = path.as_ref();
    let (document, source) = read_json(path)?;
    let export = StructuralExport::from_value(path, &document)?;
    Ok((export, source))
}

/// Loads only the value (Label Studio) export
pub fn load_value_export(path: impl AsRef<Path>) -> Result<(ValueExport, SourceFile)> {
    let path = path.as_ref();
    let (document, source) = read_json(path)?;
    let export = ValueExport::from_value(path, &document)?;
    Ok((export, source))
}

fn read_json(path: &Path) -> Result<(Value, SourceFile)> {
    if !path.exists() {
        return Err(LabelFuseError::missing_file(path));
    }

    let bytes = fs::read(path)
        .map_err(|e| LabelFuseError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let document: Value = serde_json::from_slice(&bytes)
        .map_err(|e| LabelFuseError::malformed(path, "<root>", format!("invalid JSON: {e}")))?;

    let source = SourceFile {
        path: path.display().to_string(),
        sha256: calculate_checksum_bytes(&bytes),
    };

    tracing::debug!(path = %source.path, sha256 = %source.sha256, "Read export file");

    Ok((document, source))
}
