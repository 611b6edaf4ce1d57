//! Export file integrations for labelfuse.
//!
//! - [`coco`] - structural export models (images, categories, region annotations)
//! - [`label_studio`] - value export models (per-page tasks and result records)
//! - [`loader`] - reads both exports from disk and validates their top-level shape
//!
//! # Example
//!
//! ```rust,no_run
//! use labelfuse::adapters::loader::load_exports;
//!
//! # fn example() -> labelfuse::domain::Result<()> {
//! let loaded = load_exports("Zoning-Labels-COCO.json", "zoning-labels.json")?;
//! println!("{} annotations", loaded.structural.annotations.len());
//! # Ok(())
//! # }
//! ```

pub mod coco;
pub mod label_studio;
pub mod loader;

pub use coco::StructuralExport;
pub use label_studio::ValueExport;
pub use loader::{load_exports, LoadedExports, SourceFile};
