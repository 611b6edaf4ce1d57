// labelfuse - Annotation export fusion and dataset builder
// Copyright (c) 2025 labelfuse Contributors
// Licensed under the MIT License

//! # labelfuse - merge annotation exports into a training dataset
//!
//! labelfuse joins two exports of the same set of scanned pages: a COCO export
//! holding the region geometry and categories, and a Label Studio export holding
//! the values read off each page (zone codes, numbers, units). The merged records
//! are tiered by completeness and split into reproducible train and validation
//! sets.
//!
//! ## Overview
//!
//! - **Loading** both exports with path and field aware errors
//! - **Indexing** the value export per page
//! - **Fusing** regions with values through category rules
//! - **Splitting** into tiers and a seeded train/validation split
//! - **Verifying** a written dataset against a fresh rebuild
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Indexing, fusion, dataset building, pipeline, verification
//! - [`adapters`] - Export file formats and loading
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use labelfuse::config::load_config;
//! use labelfuse::core::pipeline::Pipeline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("labelfuse.toml")?;
//!     let outcome = Pipeline::new(config)?.run()?;
//!
//!     println!("Train: {}", outcome.envelope.train.len());
//!     println!("Validation: {}", outcome.envelope.validation.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Working with the stages directly
//!
//! ```rust,no_run
//! use labelfuse::adapters::load_exports;
//! use labelfuse::core::dataset::{DatasetBuilder, SplitSettings};
//! use labelfuse::core::fusion::FusionEngine;
//! use labelfuse::core::index::ValueIndexer;
//!
//! # fn example() -> labelfuse::domain::Result<()> {
//! let loaded = load_exports("coco.json", "label-studio.json")?;
//! let index = ValueIndexer::default().build(&loaded.values);
//! let fused = FusionEngine::default().fuse(&loaded.structural, &index);
//! let envelope = DatasetBuilder::new(SplitSettings::default()).build(fused.annotations);
//! println!("{} high quality", envelope.high_quality.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::LabelFuseError`]:
//!
//! ```rust,no_run
//! use labelfuse::domain::LabelFuseError;
//!
//! fn example() -> Result<(), LabelFuseError> {
//!     let config = labelfuse::config::load_config("labelfuse.toml")?;
//!     println!("{}", config.split.seed);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
