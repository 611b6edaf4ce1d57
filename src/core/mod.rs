//! Core business logic for labelfuse.
//!
//! # Modules
//!
//! - [`index`] - Per-page index of the value export
//! - [`fusion`] - Category rules that attach values to structural regions
//! - [`dataset`] - Quality tiers, seeded split and the dataset envelope
//! - [`pipeline`] - End-to-end coordination and persistence
//! - [`verification`] - Checksums and dataset verification
//!
//! # Workflow
//!
//! 1. **Load** both exports
//! 2. **Index** the value export by page
//! 3. **Fuse** each structural annotation with its page's values
//! 4. **Split** into tiers and train/validation sets
//! 5. **Write** the dataset envelope
//! 6. **Verify** (optional) against a fresh rebuild

pub mod dataset;
pub mod fusion;
pub mod index;
pub mod pipeline;
pub mod verification;
