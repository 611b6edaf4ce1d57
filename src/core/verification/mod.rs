//! Data verification
//!
//! Checksums for input provenance and for re-checking a written dataset
//! against a fresh rebuild.

pub mod checksum;
pub mod report;
pub mod verify;

pub use checksum::{calculate_checksum, calculate_checksum_bytes};
pub use report::{SectionFailure, VerificationReport};
pub use verify::{verify_dataset, SECTIONS};
