//! CLI command implementations

pub mod build;
pub mod init;
pub mod inspect;
pub mod validate;
pub mod verify;
