//! Logging and observability
//!
//! Structured logging through `tracing` with:
//! - Console output filtered by `RUST_LOG` or the configured level
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use labelfuse::logging::init_logging;
//! use labelfuse::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a pipeline stage
///
/// # Example
///
/// ```no_run
/// use labelfuse::log_stage_start;
///
/// log_stage_start!("fuse");
/// ```
#[macro_export]
macro_rules! log_stage_start {
    ($stage:expr) => {
        tracing::info!(stage = $stage, "Stage started");
    };
}

/// Log the completion of a pipeline stage with its output count
///
/// # Example
///
/// ```no_run
/// use labelfuse::log_stage_complete;
/// use std::time::Instant;
///
/// let started = Instant::now();
/// log_stage_complete!("index", 32, started.elapsed());
/// ```
#[macro_export]
macro_rules! log_stage_complete {
    ($stage:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            stage = $stage,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Stage completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use labelfuse::log_error_with_context;
/// use labelfuse::domain::LabelFuseError;
///
/// let error = LabelFuseError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
