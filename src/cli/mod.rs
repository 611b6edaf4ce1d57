//! CLI interface and argument parsing

pub mod commands;

use crate::config::{load_config_or_default, LabelFuseConfig, LoggingConfig};
use crate::domain::LabelFuseError;
use clap::{Parser, Subcommand};

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;
/// Verification found mismatching sections
pub const EXIT_VERIFICATION_FAILED: i32 = 1;
/// Configuration could not be loaded or is invalid
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// An input export is missing or malformed
pub const EXIT_INPUT_ERROR: i32 = 3;
/// Anything else
pub const EXIT_FATAL: i32 = 5;

/// Maps an error to the process exit code
pub fn exit_code_for(error: &LabelFuseError) -> i32 {
    match error {
        LabelFuseError::Configuration(_) => EXIT_CONFIG_ERROR,
        e if e.is_input_error() => EXIT_INPUT_ERROR,
        _ => EXIT_FATAL,
    }
}

/// labelfuse - merge structural and value annotation exports into a training dataset
#[derive(Parser, Debug)]
#[command(name = "labelfuse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "labelfuse.toml", env = "LABELFUSE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LABELFUSE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging section the process starts with
    ///
    /// `--log-level` wins over `application.log_level`. `init` and a configuration
    /// that fails to load fall back to console-only defaults; the command reports
    /// the configuration error itself.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let config = match &self.command {
            Commands::Init(_) => LabelFuseConfig::default(),
            _ => load_config_or_default(&self.config).unwrap_or_default(),
        };
        let level = self
            .log_level
            .clone()
            .unwrap_or(config.application.log_level);
        (level, config.logging)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge both exports and write the train/validation dataset
    Build(commands::build::BuildArgs),

    /// Show what was extracted from the value export, page by page
    Inspect(commands::inspect::InspectArgs),

    /// Check a written dataset against a fresh rebuild
    Verify(commands::verify::VerifyArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_build() {
        let cli = Cli::parse_from(["labelfuse", "build"]);
        assert_eq!(cli.config, "labelfuse.toml");
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn test_cli_parse_build_overrides() {
        let cli = Cli::parse_from([
            "labelfuse",
            "build",
            "--structural",
            "coco.json",
            "--seed",
            "7",
            "--assignment",
            "spatial",
            "--dry-run",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.structural, Some(PathBuf::from("coco.json")));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.assignment.as_deref(), Some("spatial"));
        assert!(args.dry_run);
        assert!(args.values.is_none());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["labelfuse", "--config", "custom.toml", "verify"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Verify(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["labelfuse", "--log-level", "debug", "build"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_inspect_page() {
        let cli = Cli::parse_from(["labelfuse", "inspect", "--page", "p3.png", "--list-values"]);
        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.page.as_deref(), Some("p3.png"));
        assert!(args.list_values);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["labelfuse", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["labelfuse", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> String {
        let path = dir.path().join("labelfuse.toml");
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_logging_settings_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");
        let config = write_config(
            &dir,
            &format!(
                "[application]\nlog_level = \"debug\"\n\n[logging]\nlocal_enabled = true\nlocal_path = \"{}\"\nlocal_rotation = \"never\"\n",
                log_dir.display()
            ),
        );

        let cli = Cli::parse_from(["labelfuse", "--config", config.as_str(), "build"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_path, log_dir.display().to_string());
        assert_eq!(logging.local_rotation, "never");
    }

    #[test]
    fn test_logging_settings_cli_level_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = write_config(&dir, "[application]\nlog_level = \"debug\"\n");

        let cli = Cli::parse_from([
            "labelfuse",
            "--config",
            config.as_str(),
            "--log-level",
            "warn",
            "inspect",
        ]);
        let (level, _) = cli.logging_settings();
        assert_eq!(level, "warn");
    }

    #[test]
    fn test_logging_settings_fall_back_on_bad_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = write_config(&dir, "[split]\ntrain_ratio = 3.0\n");

        let cli = Cli::parse_from(["labelfuse", "--config", config.as_str(), "build"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "info");
        assert_eq!(logging, LoggingConfig::default());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&LabelFuseError::Configuration("x".into())),
            EXIT_CONFIG_ERROR
        );
        assert_eq!(
            exit_code_for(&LabelFuseError::missing_file("a.json")),
            EXIT_INPUT_ERROR
        );
        assert_eq!(
            exit_code_for(&LabelFuseError::malformed("a.json", "images", "expected an array")),
            EXIT_INPUT_ERROR
        );
        assert_eq!(exit_code_for(&LabelFuseError::Io("x".into())), EXIT_FATAL);
    }
}
