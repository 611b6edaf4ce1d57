// labelfuse - Annotation export fusion and dataset builder
// Copyright (c) 2025 labelfuse Contributors
// Licensed under the MIT License

use clap::Parser;
use labelfuse::cli::{Cli, Commands, EXIT_FATAL};
use labelfuse::log_error_with_context;
use labelfuse::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (log_level, logging_config) = cli.logging_settings();
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "labelfuse");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Build(args) => args.execute(&cli.config),
        Commands::Inspect(args) => args.execute(&cli.config),
        Commands::Verify(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
