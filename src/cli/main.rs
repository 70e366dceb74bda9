//! Command-line interface entry point for `moyenne`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use moyenne::catalog::Catalog;
use moyenne::config::Config;
use moyenne::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use moyenne::{error, info};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path =
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    info!("moyenne {}", moyenne::get_version());

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Catalog {
            specialty,
            semester,
        } => {
            let catalog = load_catalog(&config);
            commands::catalog::run(&catalog, specialty.as_deref(), semester.as_deref());
        }
        Command::Compute {
            specialty,
            semester,
            grades,
            format,
            output,
            save,
        } => {
            let catalog = load_catalog(&config);
            let request = commands::compute::ComputeRequest {
                specialty: &specialty,
                semester: &semester,
                grades: &grades,
                format: &format,
                output: output.as_deref(),
                save,
            };
            commands::compute::run(&request, &catalog, &config);
        }
        Command::Shell => {
            let catalog = load_catalog(&config);
            commands::shell::run(&catalog, &config);
        }
    }
}

/// Load the configured catalog or exit with an error
fn load_catalog(config: &Config) -> Catalog {
    match Catalog::load(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Catalog load failed: {e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}
