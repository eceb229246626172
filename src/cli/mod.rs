//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod edit;
mod inspect;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::load_config;

pub use edit::{Channel, EditOp};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Filter used when neither the command line, `RUST_LOG` nor the config
/// names one
const DEFAULT_DIRECTIVE: &str = "huepick=error";

/// huepick - Parse, convert and edit CSS colors and gradients
#[derive(Parser)]
#[command(name = "huepick")]
#[command(about = "huepick - Parse, convert and edit CSS colors and gradients")]
#[command(version)]
pub struct Cli {
    /// Path to huepick.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive (e.g. "debug", "huepick=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a value and print its canonical form
    Parse {
        /// Solid color or gradient text
        value: String,

        /// Print the parsed model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert the active color of a value to other color spaces
    Convert {
        /// Solid color, gradient or hsl() text
        value: String,

        /// Target format: hsl, hsv, hex, cmyk, rgba, all
        #[arg(long, default_value = "all")]
        to: String,
    },

    /// Apply one picker operation and print the new value
    Edit {
        /// Solid color or gradient text
        value: String,

        #[command(subcommand)]
        op: EditOp,
    },
}

/// Turn a config level into a filter directive. A bare level applies to
/// this crate only.
fn config_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("huepick={}", level)
    }
}

/// Install the stderr `tracing` subscriber.
///
/// Precedence: `--log-level`, then `RUST_LOG`, then the config level.
fn init_logging(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(directive) => EnvFilter::try_new(config_directive(directive))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(config_directive(config_level))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
        }),
    };

    // A subscriber may already be installed when run from a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    init_logging(cli.log_level.as_deref(), &config.logging.level);

    match cli.command {
        Commands::Parse { value, json } => inspect::run_parse(&value, json),
        Commands::Convert { value, to } => inspect::run_convert(&value, &to),
        Commands::Edit { value, op } => edit::run_edit(&value, op, &config),
    }
}
