//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use flaircheck_core::types::Variant;

/// flaircheck -- end-to-end checks for a flair service.
///
/// Without a subcommand, runs the flair lifecycle scenario.
#[derive(Parser, Debug)]
#[command(name = "flaircheck", version, about, long_about = None)]
pub struct Cli {
    /// Path to the flaircheck.toml configuration file.
    #[arg(short, long, default_value = "flaircheck.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable streaming output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the flair lifecycle scenario (default).
    Run(RunArgs),

    /// Check whether the flair service is reachable.
    Probe,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run the lifecycle scenario against the flair service.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Run only this variant (anonymous, authenticated) instead of the configured ones.
    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<Variant>,

    /// Runs per variant; overrides `scenario.repeat`.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: Option<u32>,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_str_loose(s)
        .ok_or_else(|| format!("unknown variant '{s}' (expected: anonymous, authenticated)"))
}

// ---- config ----

/// Manage flaircheck configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, scenario, auth).
        #[arg(long)]
        section: Option<String>,
    },
}
