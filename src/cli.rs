//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Schema-validating loader for VLSI physical-design flow configurations
#[derive(Parser)]
#[command(
    name = "flowcfg",
    version,
    about = "Schema-validating loader for VLSI physical-design flow configurations",
    long_about = "A CLI tool that loads hierarchical flow-configuration files, validates \
                  clock, placement, pin, and delay constraints against the flow schema, \
                  and emits a normalized configuration for external flow engines."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a configuration file (TOML, or JSON for .json files); may be
    /// repeated, later files override earlier ones
    #[arg(long, short = 'c', global = true)]
    pub config: Vec<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Output format for the normalized configuration dump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DumpFormat {
    /// TOML, matching the on-disk format (default)
    #[default]
    Toml,
    /// JSON, for external flow engines
    Json,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate the flow configuration (alias: lint)
    #[command(alias = "lint")]
    Check,
    /// Emit the merged, normalized configuration
    Dump {
        /// Output format
        #[arg(long, short = 'f', default_value = "toml")]
        format: DumpFormat,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Print the raw value of a single dotted key
    Get {
        /// Dotted setting key, e.g. vlsi.core.build_system
        key: String,
    },
    /// Generate default configuration file
    Init {
        /// Path where to create the configuration file
        #[arg(long, short = 'p')]
        path: Option<PathBuf>,
    },
    /// Display version information
    Version,
}
