//! flowcfg: VLSI flow configuration loader
//!
//! A CLI tool that loads hierarchical flow-configuration files (tool
//! selections, clock constraints, placement and pin specifications, delay
//! budgets), validates them against the flow schema, and hands a normalized
//! configuration to external flow engines.

mod cli;
mod config;
mod domain;

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use toml::Value;

use cli::{Cli, Commands};
use config::ConfigService;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let document = ConfigService::load_document(&cli.config)?;
    let flow = ConfigService::bind(&document)?;

    // Initialize logging if debug mode
    if cli.debug || flow.debug {
        domain::logger::init()?;
    }

    // Execute command
    match cli.command {
        Commands::Check => {
            config::validate(&flow)?;
            if !cli.quiet {
                eprintln!("Configuration is valid.");
            }
        }
        Commands::Dump { format, output } => {
            config::validate(&flow)?;
            let rendered = ConfigService::render(&flow, format)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write output: {}", path.display()))?;
                    if !cli.quiet {
                        eprintln!("Configuration written to: {}", path.display());
                    }
                }
                None => println!("{}", rendered),
            }
        }
        Commands::Get { key } => match document.get(&key) {
            Some(Value::String(s)) => println!("{}", s),
            Some(Value::Integer(i)) => println!("{}", i),
            Some(Value::Float(f)) => println!("{}", f),
            Some(Value::Boolean(b)) => println!("{}", b),
            Some(Value::Datetime(d)) => println!("{}", d),
            Some(value) => println!("{}", serde_json::to_string(value)?),
            None => bail!("key '{}' not found in configuration", key),
        },
        Commands::Init { path } => {
            let config_path = if let Some(p) = path {
                ConfigService::generate_at(&p)?;
                p
            } else {
                ConfigService::generate_default()?;
                ConfigService::default_path()
            };
            if !cli.quiet {
                eprintln!("Configuration file created at: {}", config_path.display());
            }
        }
        Commands::Version => {
            println!("flowcfg {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
