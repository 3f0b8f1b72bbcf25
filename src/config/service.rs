//! Configuration service for loading, merging, and generating config files.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::DumpFormat;
use crate::domain::FlowDocument;

use super::schema;
use super::FlowConfig;

/// Environment variable holding extra config files, `PATH`-style separated.
/// These are loaded first and overridden by explicit `--config` files.
pub const ENVIRONMENT_CONFIGS_VAR: &str = "FLOWCFG_ENVIRONMENT_CONFIGS";

/// Configuration service.
pub struct ConfigService;

impl ConfigService {
    /// Get the default configuration file path.
    /// Always uses ~/.config/flowcfg/flow.toml for cross-platform consistency.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("flowcfg")
            .join("flow.toml")
    }

    /// Bind a merged document to the typed flow schema.
    ///
    /// Validation is a separate step so that commands reading raw settings
    /// can skip it; `check` and `dump` run `validate` on the result.
    pub fn bind(document: &FlowDocument) -> Result<FlowConfig> {
        schema::bind(document).context("Failed to bind configuration against the flow schema")
    }

    /// Load and merge configuration files into a raw dotted-key document.
    ///
    /// `paths` are the explicit `--config` files, merged in order on top of
    /// any environment config files. If no explicit path is given, the
    /// default path is used, creating a default file there first if needed.
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load_document(paths: &[PathBuf]) -> Result<FlowDocument> {
        let mut merged = FlowDocument::default();
        for path in Self::config_paths(paths)? {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let document = if path.extension().and_then(|e| e.to_str()) == Some("json") {
                FlowDocument::from_json_str(&content)
            } else {
                FlowDocument::from_str(&content)
            }
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            debug!("merging {} settings from {}", document.len(), path.display());
            merged.merge(document);
        }
        Ok(merged)
    }

    /// Resolve the list of config files to load, in merge order.
    fn config_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut resolved = Self::environment_paths();

        if paths.is_empty() {
            let default = Self::default_path();
            if !default.exists() {
                // Create default config file
                Self::generate_at(&default)?;
            }
            resolved.push(default);
        } else {
            resolved.extend(paths.iter().cloned());
        }

        Ok(resolved)
    }

    /// Config files named by the environment, in order.
    pub fn environment_paths() -> Vec<PathBuf> {
        match env::var_os(ENVIRONMENT_CONFIGS_VAR) {
            Some(value) => env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Render the normalized configuration for downstream flow tools.
    pub fn render(config: &FlowConfig, format: DumpFormat) -> Result<String> {
        match format {
            DumpFormat::Toml => {
                toml::to_string_pretty(config).context("Failed to serialize configuration as TOML")
            }
            DumpFormat::Json => serde_json::to_string_pretty(config)
                .context("Failed to serialize configuration as JSON"),
        }
    }

    /// Generate default configuration file at the default path.
    pub fn generate_default() -> Result<()> {
        Self::generate_at(&Self::default_path())
    }

    /// Generate default configuration file at the specified path.
    pub fn generate_at(path: &Path) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = Self::default_config_content();
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration content with comments.
    fn default_config_content() -> String {
        r#"# flowcfg flow configuration
# Settings are addressed by dotted key, e.g. `flowcfg get vlsi.core.technology`.

[vlsi.core]
# Build system driving the flow: "none" or "make" (default: "none")
build_system = "none"
# Tool plugins consumed by the external flow engine
synthesis_tool = "yosys"
par_tool = "openroad"
# Technology/PDK name
technology = "asap7"

[vlsi.inputs]
# Pin assignment mode: "none", "generated", or "auto" (default: "none")
pin_mode = "generated"

# Clock constraints. Periods and uncertainties take a unit suffix
# (fs, ps, ns, us, ms, s).
[[vlsi.inputs.clocks]]
name = "clock"
period = "2ns"
uncertainty = "0.1ns"

# Placement constraints. The toplevel constraint fixes the die area and
# must sit at the origin with explicit margins.
[[vlsi.inputs.placement_constraints]]
path = "ChipTop"
type = "toplevel"
x = 0.0
y = 0.0
width = 1000.0
height = 1000.0
margins = { left = 10.0, right = 10.0, top = 10.0, bottom = 10.0 }

# Pin assignments: a wildcard pattern, the metal layers to use, and the
# chip side ("top", "bottom", "left", "right", or "internal").
[[vlsi.inputs.pin.assignments]]
pins = "*"
layers = ["met2", "met4"]
side = "bottom"

# Delay budgets relative to a declared clock.
[[vlsi.inputs.delays]]
name = "io_in"
clock = "clock"
delay = "0.5ns"
direction = "input"

[[vlsi.inputs.delays]]
name = "io_out"
clock = "clock"
delay = "0.5ns"
direction = "output"
"#
        .to_string()
    }
}
