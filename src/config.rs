//! Configuration file support for sbom-orchestrator.
//!
//! Provides YAML-based configuration through `sbom-orchestrator.config.yml`
//! files, validation, and merging with command-line flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sbom_orchestrator::application::dto::{
    AnalysisSettings, Ecosystem, DEFAULT_CLONE_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_FILE,
};
use sbom_orchestrator::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-orchestrator.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub output_dir: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    pub clone_dir: Option<PathBuf>,
    pub component_types: Option<Vec<String>>,
    pub ecosystems: Option<Vec<String>>,
    pub module_concurrency: Option<usize>,
    pub command_timeout_secs: Option<u64>,
    pub gradle_batch_size: Option<usize>,
    pub skip_sbom: Option<bool>,
    pub skip_frameworks: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "using discovered config file");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (field, value) in [
        ("module_concurrency", config.module_concurrency.map(|v| v as u64)),
        ("gradle_batch_size", config.gradle_batch_size.map(|v| v as u64)),
        ("command_timeout_secs", config.command_timeout_secs),
    ] {
        if value == Some(0) {
            bail!(
                "Invalid config: {} must be greater than 0.\n\n\
                 💡 Hint: Remove the field to use the default value.",
                field
            );
        }
    }

    if let Some(ref types) = config.component_types {
        for (i, name) in types.iter().enumerate() {
            if name.trim().is_empty() {
                bail!(
                    "Invalid config: component_types[{}] must not be empty.\n\n\
                     💡 Hint: Use CycloneDX component types such as \"framework\" or \"library\".",
                    i
                );
            }
        }
    }

    if let Some(ref ecosystems) = config.ecosystems {
        for name in ecosystems {
            if let Err(e) = name.parse::<Ecosystem>() {
                bail!("Invalid config: {}", e);
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<_> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub skip_sbom: bool,
    pub skip_frameworks: bool,
    pub ecosystems: Vec<Ecosystem>,
}

/// Settings after merging command-line flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub clone_dir: PathBuf,
    pub analysis: AnalysisSettings,
}

impl ResolvedSettings {
    pub fn resolve(cli: CliOverrides, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();
        let defaults = AnalysisSettings::default();

        let output_dir = cli
            .output_dir
            .or(config.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let report_path = cli
            .report
            .or(config.report_file)
            .unwrap_or_else(|| output_dir.join(DEFAULT_REPORT_FILE));

        let config_ecosystems: Vec<Ecosystem> = config
            .ecosystems
            .unwrap_or_default()
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect();
        let ecosystems = if cli.ecosystems.is_empty() {
            config_ecosystems
        } else {
            cli.ecosystems
        };

        let analysis = AnalysisSettings {
            component_types: config.component_types.unwrap_or(defaults.component_types),
            ecosystems: defaults.ecosystems,
            module_concurrency: config
                .module_concurrency
                .unwrap_or(defaults.module_concurrency),
            command_timeout: config
                .command_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.command_timeout),
            gradle_batch_size: config
                .gradle_batch_size
                .unwrap_or(defaults.gradle_batch_size),
            skip_sbom: cli.skip_sbom || config.skip_sbom.unwrap_or(false),
            skip_frameworks: cli.skip_frameworks || config.skip_frameworks.unwrap_or(false),
        }
        .with_ecosystems(&ecosystems);

        Self {
            output_dir,
            report_path,
            clone_dir: config
                .clone_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLONE_DIR)),
            analysis,
        }
    }
}
