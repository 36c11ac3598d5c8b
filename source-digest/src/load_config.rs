/// `load_config` module: reads the YAML run configuration and merges it with
/// command-line overrides into the core [`CollectConfig`].
///
/// This is the only place where user-supplied YAML is parsed. The core crate
/// never sees the file, only the built, validated config.
///
/// # Errors
/// Everything here returns `anyhow::Error` with the config path in context;
/// errors surface at the CLI boundary.
use anyhow::{Context, Result};
use serde::Deserialize;
use source_digest_core::config::{CollectConfig, FileTypeProfile, TieBreak};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub roots: Vec<PathBuf>,
    #[serde(default)]
    pub ignore: Vec<PathBuf>,
    #[serde(default)]
    pub open_output: bool,
    #[serde(default)]
    pub tie_break: Option<TieBreak>,
    /// Replaces the built-in profiles when present.
    pub profiles: Option<Vec<FileTypeProfile>>,
}

/// Values given on the command line. They win over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub roots: Vec<PathBuf>,
    pub ignore: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub open_output: bool,
    pub tie_break: Option<TieBreak>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match serde_yaml::from_str::<FileConfig>(&config_content) {
        Ok(conf) => {
            info!(
                config_path = ?path_ref,
                roots_count = conf.roots.len(),
                "Parsed config YAML successfully"
            );
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML {:?}: {e}", path_ref))
        }
    }
}

/// Merge file values and overrides into a validated [`CollectConfig`].
///
/// Roots and ignores from both sources are concatenated, file first. Output,
/// tie-break and the open flag from the command line replace the file's.
pub fn build_config(file: FileConfig, overrides: Overrides) -> Result<CollectConfig> {
    let mut builder = CollectConfig::builder()
        .roots(file.roots.iter().chain(&overrides.roots))
        .ignores(file.ignore.iter().chain(&overrides.ignore))
        .open_output(overrides.open_output || file.open_output);

    if let Some(output) = overrides.output.or(file.output) {
        builder = builder.output_path(output);
    }
    if let Some(tie_break) = overrides.tie_break.or(file.tie_break) {
        builder = builder.tie_break(tie_break);
    }
    builder = match file.profiles {
        Some(profiles) => builder.profiles(profiles),
        None => builder.default_profiles(),
    };

    let config = builder.build().context("Invalid collect configuration")?;
    config.trace_loaded();
    Ok(config)
}
