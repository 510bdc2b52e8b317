use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the notes slot lives.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per storage key under `data_path`
    #[default]
    File,
    /// `notekeep.db` under `data_path`
    Sqlite,
    /// Nothing is kept after the process exits
    Memory,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub backend: BackendKind,
    pub data_path: PathBuf,
    pub storage_key: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            data_path: default_data_dir(),
            storage_key: notekeep_core::DEFAULT_STORAGE_KEY.to_string(),
            log_filter: "warn,notekeep_core=info".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("notekeep"))
        .unwrap_or_else(|| PathBuf::from(".notekeep"))
}

/// `<config_dir>/notekeep/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("notekeep"))
        .unwrap_or_else(|| PathBuf::from(".notekeep"))
        .join("config.toml")
}

/// Read the config file, writing the defaults out first if it does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let toml = toml::to_string(&config).context("failed to serialize default config")?;
        fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
        return Ok(config);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
