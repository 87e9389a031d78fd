//! CLI subcommands.

pub mod advise;
pub mod compare;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use taxdoc_core::TaxdocConfig;

/// Load configuration from an explicit path, the default location, or
/// defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TaxdocConfig> {
    if let Some(path) = config_path {
        return Ok(TaxdocConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        return Ok(TaxdocConfig::from_file(&default_path)?);
    }

    Ok(TaxdocConfig::default())
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taxdoc")
        .join("config.json")
}
