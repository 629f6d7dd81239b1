// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Collection URL of the remote relationship store
    pub relationship_url: String,
    /// Search URL of the dataset catalog
    pub dataset_search_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relationship_url: "http://localhost:8000/api/relationships".to_string(),
            dataset_search_url: "http://localhost:8000/api/datasets".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Default location of the config file
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "hyperpolymath", "datarel")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration: defaults, then an optional TOML file, then
/// `DATAREL_*` environment overrides
pub fn load(path: Option<&Path>) -> Result<Config> {
    let defaults = Config::default();
    let mut builder = config::Config::builder()
        .set_default("relationship_url", defaults.relationship_url)?
        .set_default("dataset_search_url", defaults.dataset_search_url)?
        .set_default("log_level", defaults.log_level)?;

    if let Some(file) = path.map(Path::to_path_buf).or_else(default_config_path) {
        builder = builder.add_source(config::File::from(file).required(false));
    }
    builder = builder.add_source(config::Environment::with_prefix("DATAREL"));

    builder
        .build()
        .context("Failed to assemble configuration")?
        .try_deserialize()
        .context("Failed to load configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = load(Some(&missing)).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "relationship_url = \"https://dms.example.org/api/relationships\"").unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(
            config.relationship_url,
            "https://dms.example.org/api/relationships"
        );
        // untouched keys keep their defaults
        assert_eq!(config.log_level, "info");
    }
}
