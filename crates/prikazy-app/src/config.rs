//! Configuration management for prikazy
//!
//! Config stored at: ~/.config/prikazy/config.json

use prikazy_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tariff table file (JSON or TOML)
    #[serde(default)]
    pub tariffs_path: Option<PathBuf>,

    /// Report store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Refuse tariff tables with overlapping or missing buckets
    #[serde(default)]
    pub strict_tariffs: bool,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tariffs_path: None,
            store_dir: None,
            output_format: default_output_format(),
            strict_tariffs: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("prikazy");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the report store directory path
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("prikazy");
        Ok(data_dir)
    }

    /// Tariff file path, or an error telling how to configure one
    pub fn tariffs_path(&self) -> Result<&Path> {
        self.tariffs_path
            .as_deref()
            .ok_or_else(|| ConfigError::MissingTariffs.into())
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prikazy Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Tariffs:        {}",
            self.tariffs_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        )?;
        writeln!(
            f,
            "Store dir:      {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Strict tariffs: {}", self.strict_tariffs)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.tariffs_path.is_none());
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(!config.strict_tariffs);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            tariffs_path: Some(PathBuf::from("/srv/tarify.toml")),
            store_dir: Some(dir.path().join("store")),
            output_format: OutputFormat::Json,
            strict_tariffs: true,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.tariffs_path, config.tariffs_path);
        assert_eq!(loaded.output_format, OutputFormat::Json);
        assert!(loaded.strict_tariffs);
        assert_eq!(loaded.store_dir().unwrap(), dir.path().join("store"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"strict_tariffs": true}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.strict_tariffs);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_tariffs_path_required() {
        assert!(Config::default().tariffs_path().is_err());
    }
}
