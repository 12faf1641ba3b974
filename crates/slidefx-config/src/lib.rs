//! slidefx Configuration Management
//!
//! Handles loading and managing configuration from ~/.slidefx/config.toml
//! and generates a commented default file on first use.

use serde::{Deserialize, Serialize};
use slidefx_catalog::{CatalogBuilder, CatalogError, EffectCatalog, PrecisionPolicy};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration directory name
const CONFIG_DIR_NAME: &str = ".slidefx";
/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Catalog configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogSettings {
    /// Bundled effect keys left out of the catalog
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Precision preamble policy applied to every program
    #[serde(default)]
    pub precision: PrecisionPolicy,
}

/// Preview configuration section, read by the `sample` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Bloom strength used when sampling the bloom effect
    #[serde(default = "default_bloom_amount")]
    pub bloom_amount: f32,

    /// Transition progress sampled when none is given
    #[serde(default = "default_sample_percent")]
    pub sample_percent: f32,
}

fn default_bloom_amount() -> f32 {
    0.5
}

fn default_sample_percent() -> f32 {
    0.5
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            bloom_amount: default_bloom_amount(),
            sample_percent: default_sample_percent(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Preview settings
    #[serde(default)]
    pub preview: PreviewSettings,
}

impl Config {
    /// Load configuration from ~/.slidefx/config.toml, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_create(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, writing the default there first if missing
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file not found, creating default at {:?}", path);
            Self::create_default_at(path)?;
        }

        let config = Self::load_from(path)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        Ok(config)
    }

    /// Get the configuration directory path (~/.slidefx/)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file path (~/.slidefx/config.toml)
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Write the default configuration to `path`, creating parent directories
    pub fn create_default_at(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::CreateDir(parent.to_path_buf(), e))?;
        }

        let toml_content =
            toml::to_string_pretty(&Config::default()).map_err(ConfigError::Serialize)?;

        // Add header comment
        let content = format!(
            "# slidefx Configuration\n\
             #\n\
             # [catalog]\n\
             # exclude   = bundled effect keys to leave out, e.g. [\"flame\"]\n\
             # precision = \"as-authored\", \"guarded\" or \"stripped\"\n\
             \n\
             {toml_content}"
        );

        fs::write(path, content).map_err(|e| ConfigError::Write(path.to_path_buf(), e))?;

        log::info!("Created default configuration at {:?}", path);
        Ok(())
    }

    /// Catalog builder carrying the configured exclusions and precision policy
    pub fn catalog_builder(&self) -> CatalogBuilder {
        CatalogBuilder::new()
            .exclude(self.catalog.exclude.iter().cloned())
            .precision(self.catalog.precision)
    }

    /// Build the bundled catalog as configured
    pub fn build_catalog(&self) -> Result<EffectCatalog, CatalogError> {
        Ok(self.catalog_builder().with_bundled()?.build())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Failed to read {0:?}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse {0:?}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Failed to write {0:?}: {1}")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to create {0:?}: {1}")]
    CreateDir(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.catalog.exclude.is_empty());
        assert_eq!(config.catalog.precision, PrecisionPolicy::AsAuthored);
        assert_eq!(config.preview.bloom_amount, 0.5);
        assert_eq!(config.preview.sample_percent, 0.5);
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut config = Config::default();
        config.catalog.precision = PrecisionPolicy::Guarded;
        config.catalog.exclude = vec!["flame".to_string()];
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config() {
        let partial = r#"
            [catalog]
            precision = "stripped"
        "#;
        let config: Config = toml::from_str(partial).unwrap();
        assert_eq!(config.catalog.precision, PrecisionPolicy::Stripped);
        // Other fields should have defaults
        assert!(config.catalog.exclude.is_empty());
        assert_eq!(config.preview, PreviewSettings::default());
    }

    #[test]
    fn test_unknown_precision_is_a_parse_error() {
        let bad = r#"
            [catalog]
            precision = "highp"
        "#;
        assert!(toml::from_str::<Config>(bad).is_err());
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# slidefx Configuration"));
        assert!(written.contains("[catalog]"));
        assert!(written.contains("[preview]"));
    }

    #[test]
    fn test_load_or_create_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[preview]\nbloom_amount = 2.0\n").unwrap();

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.preview.bloom_amount, 2.0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[preview]\nbloom_amount = 2.0\n");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(..)));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[catalog\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn test_build_catalog_applies_settings() {
        let mut config = Config::default();
        config.catalog.exclude = vec!["flame".to_string(), "sparkle".to_string()];
        config.catalog.precision = PrecisionPolicy::Stripped;

        let catalog = config.build_catalog().unwrap();
        assert!(!catalog.contains("flame"));
        assert!(!catalog.contains("sparkle"));
        assert!(catalog.contains("iris"));
        for (_, desc) in catalog.iter() {
            assert!(!desc.fragment_program().contains("precision "));
        }
    }
}
