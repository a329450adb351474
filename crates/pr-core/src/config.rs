//! Configuration management for prompt-reviewer

use crate::error::{ReviewError, Result};
use crate::export::DEFAULT_ARCHIVE_NAME;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bucket store settings
    pub store: StoreConfig,
    /// Export settings
    pub export: ExportConfig,
    /// UI settings
    pub ui: UiConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Invalid configuration {}", path.display())))
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values that the type system cannot
    pub fn validate(&self) -> Result<()> {
        if self.export.file_name.trim().is_empty() {
            return Err(ReviewError::Config(
                "export.file_name must not be empty".to_string(),
            ));
        }
        if self.export.default_format.trim().is_empty() {
            return Err(ReviewError::Config(
                "export.default_format must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// How bucket stores are separated between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreNamespace {
    /// Fixed file names directly in the output directory
    #[default]
    Shared,
    /// One subdirectory per input file
    Input,
    /// One subdirectory per session
    Session,
}

impl fmt::Display for StoreNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreNamespace::Shared => "shared",
            StoreNamespace::Input => "input",
            StoreNamespace::Session => "session",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for StoreNamespace {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "shared" => Ok(StoreNamespace::Shared),
            "input" => Ok(StoreNamespace::Input),
            "session" => Ok(StoreNamespace::Session),
            _ => Err(ReviewError::Config(format!("Unknown store namespace: {}", s))),
        }
    }
}

/// Bucket store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory the bucket files are written to
    pub output_dir: PathBuf,
    /// Namespacing policy
    pub namespace: StoreNamespace,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            namespace: StoreNamespace::Shared,
        }
    }
}

/// Export-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// File name of the export, relative to the output directory
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "zip".to_string(),
            file_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}

/// UI-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Syntax theme for the raw record view
    pub theme: String,
    /// Start with the raw record view open
    pub show_raw_record: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            show_raw_record: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.output_dir, PathBuf::from("."));
        assert_eq!(config.store.namespace, StoreNamespace::Shared);
        assert_eq!(config.export.default_format, "zip");
        assert_eq!(config.export.file_name, "prompt_reviews.zip");
        assert!(!config.ui.show_raw_record);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("[store]"));
        assert!(toml.contains("[export]"));
        assert!(toml.contains("namespace = \"shared\""));

        let config2 = Config::from_toml_str(&toml).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml_str("[store]\nnamespace = \"input\"\n").unwrap();
        assert_eq!(config.store.namespace, StoreNamespace::Input);
        assert_eq!(config.store.output_dir, PathBuf::from("."));
        assert_eq!(config.export.default_format, "zip");
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml_str("[store]\nnamespace = \"global\"\n").is_err());
        assert!(Config::from_toml_str("[export]\nfile_name = \"\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[export]\ndefault_format = \"json\"\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.export.default_format, "json");
    }

    #[test]
    fn test_namespace_parse() {
        assert_eq!("Session".parse::<StoreNamespace>().unwrap(), StoreNamespace::Session);
        assert!("other".parse::<StoreNamespace>().is_err());
        assert_eq!(StoreNamespace::Input.to_string(), "input");
    }
}
