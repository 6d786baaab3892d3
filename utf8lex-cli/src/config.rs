//! Configuration module for the utf8lex CLI.
//!
//! This module handles loading, saving, and managing configuration
//! settings for the utf8lex application.

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "utf8lex.toml";

/// Application configuration structure.
///
/// This struct represents the complete configuration for the utf8lex CLI,
/// including global settings and subcommand-specific options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Default directory that `generate` writes driver source files into.
    #[serde(default = "default_generated_dir")]
    pub generated_dir: String,

    /// Default directory `generate` looks for `prologue.tmpl`/`epilogue.tmpl` in.
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// Generate-specific configuration.
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Check-specific configuration.
    #[serde(default)]
    pub check: CheckConfig,
}

/// Generate-specific configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateConfig {
    /// Base name used for the generated driver file (`<name>.rs`).
    #[serde(default = "default_generated_name")]
    pub name: String,
}

/// Check-specific configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckConfig {
    /// Whether to print every unit (byte/char/grapheme/line) of each
    /// token's location, or just the byte range.
    #[serde(default)]
    pub show_all_units: bool,
}

fn default_generated_dir() -> String {
    "generated".to_string()
}

fn default_template_dir() -> String {
    "templates".to_string()
}

fn default_generated_name() -> String {
    "lexer".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            generated_dir: default_generated_dir(),
            template_dir: default_template_dir(),
            generate: GenerateConfig::default(),
            check: CheckConfig::default(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self { name: default_generated_name() }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { show_all_units: false }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. User's home directory
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        match config_path {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse configuration: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CliError::Config(format!("Failed to serialize configuration: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check for config in current directory.
    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Check for config in home directory.
    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("utf8lex").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Check for config in system config directory.
    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("utf8lex").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Find the configuration file in standard locations.
    fn find_config_file() -> Result<Option<PathBuf>> {
        Ok(Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config() -> Config {
        Config {
            verbose: true,
            generated_dir: "/tmp/generated".to_string(),
            template_dir: "/tmp/templates".to_string(),
            generate: GenerateConfig { name: "arith".to_string() },
            check: CheckConfig { show_all_units: true },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.verbose);
        assert_eq!(config.generated_dir, "generated");
        assert_eq!(config.generate.name, "lexer");
        assert!(!config.check.show_all_units);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let original_config = create_test_config();
        original_config.save_to_path(&config_path).unwrap();

        let loaded_config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_load_from_nonexistent_path() {
        let result = Config::load_from_path(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }
}
