use crate::error::{Result, SplitError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory used when neither the command line nor config.toml names one
pub const DEFAULT_OUTPUT_DIR: &str = "IntuneBaselines";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub log_level: String,
}

/// Configuration manager
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "baseline-split", "baseline-split").ok_or_else(|| {
                SplitError::ConfigError("Failed to determine config directory".into())
            })?;

        Ok(Self::with_dir(project_dirs.config_dir()))
    }

    /// Use an explicit config directory instead of the per-user one
    pub fn with_dir(config_dir: impl AsRef<Path>) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Load main config
    pub fn load_config(&self) -> Result<Config> {
        let config_path = self.config_file();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save main config
    pub fn save_config(&self, config: &Config) -> Result<()> {
        // Create config directory if it doesn't exist
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)?;
        }

        let contents = toml::to_string_pretty(config)
            .map_err(|e| SplitError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        fs::write(self.config_file(), contents)?;
        Ok(())
    }

    /// Persist the default output directory
    pub fn set_output_dir(&self, dir: &Path) -> Result<()> {
        let mut config = self.load_config()?;
        config.output_dir = Some(dir.to_path_buf());
        self.save_config(&config)
    }

    /// Delete config.toml, falling back to built-in defaults
    pub fn reset(&self) -> Result<()> {
        let config_path = self.config_file();

        if config_path.exists() {
            fs::remove_file(config_path)?;
        }

        Ok(())
    }

    /// Resolve the output directory: command line, then config.toml, then the default
    pub fn resolve_output_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }

        let config = self.load_config()?;
        Ok(config
            .output_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)))
    }
}
