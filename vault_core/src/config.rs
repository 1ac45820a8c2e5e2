//! Configuration file support for Iron Vault.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/ironvault/config.toml`.

use crate::calc::{PlateCalculator, DEFAULT_BAR_KG, DEFAULT_PLATES_KG};
use crate::engine::GenerateOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub plates: PlatesConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Session playback timings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,

    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rest_seconds: default_rest_seconds(),
            advance_delay_ms: default_advance_delay_ms(),
        }
    }
}

impl SessionConfig {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

/// Playlist generation switches
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_cool_down")]
    pub cool_down: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            cool_down: default_cool_down(),
        }
    }
}

impl From<&GenerationConfig> for GenerateOptions {
    fn from(config: &GenerationConfig) -> Self {
        GenerateOptions {
            cool_down: config.cool_down,
        }
    }
}

/// Barbell and plate inventory used by the plate calculator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlatesConfig {
    #[serde(default = "default_bar_kg")]
    pub bar_kg: f64,

    #[serde(default = "default_denominations")]
    pub denominations: Vec<f64>,
}

impl Default for PlatesConfig {
    fn default() -> Self {
        Self {
            bar_kg: default_bar_kg(),
            denominations: default_denominations(),
        }
    }
}

impl PlatesConfig {
    /// Build a calculator from this section, rejecting unusable inventories
    pub fn calculator(&self) -> Result<PlateCalculator> {
        if !self.bar_kg.is_finite() || self.bar_kg < 0.0 {
            return Err(Error::Config(format!(
                "bar_kg must be a non-negative number, got {}",
                self.bar_kg
            )));
        }
        if self.denominations.is_empty() {
            return Err(Error::Config("plate denominations must not be empty".into()));
        }
        if let Some(bad) = self
            .denominations
            .iter()
            .find(|p| !p.is_finite() || **p <= 0.0)
        {
            return Err(Error::Config(format!(
                "plate denominations must be positive, got {}",
                bad
            )));
        }
        Ok(PlateCalculator::new(self.bar_kg, self.denominations.clone()))
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".local/share"),
        Err(_) => PathBuf::from("."),
    });
    base.join("ironvault")
}

fn default_rest_seconds() -> u32 {
    90
}

fn default_advance_delay_ms() -> u64 {
    500
}

fn default_cool_down() -> bool {
    true
}

fn default_bar_kg() -> f64 {
    DEFAULT_BAR_KG
}

fn default_denominations() -> Vec<f64> {
    DEFAULT_PLATES_KG.to_vec()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config"),
            Err(_) => PathBuf::from("."),
        });
        base.join("ironvault").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    ///
    /// The file is written to a temp file in the same directory and renamed
    /// over the target, so readers never observe a half-written config.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
