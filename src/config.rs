//! Configuration file model.
//!
//! Every section is optional; missing values fall back to defaults that
//! reproduce the reference behaviour (SHA-256, 1 MiB rekey threshold).

use crate::accumulator::PoolConfig;
use crate::generator::{GeneratorConfig, DEFAULT_REKEY_THRESHOLD};
use crate::primitives::HashAlgorithm;
use crate::storage::DEFAULT_SEED_PATH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// `[generator] rekey_threshold` is zero.
    #[error("rekey threshold must be greater than zero")]
    InvalidRekeyThreshold,
    /// `[accumulator] max_pool_bytes` is zero.
    #[error("pool size cap must be greater than zero")]
    InvalidPoolSize,
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FortunaConfig {
    /// `[storage]` section.
    #[serde(default)]
    pub storage: StorageConfig,
    /// `[accumulator]` section.
    #[serde(default)]
    pub accumulator: AccumulatorConfig,
    /// `[generator]` section.
    #[serde(default)]
    pub generator: GeneratorSection,
    /// `[metrics]` section.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Seed persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the seed file.
    pub seed_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
        }
    }
}

/// Entropy accumulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulatorConfig {
    /// Per-pool size cap in bytes.
    pub max_pool_bytes: usize,
    /// Hash used for reseeding and rekeying.
    pub hash: HashAlgorithm,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            max_pool_bytes: PoolConfig::default().max_bytes,
            hash: HashAlgorithm::default(),
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// Bytes of output per key before rekeying.
    pub rekey_threshold: u64,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            rekey_threshold: DEFAULT_REKEY_THRESHOLD,
        }
    }
}

/// Metrics exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricsConfig {
    /// Metrics server port (0 to disable).
    pub port: u16,
}

impl FortunaConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FortunaConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.rekey_threshold == 0 {
            return Err(ConfigError::InvalidRekeyThreshold);
        }
        if self.accumulator.max_pool_bytes == 0 {
            return Err(ConfigError::InvalidPoolSize);
        }
        Ok(())
    }

    /// Returns the pool configuration section.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_bytes: self.accumulator.max_pool_bytes,
        }
    }

    /// Returns the generator configuration section.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            rekey_threshold: self.generator.rekey_threshold,
        }
    }
}
