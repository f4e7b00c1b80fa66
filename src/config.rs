//! Configuration file management for chatvec
//!
//! Values are read from ~/.chatvec/config.toml (or the file named by
//! CHATVEC_CONFIG). Every value is optional: command-line flags take priority,
//! then the config file, then the built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::paths as env_paths;

/// Default directory for data files and models, relative to the working directory
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Raw training records exported from the chatbot database
pub const TRAINING_DATA_FILE: &str = "training_data.json";

/// Tokenized sentences produced by `convert`
pub const SENTENCES_FILE: &str = "training_data_word2vec.json";

/// Trained embedding model produced by `train`
pub const MODEL_FILE: &str = "word2vec.model";

/// Configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub train: TrainConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConvertConfig {
    /// Characters of each answer kept before tokenizing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_char_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrainConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sg: Option<u8>,
}

impl Config {
    /// Get the config file path (CHATVEC_CONFIG, else ~/.chatvec/config.toml)
    pub fn get_config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(env_paths::CONFIG_FILE) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let home_dir = dirs::home_dir().context("Could not find home directory")?;
        Ok(home_dir.join(".chatvec").join("config.toml"))
    }

    /// Load configuration from the default location
    /// Returns default config if the file doesn't exist
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "Loaded config file");

        Ok(config)
    }

    /// Directory for data files and models
    ///
    /// Priority: CHATVEC_MODELS_DIR > config file > `models`
    pub fn models_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(env_paths::MODELS_DIR) {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }

        self.paths
            .models_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODELS_DIR))
    }

    pub fn default_training_data_path(&self) -> PathBuf {
        self.models_dir().join(TRAINING_DATA_FILE)
    }

    pub fn default_sentences_path(&self) -> PathBuf {
        self.models_dir().join(SENTENCES_FILE)
    }

    pub fn default_model_path(&self) -> PathBuf {
        self.models_dir().join(MODEL_FILE)
    }
}
