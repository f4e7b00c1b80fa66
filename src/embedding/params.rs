//! Hyperparameters for embedding training.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ChatVecError, Result};

/// Training objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Predict surrounding words from the centre word
    SkipGram,
    /// Predict the centre word from the averaged context
    Cbow,
}

impl Algorithm {
    /// Maps the conventional `sg` flag: 1 is skip-gram, 0 is CBOW
    pub fn from_sg(sg: u8) -> Result<Self> {
        match sg {
            1 => Ok(Self::SkipGram),
            0 => Ok(Self::Cbow),
            other => Err(ChatVecError::invalid_parameter(
                "sg",
                format!("must be 0 or 1, got {other}"),
            )),
        }
    }

    pub fn sg(&self) -> u8 {
        match self {
            Self::SkipGram => 1,
            Self::Cbow => 0,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkipGram => write!(f, "Skip-gram"),
            Self::Cbow => write!(f, "CBOW"),
        }
    }
}

/// Hyperparameters passed to an [`EmbeddingTrainer`](super::EmbeddingTrainer)
///
/// Only the first five are exposed on the command line; the rest keep the
/// conventional word2vec defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Dimensionality of the word vectors (default: 100)
    pub vector_size: usize,
    /// Maximum distance between the centre word and a context word (default: 5)
    pub window: usize,
    /// Words occurring fewer times are ignored (default: 1)
    pub min_count: usize,
    /// Worker threads used for training (default: 4)
    pub workers: usize,
    /// Training objective (default: skip-gram)
    pub algorithm: Algorithm,
    /// Passes over the corpus (default: 10)
    pub epochs: usize,
    /// Noise words drawn per positive example (default: 5)
    pub negative: usize,
    /// Exponent shaping the noise distribution (default: 0.75)
    pub ns_exponent: f64,
    /// Initial learning rate (default: 0.025)
    pub alpha: f32,
    /// Final learning rate after linear decay (default: 0.0001)
    pub min_alpha: f32,
    /// Downsampling threshold for frequent words; 0 disables (default: 1e-3)
    pub sample: f64,
    /// Seed for weight initialization and sampling (default: 1)
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            vector_size: 100,
            window: 5,
            min_count: 1,
            workers: 4,
            algorithm: Algorithm::SkipGram,
            epochs: 10,
            negative: 5,
            ns_exponent: 0.75,
            alpha: 0.025,
            min_alpha: 0.0001,
            sample: 1e-3,
            seed: 1,
        }
    }
}

impl TrainingParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vector_size(mut self, vector_size: usize) -> Self {
        self.vector_size = vector_size;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects values no trainer can work with
    pub fn validate(&self) -> Result<()> {
        if self.vector_size == 0 {
            return Err(ChatVecError::invalid_parameter("vector_size", "must be at least 1"));
        }
        if self.window == 0 {
            return Err(ChatVecError::invalid_parameter("window", "must be at least 1"));
        }
        if self.workers == 0 {
            return Err(ChatVecError::invalid_parameter("workers", "must be at least 1"));
        }
        if self.epochs == 0 {
            return Err(ChatVecError::invalid_parameter("epochs", "must be at least 1"));
        }
        let rates_ok = self.alpha > 0.0 && self.min_alpha >= 0.0 && self.min_alpha <= self.alpha;
        if !rates_ok {
            return Err(ChatVecError::invalid_parameter(
                "alpha",
                "learning rates must satisfy 0 <= min_alpha <= alpha, alpha > 0",
            ));
        }
        let sample_ok = self.sample >= 0.0;
        if !sample_ok {
            return Err(ChatVecError::invalid_parameter("sample", "must not be negative"));
        }
        if !self.ns_exponent.is_finite() {
            return Err(ChatVecError::invalid_parameter("ns_exponent", "must be finite"));
        }
        Ok(())
    }
}
