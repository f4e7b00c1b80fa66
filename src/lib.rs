pub mod cli;
pub mod config;
pub mod embedding;
pub mod models;
pub mod services;
pub mod terminal;
pub mod utils;

pub mod env;
pub mod error;
pub mod logging;

pub use embedding::{EmbeddingModel, EmbeddingTrainer, TrainingParams, Word2VecTrainer};
pub use error::{ChatVecError, Result};
pub use logging::{init_logging, LoggingConfig};
