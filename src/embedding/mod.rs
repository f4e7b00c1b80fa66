//! Word embedding training and lookup.
//!
//! Training sits behind [`EmbeddingTrainer`] so the CLI and services never
//! depend on a particular algorithm; [`Word2VecTrainer`] is the bundled
//! implementation.

mod model;
mod params;
mod trainer;
mod vocab;

pub use model::{cosine_similarity, EmbeddingModel, ModelMetadata, FORMAT_VERSION};
pub use params::{Algorithm, TrainingParams};
pub use trainer::Word2VecTrainer;
pub use vocab::{VocabWord, Vocabulary};

use crate::error::Result;
use crate::models::Sentence;

/// Learns an embedding model from tokenized sentences
pub trait EmbeddingTrainer {
    fn train(&self, sentences: &[Sentence], params: &TrainingParams) -> Result<EmbeddingModel>;
}
