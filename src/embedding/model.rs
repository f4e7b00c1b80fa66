//! Trained word embeddings and their on-disk format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::params::TrainingParams;
use super::vocab::Vocabulary;
use crate::error::{ChatVecError, Result};

/// Leading bytes of every model file
const MAGIC: [u8; 8] = *b"CHATVEC\0";

/// Bumped whenever the serialized layout changes
pub const FORMAT_VERSION: u32 = 1;

/// How a model was produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub trained_at: Option<DateTime<Utc>>,
    pub params: Option<TrainingParams>,
    /// Token occurrences in the training corpus that were in vocabulary
    pub corpus_words: u64,
}

/// Mapping from token to a fixed-length vector
///
/// Words are stored most frequent first; `vectors` is row-major with one
/// row of `vector_size` values per word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModel {
    magic: [u8; 8],
    format_version: u32,
    vector_size: usize,
    words: Vec<String>,
    counts: Vec<u64>,
    vectors: Vec<f32>,
    metadata: ModelMetadata,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl EmbeddingModel {
    /// Builds a model from explicit vectors
    ///
    /// Every vector must have `vector_size` elements. A repeated word keeps
    /// its last vector.
    pub fn from_vectors<I, S>(vector_size: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        if vector_size == 0 {
            return Err(ChatVecError::invalid_parameter(
                "vector_size",
                "must be at least 1",
            ));
        }

        let mut words: Vec<String> = Vec::new();
        let mut vectors: Vec<f32> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (word, vector) in entries {
            if vector.len() != vector_size {
                return Err(ChatVecError::DimensionMismatch {
                    expected: vector_size,
                    actual: vector.len(),
                });
            }

            let word = word.into();
            match index.get(&word) {
                Some(&row) => {
                    vectors[row * vector_size..(row + 1) * vector_size].copy_from_slice(&vector);
                }
                None => {
                    index.insert(word.clone(), words.len());
                    words.push(word);
                    vectors.extend_from_slice(&vector);
                }
            }
        }

        let counts = vec![1; words.len()];
        Ok(Self {
            magic: MAGIC,
            format_version: FORMAT_VERSION,
            vector_size,
            words,
            counts,
            vectors,
            metadata: ModelMetadata::default(),
            index,
        })
    }

    /// Wraps trained input vectors; `vectors` rows follow vocabulary order
    pub(crate) fn from_training(
        vocab: &Vocabulary,
        vector_size: usize,
        vectors: Vec<f32>,
        metadata: ModelMetadata,
    ) -> Self {
        debug_assert_eq!(vectors.len(), vocab.len() * vector_size);

        let words: Vec<String> = vocab.words().iter().map(|w| w.word.clone()).collect();
        let counts = vocab.words().iter().map(|w| w.count).collect();
        let index = build_index(&words);

        Self {
            magic: MAGIC,
            format_version: FORMAT_VERSION,
            vector_size,
            words,
            counts,
            vectors,
            metadata,
            index,
        }
    }

    pub fn vector_size(&self) -> usize {
        self.vector_size
    }

    /// Vocabulary size
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&row| self.row(row))
    }

    /// Training-corpus frequency of a word
    pub fn count(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&row| self.counts[row])
    }

    /// Vocabulary, most frequent first
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn row(&self, row: usize) -> &[f32] {
        &self.vectors[row * self.vector_size..(row + 1) * self.vector_size]
    }

    /// Element-wise mean of the vectors of the known tokens
    ///
    /// Unknown tokens are ignored; if none is known the result is a zero
    /// vector. The result always has `vector_size` elements.
    pub fn sentence_vector<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<f32> {
        let mut sum = vec![0.0f32; self.vector_size];
        let mut known = 0usize;

        for token in tokens {
            if let Some(vector) = self.get(token.as_ref()) {
                for (acc, value) in sum.iter_mut().zip(vector) {
                    *acc += value;
                }
                known += 1;
            }
        }

        if known > 0 {
            let n = known as f32;
            for value in &mut sum {
                *value /= n;
            }
        }

        sum
    }

    /// Writes the model to `path`
    ///
    /// The model is fully encoded before the file is created, so an encoding
    /// failure never leaves a partial file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = bincode::serialize(self)?;
        fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !bytes.starts_with(&MAGIC) {
            return Err(ChatVecError::invalid_model("not a chatvec model file"));
        }

        let mut model: EmbeddingModel = bincode::deserialize(bytes)?;

        if model.format_version != FORMAT_VERSION {
            return Err(ChatVecError::invalid_model(format!(
                "unsupported format version {} (expected {})",
                model.format_version, FORMAT_VERSION
            )));
        }
        if model.vector_size == 0
            || model.vectors.len() != model.words.len() * model.vector_size
            || model.counts.len() != model.words.len()
        {
            return Err(ChatVecError::invalid_model(
                "vector table does not match vocabulary",
            ));
        }

        model.index = build_index(&model.words);
        Ok(model)
    }
}

fn build_index(words: &[String]) -> HashMap<String, usize> {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| (word.clone(), i))
        .collect()
}

/// Cosine similarity between two vectors
///
/// Returns 0.0 when lengths differ or either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
