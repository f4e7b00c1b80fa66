use serde_json::Value;
use std::path::Path;

use crate::embedding::EmbeddingModel;
use crate::error::{ChatVecError, Result};

/// Answers sentence-vector queries against a loaded model
pub struct QueryService {
    model: EmbeddingModel,
}

impl QueryService {
    pub fn new(model: EmbeddingModel) -> Self {
        Self { model }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model = EmbeddingModel::load(path)?;
        tracing::debug!(
            path = %path.display(),
            vocab_size = model.len(),
            vector_size = model.vector_size(),
            "Loaded model"
        );
        Ok(Self::new(model))
    }

    pub fn model(&self) -> &EmbeddingModel {
        &self.model
    }

    /// Parses a JSON array of words
    ///
    /// Elements that are not strings are skipped.
    pub fn parse_words(raw: &str) -> Result<Vec<String>> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(word) => Some(word),
                    _ => None,
                })
                .collect()),
            _ => Err(ChatVecError::invalid_argument(
                "words must be a JSON array of strings",
            )),
        }
    }

    /// Mean vector of the known words, zeros when none is known
    pub fn sentence_vector<S: AsRef<str>>(&self, words: &[S]) -> Vec<f32> {
        self.model.sentence_vector(words)
    }

    /// Parses `raw` and renders the resulting vector as a JSON array
    pub fn query_json(&self, raw: &str) -> Result<String> {
        let words = Self::parse_words(raw)?;
        let vector = self.sentence_vector(&words);
        Ok(serde_json::to_string(&vector)?)
    }
}
