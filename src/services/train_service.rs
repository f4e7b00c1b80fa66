use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::Instant;

use crate::embedding::{EmbeddingModel, EmbeddingTrainer, TrainingParams};
use crate::error::{ChatVecError, Result};
use crate::models::Sentence;

/// Vocabulary words echoed after training
pub const SAMPLE_WORD_COUNT: usize = 10;

#[derive(Debug, Clone)]
pub struct TrainRequest {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    pub params: TrainingParams,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResponse {
    pub sentences_read: usize,
    pub vocab_size: usize,
    pub vector_size: usize,
    /// Most frequent vocabulary words
    pub sample_words: Vec<String>,
    pub train_duration_ms: u64,
}

/// Trains and persists embedding models from sentence files
pub struct TrainService<T> {
    trainer: Arc<T>,
}

impl<T> TrainService<T>
where
    T: EmbeddingTrainer + Send + Sync + 'static,
{
    pub fn new(trainer: T) -> Self {
        Self {
            trainer: Arc::new(trainer),
        }
    }

    /// Reads a JSON array of tokenized sentences
    pub async fn read_sentences(path: impl AsRef<Path>) -> Result<Vec<Sentence>> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Trains on `sentences` and saves the model to `output_path`
    ///
    /// Nothing is written unless training succeeds.
    pub async fn train_sentences(
        &self,
        sentences: Vec<Sentence>,
        params: TrainingParams,
        output_path: &Path,
    ) -> Result<TrainResponse> {
        let start_time = Instant::now();

        if sentences.is_empty() {
            return Err(ChatVecError::empty_dataset("no sentences to train on"));
        }
        params.validate()?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let sentences_read = sentences.len();
        let trainer = Arc::clone(&self.trainer);
        let model_path = output_path.to_path_buf();
        let model: EmbeddingModel = tokio::task::spawn_blocking(move || {
            let model = trainer.train(&sentences, &params)?;
            model.save(&model_path)?;
            Ok::<_, ChatVecError>(model)
        })
        .await??;

        tracing::info!(
            path = %output_path.display(),
            vocab_size = model.len(),
            vector_size = model.vector_size(),
            "Saved model"
        );

        Ok(TrainResponse {
            sentences_read,
            vocab_size: model.len(),
            vector_size: model.vector_size(),
            sample_words: model
                .words()
                .take(SAMPLE_WORD_COUNT)
                .map(str::to_string)
                .collect(),
            train_duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Reads the sentence file and trains on it
    pub async fn train_file(&self, request: TrainRequest) -> Result<TrainResponse> {
        let sentences = Self::read_sentences(&request.data_path).await?;
        tracing::info!(
            path = %request.data_path.display(),
            sentences = sentences.len(),
            "Read sentences"
        );

        self.train_sentences(sentences, request.params, &request.output_path)
            .await
    }
}
