use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::time::Instant;

use crate::error::Result;
use crate::models::{Sentence, TrainingRecord};
use crate::services::tokenizer::tokenize;
use crate::utils::text::truncate_chars;

/// Characters of each answer kept before tokenizing
pub const DEFAULT_ANSWER_CHAR_LIMIT: usize = 500;

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub answer_char_limit: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            answer_char_limit: DEFAULT_ANSWER_CHAR_LIMIT,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub records_read: usize,
    pub sentences_written: usize,
    pub convert_duration_ms: u64,
}

/// Turns training records into tokenized sentences for embedding training
#[derive(Debug, Clone, Default)]
pub struct ConvertService {
    options: ConvertOptions,
}

impl ConvertService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Sentences for one record: question, truncated answer, then each tag
    ///
    /// Fields that tokenize to nothing contribute no sentence.
    pub fn record_sentences(&self, record: &TrainingRecord) -> Vec<Sentence> {
        let answer = truncate_chars(&record.answer, self.options.answer_char_limit);

        std::iter::once(record.question.as_str())
            .chain(std::iter::once(answer))
            .chain(record.tags.iter().map(String::as_str))
            .map(tokenize)
            .filter(|sentence| !sentence.is_empty())
            .collect()
    }

    pub fn convert_records(&self, records: &[TrainingRecord]) -> Vec<Sentence> {
        records
            .iter()
            .flat_map(|record| self.record_sentences(record))
            .collect()
    }

    /// Reads a JSON array of training records
    pub async fn read_records(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes sentences as a pretty-printed JSON array of string arrays
    pub async fn write_sentences(path: impl AsRef<Path>, sentences: &[Sentence]) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(sentences)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Converts a records file into a sentences file
    pub async fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ConvertResponse> {
        let start_time = Instant::now();

        let records = Self::read_records(input.as_ref()).await?;
        tracing::info!(
            path = %input.as_ref().display(),
            records = records.len(),
            "Read training records"
        );

        let sentences = self.convert_records(&records);
        Self::write_sentences(output.as_ref(), &sentences).await?;

        Ok(ConvertResponse {
            records_read: records.len(),
            sentences_written: sentences.len(),
            convert_duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}
