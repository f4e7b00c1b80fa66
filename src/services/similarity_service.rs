use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::embedding::{cosine_similarity, EmbeddingModel};
use crate::models::TrainingRecord;
use crate::services::tokenizer::tokenize;

/// Embedding matches must score strictly above this
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Score reported for keyword matches
pub const KEYWORD_MATCH_SCORE: f32 = 0.5;

pub const DEFAULT_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Embedding,
    Keyword,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarMatch {
    pub record: TrainingRecord,
    pub similarity: f32,
    pub method: MatchMethod,
}

/// Finds training records that resemble a user message
///
/// Scores active records by cosine similarity of mean question vectors when a
/// model is available, and falls back to keyword matching when the model is
/// missing or nothing clears the threshold.
pub struct SimilarityService {
    model: Option<EmbeddingModel>,
    threshold: f32,
}

impl SimilarityService {
    pub fn new(model: Option<EmbeddingModel>) -> Self {
        Self {
            model,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn find_similar(
        &self,
        message: &str,
        records: &[TrainingRecord],
        limit: usize,
    ) -> Vec<SimilarMatch> {
        if let Some(model) = &self.model {
            let matches = self.embedding_matches(model, message, records, limit);
            if !matches.is_empty() {
                return matches;
            }
            tracing::debug!("No embedding match above threshold, using keywords");
        }

        keyword_matches(message, records, limit)
    }

    fn embedding_matches(
        &self,
        model: &EmbeddingModel,
        message: &str,
        records: &[TrainingRecord],
        limit: usize,
    ) -> Vec<SimilarMatch> {
        let message_vector = model.sentence_vector(&tokenize(message));

        let mut scored: Vec<SimilarMatch> = records
            .iter()
            .filter(|record| record.is_active())
            .filter_map(|record| {
                let tokens = tokenize(&record.question);
                if tokens.is_empty() {
                    return None;
                }
                let question_vector = model.sentence_vector(&tokens);
                Some(SimilarMatch {
                    record: record.clone(),
                    similarity: cosine_similarity(&message_vector, &question_vector),
                    method: MatchMethod::Embedding,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        scored
            .into_iter()
            .take(limit.saturating_mul(2))
            .filter(|m| m.similarity > self.threshold)
            .take(limit)
            .collect()
    }
}

/// Literal fallback search over active records
///
/// A record matches when its question or answer contains the whole message,
/// or when one of its tags exactly equals a lowercased message word longer
/// than two characters. Tags are compared as stored.
/// Results are ordered by priority, then usage count, both descending.
pub fn keyword_matches(
    message: &str,
    records: &[TrainingRecord],
    limit: usize,
) -> Vec<SimilarMatch> {
    let needle = message.to_lowercase();
    let keywords: Vec<&str> = needle
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .collect();

    let mut matched: Vec<&TrainingRecord> = records
        .iter()
        .filter(|record| record.is_active())
        .filter(|record| {
            record.question.to_lowercase().contains(&needle)
                || record.answer.to_lowercase().contains(&needle)
                || record
                    .tags
                    .iter()
                    .any(|tag| keywords.contains(&tag.as_str()))
        })
        .collect();

    matched.sort_by(|a, b| {
        b.priority()
            .total_cmp(&a.priority())
            .then_with(|| b.usage_count().cmp(&a.usage_count()))
    });

    matched
        .into_iter()
        .take(limit)
        .map(|record| SimilarMatch {
            record: record.clone(),
            similarity: KEYWORD_MATCH_SCORE,
            method: MatchMethod::Keyword,
        })
        .collect()
}
