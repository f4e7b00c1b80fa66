//! Vocabulary construction and sampling tables.

use std::collections::HashMap;

use crate::models::Sentence;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabWord {
    pub word: String,
    pub count: u64,
}

/// Words that reached `min_count`, most frequent first
///
/// Ties keep the order of first appearance in the corpus.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<VocabWord>,
    index: HashMap<String, usize>,
    total_count: u64,
}

impl Vocabulary {
    pub fn build(sentences: &[Sentence], min_count: usize) -> Self {
        let mut first_seen: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, u64> = HashMap::new();

        for token in sentences.iter().flatten() {
            let count = counts.entry(token.as_str()).or_insert_with(|| {
                first_seen.push(token.as_str());
                0
            });
            *count += 1;
        }

        let mut words: Vec<VocabWord> = first_seen
            .into_iter()
            .filter_map(|word| {
                let count = counts[word];
                (count >= min_count as u64).then(|| VocabWord {
                    word: word.to_string(),
                    count,
                })
            })
            .collect();

        // stable: equal counts keep first-appearance order
        words.sort_by(|a, b| b.count.cmp(&a.count));

        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.word.clone(), i))
            .collect();
        let total_count = words.iter().map(|w| w.count).sum();

        Self {
            words,
            index,
            total_count,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[VocabWord] {
        &self.words
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Occurrences of all retained words
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Maps sentences to vocabulary indices, dropping unknown tokens and
    /// sentences left empty
    pub fn encode(&self, sentences: &[Sentence]) -> Vec<Vec<usize>> {
        sentences
            .iter()
            .map(|sentence| {
                sentence
                    .iter()
                    .filter_map(|token| self.index_of(token))
                    .collect::<Vec<_>>()
            })
            .filter(|encoded| !encoded.is_empty())
            .collect()
    }

    /// Probability of keeping each occurrence of a word when downsampling
    ///
    /// Words rarer than `sample` of the corpus are always kept. A `sample`
    /// of zero disables downsampling.
    pub fn keep_probabilities(&self, sample: f64) -> Vec<f32> {
        if sample <= 0.0 || self.total_count == 0 {
            return vec![1.0; self.words.len()];
        }

        let threshold = sample * self.total_count as f64;
        self.words
            .iter()
            .map(|w| {
                let count = w.count as f64;
                let p = ((count / threshold).sqrt() + 1.0) * threshold / count;
                p.min(1.0) as f32
            })
            .collect()
    }

    /// Cumulative noise distribution over `count^exponent`, normalized to 1
    pub fn noise_distribution(&self, exponent: f64) -> Vec<f64> {
        let weights: Vec<f64> = self
            .words
            .iter()
            .map(|w| (w.count as f64).powf(exponent))
            .collect();
        let total: f64 = weights.iter().sum();

        let mut running = 0.0;
        weights
            .into_iter()
            .map(|weight| {
                running += weight;
                running / total
            })
            .collect()
    }
}
