//! Word2vec training with negative sampling.
//!
//! Each epoch the encoded corpus is split into one shard per worker. Every
//! worker trains a private copy of the weights on its shard and the
//! per-shard changes are summed back into the shared weights once all
//! shards finish. With a single worker this is plain sequential SGD.

use chrono::Utc;
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::model::{EmbeddingModel, ModelMetadata};
use super::params::{Algorithm, TrainingParams};
use super::vocab::Vocabulary;
use super::EmbeddingTrainer;
use crate::error::{ChatVecError, Result};
use crate::models::Sentence;

/// Dot products beyond this magnitude saturate the sigmoid
const MAX_EXP: f32 = 6.0;

/// Skip-gram / CBOW trainer
#[derive(Clone, Default)]
pub struct Word2VecTrainer {
    progress: Option<ProgressBar>,
}

impl Word2VecTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report finished epochs on `bar`
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }
}

impl EmbeddingTrainer for Word2VecTrainer {
    fn train(&self, sentences: &[Sentence], params: &TrainingParams) -> Result<EmbeddingModel> {
        params.validate()?;

        if sentences.is_empty() {
            return Err(ChatVecError::empty_dataset("no sentences to train on"));
        }

        let vocab = Vocabulary::build(sentences, params.min_count);
        if vocab.is_empty() {
            return Err(ChatVecError::empty_dataset(format!(
                "no token occurs at least {} time(s)",
                params.min_count
            )));
        }

        let corpus = vocab.encode(sentences);
        let dim = params.vector_size;
        let keep = vocab.keep_probabilities(params.sample);
        let noise = vocab.noise_distribution(params.ns_exponent);
        let ctx = TrainContext {
            params,
            dim,
            keep: &keep,
            noise: &noise,
        };

        tracing::info!(
            vocab_size = vocab.len(),
            sentences = corpus.len(),
            corpus_words = vocab.total_count(),
            algorithm = %params.algorithm,
            "Starting training"
        );

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut weights = Weights::initialize(vocab.len(), dim, &mut rng)?;

        let chunk_size = corpus.len().div_ceil(params.workers).max(1);
        let shards: Vec<&[Vec<usize>]> = corpus.chunks(chunk_size).collect();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.workers)
            .build()?;

        if let Some(bar) = &self.progress {
            bar.set_length(params.epochs as u64);
        }

        for epoch in 0..params.epochs {
            let shard_results: Vec<Weights> = pool.install(|| {
                shards
                    .par_iter()
                    .enumerate()
                    .map(|(shard_idx, shard)| {
                        let seed = params
                            .seed
                            .wrapping_add((epoch * shards.len() + shard_idx) as u64 + 1);
                        let mut shard_rng = StdRng::seed_from_u64(seed);
                        let mut local = weights.try_clone()?;
                        train_shard(&mut local, shard, &ctx, epoch, &mut shard_rng);
                        Ok(local)
                    })
                    .collect::<Result<Vec<_>>>()
            })?;

            weights = weights.merge(shard_results)?;

            tracing::debug!(epoch = epoch + 1, epochs = params.epochs, "Epoch finished");
            if let Some(bar) = &self.progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = &self.progress {
            bar.finish_and_clear();
        }

        let metadata = ModelMetadata {
            trained_at: Some(Utc::now()),
            params: Some(params.clone()),
            corpus_words: vocab.total_count(),
        };

        Ok(EmbeddingModel::from_training(
            &vocab,
            dim,
            weights.input,
            metadata,
        ))
    }
}

struct TrainContext<'a> {
    params: &'a TrainingParams,
    dim: usize,
    keep: &'a [f32],
    noise: &'a [f64],
}

/// Input (word) and output (context) matrices, row-major
struct Weights {
    input: Vec<f32>,
    output: Vec<f32>,
}

impl Weights {
    /// Fails instead of aborting when the tables cannot be allocated
    fn initialize(vocab_size: usize, dim: usize, rng: &mut StdRng) -> Result<Self> {
        let len = vocab_size.checked_mul(dim).ok_or_else(|| {
            ChatVecError::invalid_parameter(
                "vector_size",
                format!("{dim} dimensions for {vocab_size} words overflows the weight table"),
            )
        })?;

        let mut input = reserve_table(len)?;
        input.extend((0..len).map(|_| (rng.random::<f32>() - 0.5) / dim as f32));

        let mut output = reserve_table(len)?;
        output.resize(len, 0.0);

        Ok(Self { input, output })
    }

    fn try_clone(&self) -> Result<Self> {
        let mut input = reserve_table(self.input.len())?;
        input.extend_from_slice(&self.input);
        let mut output = reserve_table(self.output.len())?;
        output.extend_from_slice(&self.output);
        Ok(Self { input, output })
    }

    /// Adds every shard's change relative to `self`
    fn merge(self, mut shards: Vec<Weights>) -> Result<Weights> {
        if shards.len() == 1 {
            return Ok(shards.remove(0));
        }

        let mut merged = self.try_clone()?;
        for shard in &shards {
            accumulate_delta(&mut merged.input, &shard.input, &self.input);
            accumulate_delta(&mut merged.output, &shard.output, &self.output);
        }
        Ok(merged)
    }
}

fn reserve_table(len: usize) -> Result<Vec<f32>> {
    let mut table = Vec::new();
    table.try_reserve_exact(len).map_err(|e| {
        ChatVecError::invalid_parameter(
            "vector_size",
            format!("cannot allocate a weight table of {len} values: {e}"),
        )
    })?;
    Ok(table)
}

fn accumulate_delta(target: &mut [f32], updated: &[f32], base: &[f32]) {
    for ((t, u), b) in target.iter_mut().zip(updated).zip(base) {
        *t += u - b;
    }
}

/// Scratch space reused across a shard
struct Buffers {
    neu1: Vec<f32>,
    neu1e: Vec<f32>,
    context: Vec<usize>,
    kept: Vec<usize>,
}

impl Buffers {
    fn new(dim: usize) -> Self {
        Self {
            neu1: vec![0.0; dim],
            neu1e: vec![0.0; dim],
            context: Vec::new(),
            kept: Vec::new(),
        }
    }
}

fn train_shard(
    weights: &mut Weights,
    shard: &[Vec<usize>],
    ctx: &TrainContext<'_>,
    epoch: usize,
    rng: &mut StdRng,
) {
    let params = ctx.params;
    let shard_words = shard.iter().map(Vec::len).sum::<usize>().max(1);
    let mut words_done = 0usize;
    let mut buffers = Buffers::new(ctx.dim);

    for sentence in shard {
        // linear decay over the whole run
        let progress =
            (epoch as f64 + words_done as f64 / shard_words as f64) / params.epochs as f64;
        let alpha = (params.alpha - (params.alpha - params.min_alpha) * progress as f32)
            .max(params.min_alpha);

        buffers.kept.clear();
        for &word in sentence {
            if ctx.keep[word] >= rng.random::<f32>() {
                buffers.kept.push(word);
            }
        }

        match params.algorithm {
            Algorithm::SkipGram => train_sentence_sg(weights, &mut buffers, ctx, alpha, rng),
            Algorithm::Cbow => train_sentence_cbow(weights, &mut buffers, ctx, alpha, rng),
        }

        words_done += sentence.len();
    }
}

/// Context window bounds around `pos`, shrunk by a random amount
fn window_bounds(pos: usize, len: usize, window: usize, rng: &mut StdRng) -> (usize, usize) {
    let span = window - rng.random_range(0..window);
    (pos.saturating_sub(span), (pos + span + 1).min(len))
}

fn train_sentence_sg(
    weights: &mut Weights,
    buffers: &mut Buffers,
    ctx: &TrainContext<'_>,
    alpha: f32,
    rng: &mut StdRng,
) {
    let dim = ctx.dim;
    let kept = &buffers.kept;

    for (pos, &word) in kept.iter().enumerate() {
        let (start, end) = window_bounds(pos, kept.len(), ctx.params.window, rng);

        for (c, &context_word) in kept.iter().enumerate().take(end).skip(start) {
            if c == pos {
                continue;
            }

            let row = context_word * dim..(context_word + 1) * dim;
            buffers.neu1e.fill(0.0);
            negative_sampling(
                &mut weights.output,
                &weights.input[row.clone()],
                word,
                alpha,
                ctx,
                rng,
                &mut buffers.neu1e,
            );
            for (v, e) in weights.input[row].iter_mut().zip(&buffers.neu1e) {
                *v += e;
            }
        }
    }
}

fn train_sentence_cbow(
    weights: &mut Weights,
    buffers: &mut Buffers,
    ctx: &TrainContext<'_>,
    alpha: f32,
    rng: &mut StdRng,
) {
    let dim = ctx.dim;

    for pos in 0..buffers.kept.len() {
        let word = buffers.kept[pos];
        let (start, end) = window_bounds(pos, buffers.kept.len(), ctx.params.window, rng);

        buffers.context.clear();
        for c in start..end {
            if c != pos {
                buffers.context.push(buffers.kept[c]);
            }
        }
        if buffers.context.is_empty() {
            continue;
        }

        buffers.neu1.fill(0.0);
        for &context_word in &buffers.context {
            let row = &weights.input[context_word * dim..(context_word + 1) * dim];
            for (acc, v) in buffers.neu1.iter_mut().zip(row) {
                *acc += v;
            }
        }
        let n = buffers.context.len() as f32;
        for value in &mut buffers.neu1 {
            *value /= n;
        }

        buffers.neu1e.fill(0.0);
        negative_sampling(
            &mut weights.output,
            &buffers.neu1,
            word,
            alpha,
            ctx,
            rng,
            &mut buffers.neu1e,
        );

        for &context_word in &buffers.context {
            let row = &mut weights.input[context_word * dim..(context_word + 1) * dim];
            for (v, e) in row.iter_mut().zip(&buffers.neu1e) {
                *v += e;
            }
        }
    }
}

/// One positive update towards `target` plus `negative` noise updates
///
/// Output rows are updated in place; the gradient for `l1` is accumulated
/// into `neu1e` for the caller to apply.
fn negative_sampling(
    output: &mut [f32],
    l1: &[f32],
    target: usize,
    alpha: f32,
    ctx: &TrainContext<'_>,
    rng: &mut StdRng,
    neu1e: &mut [f32],
) {
    let dim = ctx.dim;

    for d in 0..=ctx.params.negative {
        let (word, label) = if d == 0 {
            (target, 1.0)
        } else {
            let noise_word = sample_noise(ctx.noise, rng);
            if noise_word == target {
                continue;
            }
            (noise_word, 0.0)
        };

        let row = &mut output[word * dim..(word + 1) * dim];
        let f: f32 = l1.iter().zip(row.iter()).map(|(a, b)| a * b).sum();
        let g = (label - sigmoid(f)) * alpha;

        for i in 0..dim {
            neu1e[i] += g * row[i];
            row[i] += g * l1[i];
        }
    }
}

fn sample_noise(cumulative: &[f64], rng: &mut StdRng) -> usize {
    let r: f64 = rng.random();
    cumulative
        .partition_point(|&c| c < r)
        .min(cumulative.len() - 1)
}

fn sigmoid(x: f32) -> f32 {
    let x = x.clamp(-MAX_EXP, MAX_EXP);
    1.0 / (1.0 + (-x).exp())
}
