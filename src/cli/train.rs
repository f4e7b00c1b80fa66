use anyhow::{Context, Result};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::config::{Config, TrainConfig};
use crate::embedding::{Algorithm, TrainingParams, Word2VecTrainer};
use crate::logging;
use crate::services::TrainService;
use crate::terminal::TerminalStyle;

/// Hyperparameters given on the command line
#[derive(Debug, Clone, Default)]
pub struct TrainOverrides {
    pub vector_size: Option<usize>,
    pub window: Option<usize>,
    pub min_count: Option<usize>,
    pub workers: Option<usize>,
    pub sg: Option<u8>,
}

impl TrainOverrides {
    /// Flags win over the config file, which wins over the defaults
    pub fn resolve(&self, config: &TrainConfig) -> crate::Result<TrainingParams> {
        let defaults = TrainingParams::default();
        let sg = self.sg.or(config.sg).unwrap_or(defaults.algorithm.sg());

        let params = TrainingParams::new()
            .with_vector_size(
                self.vector_size
                    .or(config.vector_size)
                    .unwrap_or(defaults.vector_size),
            )
            .with_window(self.window.or(config.window).unwrap_or(defaults.window))
            .with_min_count(
                self.min_count
                    .or(config.min_count)
                    .unwrap_or(defaults.min_count),
            )
            .with_workers(self.workers.or(config.workers).unwrap_or(defaults.workers))
            .with_algorithm(Algorithm::from_sg(sg)?);

        params.validate()?;
        Ok(params)
    }
}

pub async fn handle_train_command(
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    overrides: TrainOverrides,
    style: TerminalStyle,
) -> Result<()> {
    let tag = style.tag("Word2Vec");
    let config = tokio::task::spawn_blocking(Config::load).await??;
    let data = data.unwrap_or_else(|| config.default_sentences_path());
    let output = output.unwrap_or_else(|| config.default_model_path());

    if !data.is_file() {
        println!(
            "{} Run `chatvec convert` first to produce the sentences file",
            style.hint()
        );
        return Err(anyhow::anyhow!("Data file not found: {}", data.display()));
    }

    let params = overrides.resolve(&config.train)?;

    let cpus = num_cpus::get();
    if params.workers > cpus {
        tracing::warn!(
            workers = params.workers,
            cpus,
            "More workers requested than available CPUs"
        );
    }

    let sentences = TrainService::<Word2VecTrainer>::read_sentences(&data)
        .await
        .with_context(|| format!("Failed to read sentences from {}", data.display()))?;

    println!("{tag} Loaded {} sentences", sentences.len());
    println!("{tag} Training word2vec model...");
    println!("  Vector size: {}", params.vector_size);
    println!("  Window: {}", params.window);
    println!("  Min count: {}", params.min_count);
    println!("  Workers: {}", params.workers);
    println!("  Algorithm: {}", params.algorithm);

    let progress = epoch_progress_bar(params.epochs)?;
    let service = TrainService::new(Word2VecTrainer::new().with_progress(progress));

    let response = service
        .train_sentences(sentences, params, &output)
        .await
        .context("Training failed")?;

    logging::log_performance("train", response.train_duration_ms, true);

    println!(
        "{tag} {} Model saved to {}",
        style.success(),
        output.display()
    );
    println!("{tag} Vocabulary size: {}", response.vocab_size);
    println!(
        "{tag} Sample words: {}",
        serde_json::to_string(&response.sample_words)?
    );

    Ok(())
}

fn epoch_progress_bar(epochs: usize) -> Result<ProgressBar> {
    if !Term::stderr().is_term() {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(epochs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} epochs ({elapsed})")?
            .progress_chars("━━╸"),
    );
    Ok(pb)
}
