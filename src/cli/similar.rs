use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::embedding::EmbeddingModel;
use crate::services::{ConvertService, SimilarityService};
use crate::terminal::TerminalStyle;
use crate::utils::text::preview;

pub async fn handle_similar_command(
    model: Option<PathBuf>,
    data: Option<PathBuf>,
    text: String,
    limit: usize,
    style: TerminalStyle,
) -> Result<()> {
    let config = tokio::task::spawn_blocking(Config::load).await??;
    let model_path = model.unwrap_or_else(|| config.default_model_path());
    let data_path = data.unwrap_or_else(|| config.default_training_data_path());

    let records = ConvertService::read_records(&data_path)
        .await
        .with_context(|| format!("Failed to read training records {}", data_path.display()))?;

    // a missing or broken model only disables embedding matches
    let load_path = model_path.clone();
    let model = match tokio::task::spawn_blocking(move || EmbeddingModel::load(load_path)).await? {
        Ok(model) => Some(model),
        Err(e) => {
            tracing::warn!(
                path = %model_path.display(),
                error = %e,
                "Model unavailable, using keyword matching"
            );
            eprintln!(
                "{} {} Model unavailable, falling back to keyword matching",
                style.tag("Similar"),
                style.hint()
            );
            None
        }
    };

    let service = SimilarityService::new(model);
    let matches = service.find_similar(&text, &records, limit);

    tracing::info!(
        text = %preview(&text, 40),
        records = records.len(),
        matches = matches.len(),
        "Similarity lookup finished"
    );

    println!("{}", serde_json::to_string_pretty(&matches)?);

    Ok(())
}
