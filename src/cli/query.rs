use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::services::QueryService;

/// Prints the mean vector as one JSON line; nothing else goes to stdout
pub async fn handle_query_command(model: PathBuf, words: String) -> Result<()> {
    let model_path = model.clone();
    let service = tokio::task::spawn_blocking(move || QueryService::load(model_path))
        .await?
        .with_context(|| format!("Failed to load model {}", model.display()))?;

    let vector = service
        .query_json(&words)
        .context("Invalid --words argument")?;
    println!("{vector}");

    Ok(())
}
