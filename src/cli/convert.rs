use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::logging;
use crate::services::{ConvertOptions, ConvertService};
use crate::terminal::TerminalStyle;

pub async fn handle_convert_command(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    style: TerminalStyle,
) -> Result<()> {
    let config = tokio::task::spawn_blocking(Config::load).await??;
    let input = input.unwrap_or_else(|| config.default_training_data_path());
    let output = output.unwrap_or_else(|| config.default_sentences_path());

    if !input.is_file() {
        return Err(anyhow::anyhow!(
            "Input file not found: {}",
            input.display()
        ));
    }

    let mut options = ConvertOptions::default();
    if let Some(limit) = config.convert.answer_char_limit {
        options.answer_char_limit = limit;
    }
    let service = ConvertService::with_options(options);

    let response = service
        .convert_file(&input, &output)
        .await
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    logging::log_performance("convert", response.convert_duration_ms, true);

    println!(
        "{} Read {} training records from {}",
        style.tag("Convert"),
        response.records_read,
        input.display()
    );
    println!(
        "{} {} Wrote {} sentences to {}",
        style.tag("Convert"),
        style.success(),
        response.sentences_written,
        output.display()
    );

    Ok(())
}
