pub mod convert;
pub mod query;
pub mod similar;
pub mod train;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::terminal::TerminalStyle;

#[derive(Parser)]
#[command(name = "chatvec")]
#[command(about = "Word embedding tooling for chatbot training data")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert training records into tokenized sentences
    Convert {
        /// Training records file (default: models/training_data.json)
        input: Option<PathBuf>,
        /// Sentences output file (default: models/training_data_word2vec.json)
        output: Option<PathBuf>,
    },
    /// Train a word2vec model on tokenized sentences
    Train {
        /// Sentences file (default: models/training_data_word2vec.json)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Model output path (default: models/word2vec.model)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Embedding dimension (default: 100)
        #[arg(long)]
        vector_size: Option<usize>,
        /// Context window size (default: 5)
        #[arg(long)]
        window: Option<usize>,
        /// Minimum word frequency (default: 1)
        #[arg(long)]
        min_count: Option<usize>,
        /// Worker threads (default: 4)
        #[arg(long)]
        workers: Option<usize>,
        /// 1 for skip-gram, 0 for CBOW (default: 1)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
        sg: Option<u8>,
    },
    /// Print the mean vector of a JSON array of words
    Query {
        /// Trained model file
        #[arg(long)]
        model: PathBuf,
        /// Words as a JSON array, e.g. '["lỗi","sửa"]'
        #[arg(long)]
        words: String,
    },
    /// Find training records similar to a message
    Similar {
        /// Trained model file (default: models/word2vec.model)
        #[arg(long)]
        model: Option<PathBuf>,
        /// Training records file (default: models/training_data.json)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Message to match
        #[arg(long)]
        text: String,
        /// Maximum number of matches
        #[arg(long, default_value_t = crate::services::similarity_service::DEFAULT_LIMIT)]
        limit: usize,
    },
}

impl Commands {
    /// Prefix for diagnostics printed on failure
    pub fn tag(&self) -> &'static str {
        match self {
            Commands::Convert { .. } => "Convert",
            Commands::Train { .. } => "Word2Vec",
            Commands::Query { .. } => "Word2Vec Query",
            Commands::Similar { .. } => "Similar",
        }
    }
}

impl Cli {
    pub fn run(self, style: TerminalStyle) -> anyhow::Result<()> {
        let rt = Runtime::new()?;

        rt.block_on(async {
            match self.command {
                Commands::Convert { input, output } => {
                    convert::handle_convert_command(input, output, style).await
                }
                Commands::Train {
                    data,
                    output,
                    vector_size,
                    window,
                    min_count,
                    workers,
                    sg,
                } => {
                    let overrides = train::TrainOverrides {
                        vector_size,
                        window,
                        min_count,
                        workers,
                        sg,
                    };
                    train::handle_train_command(data, output, overrides, style).await
                }
                Commands::Query { model, words } => query::handle_query_command(model, words).await,
                Commands::Similar {
                    model,
                    data,
                    text,
                    limit,
                } => similar::handle_similar_command(model, data, text, limit, style).await,
            }
        })
    }
}
