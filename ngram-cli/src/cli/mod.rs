//! CLI command definitions and handlers.

mod generate;
mod predict;
mod train;

use clap::{Parser, Subcommand};

/// Train, query, and generate from n-gram language models over plain-text
/// corpora.
#[derive(Parser, Debug)]
#[command(name = "ngram")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). Set `RUST_LOG` instead
    /// for finer-grained per-module filtering.
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a model from a corpus and save it to disk.
    Train(train::TrainArgs),

    /// Predict the top next tokens for a context string.
    Predict(predict::PredictArgs),

    /// Generate a continuation of an input string.
    Generate(generate::GenerateArgs),
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Train(args) => train::run(args),
        Commands::Predict(args) => predict::run(args),
        Commands::Generate(args) => generate::run(args),
    }
}
