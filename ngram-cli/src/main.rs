// Clippy: deny unwrap_used in production code — use expect() or ? instead
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! ngram - train and query stateless n-gram language models
//!
//! A small CLI over `ngram-core`: point it at a plain-text corpus to train a
//! model, then query it for ranked next-token predictions or auto-regressive
//! generation.

mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli)
}
