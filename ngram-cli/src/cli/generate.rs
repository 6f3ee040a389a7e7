use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ngram_core::Model;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Prefix a model was saved under. Defaults to the user config's
    /// `defaults.model` when omitted.
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Maximum n-gram order the model was trained with.
    /// Defaults to the user config's `defaults.max_n`, or 3.
    #[arg(long)]
    pub max_n: Option<usize>,

    /// Seed text to continue from.
    #[arg(long)]
    pub input: String,

    /// Maximum number of tokens to generate (hard-capped at 25 regardless).
    #[arg(long, default_value_t = 25)]
    pub max_tokens: usize,

    /// Sampling temperature; at or below 0.01 generation is greedy.
    #[arg(long, default_value_t = 0.0)]
    pub temperature: f64,

    /// Reseed the model's PRNG for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let user_config = crate::config::UserConfig::load()?;
    let max_n = args.max_n.or(user_config.defaults.max_n).unwrap_or(3);
    let model_path = args
        .model
        .or(user_config.defaults.model)
        .context("no --model given and no default model configured")?;

    let mut model = Model::load(&model_path, max_n)
        .with_context(|| format!("loading model from {}", model_path.display()))?;
    model.set_config(user_config.engine);

    let output = match args.seed {
        Some(seed) => model.generate_seeded(&args.input, args.max_tokens, args.temperature, seed),
        None => model.generate(&args.input, args.max_tokens, args.temperature),
    };
    println!("{output}");
    Ok(())
}
