use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ngram_core::Model;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Prefix a model was saved under. Defaults to the user config's
    /// `defaults.model` when omitted.
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Maximum n-gram order the model was trained with.
    /// Defaults to the user config's `defaults.max_n`, or 3.
    #[arg(long)]
    pub max_n: Option<usize>,

    /// Context to predict the next token from.
    #[arg(long)]
    pub context: String,

    /// Number of ranked candidates to return.
    #[arg(long, default_value_t = 5)]
    pub k: usize,
}

pub fn run(args: PredictArgs) -> Result<()> {
    let user_config = crate::config::UserConfig::load()?;
    let max_n = args.max_n.or(user_config.defaults.max_n).unwrap_or(3);
    let model_path = args
        .model
        .or(user_config.defaults.model)
        .context("no --model given and no default model configured")?;

    let mut model = Model::load(&model_path, max_n)
        .with_context(|| format!("loading model from {}", model_path.display()))?;
    model.set_config(user_config.engine);

    for (rank, prediction) in model.predict(&args.context, args.k).iter().enumerate() {
        let token = model.vocab().token_of(prediction.token_id);
        println!("{:>2}. {:<20} {:.6}", rank + 1, token, prediction.score);
    }
    Ok(())
}
