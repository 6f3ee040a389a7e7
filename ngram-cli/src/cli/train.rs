use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ngram_core::Model;

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to a plain-text corpus, one sentence per line.
    #[arg(long)]
    pub corpus: PathBuf,

    /// Maximum n-gram order to train (unigram through this order).
    /// Defaults to the user config's `defaults.max_n`, or 3.
    #[arg(long)]
    pub max_n: Option<usize>,

    /// Prefix to save the trained model under (writes `<prefix>.vocab`,
    /// `.uni`, `.bi`, `.tri`).
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: TrainArgs) -> Result<()> {
    let user_config = crate::config::UserConfig::load()?;
    let max_n = args.max_n.or(user_config.defaults.max_n).unwrap_or(3);

    let mut model = Model::with_config(max_n, user_config.engine);
    model
        .train_from_file(&args.corpus)
        .with_context(|| format!("training from {}", args.corpus.display()))?;

    model
        .save(&args.out)
        .with_context(|| format!("saving model to {}", args.out.display()))?;

    println!(
        "trained from {}: {} vocab entries, {} tokens",
        args.corpus.display(),
        model.vocab_size(),
        model.total_tokens()
    );
    println!("Saved to {}.{{vocab,uni,bi,tri}}", args.out.display());
    Ok(())
}
