//! The model: `(Vocabulary, Trie, maxN, totalTokens)` plus a carried PRNG for
//! generation. The PRNG lives on the model rather than behind a process-global
//! generator so that two models in the same process never perturb each
//! other's output. The PRNG is a `ChaCha20Rng`, the same seeded-RNG choice
//! `repotoire` carries for its Node2Vec random walks.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::persist;
use crate::predict::Prediction;
use crate::token;
use crate::trie::Trie;
use crate::vocab::Vocabulary;

/// A trained (or loaded) n-gram model. Created empty, mutated only by
/// training or loading, then used read-only for prediction; generation is the
/// one exception, since it reseeds and advances the carried PRNG.
pub struct Model {
    vocab: Vocabulary,
    trie: Trie,
    max_n: usize,
    total_tokens: u64,
    rng: ChaCha20Rng,
    config: EngineConfig,
}

impl Model {
    /// Create an empty model with the given maximum n-gram order and the
    /// default [`EngineConfig`].
    pub fn new(max_n: usize) -> Self {
        Self::with_config(max_n, EngineConfig::default())
    }

    /// As [`Model::new`], but with tunables overridden by `config`.
    pub fn with_config(max_n: usize, config: EngineConfig) -> Self {
        Self {
            vocab: Vocabulary::new(),
            trie: Trie::new(max_n),
            max_n,
            total_tokens: 0,
            rng: ChaCha20Rng::from_entropy(),
            config,
        }
    }

    /// Reassemble a model from a loaded vocabulary and `totalTokens`, with an
    /// empty trie of the given order ready to be filled in by the
    /// persistence loader.
    pub(crate) fn from_parts(vocab: Vocabulary, max_n: usize, total_tokens: u64) -> Self {
        Self {
            vocab,
            trie: Trie::new(max_n),
            max_n,
            total_tokens,
            rng: ChaCha20Rng::from_entropy(),
            config: EngineConfig::default(),
        }
    }

    /// The tunables currently in effect for prediction and generation.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Override the tunables currently in effect. Does not affect any
    /// already-persisted data; `save`/`load` round-trip only the trained
    /// vocab and n-gram counts.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub(crate) fn trie_mut(&mut self) -> &mut Trie {
        &mut self.trie
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Tokenize `line`, assign/lookup ids, bump `totalTokens`, and fold the
    /// result into the trie at every order. Empty lines are a no-op.
    pub fn train_line(&mut self, line: &str) {
        let tokens = token::tokenize(line);
        if tokens.is_empty() {
            return;
        }
        let ids: Vec<_> = tokens
            .iter()
            .map(|t| self.vocab.get_or_add(t))
            .collect();
        self.total_tokens += ids.len() as u64;
        self.trie.update_all(&ids, ids.len());
    }

    /// Train over every non-empty line of a corpus file. See
    /// [`crate::train::train_from_file`] for the I/O-handling entry point
    /// most callers want.
    pub fn train_from_file(&mut self, path: &Path) -> EngineResult<()> {
        crate::train::train_from_file(self, path)
    }

    pub fn save(&self, prefix: &Path) -> EngineResult<()> {
        persist::save(self, prefix)
    }

    pub fn load(prefix: &Path, max_n: usize) -> EngineResult<Self> {
        persist::load(prefix, max_n)
    }

    /// Backward-reasoning prediction; see [`crate::predict`].
    pub fn predict(&self, context: &str, k: usize) -> Vec<Prediction> {
        crate::predict::predict(self, context, k)
    }

    /// Auto-regressive generation seeded from the model's own entropy-seeded
    /// PRNG. See [`crate::generate`].
    pub fn generate(&mut self, input: &str, max_tokens: usize, temperature: f64) -> String {
        crate::generate::generate(self, input, max_tokens, temperature)
    }

    /// As [`Model::generate`], but reseeds the model's PRNG from an explicit
    /// seed first, for reproducible callers (tests, documentation examples).
    pub fn generate_seeded(
        &mut self,
        input: &str,
        max_tokens: usize,
        temperature: f64,
        seed: u64,
    ) -> String {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        crate::generate::generate(self, input, max_tokens, temperature)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_two_lines_matches_seed_scenario() {
        let mut model = Model::new(3);
        model.train_line("a b c");
        model.train_line("a b d");

        let a = model.vocab().get("a");
        let b = model.vocab().get("b");
        let c = model.vocab().get("c");
        let d = model.vocab().get("d");

        assert_eq!(model.trie().count(&[a], 1), 2);
        assert_eq!(model.trie().count(&[a, b], 2), 2);
        assert_eq!(model.trie().count(&[a, b, c], 3), 1);
        assert_eq!(model.trie().count(&[a, b, d], 3), 1);
        assert_eq!(model.total_tokens(), 6);
    }

    #[test]
    fn empty_line_is_skipped() {
        let mut model = Model::new(3);
        model.train_line("");
        assert_eq!(model.total_tokens(), 0);
        assert_eq!(model.vocab_size(), 3);
    }

    #[test]
    fn new_model_carries_default_config() {
        let model = Model::new(3);
        assert_eq!(model.config(), &EngineConfig::default());
    }

    #[test]
    fn set_config_is_visible_to_later_calls() {
        let mut model = Model::with_config(3, EngineConfig::default());
        let mut custom = EngineConfig::default();
        custom.generate_hard_cap = 1;
        model.set_config(custom.clone());
        assert_eq!(model.config(), &custom);
    }
}
