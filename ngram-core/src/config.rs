//! Engine tunables, deserializable from TOML so a caller can override the
//! defaults in [`crate::constants`] without rebuilding.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CANDIDATE_POOL_CAP, DECAY, GENERATE_HARD_CAP, GENERATE_MAX_TOKENS_CEILING, GENERATE_TOP_N,
    GREEDY_TEMPERATURE_THRESHOLD, LOW_CONFIDENCE_CUTOFF, LOW_CONFIDENCE_MIN_TOKENS,
    TERMINATOR_MIN_TOKENS, UNIGRAM_PRIOR_BETA,
};

/// Tunable knobs for prediction and generation. All fields default to the
/// literal constants this crate ships with; a config file only needs to name
/// the ones it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Back-off decay applied per unit of suffix shortening.
    pub decay: f64,
    /// Weight of the unigram-prior log-probability term.
    pub unigram_prior_beta: f64,
    /// Candidate pool capacity during prediction.
    pub candidate_pool_cap: usize,
    /// Number of candidates the generator considers at each step.
    pub generate_top_n: usize,
    /// Hard cap on generated tokens, regardless of the caller's request.
    pub generate_hard_cap: usize,
    /// Ceiling applied to the caller-supplied max-tokens argument.
    pub generate_max_tokens_ceiling: usize,
    /// Temperature at or below which sampling becomes greedy.
    pub greedy_temperature_threshold: f64,
    /// Low-confidence stop threshold.
    pub low_confidence_cutoff: f64,
    /// Minimum tokens emitted before the low-confidence cutoff can fire.
    pub low_confidence_min_tokens: usize,
    /// Minimum tokens emitted before the terminator-word stop condition can fire.
    pub terminator_min_tokens: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decay: DECAY,
            unigram_prior_beta: UNIGRAM_PRIOR_BETA,
            candidate_pool_cap: CANDIDATE_POOL_CAP,
            generate_top_n: GENERATE_TOP_N,
            generate_hard_cap: GENERATE_HARD_CAP,
            generate_max_tokens_ceiling: GENERATE_MAX_TOKENS_CEILING,
            greedy_temperature_threshold: GREEDY_TEMPERATURE_THRESHOLD,
            low_confidence_cutoff: LOW_CONFIDENCE_CUTOFF,
            low_confidence_min_tokens: LOW_CONFIDENCE_MIN_TOKENS,
            terminator_min_tokens: TERMINATOR_MIN_TOKENS,
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text, falling back to defaults for any
    /// field the text doesn't mention.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_named_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.decay, DECAY);
        assert_eq!(config.generate_hard_cap, GENERATE_HARD_CAP);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = EngineConfig::from_toml_str("decay = 0.5\n").unwrap();
        assert_eq!(config.decay, 0.5);
        assert_eq!(config.unigram_prior_beta, UNIGRAM_PRIOR_BETA);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
