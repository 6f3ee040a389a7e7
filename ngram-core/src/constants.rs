//! Fixed-size buffers and tuning knobs, named instead of scattered as magic numbers.

/// Reserved vocabulary ids, present after construction.
pub const UNK_ID: u32 = 0;
pub const BOS_ID: u32 = 1;
pub const EOS_ID: u32 = 2;

pub const UNK_TOKEN: &str = "<unk>";
pub const BOS_TOKEN: &str = "<s>";
pub const EOS_TOKEN: &str = "</s>";

/// Vocabulary size cap. 64 Ki suffices for typical corpora; insertion beyond this
/// fails softly by returning [`UNK_ID`].
pub const MAX_VOCAB_SIZE: usize = 64 * 1024;

/// Maximum token length in bytes. Longer tokens are truncated, not rejected.
pub const MAX_TOKEN_LEN: usize = 31;

/// Maximum tokens kept from a single tokenized line; overflow is discarded.
pub const MAX_TOKENS_PER_LINE: usize = 128;

/// Candidate pool capacity during backward-reasoning prediction.
pub const CANDIDATE_POOL_CAP: usize = 100;

/// Back-off decay applied per unit of suffix shortening.
pub const DECAY: f64 = 0.85;

/// Weight of the unigram-prior log-probability term added after n-gram scoring.
pub const UNIGRAM_PRIOR_BETA: f64 = 0.10;

/// Floor used when taking `log` of a probability, to avoid `-inf`.
pub const MIN_LOG_PROB: f64 = 1e-9;

/// Number of candidates the generator considers at each step.
pub const GENERATE_TOP_N: usize = 10;

/// Tokens kept in the generator's rolling context window.
pub const CONTEXT_WINDOW_LEN: usize = 7;

/// Tokens kept from the window when rolling it forward (window len minus one).
pub const CONTEXT_WINDOW_KEEP: usize = CONTEXT_WINDOW_LEN - 1;

/// Hard cap on generated tokens, regardless of the caller's `maxTokens`.
pub const GENERATE_HARD_CAP: usize = 25;

/// Ceiling applied to the caller-supplied `maxTokens` argument.
pub const GENERATE_MAX_TOKENS_CEILING: usize = 100;

/// Temperature at or below which sampling becomes greedy (argmax).
pub const GREEDY_TEMPERATURE_THRESHOLD: f64 = 0.01;

/// Low-confidence stop threshold: generation stops once the top score drops
/// below this and at least 3 tokens have been emitted.
pub const LOW_CONFIDENCE_CUTOFF: f64 = 0.03;

/// Minimum tokens emitted before the low-confidence cutoff can fire.
pub const LOW_CONFIDENCE_MIN_TOKENS: usize = 3;

/// Minimum tokens emitted before the terminator-word stop condition can fire.
pub const TERMINATOR_MIN_TOKENS: usize = 5;

/// Literal terminator tokens (interjections that plausibly end an utterance).
pub const TERMINATOR_WORDS: [&str; 7] = [
    "selesai", "sudah", "cukup", "begitu", "gitu", "deh", "kok",
];

/// Crate version string exposed through the programmatic surface.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
