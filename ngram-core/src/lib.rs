//! Stateless n-gram language model engine.
//!
//! Tokenize a corpus, fold it into a vocabulary and a trie of n-gram counts,
//! then query the result two ways: ranked next-token prediction from a
//! context string, or auto-regressive generation of a continuation.
//!
//! ```no_run
//! use ngram_core::Model;
//!
//! let mut model = Model::new(3);
//! model.train_line("the quick brown fox");
//! let next = model.predict("the quick", 5);
//! let text = model.generate("the quick", 10, 0.7);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod generate;
pub mod model;
pub mod persist;
pub mod predict;
pub mod token;
pub mod train;
pub mod trie;
pub mod vocab;

pub use config::EngineConfig;
pub use constants::VERSION;
pub use error::{EngineError, EngineResult};
pub use model::Model;
pub use predict::Prediction;
pub use vocab::{TokenId, Vocabulary};
