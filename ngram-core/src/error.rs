//! Error type for the engine's hard-failure paths.
//!
//! Most of the engine fails *soft* by design (see the module docs on
//! [`crate::vocab`] and [`crate::trie`]): allocation failure and out-of-range
//! arguments are never surfaced as errors, only as benign defaults. The one
//! place a real error is warranted is I/O — corpus reads and model
//! save/load — so that's all [`EngineError`] covers.

use thiserror::Error;

/// Errors that can occur while training from a corpus file or persisting a model.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
