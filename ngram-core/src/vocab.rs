//! Vocabulary: bidirectional map between token strings and small integer ids.
//!
//! Insertion is soft-failing: once [`crate::constants::MAX_VOCAB_SIZE`] is
//! reached, `get_or_add` returns [`crate::constants::UNK_ID`] instead of
//! erroring. [`Vocabulary::get`] aliases a lookup miss to the same id as the
//! literal `<unk>` token, because the prediction and training algorithms
//! treat both identically. [`Vocabulary::get_checked`] is for the rarer call
//! site that needs to tell them apart.

use rustc_hash::FxHashMap;

use crate::constants::{
    BOS_ID, BOS_TOKEN, EOS_ID, EOS_TOKEN, MAX_VOCAB_SIZE, UNK_ID, UNK_TOKEN,
};

pub type TokenId = u32;

#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_id: FxHashMap<String, TokenId>,
    id_to_token: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary with the three reserved tokens already inserted at
    /// ids 0, 1, 2.
    pub fn new() -> Self {
        let mut vocab = Self {
            token_to_id: FxHashMap::default(),
            id_to_token: Vec::new(),
        };
        for (token, id) in [(UNK_TOKEN, UNK_ID), (BOS_TOKEN, BOS_ID), (EOS_TOKEN, EOS_ID)] {
            debug_assert_eq!(id as usize, vocab.id_to_token.len());
            vocab.token_to_id.insert(token.to_string(), id);
            vocab.id_to_token.push(token.to_string());
        }
        vocab
    }

    /// Number of tokens in the vocabulary (including the three reserved ones).
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Look up an existing token's id, or assign the next free one.
    ///
    /// Returns [`UNK_ID`] if the vocabulary is already at capacity.
    pub fn get_or_add(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }
        if self.id_to_token.len() >= MAX_VOCAB_SIZE {
            return UNK_ID;
        }
        let id = self.id_to_token.len() as TokenId;
        self.id_to_token.push(token.to_string());
        self.token_to_id.insert(token.to_string(), id);
        id
    }

    /// Look up a token's id without inserting.
    ///
    /// Returns [`UNK_ID`] (0) on miss — this collides with the id of the
    /// literal `<unk>` token. Use [`Vocabulary::get_checked`] where that
    /// distinction matters.
    pub fn get(&self, token: &str) -> TokenId {
        self.token_to_id.get(token).copied().unwrap_or(UNK_ID)
    }

    /// Look up a token's id, returning `None` on miss instead of aliasing to
    /// [`UNK_ID`].
    pub fn get_checked(&self, token: &str) -> Option<TokenId> {
        self.token_to_id.get(token).copied()
    }

    /// Resolve an id back to its token text. Out-of-range ids return `<unk>`.
    pub fn token_of(&self, id: TokenId) -> &str {
        self.id_to_token
            .get(id as usize)
            .map(|s| s.as_str())
            .unwrap_or(UNK_TOKEN)
    }

    /// Iterate over all `(id, token)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &str)> {
        self.id_to_token
            .iter()
            .enumerate()
            .map(|(id, tok)| (id as TokenId, tok.as_str()))
    }

    /// Rebuild a vocabulary from an ordered list of tokens (used by the
    /// persistence loader, where ids are implied by list position).
    pub(crate) fn from_ordered_tokens(tokens: Vec<String>) -> Self {
        let mut token_to_id = FxHashMap::default();
        for (id, tok) in tokens.iter().enumerate() {
            token_to_id.insert(tok.clone(), id as TokenId);
        }
        Self {
            token_to_id,
            id_to_token: tokens,
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
