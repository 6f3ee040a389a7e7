//! Tokenizer: splits a line into lowercased word tokens.
//!
//! A token is a maximal run of bytes that are neither ASCII whitespace nor
//! ASCII punctuation. Case folding is ASCII-only; multi-byte UTF-8 sequences
//! are split on their individual bytes rather than decoded, which is wrong
//! for non-ASCII text but keeps the tokenizer allocation-free and branchless
//! per byte.

use crate::constants::{MAX_TOKENS_PER_LINE, MAX_TOKEN_LEN};

/// Tokenize a line of text into lowercased word tokens.
///
/// Deterministic and total: never fails, never panics. Tokens longer than
/// [`MAX_TOKEN_LEN`] bytes are truncated; lines yielding more than
/// [`MAX_TOKENS_PER_LINE`] tokens have the overflow discarded.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for byte in line.bytes() {
        if is_word_byte(byte) {
            if current.len() < MAX_TOKEN_LEN {
                current.push(byte.to_ascii_lowercase() as char);
            }
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
            if tokens.len() >= MAX_TOKENS_PER_LINE {
                return tokens;
            }
        }
    }

    if !current.is_empty() {
        push_token(&mut tokens, current);
    }

    tokens.truncate(MAX_TOKENS_PER_LINE);
    tokens
}

fn push_token(tokens: &mut Vec<String>, token: String) {
    if tokens.len() < MAX_TOKENS_PER_LINE {
        tokens.push(token);
    }
}

fn is_word_byte(b: u8) -> bool {
    !(b.is_ascii_whitespace() || b.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_punctuation() {
        assert_eq!(
            tokenize("Hello, World!  HELLO"),
            vec!["hello", "world", "hello"]
        );
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("!!!...,,,").is_empty());
    }

    #[test]
    fn truncates_long_tokens() {
        let long = "a".repeat(50);
        let tokens = tokenize(&long);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].len(), MAX_TOKEN_LEN);
    }

    #[test]
    fn discards_overflow_tokens() {
        let line = (0..MAX_TOKENS_PER_LINE + 20)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let tokens = tokenize(&line);
        assert_eq!(tokens.len(), MAX_TOKENS_PER_LINE);
        assert_eq!(tokens[0], "w0");
    }

    #[test]
    fn all_output_bytes_are_lowercase_and_non_empty() {
        for t in tokenize("MiXeD-Case_word's 123 test") {
            assert!(!t.is_empty());
            assert!(t.len() <= MAX_TOKEN_LEN);
            assert_eq!(t, t.to_ascii_lowercase());
            assert!(t.bytes().all(is_word_byte));
        }
    }

    #[test]
    fn tokenization_is_idempotent() {
        let tokens = tokenize("already lower case words");
        let rejoined = tokens.join(" ");
        assert_eq!(tokenize(&rejoined), tokens);
    }
}
