//! Backward-reasoning predictor: aggregates evidence from every available
//! context suffix, longest first, with a decay that weights longer matches
//! more heavily, then blends in a unigram prior and renormalizes.
//!
//! Candidate scores sort directly as `f64` via `f64::total_cmp`; there is no
//! integer round-trip to lose precision over.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::config::EngineConfig;
use crate::constants::MIN_LOG_PROB;
use crate::model::Model;
use crate::token;
use crate::trie::ChildCount;
use crate::vocab::TokenId;

/// One ranked `(token id, score)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub token_id: TokenId,
    pub score: f64,
}

impl Prediction {
    const fn zero() -> Self {
        Self {
            token_id: 0,
            score: 0.0,
        }
    }
}

/// Predict the top `k` next tokens for `context`. Always returns exactly `k`
/// entries; unused trailing slots are `(0, 0.0)`.
pub fn predict(model: &Model, context: &str, k: usize) -> Vec<Prediction> {
    if k == 0 {
        return Vec::new();
    }

    let tokens = token::tokenize(context);
    if tokens.is_empty() {
        return vec![Prediction::zero(); k];
    }

    let max_context = tokens.len().min(model.max_n().saturating_sub(1));
    let candidates = accumulate_candidates(model, &tokens, max_context, model.config());

    let mut ranked = apply_unigram_prior(model, candidates, model.config());
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    renormalize(&mut ranked);

    let mut out: Vec<Prediction> = ranked
        .into_iter()
        .map(|(token_id, score)| Prediction { token_id, score })
        .collect();

    if out.len() < k {
        fill_from_fallback(model, &mut out, k);
    }
    out.resize(k, Prediction::zero());
    out
}

fn accumulate_candidates(
    model: &Model,
    tokens: &[String],
    max_context: usize,
    config: &EngineConfig,
) -> IndexMap<TokenId, f64> {
    let mut candidates: IndexMap<TokenId, f64> = IndexMap::new();
    if max_context == 0 {
        return candidates;
    }

    for l in (1..=max_context).rev() {
        let suffix = &tokens[tokens.len() - l..];
        let mut ids = Vec::with_capacity(l);
        let mut saw_unknown = false;
        for t in suffix {
            // `get_checked` tells a missing token apart from a literal
            // `<unk>`; both still skip this suffix length per the spec's
            // "any lookup returns 0" rule, but spelling it out as two arms
            // keeps the two cases documented at the one call site that
            // actually cares.
            match model.vocab().get_checked(t) {
                None => {
                    saw_unknown = true;
                    break;
                }
                Some(crate::constants::UNK_ID) => {
                    saw_unknown = true;
                    break;
                }
                Some(id) => ids.push(id),
            }
        }
        if saw_unknown {
            continue;
        }

        let node = match model.trie().find_prefix_node(&ids, l) {
            Some(n) => n,
            None => continue,
        };
        let children = model.trie().children(Some(node));
        if children.is_empty() {
            continue;
        }
        let denominator: u32 = children.iter().map(|c| c.count).sum();
        if denominator == 0 {
            continue;
        }

        let weight = (l as f64) * config.decay.powi((max_context - l) as i32);
        for ChildCount { token_id, count } in children {
            let contrib = weight * (count as f64) / (denominator as f64);
            if let Some(score) = candidates.get_mut(&token_id) {
                *score += contrib;
            } else if candidates.len() < config.candidate_pool_cap {
                candidates.insert(token_id, contrib);
            }
        }
    }

    candidates
}

fn apply_unigram_prior(
    model: &Model,
    candidates: IndexMap<TokenId, f64>,
    config: &EngineConfig,
) -> Vec<(TokenId, f64)> {
    let total = model.total_tokens();
    let add_prior = !candidates.is_empty() && total > 0;
    candidates
        .into_iter()
        .map(|(id, mut score)| {
            if add_prior {
                let u = model.trie().count(&[id], 1) as f64;
                let p = if u > 0.0 {
                    u / total as f64
                } else {
                    1.0 / (total as f64 + 1.0)
                };
                score += config.unigram_prior_beta * p.max(MIN_LOG_PROB).ln();
            }
            (id, score)
        })
        .collect()
}

fn renormalize(ranked: &mut [(TokenId, f64)]) {
    let sum: f64 = ranked.iter().map(|(_, s)| s).sum();
    if sum > 0.0 {
        for (_, s) in ranked.iter_mut() {
            *s /= sum;
        }
    }
}

/// Pad `out` up to `k` entries from the unigram table, ordered by count
/// descending (ties broken by insertion order, since the sort is stable).
///
/// Fallback entries carry a score of 0.0 rather than a derived probability:
/// they stand in for "no contextual evidence", and a consumer like the
/// generator relies on a non-positive top score to recognize that and stop
/// rather than read a fabricated confidence as real.
fn fill_from_fallback(model: &Model, out: &mut Vec<Prediction>, k: usize) {
    let mut present: FxHashSet<TokenId> = out.iter().map(|p| p.token_id).collect();
    let mut unigrams = model.trie().children(None);
    unigrams.sort_by(|a, b| b.count.cmp(&a.count));

    for ChildCount { token_id, .. } in unigrams {
        if out.len() >= k {
            break;
        }
        if !present.insert(token_id) {
            continue;
        }
        out.push(Prediction {
            token_id,
            score: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn scenario_model() -> Model {
        let mut model = Model::new(3);
        model.train_line("a b c");
        model.train_line("a b d");
        model
    }

    #[test]
    fn zero_length_context_yields_zero_filled_output() {
        let model = scenario_model();
        let out = predict(&model, "", 3);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|p| p.token_id == 0 && p.score == 0.0));
    }

    #[test]
    fn k_zero_yields_empty_output() {
        let model = scenario_model();
        assert!(predict(&model, "a b", 0).is_empty());
    }

    #[test]
    fn scenario_prediction_after_backoff() {
        let model = scenario_model();
        let out = predict(&model, "a b", 2);
        assert_eq!(out.len(), 2);

        let c = model.vocab().get("c");
        let d = model.vocab().get("d");
        let ids: Vec<_> = out.iter().map(|p| p.token_id).collect();
        assert!(ids.contains(&c));
        assert!(ids.contains(&d));

        let sum: f64 = out.iter().map(|p| p.score).sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for p in &out {
            assert!((p.score - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_context_token_falls_back_to_unigram_ordering() {
        let mut model = Model::new(3);
        model.train_line("x y");

        let out = model.predict("unknown y", 2);
        let x = model.vocab().get("x");
        let y = model.vocab().get("y");

        assert_eq!(out[0].token_id, x);
        assert_eq!(out[1].token_id, y);
        assert_eq!(out[0].score, 0.0);
        assert_eq!(out[1].score, 0.0);
    }

    #[test]
    fn candidate_pool_cap_override_is_honored() {
        let mut model = scenario_model();
        let mut config = EngineConfig::default();
        config.candidate_pool_cap = 1;
        model.set_config(config);

        // With room for only one candidate, the second distinct child seen at
        // suffix length 2 ("a b" -> c, d) must be dropped rather than scored.
        let out = predict(&model, "a b", 2);
        let nonzero = out.iter().filter(|p| p.score > 0.0).count();
        assert_eq!(nonzero, 1);
    }

    #[test]
    fn scores_are_nonnegative_and_exactly_k_slots() {
        let model = scenario_model();
        let out = predict(&model, "a b c", 5);
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|p| p.score >= 0.0));
    }
}
