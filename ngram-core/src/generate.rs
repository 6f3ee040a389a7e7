//! Auto-regressive generator: repeatedly predicts, samples, and appends,
//! over a rolling context window, until one of several stop conditions fires.

use rand::Rng;

use crate::config::EngineConfig;
use crate::constants::{CONTEXT_WINDOW_KEEP, CONTEXT_WINDOW_LEN, MIN_LOG_PROB, TERMINATOR_WORDS};
use crate::model::Model;
use crate::predict::Prediction;
use crate::token;
use crate::vocab::TokenId;

/// Generate a continuation of `input`, up to `max_tokens` tokens (itself
/// capped at [`crate::config::EngineConfig::generate_max_tokens_ceiling`]).
/// The returned string holds only the generated continuation, not the seed
/// text.
pub fn generate(model: &mut Model, input: &str, max_tokens: usize, temperature: f64) -> String {
    let config = model.config().clone();
    let effective_max = max_tokens.min(config.generate_max_tokens_ceiling);

    let mut window = token::tokenize(input);
    trim_window(&mut window);

    let mut history: Vec<TokenId> = Vec::new();
    let mut output = String::new();

    for _ in 0..effective_max {
        let context = window.join(" ");
        let predictions = crate::predict::predict(model, &context, config.generate_top_n);
        let top_score = predictions[0].score;
        if top_score <= 0.0 {
            break;
        }

        let chosen_id = sample(model, &predictions, temperature, &config);
        let text = model.vocab().token_of(chosen_id).to_string();
        if text.is_empty() {
            break;
        }

        if !output.is_empty() {
            output.push(' ');
        }
        output.push_str(&text);

        window.push(text.clone());
        trim_window(&mut window);
        history.push(chosen_id);

        if should_stop(&text, &history, top_score, &config) {
            break;
        }
    }

    output
}

/// Keep only the last [`CONTEXT_WINDOW_LEN`] tokens: the last
/// [`CONTEXT_WINDOW_KEEP`] old ones plus whatever was just pushed.
fn trim_window(window: &mut Vec<String>) {
    if window.len() > CONTEXT_WINDOW_LEN {
        let drop = window.len() - CONTEXT_WINDOW_LEN;
        window.drain(0..drop);
    }
}

fn sample(
    model: &mut Model,
    predictions: &[Prediction],
    temperature: f64,
    config: &EngineConfig,
) -> TokenId {
    if temperature <= config.greedy_temperature_threshold {
        return predictions[0].token_id;
    }

    let positive: Vec<&Prediction> = predictions.iter().take_while(|p| p.score > 0.0).collect();
    if positive.is_empty() {
        return predictions[0].token_id;
    }

    let adjusted: Vec<f64> = positive
        .iter()
        .map(|p| ((p.score + MIN_LOG_PROB).ln() / temperature).exp())
        .collect();
    let sum: f64 = adjusted.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return predictions[0].token_id;
    }

    let r: f64 = model.rng_mut().gen::<f64>();
    let mut cumulative = 0.0;
    for (prediction, weight) in positive.iter().zip(adjusted.iter()) {
        cumulative += weight / sum;
        if cumulative >= r {
            return prediction.token_id;
        }
    }
    predictions[0].token_id
}

fn should_stop(text: &str, history: &[TokenId], top_score: f64, config: &EngineConfig) -> bool {
    if matches!(text.as_bytes().last(), Some(b'.') | Some(b'?') | Some(b'!')) {
        return true;
    }
    if history.len() >= config.terminator_min_tokens && TERMINATOR_WORDS.contains(&text) {
        return true;
    }
    if top_score < config.low_confidence_cutoff && history.len() >= config.low_confidence_min_tokens
    {
        return true;
    }
    if history.len() >= config.generate_hard_cap {
        return true;
    }

    let n = history.len();
    if n >= 3 && history[n - 1] == history[n - 2] && history[n - 2] == history[n - 3] {
        return true;
    }
    if n >= 4 && history[n - 1] == history[n - 3] && history[n - 2] == history[n - 4] {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_generation_matches_seed_scenario() {
        let mut model = Model::new(3);
        for _ in 0..10 {
            model.train_line("hi there friend");
        }

        let out = model.generate("hi", 3, 0.0);
        assert_eq!(out, "there friend");
    }

    #[test]
    fn terminal_punctuation_stop_condition_checks_the_tokens_last_byte() {
        let config = EngineConfig::default();
        assert!(should_stop("done.", &[1, 2, 3], 1.0, &config));
        assert!(should_stop("really?", &[1], 1.0, &config));
        assert!(!should_stop("done", &[1, 2, 3], 1.0, &config));
    }

    #[test]
    fn output_never_exceeds_hard_cap() {
        let mut model = Model::new(3);
        for _ in 0..5 {
            model.train_line("a b a b a b a b a b a b");
        }
        let out = model.generate("a", 100, 1.0);
        let tokens: Vec<_> = out.split_whitespace().collect();
        assert!(tokens.len() <= model.config().generate_hard_cap);
        for t in tokens {
            assert!(t.len() <= crate::constants::MAX_TOKEN_LEN);
        }
    }

    #[test]
    fn empty_model_generates_nothing() {
        let mut model = Model::new(3);
        assert_eq!(model.generate("anything", 5, 0.0), "");
    }

    #[test]
    fn generate_hard_cap_override_is_honored() {
        let mut model = Model::new(3);
        for _ in 0..5 {
            model.train_line("a b a b a b a b a b a b");
        }
        let mut config = EngineConfig::default();
        config.generate_hard_cap = 2;
        config.low_confidence_cutoff = 0.0;
        model.set_config(config);

        let out = model.generate("a", 100, 1.0);
        let tokens: Vec<_> = out.split_whitespace().collect();
        assert!(tokens.len() <= 2);
    }
}
