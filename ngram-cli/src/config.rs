//! User-level configuration for the `ngram` CLI.
//!
//! Supports loading defaults from:
//! - `~/.config/ngram/config.toml`
//! - Environment variables (highest priority)

use std::path::PathBuf;

use anyhow::Result;
use ngram_core::EngineConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub defaults: Defaults,

    /// Engine tunables (decay, beta, candidate cap, generation caps/thresholds).
    /// Absent fields fall back to `ngram_core`'s own defaults.
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Defaults {
    /// Default maximum n-gram order for `train`/`predict`/`generate` when
    /// `--max-n` is not given explicitly.
    pub max_n: Option<usize>,

    /// Default model prefix, so `--model` can be omitted for a habitual
    /// single-model workflow.
    pub model: Option<PathBuf>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (`~/.config/ngram/config.toml`)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(user_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| toml::from_str::<UserConfig>(&content).ok())
        {
            config.merge(user_config);
        }

        if let Ok(max_n) = std::env::var("NGRAM_MAX_N") {
            if let Ok(n) = max_n.parse() {
                config.defaults.max_n = Some(n);
            }
        }
        if let Ok(model) = std::env::var("NGRAM_MODEL") {
            config.defaults.model = Some(PathBuf::from(model));
        }

        Ok(config)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ngram").join("config.toml"))
    }

    fn merge(&mut self, other: UserConfig) {
        if other.defaults.max_n.is_some() {
            self.defaults.max_n = other.defaults.max_n;
        }
        if other.defaults.model.is_some() {
            self.defaults.model = other.defaults.model;
        }
        // `other.engine`'s own fields have already resolved to either the
        // file's override or ngram_core's default via #[serde(default)], so
        // taking it wholesale is equivalent to a field-by-field merge here.
        self.engine = other.engine;
    }
}
