//! Runtime configuration.
//!
//! Where banks and scores live, who is playing, and tuning overrides for
//! the generator and matcher. Anything unset falls back to the engine
//! defaults, so an empty file and no file at all behave the same.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scacquiz_core::evaluator::MatchPolicy;
use scacquiz_core::generator::GeneratorConfig;

/// Top-level scacquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScacquizConfig {
    /// Bank file or directory to quiz from.
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// JSON file rounds are recorded in.
    #[serde(default = "default_scores_path")]
    pub scores_path: PathBuf,
    /// Player name written to the scoreboard.
    #[serde(default = "default_player")]
    pub player: String,
    /// Seconds allowed per question before the answer stops counting.
    #[serde(default = "default_question_secs")]
    pub question_secs: u64,
    /// Generation tuning overrides.
    #[serde(default)]
    pub generator: GeneratorSection,
    /// Answer-matching tuning overrides.
    #[serde(default)]
    pub matcher: MatcherSection,
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("banks")
}
fn default_scores_path() -> PathBuf {
    PathBuf::from("scacquiz-scores.json")
}
fn default_player() -> String {
    "anonymous".to_string()
}
fn default_question_secs() -> u64 {
    60
}

impl Default for ScacquizConfig {
    fn default() -> Self {
        Self {
            bank_path: default_bank_path(),
            scores_path: default_scores_path(),
            player: default_player(),
            question_secs: default_question_secs(),
            generator: GeneratorSection::default(),
            matcher: MatcherSection::default(),
        }
    }
}

/// Optional `[generator]` overrides; unset fields keep the engine default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_bonus_modes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near_duplicate_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distractor_count: Option<usize>,
}

impl GeneratorSection {
    /// Engine config with these overrides applied over the defaults.
    pub fn to_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(p) = self.bonus_probability {
            config.bonus_probability = p;
        }
        if let Some(modes) = &self.always_bonus_modes {
            config.always_bonus_modes = modes.clone();
        }
        if let Some(t) = self.near_duplicate_threshold {
            config.near_duplicate_threshold = t;
        }
        if let Some(count) = self.distractor_count {
            config.distractor_count = count;
        }
        config
    }
}

/// Optional `[matcher]` overrides; unset fields keep the engine default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containment_min_chars: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_match_min_chars: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
}

impl MatcherSection {
    /// Match policy with these overrides applied over the defaults.
    pub fn to_policy(&self) -> MatchPolicy {
        let mut policy = MatchPolicy::default();
        if let Some(t) = self.ratio_threshold {
            policy.ratio_threshold = t;
        }
        if let Some(t) = self.overlap_threshold {
            policy.overlap_threshold = t;
        }
        if let Some(chars) = self.containment_min_chars {
            policy.containment_min_chars = chars;
        }
        if let Some(chars) = self.word_match_min_chars {
            policy.word_match_min_chars = chars;
        }
        if let Some(words) = &self.stop_words {
            policy.stop_words = words.clone();
        }
        policy
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `scacquiz.toml` in the current directory
/// 2. `~/.config/scacquiz/config.toml`
///
/// Environment variable overrides: `SCACQUIZ_BANK`, `SCACQUIZ_SCORES`,
/// `SCACQUIZ_PLAYER`.
pub fn load_config() -> Result<ScacquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ScacquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("scacquiz.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ScacquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ScacquizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(bank) = std::env::var("SCACQUIZ_BANK") {
        config.bank_path = PathBuf::from(bank);
    }
    if let Ok(scores) = std::env::var("SCACQUIZ_SCORES") {
        config.scores_path = PathBuf::from(scores);
    }
    if let Ok(player) = std::env::var("SCACQUIZ_PLAYER") {
        config.player = player;
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("scacquiz"))
}
