//! Runtime configuration
//!
//! Every field has a default, so an empty or missing TOML file is valid.
//! `OPENROUTER_API_KEY` in the environment overrides `remote.api_key`.

use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::types::NarrationTone;
use crate::{
    REMOTE_TIMEOUT_MS, NARRATION_MS_PER_CHAR, NARRATION_PAUSE_MS, PRESENTATION_RESET_MS,
    KEYWORD_DELTA, SHORT_STATEMENT_CHARS, LONG_STATEMENT_CHARS, LENGTH_DELTA, JITTER_SPAN,
    SCORE_FLOOR, SCORE_CEILING,
};

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Upper bound for any single scoring adjustment
pub const MAX_SCORE_DELTA: i32 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrbConfig {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub narration: NarrationConfig,

    #[serde(default)]
    pub presentation: PresentationConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub max_tokens: u32,
    /// Sent as `HTTP-Referer`
    pub referer: Option<String>,
    /// Sent as `X-Title`
    pub title: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "mistralai/mistral-small-3.1-24b-instruct:free".to_string(),
            api_key: None,
            timeout_ms: REMOTE_TIMEOUT_MS,
            max_tokens: 200,
            referer: None,
            title: "Mystic Lie Detector Orb".to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Remote evaluation needs a key; without one the heuristic answers directly
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().map(|k| !k.trim().is_empty()).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub ms_per_char: u64,
    pub pause_ms: u64,
    pub pitch: f32,
    pub rate: f32,
    pub volume: f32,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        let tone = NarrationTone::default();
        Self {
            ms_per_char: NARRATION_MS_PER_CHAR,
            pause_ms: NARRATION_PAUSE_MS,
            pitch: tone.pitch,
            rate: tone.rate,
            volume: tone.volume,
        }
    }
}

impl NarrationConfig {
    pub fn tone(&self) -> NarrationTone {
        NarrationTone {
            pitch: self.pitch,
            rate: self.rate,
            volume: self.volume,
        }
    }

    /// How long narrating `text` is assumed to take, pause included
    pub fn estimate(&self, text: &str) -> Duration {
        let chars = text.chars().count() as u64;
        Duration::from_millis(chars * self.ms_per_char + self.pause_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub reset_ms: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            reset_ms: PRESENTATION_RESET_MS,
        }
    }
}

impl PresentationConfig {
    pub fn reset_after(&self) -> Duration {
        Duration::from_millis(self.reset_ms)
    }
}

/// Lexical fallback tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub keyword_delta: i32,
    pub short_len: usize,
    pub long_len: usize,
    pub length_delta: i32,
    pub jitter: i32,
    pub floor: u8,
    pub ceiling: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_delta: KEYWORD_DELTA,
            short_len: SHORT_STATEMENT_CHARS,
            long_len: LONG_STATEMENT_CHARS,
            length_delta: LENGTH_DELTA,
            jitter: JITTER_SPAN,
            floor: SCORE_FLOOR,
            ceiling: SCORE_CEILING,
        }
    }
}

impl OrbConfig {
    /// Load from a TOML file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.remote.api_key = Some(key);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.timeout_ms == 0 {
            return Err(ConfigError::Invalid("remote.timeout_ms must be positive".into()));
        }
        if self.scoring.floor > self.scoring.ceiling {
            return Err(ConfigError::Invalid("scoring.floor exceeds scoring.ceiling".into()));
        }
        if self.scoring.ceiling > 100 {
            return Err(ConfigError::Invalid("scoring.ceiling must be at most 100".into()));
        }
        let deltas = [
            ("scoring.keyword_delta", self.scoring.keyword_delta),
            ("scoring.length_delta", self.scoring.length_delta),
            ("scoring.jitter", self.scoring.jitter),
        ];
        for (name, value) in deltas {
            if !(0..=MAX_SCORE_DELTA).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within 0..={}",
                    name, MAX_SCORE_DELTA
                )));
            }
        }
        Ok(())
    }
}
