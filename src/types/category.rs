//! Truth categories and visual tones, both derived from a truth index

use serde::{Deserialize, Serialize};
use crate::{
    CATEGORY_IMPOSSIBLE_BELOW, CATEGORY_UNLIKELY_BELOW, CATEGORY_NEUTRAL_BELOW,
    CATEGORY_LIKELY_BELOW, TONE_LOW_BELOW, TONE_NEUTRAL_BELOW,
};

/// Coarse bucket for a truth index. Ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruthCategory {
    Impossible,
    Unlikely,
    Neutral,
    Likely,
    TrueLike,
}

impl TruthCategory {
    pub const ALL: [TruthCategory; 5] = [
        TruthCategory::Impossible,
        TruthCategory::Unlikely,
        TruthCategory::Neutral,
        TruthCategory::Likely,
        TruthCategory::TrueLike,
    ];

    /// Map a truth index onto its category. Pure and monotonic.
    pub fn from_index(truth_index: u8) -> Self {
        if truth_index < CATEGORY_IMPOSSIBLE_BELOW {
            TruthCategory::Impossible
        } else if truth_index < CATEGORY_UNLIKELY_BELOW {
            TruthCategory::Unlikely
        } else if truth_index < CATEGORY_NEUTRAL_BELOW {
            TruthCategory::Neutral
        } else if truth_index < CATEGORY_LIKELY_BELOW {
            TruthCategory::Likely
        } else {
            TruthCategory::TrueLike
        }
    }

    /// Rank 0 (Impossible) ..= 4 (TrueLike)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            TruthCategory::Impossible => "\x1b[31m", // Red
            TruthCategory::Unlikely => "\x1b[91m",   // Light red
            TruthCategory::Neutral => "\x1b[33m",    // Yellow
            TruthCategory::Likely => "\x1b[92m",     // Light green
            TruthCategory::TrueLike => "\x1b[32m",   // Green
        }
    }
}

impl std::fmt::Display for TruthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TruthCategory::Impossible => "IMPOSSIBLE",
            TruthCategory::Unlikely => "UNLIKELY",
            TruthCategory::Neutral => "NEUTRAL",
            TruthCategory::Likely => "LIKELY",
            TruthCategory::TrueLike => "TRUE",
        };
        write!(f, "{}", name)
    }
}

/// Three-level tone used to drive visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualTone {
    Low,
    Neutral,
    High,
}

impl VisualTone {
    pub fn from_index(truth_index: u8) -> Self {
        if truth_index < TONE_LOW_BELOW {
            VisualTone::Low
        } else if truth_index < TONE_NEUTRAL_BELOW {
            VisualTone::Neutral
        } else {
            VisualTone::High
        }
    }

    /// Low truth cracks the orb
    pub fn shows_crack(&self) -> bool {
        *self == VisualTone::Low
    }
}
