//! Which heuristic rule produced a score

use serde::{Deserialize, Serialize};

/// Rule codes for the heuristic decision list, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum RuleKind {
    // =========================================================================
    // H001: Claims nobody can make truthfully
    // =========================================================================
    /// Supernatural ability, inhuman age, invented physics, other planets
    H001_IMPOSSIBLE_CLAIM,
    /// A living speaker declaring death
    H001_SELF_CONTRADICTION,

    // =========================================================================
    // H002: Personal identity
    // =========================================================================
    /// Name, small age, preference, feeling, whereabouts
    H002_PERSONAL_STATEMENT,

    // =========================================================================
    // H003: Common knowledge
    // =========================================================================
    H003_FLAT_EARTH,
    H003_ROUND_EARTH,
    H003_BLUE_SKY,
    H003_WET_WATER,
    /// Matched the factual gate but no known answer
    H003_UNVERIFIED_FACT,

    // =========================================================================
    // H004: Everything else
    // =========================================================================
    /// Keyword, length and jitter scoring
    H004_LEXICAL,
}

impl RuleKind {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::H001_IMPOSSIBLE_CLAIM => "H001_IMPOSSIBLE_CLAIM",
            Self::H001_SELF_CONTRADICTION => "H001_SELF_CONTRADICTION",
            Self::H002_PERSONAL_STATEMENT => "H002_PERSONAL_STATEMENT",
            Self::H003_FLAT_EARTH => "H003_FLAT_EARTH",
            Self::H003_ROUND_EARTH => "H003_ROUND_EARTH",
            Self::H003_BLUE_SKY => "H003_BLUE_SKY",
            Self::H003_WET_WATER => "H003_WET_WATER",
            Self::H003_UNVERIFIED_FACT => "H003_UNVERIFIED_FACT",
            Self::H004_LEXICAL => "H004_LEXICAL",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::H001_IMPOSSIBLE_CLAIM => "Impossible claim",
            Self::H001_SELF_CONTRADICTION => "Self-contradiction",
            Self::H002_PERSONAL_STATEMENT => "Personal statement",
            Self::H003_FLAT_EARTH => "Flat earth claim",
            Self::H003_ROUND_EARTH => "Round earth claim",
            Self::H003_BLUE_SKY => "Blue sky claim",
            Self::H003_WET_WATER => "Wet water claim",
            Self::H003_UNVERIFIED_FACT => "Unverifiable factual claim",
            Self::H004_LEXICAL => "General statement",
        }
    }

    /// True for the common-knowledge family
    pub fn is_factual(&self) -> bool {
        matches!(
            self,
            Self::H003_FLAT_EARTH
                | Self::H003_ROUND_EARTH
                | Self::H003_BLUE_SKY
                | Self::H003_WET_WATER
                | Self::H003_UNVERIFIED_FACT
        )
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
