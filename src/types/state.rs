//! Interaction state definitions

use serde::{Deserialize, Serialize};

/// The four possible states of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionState {
    /// Nothing in flight, waiting for an activation
    Idle,
    /// Listening for an utterance
    Capturing,
    /// One statement is being judged
    Evaluating,
    /// Verdict delivered, narration playing
    Presenting,
}

impl InteractionState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            InteractionState::Idle => "\x1b[90m",       // Gray
            InteractionState::Capturing => "\x1b[36m",  // Cyan
            InteractionState::Evaluating => "\x1b[35m", // Magenta
            InteractionState::Presenting => "\x1b[33m", // Yellow
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            InteractionState::Idle => "🔮",
            InteractionState::Capturing => "👂",
            InteractionState::Evaluating => "🌀",
            InteractionState::Presenting => "✨",
        }
    }

    /// Whether a capture may be requested from this state
    pub fn accepts_capture(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

impl std::fmt::Display for InteractionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InteractionState::Idle => "IDLE",
            InteractionState::Capturing => "CAPTURING",
            InteractionState::Evaluating => "EVALUATING",
            InteractionState::Presenting => "PRESENTING",
        };
        write!(f, "{}", name)
    }
}
