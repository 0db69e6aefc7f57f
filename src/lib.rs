//! Truth Orb: scores short statements and runs the listen → judge → speak loop
//!
//! Evaluation path: RemoteEvaluator → (on any failure) HeuristicClassifier
//! → ResponseComposer → presentation + narration collaborators.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// CATEGORY THRESHOLDS
// =============================================================================

/// Below this truth index a statement is Impossible
pub const CATEGORY_IMPOSSIBLE_BELOW: u8 = 20;

/// Below this truth index a statement is Unlikely
pub const CATEGORY_UNLIKELY_BELOW: u8 = 40;

/// Below this truth index a statement is Neutral
pub const CATEGORY_NEUTRAL_BELOW: u8 = 60;

/// Below this truth index a statement is Likely, otherwise TrueLike
pub const CATEGORY_LIKELY_BELOW: u8 = 80;

/// Visual tone thresholds (coarser than categories)
pub const TONE_LOW_BELOW: u8 = 30;
pub const TONE_NEUTRAL_BELOW: u8 = 60;

// =============================================================================
// HEURISTIC TUNING
// =============================================================================

/// Lexical fallback starts here
pub const LEXICAL_BASE_SCORE: i32 = 50;

/// Per absolutist keyword (subtracted) or hedging keyword (added)
pub const KEYWORD_DELTA: i32 = 8;

/// Statements shorter than this lose `LENGTH_DELTA`
pub const SHORT_STATEMENT_CHARS: usize = 10;

/// Statements longer than this gain `LENGTH_DELTA`
pub const LONG_STATEMENT_CHARS: usize = 40;

pub const LENGTH_DELTA: i32 = 5;

/// Jitter is drawn from [-JITTER_SPAN, JITTER_SPAN)
pub const JITTER_SPAN: i32 = 10;

/// Every heuristic score is clamped into [SCORE_FLOOR, SCORE_CEILING]
pub const SCORE_FLOOR: u8 = 5;
pub const SCORE_CEILING: u8 = 95;

/// Score used when the remote reply carries no marker, or a turn blew up
pub const NEUTRAL_TRUTH_INDEX: u8 = 50;

// =============================================================================
// TIMINGS
// =============================================================================

/// Hard client-side limit for one remote evaluation
pub const REMOTE_TIMEOUT_MS: u64 = 8000;

/// Narration estimate: characters × this
pub const NARRATION_MS_PER_CHAR: u64 = 80;

/// Pause after the estimated narration before auto-loop re-arms capture
pub const NARRATION_PAUSE_MS: u64 = 1000;

/// Presentation returns to its neutral baseline after this long
pub const PRESENTATION_RESET_MS: u64 = 5000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
