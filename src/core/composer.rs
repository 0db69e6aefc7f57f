//! Response Composer: verdict + score for display, cleaned text for narration

use lazy_static::lazy_static;
use regex::Regex;
use crate::types::{EvaluationResult, PresentationPayload};

lazy_static! {
    /// `(...)` and `[...]` asides, with surrounding whitespace
    static ref RE_ANNOTATION: Regex = Regex::new(r"\s*(\([^)]*\)|\[[^\]]*\])\s*").unwrap();

    /// An existing truth annotation, so the display never carries two
    static ref RE_TRUTH_SUFFIX: Regex = Regex::new(r"(?i)\s*\(truth:\s*\d+%\)").unwrap();

    static ref RE_SPACES: Regex = Regex::new(r"\s+").unwrap();
}

/// Turns an evaluation into a presentation payload
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseComposer;

impl ResponseComposer {
    /// Create new composer
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, result: &EvaluationResult) -> PresentationPayload {
        let verdict = RE_TRUTH_SUFFIX.replace_all(result.verdict_text.trim(), "");
        PresentationPayload {
            display_text: format!("{} (Truth: {}%)", verdict.trim(), result.truth_index),
            narration_text: strip_annotations(&result.narration_text),
        }
    }
}

/// Remove bracketed asides so narration never reads them aloud.
/// Unbalanced brackets are dropped as well.
pub fn strip_annotations(text: &str) -> String {
    let without = RE_ANNOTATION.replace_all(text, " ");
    let cleaned: String = without
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']'))
        .collect();
    RE_SPACES.replace_all(cleaned.trim(), " ").into_owned()
}
