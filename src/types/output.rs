//! Evaluation results and the structures handed to presentation

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{RuleKind, Statement, TruthCategory, VisualTone};

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationSource {
    /// The remote completion service answered
    Remote,
    /// Remote failed or was skipped, local rules answered
    Heuristic,
    /// The evaluation path panicked; neutral default
    Fallback,
}

impl std::fmt::Display for EvaluationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EvaluationSource::Remote => "remote",
            EvaluationSource::Heuristic => "heuristic",
            EvaluationSource::Fallback => "fallback",
        };
        write!(f, "{}", name)
    }
}

/// Score plus the text that accompanies it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Always within [0, 100]
    pub truth_index: u8,
    /// Explanation meant to be read aloud
    pub narration_text: String,
    /// Short verdict shown to the user
    pub verdict_text: String,
}

impl EvaluationResult {
    /// Create a result, clamping the index into [0, 100]
    pub fn new(
        truth_index: i64,
        narration_text: impl Into<String>,
        verdict_text: impl Into<String>,
    ) -> Self {
        Self {
            truth_index: truth_index.clamp(0, 100) as u8,
            narration_text: narration_text.into(),
            verdict_text: verdict_text.into(),
        }
    }

    pub fn category(&self) -> TruthCategory {
        TruthCategory::from_index(self.truth_index)
    }

    pub fn tone(&self) -> VisualTone {
        VisualTone::from_index(self.truth_index)
    }
}

/// What presentation receives for one verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationPayload {
    /// `"<verdict> (Truth: <n>%)"`
    pub display_text: String,
    /// Narration with annotations stripped
    pub narration_text: String,
}

/// Voice parameters passed to the narration collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrationTone {
    pub pitch: f32,
    pub rate: f32,
    pub volume: f32,
}

impl Default for NarrationTone {
    fn default() -> Self {
        Self {
            pitch: 0.4,
            rate: 0.9,
            volume: 1.0,
        }
    }
}

/// Record of one completed turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    pub statement: Statement,
    pub truth_index: u8,
    pub category: TruthCategory,
    pub source: EvaluationSource,
    /// Heuristic rule, when the heuristic answered
    pub rule: Option<RuleKind>,
    pub display_text: String,
    pub narration_text: String,
}

impl Verdict {
    pub fn new(
        statement: Statement,
        result: &EvaluationResult,
        source: EvaluationSource,
        rule: Option<RuleKind>,
        payload: PresentationPayload,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            statement,
            truth_index: result.truth_index,
            category: result.category(),
            source,
            rule,
            display_text: payload.display_text,
            narration_text: payload.narration_text,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!(
            "{}🔮 truth={}% | category={} | source={}{}",
            self.category.color_code(),
            self.truth_index,
            self.category,
            self.source,
            "\x1b[0m"
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "truth={} | category={} | source={} | rule={}",
            self.truth_index,
            self.category,
            self.source,
            self.rule.map(|r| r.code()).unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_clamps_index() {
        assert_eq!(EvaluationResult::new(150, "", "").truth_index, 100);
        assert_eq!(EvaluationResult::new(-3, "", "").truth_index, 0);
        assert_eq!(EvaluationResult::new(42, "", "").truth_index, 42);
    }

    #[test]
    fn test_parseable_string_has_no_ansi() {
        let result = EvaluationResult::new(12, "n", "v");
        let payload = PresentationPayload {
            display_text: "v (Truth: 12%)".into(),
            narration_text: "n".into(),
        };
        let verdict = Verdict::new(
            Statement::new("I can fly"),
            &result,
            EvaluationSource::Heuristic,
            Some(RuleKind::H001_IMPOSSIBLE_CLAIM),
            payload,
        );
        let line = verdict.to_parseable_string();
        assert!(!line.contains('\x1b'));
        assert!(line.contains("rule=H001_IMPOSSIBLE_CLAIM"));
        assert!(line.contains("category=IMPOSSIBLE"));
    }
}
