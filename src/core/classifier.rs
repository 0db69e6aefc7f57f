//! Heuristic Classifier: rule-ordered local scoring when no remote verdict exists
//!
//! Rules are tried top to bottom on the trimmed, lower-cased statement and the
//! first match wins:
//! 1. impossible claims          → [10, 24]
//! 2. self-contradiction         → [5, 14]
//! 3. personal identity          → [70, 94]
//! 4. common-knowledge templates → per-fact ranges
//! 5. lexical scoring            → 50 ± keywords ± length ± jitter
//!
//! Every branch is clamped into [floor, ceiling] (5..=95 by default).

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use tracing::debug;
use crate::config::ScoringConfig;
use crate::core::phrases;
use crate::types::{EvaluationResult, RuleKind, Statement, TruthCategory};
use crate::LEXICAL_BASE_SCORE;

/// Absolutist words; each one present costs `keyword_delta`
pub const ABSOLUTIST_KEYWORDS: &[&str] = &[
    "never", "always", "impossible", "everyone", "nobody",
    "all", "best", "worst", "perfect", "definitely",
    "absolutely", "completely", "totally", "certainly",
];

/// Hedging words; each one present earns `keyword_delta`
pub const HEDGING_KEYWORDS: &[&str] = &[
    "sometimes", "often", "maybe", "probably", "approximately",
    "about", "seem", "think", "believe", "possibly",
    "perhaps", "around", "typically", "generally", "usually",
];

/// Confidence gained per matched lexical keyword
const KEYWORD_CONFIDENCE: f64 = 0.05;

/// How a matched rule turns into a score
#[derive(Debug, Clone, Copy)]
enum Scoring {
    /// `low + uniform[0, span)`
    Range { low: i32, span: i32 },
    /// Look the statement up in `FACTS`
    Factual,
}

#[derive(Debug)]
struct Rule {
    kind: RuleKind,
    patterns: Vec<Regex>,
    scoring: Scoring,
    confidence: f64,
}

impl Rule {
    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

/// Known facts: any needle present selects the range
struct Fact {
    needles: &'static [&'static str],
    kind: RuleKind,
    low: i32,
    span: i32,
    confidence: f64,
}

const FACTS: &[Fact] = &[
    Fact {
        needles: &["earth is flat", "world is flat"],
        kind: RuleKind::H003_FLAT_EARTH,
        low: 5,
        span: 10,
        confidence: 0.95,
    },
    Fact {
        needles: &["earth is round", "earth is a sphere", "world is round", "world is a sphere"],
        kind: RuleKind::H003_ROUND_EARTH,
        low: 85,
        span: 15,
        confidence: 0.95,
    },
    Fact {
        needles: &["sky is blue"],
        kind: RuleKind::H003_BLUE_SKY,
        low: 75,
        span: 15,
        confidence: 0.9,
    },
    Fact {
        needles: &["water is wet"],
        kind: RuleKind::H003_WET_WATER,
        low: 70,
        span: 20,
        confidence: 0.8,
    },
];

/// Factual-gate matches with no entry in `FACTS`
const UNVERIFIED_FACT: (i32, i32, f64) = (40, 30, 0.5);

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

lazy_static! {
    // =========================================================================
    // Priority-ordered decision list (lexical scoring is the implicit last rule)
    // =========================================================================
    static ref RULES: Vec<Rule> = vec![
        Rule {
            kind: RuleKind::H001_IMPOSSIBLE_CLAIM,
            patterns: compile(&[
                r"i (can|could) fly( without|$)",
                r"i am (a|an) (superhero|immortal|god|deity|vampire|werewolf|ghost)",
                r"i am \d{3,}( years old| centuries old)",
                r"i (invented|created) (the internet|electricity|gravity)",
                r"i (am|was) (on|at) (mars|the moon|jupiter)",
                r"i can (read minds|see the future|teleport|move objects)",
            ]),
            scoring: Scoring::Range { low: 10, span: 15 },
            confidence: 0.9,
        },
        Rule {
            kind: RuleKind::H001_SELF_CONTRADICTION,
            patterns: compile(&[
                r"i am dead",
                r"i (am not|ain'?t) alive",
            ]),
            scoring: Scoring::Range { low: 5, span: 10 },
            confidence: 0.9,
        },
        Rule {
            kind: RuleKind::H002_PERSONAL_STATEMENT,
            patterns: compile(&[
                r"my name is",
                r"i am \d{1,2}( years old)",
                r"i (like|love|enjoy|prefer)",
                r"i am (at|in) (home|work|school)",
                r"i am (happy|sad|tired|excited|angry)",
            ]),
            scoring: Scoring::Range { low: 70, span: 25 },
            confidence: 0.7,
        },
        Rule {
            kind: RuleKind::H003_UNVERIFIED_FACT,
            patterns: compile(&[
                r"the (earth|world) is (flat|round|a sphere)",
                r"the sky is (blue|red|green)",
                r"water is (wet|dry)",
                r"(trump|biden|obama) is (the president)",
            ]),
            scoring: Scoring::Factual,
            confidence: 0.5,
        },
    ];
}

/// Full classifier output, including the bookkeeping behind the score
#[derive(Debug, Clone)]
pub struct Classification {
    pub result: EvaluationResult,
    pub rule: RuleKind,
    /// Tracked for diagnostics only; never changes the score
    pub confidence: f64,
    /// Score before clamping
    pub raw_score: i32,
}

impl Classification {
    pub fn category(&self) -> TruthCategory {
        self.result.category()
    }
}

/// Deterministic-given-the-RNG rule-based scorer. Never fails.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    scoring: ScoringConfig,
}

impl HeuristicClassifier {
    /// Create classifier with default tuning
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scoring(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Score a statement
    pub fn classify<R: Rng + ?Sized>(&self, statement: &Statement, rng: &mut R) -> EvaluationResult {
        self.classify_detailed(statement, rng).result
    }

    /// Score a statement and report which rule fired
    pub fn classify_detailed<R: Rng + ?Sized>(
        &self,
        statement: &Statement,
        rng: &mut R,
    ) -> Classification {
        let text = statement.normalized();

        let (raw_score, rule, confidence) = match RULES.iter().find(|r| r.matches(&text)) {
            Some(rule) => match rule.scoring {
                Scoring::Range { low, span } => (low + rng.gen_range(0..span), rule.kind, rule.confidence),
                Scoring::Factual => score_fact(&text, rng),
            },
            None => self.score_lexical(&text, rng),
        };

        let floor = i32::from(self.scoring.floor);
        let ceiling = i32::from(self.scoring.ceiling);
        // Category and phrases follow the index that is actually reported
        let truth_index = raw_score.max(floor).min(ceiling).clamp(0, 100);
        let category = TruthCategory::from_index(truth_index as u8);

        let (mut verdict, mut explanation) = phrases::pick(category, rng);
        if rule == RuleKind::H001_SELF_CONTRADICTION && text.contains("dead") {
            verdict = phrases::PARADOX_VERDICT;
            explanation = phrases::PARADOX_EXPLANATION;
        }

        debug!(
            rule = rule.code(),
            raw_score,
            truth_index,
            confidence,
            "heuristic classification"
        );

        Classification {
            result: EvaluationResult::new(i64::from(truth_index), explanation, verdict),
            rule,
            confidence,
            raw_score,
        }
    }

    /// Fallback: keywords, length and jitter around the neutral base
    fn score_lexical<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> (i32, RuleKind, f64) {
        let delta = self.scoring.keyword_delta;
        let mut score = LEXICAL_BASE_SCORE;
        let mut confidence = 0.0;

        for keyword in ABSOLUTIST_KEYWORDS {
            if text.contains(keyword) {
                score = score.saturating_sub(delta);
                confidence += KEYWORD_CONFIDENCE;
            }
        }
        for keyword in HEDGING_KEYWORDS {
            if text.contains(keyword) {
                score = score.saturating_add(delta);
                confidence += KEYWORD_CONFIDENCE;
            }
        }

        let length = text.chars().count();
        if length < self.scoring.short_len {
            score = score.saturating_sub(self.scoring.length_delta);
        } else if length > self.scoring.long_len {
            score = score.saturating_add(self.scoring.length_delta);
        }

        let jitter = self.scoring.jitter;
        if jitter > 0 {
            score = score.saturating_add(rng.gen_range(-jitter..jitter));
        }

        (score, RuleKind::H004_LEXICAL, confidence)
    }
}

fn score_fact<R: Rng + ?Sized>(text: &str, rng: &mut R) -> (i32, RuleKind, f64) {
    for fact in FACTS {
        if fact.needles.iter().any(|needle| text.contains(needle)) {
            return (fact.low + rng.gen_range(0..fact.span), fact.kind, fact.confidence);
        }
    }
    let (low, span, confidence) = UNVERIFIED_FACT;
    (low + rng.gen_range(0..span), RuleKind::H003_UNVERIFIED_FACT, confidence)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classify_many(text: &str, runs: u64) -> Vec<Classification> {
        let classifier = HeuristicClassifier::new();
        let statement = Statement::new(text);
        (0..runs)
            .map(|seed| classifier.classify_detailed(&statement, &mut StdRng::seed_from_u64(seed)))
            .collect()
    }

    fn assert_range(text: &str, low: u8, high: u8, rule: RuleKind) {
        for c in classify_many(text, 200) {
            assert_eq!(c.rule, rule, "wrong rule for {:?}", text);
            let index = c.result.truth_index;
            assert!(
                (low..=high).contains(&index),
                "{:?} scored {} outside [{}, {}]",
                text, index, low, high
            );
        }
    }

    #[test]
    fn test_impossible_claims() {
        assert_range("I can fly without any help", 10, 24, RuleKind::H001_IMPOSSIBLE_CLAIM);
        assert_range("I can fly", 10, 24, RuleKind::H001_IMPOSSIBLE_CLAIM);
        assert_range("I am a vampire", 10, 24, RuleKind::H001_IMPOSSIBLE_CLAIM);
        assert_range("I am 300 years old", 10, 24, RuleKind::H001_IMPOSSIBLE_CLAIM);
        assert_range("I invented the internet", 10, 24, RuleKind::H001_IMPOSSIBLE_CLAIM);
        assert_range("I was on the moon yesterday", 10, 24, RuleKind::H001_IMPOSSIBLE_CLAIM);
        assert_range("i can read minds", 10, 24, RuleKind::H001_IMPOSSIBLE_CLAIM);
    }

    #[test]
    fn test_flying_needs_end_or_without() {
        let c = &classify_many("I can fly planes for a living", 1)[0];
        assert_ne!(c.rule, RuleKind::H001_IMPOSSIBLE_CLAIM);
    }

    #[test]
    fn test_self_contradiction() {
        assert_range("I am dead", 5, 14, RuleKind::H001_SELF_CONTRADICTION);
        assert_range("I ain't alive", 5, 14, RuleKind::H001_SELF_CONTRADICTION);
    }

    #[test]
    fn test_paradox_override_only_with_dead() {
        for c in classify_many("I am dead", 20) {
            assert_eq!(c.result.verdict_text, phrases::PARADOX_VERDICT);
            assert_eq!(c.result.narration_text, phrases::PARADOX_EXPLANATION);
        }
        for c in classify_many("I am not alive", 20) {
            assert_ne!(c.result.verdict_text, phrases::PARADOX_VERDICT);
            assert!(phrases::verdicts(c.category()).contains(&c.result.verdict_text.as_str()));
        }
    }

    #[test]
    fn test_personal_statements() {
        assert_range("My name is Alex", 70, 94, RuleKind::H002_PERSONAL_STATEMENT);
        assert_range("I am 34 years old", 70, 94, RuleKind::H002_PERSONAL_STATEMENT);
        assert_range("I love pizza", 70, 94, RuleKind::H002_PERSONAL_STATEMENT);
        assert_range("I am at home", 70, 94, RuleKind::H002_PERSONAL_STATEMENT);
        assert_range("I am tired", 70, 94, RuleKind::H002_PERSONAL_STATEMENT);
    }

    #[test]
    fn test_factual_templates() {
        assert_range("The earth is flat", 5, 14, RuleKind::H003_FLAT_EARTH);
        assert_range("the world is flat", 5, 14, RuleKind::H003_FLAT_EARTH);
        // 85..=99 before the clamp
        assert_range("The earth is round", 85, 95, RuleKind::H003_ROUND_EARTH);
        assert_range("The world is a sphere", 85, 95, RuleKind::H003_ROUND_EARTH);
        assert_range("The sky is blue", 75, 89, RuleKind::H003_BLUE_SKY);
        assert_range("Water is wet", 70, 89, RuleKind::H003_WET_WATER);
        assert_range("The sky is green", 40, 69, RuleKind::H003_UNVERIFIED_FACT);
        assert_range("Water is dry", 40, 69, RuleKind::H003_UNVERIFIED_FACT);
    }

    #[test]
    fn test_first_match_wins() {
        // Impossible beats personal even though "i love" also matches
        let c = &classify_many("I love that I can fly", 1)[0];
        assert_eq!(c.rule, RuleKind::H001_IMPOSSIBLE_CLAIM);
    }

    #[test]
    fn test_trimmed_and_case_insensitive() {
        assert_range("   MY NAME IS ALEX   ", 70, 94, RuleKind::H002_PERSONAL_STATEMENT);
    }

    #[test]
    fn test_lexical_without_jitter() {
        let scoring = ScoringConfig { jitter: 0, ..ScoringConfig::default() };
        let classifier = HeuristicClassifier::with_scoring(scoring);
        let mut rng = StdRng::seed_from_u64(0);

        // 17 chars, no keywords: neither short nor long
        let c = classifier.classify_detailed(&Statement::new("Cats chase string"), &mut rng);
        assert_eq!(c.rule, RuleKind::H004_LEXICAL);
        assert_eq!(c.result.truth_index, 50);

        // "never" and "always": -16
        let c = classifier.classify_detailed(&Statement::new("He never, always"), &mut rng);
        assert_eq!(c.result.truth_index, 34);

        // "maybe" +8, short -5
        let c = classifier.classify_detailed(&Statement::new("maybe"), &mut rng);
        assert_eq!(c.result.truth_index, 53);

        // "probably" + "often" +16, long +5
        let c = classifier.classify_detailed(
            &Statement::new("The bus probably arrives late on weekdays, often"),
            &mut rng,
        );
        assert_eq!(c.result.truth_index, 71);
        assert!((c.confidence - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_lexical_clamps_to_floor() {
        let scoring = ScoringConfig { jitter: 0, ..ScoringConfig::default() };
        let classifier = HeuristicClassifier::with_scoring(scoring);
        let text = "never always impossible everyone nobody best worst perfect definitely";
        let c = classifier.classify_detailed(&Statement::new(text), &mut StdRng::seed_from_u64(0));
        assert!(c.raw_score < 5);
        assert_eq!(c.result.truth_index, 5);
    }

    #[test]
    fn test_extreme_deltas_saturate() {
        let scoring = ScoringConfig {
            keyword_delta: i32::MAX,
            length_delta: i32::MAX,
            jitter: i32::MAX,
            ..ScoringConfig::default()
        };
        let classifier = HeuristicClassifier::with_scoring(scoring);
        let mut rng = StdRng::seed_from_u64(0);
        for text in ["never always", "maybe perhaps probably, often and usually around noon", "x"] {
            let c = classifier.classify_detailed(&Statement::new(text), &mut rng);
            assert!((5..=95).contains(&c.result.truth_index));
        }
    }

    #[test]
    fn test_category_follows_reported_index() {
        let scoring = ScoringConfig { floor: 150, ceiling: 200, jitter: 0, ..ScoringConfig::default() };
        let classifier = HeuristicClassifier::with_scoring(scoring);
        let c = classifier.classify_detailed(&Statement::new("I can fly"), &mut StdRng::seed_from_u64(0));
        assert_eq!(c.result.truth_index, 100);
        assert_eq!(c.category(), TruthCategory::TrueLike);
        assert!(phrases::verdicts(TruthCategory::TrueLike).contains(&c.result.verdict_text.as_str()));
    }

    #[test]
    fn test_empty_statement_is_general() {
        for c in classify_many("", 200) {
            assert_eq!(c.rule, RuleKind::H004_LEXICAL);
            // 50 - 5 (short) + [-10, 10)
            assert!((35..=54).contains(&c.result.truth_index));
        }
    }

    #[test]
    fn test_bounds_hold_for_all_inputs() {
        let inputs = [
            "", " ", "?", "I am dead", "The earth is round", "The world is round and flat",
            "absolutely certainly totally completely definitely never always",
            "maybe perhaps possibly probably usually generally typically around about i think i believe it seems",
            "ünïcödé ✨ 🔮", "I am 9999999999999999999999 years old",
        ];
        for text in inputs {
            for c in classify_many(text, 100) {
                let index = c.result.truth_index;
                assert!((5..=95).contains(&index), "{:?} produced {}", text, index);
            }
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let classifier = HeuristicClassifier::new();
        let statement = Statement::new("I think the train is usually on time");
        let a = classifier.classify(&statement, &mut StdRng::seed_from_u64(42));
        let b = classifier.classify(&statement, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
