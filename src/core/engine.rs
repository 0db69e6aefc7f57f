//! Truth Engine: remote evaluation first, heuristic classifier on any failure

use std::panic::AssertUnwindSafe;
use futures_util::FutureExt;
use rand::Rng;
use tracing::{error, info, warn};
use crate::core::classifier::HeuristicClassifier;
use crate::core::phrases;
use crate::core::remote::StatementEvaluator;
use crate::error::RemoteFailure;
use crate::types::{EvaluationResult, EvaluationSource, RuleKind, Statement};
use crate::NEUTRAL_TRUTH_INDEX;

/// One evaluation and how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: EvaluationResult,
    pub source: EvaluationSource,
    /// Set when the heuristic answered
    pub rule: Option<RuleKind>,
    /// Why the remote path was abandoned, if it was tried
    pub remote_failure: Option<RemoteFailure>,
}

impl Evaluation {
    /// Result used when the evaluation path itself broke
    pub fn neutral_default() -> Self {
        Self {
            result: EvaluationResult::new(
                i64::from(NEUTRAL_TRUTH_INDEX),
                phrases::NEUTRAL_DEFAULT_EXPLANATION,
                phrases::NEUTRAL_DEFAULT_VERDICT,
            ),
            source: EvaluationSource::Fallback,
            rule: None,
            remote_failure: None,
        }
    }
}

/// Owns the optional remote evaluator, the classifier and the random source
#[derive(Debug)]
pub struct TruthEngine<E, R> {
    remote: Option<E>,
    classifier: HeuristicClassifier,
    rng: R,
}

impl<E, R> TruthEngine<E, R>
where
    E: StatementEvaluator,
    R: Rng + Send,
{
    pub fn new(remote: Option<E>, classifier: HeuristicClassifier, rng: R) -> Self {
        Self { remote, classifier, rng }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn classifier(&self) -> &HeuristicClassifier {
        &self.classifier
    }

    /// Single remote attempt, then the classifier. Never fails.
    pub async fn evaluate(&mut self, statement: &Statement) -> Evaluation {
        let mut remote_failure = None;

        if let Some(remote) = &self.remote {
            match remote.evaluate(statement).await {
                Ok(result) => {
                    info!(truth_index = result.truth_index, "remote evaluation");
                    return Evaluation {
                        result,
                        source: EvaluationSource::Remote,
                        rule: None,
                        remote_failure: None,
                    };
                }
                Err(failure) => {
                    warn!(%failure, "remote evaluation failed, using heuristic");
                    remote_failure = Some(failure);
                }
            }
        }

        let classification = self.classifier.classify_detailed(statement, &mut self.rng);
        info!(
            truth_index = classification.result.truth_index,
            rule = classification.rule.code(),
            "heuristic evaluation"
        );
        Evaluation {
            result: classification.result,
            source: EvaluationSource::Heuristic,
            rule: Some(classification.rule),
            remote_failure,
        }
    }

    /// `evaluate`, with a panic anywhere below converted to the neutral default
    pub async fn evaluate_guarded(&mut self, statement: &Statement) -> Evaluation {
        match AssertUnwindSafe(self.evaluate(statement)).catch_unwind().await {
            Ok(evaluation) => evaluation,
            Err(_) => {
                error!("evaluation panicked, using neutral default");
                Evaluation::neutral_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Canned(Result<EvaluationResult, RemoteFailure>);

    impl StatementEvaluator for Canned {
        async fn evaluate(&self, _statement: &Statement) -> Result<EvaluationResult, RemoteFailure> {
            self.0.clone()
        }
    }

    struct Exploding;

    impl StatementEvaluator for Exploding {
        async fn evaluate(&self, _statement: &Statement) -> Result<EvaluationResult, RemoteFailure> {
            panic!("remote blew up")
        }
    }

    fn engine<E: StatementEvaluator>(remote: Option<E>) -> TruthEngine<E, StdRng> {
        TruthEngine::new(remote, HeuristicClassifier::new(), StdRng::seed_from_u64(3))
    }

    #[tokio::test]
    async fn test_remote_success_used() {
        let canned = EvaluationResult::new(77, "The stars agree.", "The stars agree.");
        let mut engine = engine(Some(Canned(Ok(canned.clone()))));
        let evaluation = engine.evaluate(&Statement::new("I can fly")).await;
        assert_eq!(evaluation.source, EvaluationSource::Remote);
        assert_eq!(evaluation.result, canned);
        assert_eq!(evaluation.rule, None);
    }

    #[tokio::test]
    async fn test_every_failure_falls_back() {
        let failures = [
            RemoteFailure::Timeout(Duration::from_millis(8000)),
            RemoteFailure::HttpError(503),
            RemoteFailure::ParseError("bad json".into()),
            RemoteFailure::Network("refused".into()),
            RemoteFailure::NotConfigured,
        ];
        for failure in failures {
            let mut engine = engine(Some(Canned(Err(failure.clone()))));
            let evaluation = engine.evaluate(&Statement::new("I can fly")).await;
            assert_eq!(evaluation.source, EvaluationSource::Heuristic);
            assert_eq!(evaluation.rule, Some(RuleKind::H001_IMPOSSIBLE_CLAIM));
            assert_eq!(evaluation.remote_failure, Some(failure));
        }
    }

    #[tokio::test]
    async fn test_no_remote_goes_straight_to_heuristic() {
        let mut engine = engine::<Canned>(None);
        let evaluation = engine.evaluate(&Statement::new("My name is Alex")).await;
        assert_eq!(evaluation.source, EvaluationSource::Heuristic);
        assert_eq!(evaluation.remote_failure, None);
        assert!((70..=94).contains(&evaluation.result.truth_index));
    }

    #[tokio::test]
    async fn test_panic_becomes_neutral_default() {
        let mut engine = engine(Some(Exploding));
        let evaluation = engine.evaluate_guarded(&Statement::new("anything")).await;
        assert_eq!(evaluation, Evaluation::neutral_default());
        assert_eq!(evaluation.result.truth_index, 50);
        assert_eq!(evaluation.source, EvaluationSource::Fallback);
    }
}
