//! Boundaries to the excluded devices: capture, narration, presentation
//!
//! The controller only ever talks to these traits. Terminal implementations
//! live in `core::console`.

use std::collections::VecDeque;
use std::future::Future;
use crate::error::CaptureError;
use crate::types::{
    InteractionState, NarrationTone, PresentationPayload, Statement, TruthCategory, VisualTone,
};

/// Source of finalized utterances
pub trait Capture {
    /// Listen until one utterance is finalized, or fail
    fn capture(&mut self) -> impl Future<Output = Result<Statement, CaptureError>>;
}

/// Speech output. Fire-and-forget: the controller estimates duration itself.
pub trait Narrator: Send + Sync + 'static {
    fn speak(&self, text: &str, tone: NarrationTone);
}

/// Visual output
pub trait Presenter: Send + Sync + 'static {
    /// Echo what the user said
    fn show_statement(&self, _statement: &Statement) {}

    /// Deliver a verdict
    fn present(&self, payload: &PresentationPayload, category: TruthCategory, tone: VisualTone);

    /// Orb messages that are not verdicts (greeting, apologies, mode changes)
    fn notice(&self, message: &str);

    /// Indicators such as "listening" / "analyzing"
    fn state_changed(&self, _state: InteractionState) {}

    /// Return to the neutral baseline
    fn reset(&self);
}

/// Capture that replays prepared outcomes, then reports cancellation
#[derive(Debug, Default)]
pub struct ScriptedCapture {
    queue: VecDeque<Result<Statement, CaptureError>>,
}

impl ScriptedCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single utterance
    pub fn once(statement: impl Into<Statement>) -> Self {
        let mut capture = Self::new();
        capture.push(Ok(statement.into()));
        capture
    }

    pub fn push(&mut self, outcome: Result<Statement, CaptureError>) {
        self.queue.push_back(outcome);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Capture for ScriptedCapture {
    async fn capture(&mut self) -> Result<Statement, CaptureError> {
        self.queue.pop_front().unwrap_or(Err(CaptureError::Cancelled))
    }
}
