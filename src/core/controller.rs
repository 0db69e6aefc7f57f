//! Conversation Controller: the interaction state machine
//!
//! State transitions:
//! - IDLE → CAPTURING: start capture (rejected from any other state)
//! - CAPTURING → EVALUATING: utterance finalized
//! - CAPTURING → IDLE: capture error (apology) or manual cancel (silent)
//! - EVALUATING → PRESENTING: result ready, verdict delivered
//! - PRESENTING → CAPTURING: auto-loop armed, after the narration estimate
//! - PRESENTING → IDLE: auto-loop disarmed
//!
//! Every change of `state` goes through `transition`.

use std::sync::Arc;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use crate::config::{NarrationConfig, OrbConfig, PresentationConfig};
use crate::core::collaborators::{Capture, Narrator, Presenter};
use crate::core::composer::{strip_annotations, ResponseComposer};
use crate::core::engine::TruthEngine;
use crate::core::phrases;
use crate::core::remote::StatementEvaluator;
use crate::error::{CaptureError, ControllerError};
use crate::types::{Gesture, InteractionState, Statement, Verdict};

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    StartCapture,
    Finalized,
    CaptureFailed,
    Cancel,
    ResultReady,
    PresentationDone,
}

impl TurnEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TurnEvent::StartCapture => "start_capture",
            TurnEvent::Finalized => "finalized",
            TurnEvent::CaptureFailed => "capture_failed",
            TurnEvent::Cancel => "cancel",
            TurnEvent::ResultReady => "result_ready",
            TurnEvent::PresentationDone => "presentation_done",
        }
    }
}

/// How a turn ended
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    Presented(Verdict),
    CaptureFailed(CaptureError),
    Cancelled,
}

pub struct ConversationController<E, R, N, P> {
    state: InteractionState,
    auto_loop: bool,
    engine: TruthEngine<E, R>,
    composer: ResponseComposer,
    narrator: Arc<N>,
    presenter: Arc<P>,
    narration: NarrationConfig,
    presentation: PresentationConfig,
    /// When PRESENTING may hand over to CAPTURING
    rearm_at: Option<Instant>,
    /// Pending return to the neutral baseline
    reset_timer: Option<JoinHandle<()>>,
    turn_count: u64,
    last_verdict: Option<Verdict>,
}

impl<E, R, N, P> ConversationController<E, R, N, P>
where
    E: StatementEvaluator,
    R: Rng + Send,
    N: Narrator,
    P: Presenter,
{
    pub fn new(engine: TruthEngine<E, R>, narrator: Arc<N>, presenter: Arc<P>, config: &OrbConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            auto_loop: false,
            engine,
            composer: ResponseComposer::new(),
            narrator,
            presenter,
            narration: config.narration.clone(),
            presentation: config.presentation.clone(),
            rearm_at: None,
            reset_timer: None,
            turn_count: 0,
            last_verdict: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn auto_loop(&self) -> bool {
        self.auto_loop
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn last_verdict(&self) -> Option<&Verdict> {
        self.last_verdict.as_ref()
    }

    /// Deadline for the auto-loop re-arm, while one is pending
    pub fn rearm_at(&self) -> Option<Instant> {
        self.rearm_at
    }

    /// The single place where `state` changes
    fn transition(&mut self, event: TurnEvent) -> Result<InteractionState, ControllerError> {
        use InteractionState::*;

        let next = match (self.state, event) {
            (Idle, TurnEvent::StartCapture) => Capturing,
            (from, TurnEvent::StartCapture) => return Err(ControllerError::Busy(from)),
            (Capturing, TurnEvent::Finalized) => Evaluating,
            (Capturing, TurnEvent::CaptureFailed) | (Capturing, TurnEvent::Cancel) => Idle,
            (Evaluating, TurnEvent::ResultReady) => Presenting,
            (Presenting, TurnEvent::PresentationDone) => {
                if self.auto_loop {
                    Capturing
                } else {
                    Idle
                }
            }
            (from, event) => {
                return Err(ControllerError::InvalidTransition {
                    from,
                    event: event.name(),
                })
            }
        };

        debug!(from = %self.state, to = %next, event = event.name(), "transition");
        self.state = next;
        if next == Capturing {
            self.flush_reset();
        }
        self.presenter.state_changed(next);
        Ok(next)
    }

    /// Present and narrate the welcome message
    pub fn greet(&self) {
        self.presenter.notice(phrases::WELCOME);
        self.narrator.speak(&strip_annotations(phrases::WELCOME.trim_end_matches(" ✨")), self.narration.tone());
    }

    /// User activation: IDLE → CAPTURING
    pub fn start_capture(&mut self) -> Result<(), ControllerError> {
        self.transition(TurnEvent::StartCapture).map(|_| ())
    }

    /// Explicit stop: CAPTURING → IDLE without evaluation
    pub fn cancel_capture(&mut self) -> Result<(), ControllerError> {
        self.transition(TurnEvent::Cancel)?;
        info!("capture cancelled");
        Ok(())
    }

    /// Capture produced nothing: apologise, CAPTURING → IDLE
    pub fn capture_failed(&mut self, error: &CaptureError) -> Result<(), ControllerError> {
        if *error == CaptureError::Cancelled {
            return self.cancel_capture();
        }
        self.transition(TurnEvent::CaptureFailed)?;
        info!(%error, "capture failed");
        let message = match error {
            CaptureError::NoSpeech => phrases::CAPTURE_APOLOGY,
            CaptureError::Device(_) => phrases::CAPTURE_START_FAILED,
            CaptureError::Unsupported => phrases::CAPTURE_UNSUPPORTED,
            CaptureError::Cancelled => return Ok(()),
        };
        self.presenter.notice(message);
        Ok(())
    }

    /// Utterance finalized: evaluate, compose and deliver.
    ///
    /// Leaves the controller in PRESENTING when auto-loop is armed (see
    /// `settle`), otherwise in IDLE.
    pub async fn submit(&mut self, statement: Statement) -> Result<Verdict, ControllerError> {
        self.transition(TurnEvent::Finalized)?;
        self.presenter.show_statement(&statement);

        let evaluation = self.engine.evaluate_guarded(&statement).await;

        self.transition(TurnEvent::ResultReady)?;
        let result = evaluation.result;
        let payload = self.composer.compose(&result);
        let category = result.category();

        self.presenter.present(&payload, category, result.tone());
        self.narrator.speak(&payload.narration_text, self.narration.tone());
        self.schedule_reset();

        let verdict = Verdict::new(statement, &result, evaluation.source, evaluation.rule, payload);
        self.turn_count += 1;
        self.last_verdict = Some(verdict.clone());
        info!(
            turn = self.turn_count,
            truth_index = verdict.truth_index,
            category = %verdict.category,
            source = %verdict.source,
            "verdict presented"
        );

        if self.auto_loop {
            self.rearm_at = Some(Instant::now() + self.narration.estimate(&verdict.narration_text));
        } else {
            self.transition(TurnEvent::PresentationDone)?;
        }
        Ok(verdict)
    }

    /// Leave PRESENTING. With auto-loop armed this waits out the narration
    /// estimate and re-enters CAPTURING; otherwise it returns to IDLE at once.
    pub async fn settle(&mut self) -> InteractionState {
        if self.state != InteractionState::Presenting {
            return self.state;
        }
        if let Some(at) = self.rearm_at.take() {
            if self.auto_loop {
                tokio::time::sleep_until(at).await;
            }
        }
        // PRESENTING always accepts PresentationDone
        self.transition(TurnEvent::PresentationDone).unwrap_or(self.state)
    }

    /// One full turn. Starts a capture unless auto-loop already re-armed one.
    pub async fn run_turn<C: Capture>(&mut self, capture: &mut C) -> Result<TurnOutcome, ControllerError> {
        if self.state != InteractionState::Capturing {
            self.start_capture()?;
        }

        match capture.capture().await {
            Ok(statement) => {
                let verdict = self.submit(statement).await?;
                self.settle().await;
                Ok(TurnOutcome::Presented(verdict))
            }
            Err(CaptureError::Cancelled) => {
                self.cancel_capture()?;
                Ok(TurnOutcome::Cancelled)
            }
            Err(error) => {
                self.capture_failed(&error)?;
                Ok(TurnOutcome::CaptureFailed(error))
            }
        }
    }

    /// Arm or disarm auto-loop. Never changes the interaction state.
    /// Returns whether the flag changed.
    pub fn apply_gesture(&mut self, gesture: Gesture) -> bool {
        let armed = gesture.apply(self.auto_loop);
        if armed == self.auto_loop {
            return false;
        }
        self.auto_loop = armed;
        info!(?gesture, auto_loop = armed, "auto-loop toggled");

        let message = if armed { phrases::AUTO_LOOP_ON } else { phrases::AUTO_LOOP_OFF };
        self.presenter.notice(message);
        self.narrator.speak(message, self.narration.tone());
        true
    }

    /// Replace any pending reset with a fresh one
    fn schedule_reset(&mut self) {
        if let Some(timer) = self.reset_timer.take() {
            timer.abort();
        }
        let presenter = Arc::clone(&self.presenter);
        let delay = self.presentation.reset_after();
        self.reset_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            presenter.reset();
        }));
    }

    /// New turn: a pending reset must not fire later over a newer verdict,
    /// so cancel it and reset now
    fn flush_reset(&mut self) {
        if let Some(timer) = self.reset_timer.take() {
            if !timer.is_finished() {
                timer.abort();
                self.presenter.reset();
            }
        }
    }
}

impl<E, R, N, P> Drop for ConversationController<E, R, N, P> {
    fn drop(&mut self) {
        if let Some(timer) = self.reset_timer.take() {
            timer.abort();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
