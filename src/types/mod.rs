//! Core types for Truth Orb

mod state;
mod category;
mod output;
mod reason;
mod statement;
mod gesture;

pub use state::InteractionState;
pub use category::{TruthCategory, VisualTone};
pub use output::{EvaluationResult, EvaluationSource, PresentationPayload, NarrationTone, Verdict};
pub use reason::RuleKind;
pub use statement::Statement;
pub use gesture::Gesture;
