//! Core modules for the Truth Orb

pub mod phrases;
pub mod classifier;
pub mod composer;
pub mod remote;
pub mod engine;
pub mod collaborators;
pub mod controller;
pub mod console;
pub mod api;

pub use classifier::{Classification, HeuristicClassifier};
pub use composer::{strip_annotations, ResponseComposer};
pub use remote::{parse_reply, RemoteEvaluator, StatementEvaluator};
pub use engine::{Evaluation, TruthEngine};
pub use collaborators::{Capture, Narrator, Presenter, ScriptedCapture};
pub use controller::{ConversationController, TurnEvent, TurnOutcome};
pub use console::{Command, ConsoleNarrator, ConsolePresenter, LineInput, OutputMode};
pub use api::{create_router, run_server};
