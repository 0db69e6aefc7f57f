//! Terminal stand-ins for capture, narration and presentation
//!
//! Typed lines play the part of speech. Narration is printed rather than
//! spoken.

use colored::{Color, Colorize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;
use crate::core::collaborators::{Capture, Narrator, Presenter};
use crate::error::CaptureError;
use crate::types::{
    Gesture, InteractionState, NarrationTone, PresentationPayload, Statement, TruthCategory,
    VisualTone,
};

/// How the console renders orb output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Colors and emoji
    Styled,
    /// Plain text, one fact per line
    Plain,
    /// Machine output only; the caller prints verdicts as JSON
    Json,
}

fn category_color(category: TruthCategory) -> Color {
    match category {
        TruthCategory::Impossible => Color::Red,
        TruthCategory::Unlikely => Color::Yellow,
        TruthCategory::Neutral => Color::White,
        TruthCategory::Likely => Color::Cyan,
        TruthCategory::TrueLike => Color::Green,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsolePresenter {
    mode: OutputMode,
}

impl ConsolePresenter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }
}

impl Presenter for ConsolePresenter {
    fn show_statement(&self, statement: &Statement) {
        match self.mode {
            OutputMode::Styled => println!("{} {}", "You:".bold(), statement.text().italic()),
            OutputMode::Plain => println!("You: {}", statement),
            OutputMode::Json => {}
        }
    }

    fn present(&self, payload: &PresentationPayload, category: TruthCategory, tone: VisualTone) {
        match self.mode {
            OutputMode::Styled => {
                let crack = if tone.shows_crack() { " ⚡" } else { "" };
                println!(
                    "🔮 {}{}",
                    payload.display_text.color(category_color(category)).bold(),
                    crack
                );
            }
            OutputMode::Plain => println!("{} [{}]", payload.display_text, category),
            OutputMode::Json => {}
        }
    }

    fn notice(&self, message: &str) {
        match self.mode {
            OutputMode::Styled => println!("{}", message.bright_magenta()),
            OutputMode::Plain => println!("{}", message),
            OutputMode::Json => eprintln!("{}", message),
        }
    }

    fn state_changed(&self, state: InteractionState) {
        let indicator = match state {
            InteractionState::Capturing => "Listening...",
            InteractionState::Evaluating => "Analyzing your statement...",
            _ => return,
        };
        match self.mode {
            OutputMode::Styled => println!("{} {}", state.emoji(), indicator.dimmed()),
            OutputMode::Plain => println!("[{}] {}", state, indicator),
            OutputMode::Json => {}
        }
    }

    fn reset(&self) {
        debug!("orb returned to neutral");
    }
}

/// Prints what would be spoken
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNarrator {
    mode: OutputMode,
}

impl ConsoleNarrator {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl Narrator for ConsoleNarrator {
    fn speak(&self, text: &str, tone: NarrationTone) {
        debug!(pitch = tone.pitch, rate = tone.rate, volume = tone.volume, "narrating");
        match self.mode {
            OutputMode::Styled => println!("   ♪ {}", text.italic().dimmed()),
            OutputMode::Plain => println!("narration: {}", text),
            OutputMode::Json => {}
        }
    }
}

/// One line of console input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Activate,
    Gesture(Gesture),
    Stop,
    Quit,
    Utterance(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Command::Activate,
            "auto" => Command::Gesture(Gesture::SecondActivation),
            "manual" => Command::Gesture(Gesture::DoubleAction),
            "toggle" => Command::Gesture(Gesture::LongPress),
            "stop" => Command::Stop,
            "quit" | "exit" => Command::Quit,
            _ => Command::Utterance(trimmed.to_string()),
        }
    }
}

/// Line-oriented input acting as the capture device.
///
/// Gesture commands typed while listening are queued for the caller and
/// listening continues.
pub struct LineInput<R> {
    lines: Lines<R>,
    pending: Vec<Gesture>,
    closed: bool,
}

impl LineInput<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: Vec::new(),
            closed: false,
        }
    }

    /// Next command, or `None` once input is exhausted
    pub async fn next_command(&mut self) -> Option<Command> {
        if self.closed {
            return None;
        }
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(Command::parse(&line)),
            Ok(None) => {
                self.closed = true;
                None
            }
            Err(e) => {
                debug!(error = %e, "input read failed");
                self.closed = true;
                None
            }
        }
    }

    /// Gestures seen during the last capture
    pub fn take_gestures(&mut self) -> Vec<Gesture> {
        std::mem::take(&mut self.pending)
    }

    /// End of input or an explicit quit
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<R: AsyncBufRead + Unpin> Capture for LineInput<R> {
    async fn capture(&mut self) -> Result<Statement, CaptureError> {
        loop {
            match self.next_command().await {
                Some(Command::Utterance(text)) => return Ok(Statement::new(text)),
                Some(Command::Activate) => return Err(CaptureError::NoSpeech),
                Some(Command::Gesture(gesture)) => self.pending.push(gesture),
                Some(Command::Stop) => return Err(CaptureError::Cancelled),
                Some(Command::Quit) => {
                    self.closed = true;
                    return Err(CaptureError::Cancelled);
                }
                None => return Err(CaptureError::Cancelled),
            }
        }
    }
}
