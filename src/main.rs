//! Truth Orb CLI
//!
//! Usage:
//!   truthorb --text "your statement"        # Single evaluation
//!   truthorb --interactive                  # Conversation loop on stdin
//!   truthorb --serve                        # HTTP API server
//!   truthorb --text "statement" --json      # JSON output

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use truthorb::config::OrbConfig;
use truthorb::core::{
    run_server, Capture, Command, ConsoleNarrator, ConsolePresenter, ConversationController,
    HeuristicClassifier, LineInput, OutputMode, RemoteEvaluator, ScriptedCapture, TruthEngine,
    TurnOutcome,
};
use truthorb::error::CaptureError;
use truthorb::types::{InteractionState, Statement, Verdict};
use truthorb::VERSION;

type Controller = ConversationController<RemoteEvaluator, StdRng, ConsoleNarrator, ConsolePresenter>;

#[derive(Parser, Debug)]
#[command(
    name = "truthorb",
    version = VERSION,
    about = "Truth Orb - speak a statement, receive a mystical truth verdict",
    long_about = "The Truth Orb judges spoken (here: typed) statements.\n\n\
                  A remote language model is asked first; when it is not configured,\n\
                  fails, or takes longer than the timeout, local heuristics answer.\n\n\
                  Interactive commands:\n  \
                  <blank line>  Activate the orb (start listening)\n  \
                  auto          Arm auto-loop (listen again after each verdict)\n  \
                  manual        Disarm auto-loop\n  \
                  toggle        Flip auto-loop\n  \
                  stop          Cancel listening\n  \
                  quit          Exit\n\n\
                  Categories:\n  \
                  IMPOSSIBLE < 20 <= UNLIKELY < 40 <= NEUTRAL < 60 <= LIKELY < 80 <= TRUE"
)]
struct Args {
    /// Statement to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output verdicts as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show verdict details and debug logs
    #[arg(long)]
    verbose: bool,

    /// Never call the remote model
    #[arg(long)]
    offline: bool,

    /// Seed for the random source (repeatable verdicts)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.no_color || args.json {
        colored::control::set_override(false);
    }

    let config = match &args.config {
        Some(path) => OrbConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => OrbConfig::from_env().context("reading configuration")?,
    };
    let engine = build_engine(&config, &args)?;

    if args.serve {
        run_server(&args.addr, engine)
            .await
            .map_err(|e| anyhow::anyhow!("server error: {}", e))?;
    } else if let Some(ref text) = args.text {
        run_single(text, &args, &config, engine).await?;
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, &config, engine).await?;
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("truthorb=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine(config: &OrbConfig, args: &Args) -> anyhow::Result<TruthEngine<RemoteEvaluator, StdRng>> {
    let remote = if !args.offline && config.remote.is_enabled() {
        Some(RemoteEvaluator::new(config.remote.clone())?)
    } else {
        None
    };
    info!(remote = remote.is_some(), seed = ?args.seed, "engine ready");

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let classifier = HeuristicClassifier::with_scoring(config.scoring.clone());
    Ok(TruthEngine::new(remote, classifier, rng))
}

fn output_mode(args: &Args) -> OutputMode {
    if args.json {
        OutputMode::Json
    } else if args.no_color {
        OutputMode::Plain
    } else {
        OutputMode::Styled
    }
}

fn controller(args: &Args, config: &OrbConfig, engine: TruthEngine<RemoteEvaluator, StdRng>) -> Controller {
    let mode = output_mode(args);
    ConversationController::new(
        engine,
        Arc::new(ConsoleNarrator::new(mode)),
        Arc::new(ConsolePresenter::new(mode)),
        config,
    )
}

/// Run single statement evaluation
async fn run_single(
    text: &str,
    args: &Args,
    config: &OrbConfig,
    engine: TruthEngine<RemoteEvaluator, StdRng>,
) -> anyhow::Result<()> {
    let mut controller = controller(args, config, engine);
    let mut capture = ScriptedCapture::once(text);

    if let TurnOutcome::Presented(verdict) = controller.run_turn(&mut capture).await? {
        print_verdict(&verdict, args)?;
    }
    Ok(())
}

/// Run the conversation loop on stdin
async fn run_interactive(
    args: &Args,
    config: &OrbConfig,
    engine: TruthEngine<RemoteEvaluator, StdRng>,
) -> anyhow::Result<()> {
    let mut controller = controller(args, config, engine);
    let mut input = LineInput::stdin();

    if !args.json {
        print_header(args.no_color);
    }
    controller.greet();

    loop {
        if controller.state() == InteractionState::Idle {
            if !args.json {
                print_prompt(&controller, args.no_color);
            }
            match input.next_command().await {
                None | Some(Command::Quit) => break,
                Some(Command::Gesture(gesture)) => {
                    controller.apply_gesture(gesture);
                    continue;
                }
                Some(Command::Stop) => continue,
                Some(Command::Activate) => controller.start_capture()?,
                Some(Command::Utterance(text)) => {
                    // Typing straight away counts as activation plus utterance
                    controller.start_capture()?;
                    deliver(&mut controller, Statement::new(text), args).await?;
                    continue;
                }
            }
        }

        // CAPTURING: just activated, or re-armed by auto-loop
        let captured = input.capture().await;
        for gesture in input.take_gestures() {
            controller.apply_gesture(gesture);
        }
        match captured {
            Ok(statement) => deliver(&mut controller, statement, args).await?,
            Err(CaptureError::Cancelled) => {
                controller.cancel_capture()?;
                if input.is_closed() {
                    break;
                }
            }
            Err(error) => controller.capture_failed(&error)?,
        }
    }

    debug!(turns = controller.turn_count(), "session ended");
    if !args.json {
        println!("\nSession ended. Verdicts: {}", controller.turn_count());
    }
    Ok(())
}

async fn deliver(controller: &mut Controller, statement: Statement, args: &Args) -> anyhow::Result<()> {
    let verdict = controller.submit(statement).await?;
    print_verdict(&verdict, args)?;
    controller.settle().await;
    Ok(())
}

/// Machine-readable or detailed verdict output; the presenter already showed the rest
fn print_verdict(verdict: &Verdict, args: &Args) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(verdict)?);
    } else if args.verbose {
        if args.no_color {
            println!("{}", verdict.to_parseable_string());
        } else {
            println!("{}", verdict.to_terminal_string());
        }
    }
    Ok(())
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Truth Orb v{}", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m╔════════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║        🔮 Truth Orb v{}             ║\x1b[0m", VERSION);
        println!("\x1b[1m╚════════════════════════════════════════╝\x1b[0m");
    }
    println!("Blank line to activate, 'auto' / 'manual' / 'toggle' for auto-loop, 'quit' to exit.");
    println!();
}

/// Format the idle prompt
fn print_prompt(controller: &Controller, no_color: bool) {
    use std::io::Write;

    let state = controller.state();
    let mode = if controller.auto_loop() { "auto" } else { "manual" };
    if no_color {
        print!("[{} | {}] > ", state, mode);
    } else {
        print!(
            "{}{} [{} | {}]{} > ",
            state.color_code(),
            state.emoji(),
            state,
            mode,
            InteractionState::color_reset()
        );
    }
    let _ = std::io::stdout().flush();
}
