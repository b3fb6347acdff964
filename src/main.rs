use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use snake_engine::clock::TickClock;
use snake_engine::config::{ConfigError, EngineConfig, FoodPlacement};
use snake_engine::game::GameState;
use snake_engine::input::{GameInput, InputHandler};
use snake_engine::script::{ScriptError, parse_script, run_script};
use snake_engine::terminal_runtime::TerminalSession;
use thiserror::Error;
use tracing::{error, info};

/// Upper bound on how long one frame waits for a key press.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(about = "Snake on a fixed grid, played in the terminal or driven by a script")]
struct Cli {
    /// JSON engine config; missing fields use the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Allow food to spawn inside the snake.
    #[arg(long = "unguarded-food")]
    unguarded_food: bool,

    /// Run headless with one move per tick (U, D, L, R or '.') and print
    /// a JSON snapshot per tick.
    #[arg(long)]
    script: Option<String>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_from_path(path)?,
        None => EngineConfig::default(),
    };
    if cli.unguarded_food {
        config.food_placement = FoodPlacement::Unguarded;
    }

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed)?,
        None => GameState::new(config)?,
    };

    match cli.script {
        Some(script) => run_headless(state, &script),
        None => run_terminal(state),
    }
}

fn run_headless(mut state: GameState, script: &str) -> Result<(), AppError> {
    let moves = parse_script(script)?;
    let snapshots = run_script(&mut state, &moves);

    let mut out = io::stdout().lock();
    for snapshot in &snapshots {
        serde_json::to_writer(&mut out, snapshot)?;
        writeln!(out)?;
    }

    info!(
        ticks = snapshots.len(),
        score = state.score(),
        status = ?state.status(),
        "script finished"
    );
    Ok(())
}

fn run_terminal(mut state: GameState) -> Result<(), AppError> {
    let bounds = state.bounds();
    let mut clock = TickClock::from_config(state.config());
    let mut input = InputHandler::new(FRAME_INTERVAL);
    let mut session = TerminalSession::enter()?;
    let mut snapshot = state.snapshot();

    loop {
        session.draw(&snapshot, bounds)?;

        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                break;
            }

            state.apply_input(game_input);
            snapshot = state.snapshot();
        }

        if clock.poll(Instant::now(), state.status()) {
            snapshot = state.tick();
        }
    }

    drop(session);
    info!(score = state.score(), "session ended");
    Ok(())
}
