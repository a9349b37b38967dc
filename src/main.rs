//! Terminal brick game runner (default binary).
//!
//! Runs either engine in the terminal using crossterm for input and the
//! framebuffer renderer from `brick_game::term`. Pacing follows the engine:
//! after each step the loop waits the interval the snapshot reported, applying
//! key events as they arrive and redrawing after each one.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use brick_game::core::{BrickGame, FileHighScore, GameInfo, SnakeGame, TetrisGame};
use brick_game::engine::Session;
use brick_game::input::translate;
use brick_game::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use brick_game::types::{SNAKE_HIGH_SCORE_FILE, TETRIS_HIGH_SCORE_FILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameKind {
    Snake,
    Tetris,
}

impl GameKind {
    fn title(self) -> &'static str {
        match self {
            GameKind::Snake => "SNAKE",
            GameKind::Tetris => "TETRIS",
        }
    }

    fn default_high_score_file(self) -> &'static str {
        match self {
            GameKind::Snake => SNAKE_HIGH_SCORE_FILE,
            GameKind::Tetris => TETRIS_HIGH_SCORE_FILE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "brick-game", version, about = "Snake and Tetris in the terminal")]
struct Cli {
    /// Which game to play
    #[arg(value_enum)]
    game: GameKind,
    /// High score file (defaults to one file per game in the working directory)
    #[arg(long, value_name = "PATH")]
    high_score_file: Option<PathBuf>,
    /// RNG seed; time-derived when omitted
    #[arg(long)]
    seed: Option<u32>,
    /// Write logs to this file (RUST_LOG controls the filter)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let seed = cli.seed.unwrap_or_else(time_seed);
    let path = cli
        .high_score_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(cli.game.default_high_score_file()));
    info!(game = cli.game.title(), seed, high_score_file = %path.display(), "starting");
    let store = FileHighScore::new(path);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let view = GameView::default().with_title(cli.game.title());
    let result = match cli.game {
        GameKind::Snake => run(&mut term, &view, SnakeGame::new(seed, store)),
        GameKind::Tetris => run(&mut term, &view, TetrisGame::new(seed, store)),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exited");
    result
}

fn run<G: BrickGame>(term: &mut TerminalRenderer, view: &GameView, game: G) -> Result<()> {
    let mut session = Session::new(game);
    let mut fb = FrameBuffer::new(0, 0);
    let clock = Instant::now();

    loop {
        let now = elapsed_ms(clock);
        if let Some(info) = session.step_if_due(now) {
            draw(term, view, &info, &mut fb)?;
        }
        if session.is_finished() {
            return Ok(());
        }

        // Input with timeout until the next step; key presses redraw at once.
        let timeout = Duration::from_millis(session.time_until_step(elapsed_ms(clock)));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some((action, hold)) = translate(key) {
                        let info = session.apply_action(action, hold);
                        draw(term, view, &info, &mut fb)?;
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    draw(term, view, session.last_snapshot(), &mut fb)?;
                }
                _ => {}
            }
        }
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    info: &GameInfo,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    view.render_into(info, Viewport::new(w, h), fb);
    term.draw_swap(fb)
}

fn elapsed_ms(clock: Instant) -> u64 {
    u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

/// The terminal is in raw mode, so logs only ever go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}
