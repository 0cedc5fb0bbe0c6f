mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

use space_shooting::config::GameConfig;
use space_shooting::events::{GameEvent, RemovalCause};
use space_shooting::high_score::HighScoreFile;
use space_shooting::session::{Command, GameSession, Movement};

use display::{DeathEffect, View};

#[derive(Parser, Debug)]
#[command(name = "space_shooting")]
#[command(about = "Terminal arcade shooter: stages, a guard shield, and a two-phase boss")]
struct Cli {
    /// TOML config file; missing file means defaults
    #[arg(long, default_value = "space_shooting.toml")]
    config: PathBuf,

    /// Where the high score is kept (overrides the config)
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Fixed RNG seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file; RUST_LOG filters them
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈120 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn held_movement(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Movement {
    Movement {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        up: any_held(
            key_frame,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            frame,
        ),
        down: any_held(
            key_frame,
            &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
            frame,
        ),
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file: stderr would tear the alternate screen.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drives the session at a fixed tick until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the still-fresh keys become
/// the held `Movement`, held Space keeps requesting shots (the ship's own
/// cooldown rate-limits them), and the held guard key is turned into a
/// guard-on/guard-off pair.  One-shot keys act on their press event.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    scores: &HighScoreFile,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    tick: Duration,
) -> std::io::Result<()> {
    let started = Instant::now();
    let tick_ms = tick.as_millis() as u64;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut view = View::default();
    let mut guard_held = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    let command = match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Enter => Some(Command::Start),
                        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
                        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
                        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::FireShotgun),
                        _ => None,
                    };
                    if let Some(command) = command {
                        session.handle(command, rng);
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held keys ─────────────────────────────────────────────────────────
        if is_held(&key_frame, &KeyCode::Char(' '), frame) {
            session.handle(Command::FirePrimary, rng);
        }

        let guard_key = any_held(&key_frame, &[KeyCode::Char('x'), KeyCode::Char('X')], frame);
        if guard_key && !session.player.guarding {
            session.handle(Command::GuardOn, rng);
        } else if !guard_key && guard_held {
            session.handle(Command::GuardOff, rng);
        }
        guard_held = guard_key;

        session.tick(tick_ms, held_movement(&key_frame, frame), rng);

        // ── Collaborator events ───────────────────────────────────────────────
        view.now_ms = started.elapsed().as_millis() as u64;
        for event in session.drain_events() {
            match event {
                GameEvent::Removed {
                    kind,
                    x,
                    y,
                    cause: RemovalCause::Killed,
                    ..
                } => view.effects.push(DeathEffect {
                    kind,
                    x,
                    y,
                    started_ms: view.now_ms,
                }),
                GameEvent::StageStarted { stage } => view.banner = Some((stage, view.now_ms)),
                GameEvent::NewHighScore { score } => {
                    if let Err(e) = scores.store(score) {
                        warn!(error = %e, "could not save high score");
                    }
                }
                GameEvent::Audio(cue) => trace!(?cue, "audio"),
                GameEvent::Music(cue) => trace!(?cue, "music"),
                _ => {}
            }
        }

        let (width, height) = terminal::size()?;
        view.width = width;
        view.height = height;
        view.prune_effects();
        display::render(out, session, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = GameConfig::load(&cli.config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    if let Some(path) = cli.score_file {
        config.score_file = path;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let scores = HighScoreFile::new(&config.score_file);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let high_score = scores.load();
    info!(high_score, path = %scores.path().display(), "loaded high score");

    let mut session = GameSession::new(config.arena(), high_score, config.star_count, &mut rng);
    game_loop(
        out,
        &mut session,
        &scores,
        rx,
        &mut rng,
        Duration::from_millis(config.tick_ms),
    )
}
