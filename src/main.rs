mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;
use log::{info, warn};
use rand::thread_rng;

use balloon_blaster::compute::{
    fire, fire_at, init_state, move_player, restart, tick, toggle_invincible, toggle_pause, Heading,
};
use balloon_blaster::config::GameConfig;
use balloon_blaster::entities::{GameState, GameStatus};
use balloon_blaster::viewport::Viewport;
use balloon_blaster::{logging, Result};

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the
/// OS key-repeat rate is ≥ 15 Hz, so the window is refreshed before expiry
/// while the key is actively repeating.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Returns true if `key` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, key: &KeyCode, now: Instant) -> bool {
    key_seen
        .get(key)
        .map(|&last| now.duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Frames between keyboard shots while Space is held. Longer than
/// `HOLD_WINDOW` so a single tap fires exactly once.
const SHOOT_COOLDOWN: u32 = 10;

fn any_held(key_seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|k| is_held(key_seen, k, now))
}

/// Movement direction from every currently held key; opposing keys cancel.
fn heading(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> Heading {
    let axis = |neg: &[KeyCode], pos: &[KeyCode]| {
        any_held(key_seen, pos, now) as i8 - any_held(key_seen, neg, now) as i8
    };
    Heading::new(
        axis(
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        ),
        axis(
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        ),
    )
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    vp: &mut Viewport,
) -> Result<MenuResult> {
    display::render_menu(out, vp)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(Event::Resize(cols, rows)) => {
                resize(vp, cols, rows);
                display::render_menu(out, vp)?;
            }
            Ok(_) => {}
            // input thread gone
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

fn resize(vp: &mut Viewport, cols: u16, rows: u16) {
    match Viewport::new(cols, rows, vp.field()) {
        Ok(next) => *vp = next,
        Err(e) => warn!("ignoring resize: {}", e),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns when the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_seen` map that records when every key last produced a press/repeat
/// event.  Each frame we check which keys are still "fresh" (within
/// `HOLD_WINDOW`) and apply all their effects simultaneously, so diagonal
/// movement and firing can happen at the same time.
///
/// Mouse clicks fire at the clicked cell; SPACE fires at the last position
/// the mouse was seen.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    vp: &mut Viewport,
) -> Result<()> {
    let mut rng = thread_rng();
    let frame = Duration::from_millis(state.config.runtime.frame_ms);

    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    // Last mouse position; until the mouse moves, Space fires straight up.
    let mut aim: Option<Vec2> = None;
    let mut shoot_cooldown: u32 = 0;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_seen.insert(code, frame_start);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('p') | KeyCode::Char('P') => {
                                *state = toggle_pause(state);
                            }
                            KeyCode::Char('z') | KeyCode::Char('Z') => {
                                *state = toggle_invincible(state);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status != GameStatus::Playing =>
                            {
                                *state = restart(state);
                                aim = None;
                                shoot_cooldown = 0;
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_seen.insert(code, frame_start);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_seen.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let target = vp.to_field(column, row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            aim = Some(target);
                            *state = fire(state, target);
                        }
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => aim = Some(target),
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => resize(vp, cols, rows),
                _ => {}
            }
        }

        // ── Apply held-key movement, then advance one frame ───────────────────
        *state = move_player(state, heading(&key_seen, frame_start));

        // Space is a held key: throttled, and outside the click streak
        if shoot_cooldown == 0 && is_held(&key_seen, &KeyCode::Char(' '), frame_start) {
            let target = aim.unwrap_or(state.player.pos - Vec2::Y * state.player.size);
            *state = fire_at(state, target);
            shoot_cooldown = SHOOT_COOLDOWN;
        }
        shoot_cooldown = shoot_cooldown.saturating_sub(1);
        *state = tick(state, &mut rng);

        display::render(out, state, vp)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = GameConfig::resolve(std::env::args_os().nth(1).map(PathBuf::from))?;
    logging::init(&config.runtime.log_file)?;

    let (cols, rows) = terminal::size()?;
    let field = Vec2::new(config.field.width, config.field.height);
    let mut vp = Viewport::new(cols, rows, field)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
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

    let result = run(&mut out, &rx, &mut vp, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    vp: &mut Viewport,
    config: GameConfig,
) -> Result<()> {
    if let MenuResult::Quit = show_menu(out, rx, vp)? {
        return Ok(());
    }

    info!(
        "starting run on a {}x{} field ({}x{} terminal)",
        config.field.width, config.field.height, vp.cols, vp.rows
    );
    let mut state = init_state(config);
    game_loop(out, &mut state, rx, vp)?;
    info!(
        "quit with score {}, kills {}",
        state.counters.score, state.counters.defeated
    );
    Ok(())
}
