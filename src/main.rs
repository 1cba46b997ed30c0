mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use glam::Vec2;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wave_shooter::config::Settings;
use wave_shooter::difficulty::Difficulty;
use wave_shooter::entities::GameStatus;
use wave_shooter::error::GameResult;
use wave_shooter::events::TracingObserver;
use wave_shooter::input::{Aim, InputSample};
use wave_shooter::simulation::{FixedStep, Simulation};

use display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames at 60 Hz
/// (≈133 ms) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    preferred: Difficulty,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  WAVE  SHOOTER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty (Enter = configured):"))?;

    let options: [(&str, Difficulty, Color, &str); 4] = [
        ("1", Difficulty::Easy, Color::Green, "5 lives, slow enemies"),
        ("2", Difficulty::Normal, Color::Yellow, "3 lives, balanced"),
        ("3", Difficulty::Hard, Color::Red, "2 lives, tougher enemies"),
        ("4", Difficulty::Extreme, Color::Magenta, "1 life, relentless"),
    ];

    for (i, (key, difficulty, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        let marker = if *difficulty == preferred { "›" } else { " " };
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("{marker}[{key}] ")))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", difficulty.name())))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {desc}")))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Power-ups: ♥ life  ⚡ rapid  ✹ heavy  ★ spread  $ bonus"))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 5))?;
    out.queue(Print("WASD / arrows : Move   SPACE / click : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Easy)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Normal)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Hard)),
                KeyCode::Char('4') => return Ok(MenuResult::Start(Difficulty::Extreme)),
                KeyCode::Enter => return Ok(MenuResult::Start(preferred)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu,
}

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" are folded into one `InputSample`, so diagonal movement and firing
/// can be held together.  Mouse movement switches aiming to the cursor;
/// without a mouse the gun auto-aims at the nearest enemy.  The simulation is
/// driven through a [`FixedStep`] clock, so `frame_time` only sets the redraw
/// rate.
fn game_loop<W: Write>(
    out: &mut W,
    sim: &mut Simulation,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> std::io::Result<LoopExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut mouse_aim: Option<Vec2> = None;
    let mut mouse_fire = false;
    let mut frame: u64 = 0;
    let mut clock = FixedStep::new();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let elapsed = frame_start - last_frame;
        last_frame = frame_start;
        frame += 1;

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, sim.state().field);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('p') | KeyCode::Char('P') => sim.toggle_pause(),
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if sim.state().game.status == GameStatus::GameOver =>
                            {
                                sim.restart();
                            }
                            KeyCode::Char('m') | KeyCode::Char('M')
                                if sim.state().game.status == GameStatus::GameOver =>
                            {
                                return Ok(LoopExit::Menu);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        mouse_aim = Some(view.to_field(column, row));
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        mouse_aim = Some(view.to_field(column, row));
                        mouse_fire = true;
                    }
                    MouseEventKind::Up(MouseButton::Left) => mouse_fire = false,
                    _ => {}
                },
                _ => {}
            }
        }

        // ── Fold held keys into one input sample ──────────────────────────────
        let left = is_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame);
        let right = is_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame);
        let up = is_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame);
        let down = is_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame);
        let fire = mouse_fire || is_held(&key_frame, &[KeyCode::Char(' ')], frame);

        let dx = right as i8 - left as i8;
        let dy = down as i8 - up as i8;
        let aim = match mouse_aim {
            Some(point) => Aim::Point(point),
            None => Aim::NearestEnemy,
        };

        sim.advance(&mut clock, elapsed, &InputSample::from_axes(dx, dy, fire, aim));
        display::render(out, sim.state(), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(settings: &Settings) {
    // The alternate screen owns stdout/stderr, so logs go to a file.
    let Ok(file) = File::create(&settings.log_file) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> GameResult<()> {
    let settings = Settings::load_or_default(&Settings::default_path());
    init_logging(&settings);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, settings);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!(error = %e, "terminal session failed");
    }
    Ok(result?)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut settings: Settings,
) -> std::io::Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / settings.frame_rate_hz.max(1) as f64);

    loop {
        match show_menu(out, rx, settings.difficulty())? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => {
                settings.difficulty = difficulty.name().to_lowercase();
                let mut sim = Simulation::from_settings(&settings);
                sim.subscribe(Box::new(TracingObserver));

                let exit = game_loop(out, &mut sim, rx, frame_time)?;
                if let Some(summary) = sim.summary() {
                    info!(
                        score = summary.score,
                        kills = summary.kills,
                        wave = summary.wave,
                        "session finished"
                    );
                }
                match exit {
                    LoopExit::Quit => break,
                    LoopExit::Menu => {}
                }
            }
        }
    }
    Ok(())
}
