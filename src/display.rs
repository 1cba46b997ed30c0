/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// simulation.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use wave_shooter::difficulty::Difficulty;
use wave_shooter::entities::{
    Bullet, Enemy, GameStatus, Particle, PowerUp, PowerUpKind, Rgb, SimulationState,
};
use wave_shooter::geometry::Playfield;
use wave_shooter::tuning::TICKS_PER_SECOND;
use wave_shooter::wave::WavePhase;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_HURT: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;
const C_BANNER: Color = Color::Yellow;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── Playfield ↔ terminal mapping ──────────────────────────────────────────────

/// Maps playfield coordinates onto the bordered terminal area
/// (columns `1..width-1`, rows `2..height-2`).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub field: Playfield,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field: Playfield) -> Self {
        Self { cols, rows, field }
    }

    fn inner_w(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_h(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell for a playfield point, or `None` when it is off-screen.
    pub fn to_cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= self.field.width || pos.y >= self.field.height {
            return None;
        }
        let col = 1.0 + pos.x / self.field.width * self.inner_w();
        let row = 2.0 + pos.y / self.field.height * self.inner_h();
        Some((col as u16, row as u16))
    }

    /// Playfield point at the centre of a terminal cell (mouse aiming).
    pub fn to_field(&self, col: u16, row: u16) -> Vec2 {
        let x = (col as f32 - 1.0 + 0.5) / self.inner_w() * self.field.width;
        let y = (row as f32 - 2.0 + 0.5) / self.inner_h() * self.field.height;
        Vec2::new(
            x.clamp(0.0, self.field.width),
            y.clamp(0.0, self.field.height),
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &SimulationState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for particle in &state.particles {
        draw_particle(out, particle, view)?;
    }
    for power_up in &state.power_ups {
        draw_power_up(out, power_up, view)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, enemy, view)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, view)?;
    }

    draw_player(out, state, view)?;
    draw_controls_hint(out, view)?;

    match state.game.status {
        GameStatus::GameOver => draw_game_over(out, state, view)?,
        GameStatus::Paused => draw_banner(out, view, &["PAUSED", "P - Resume"])?,
        GameStatus::Playing => {
            if state.waves.phase() == WavePhase::Complete {
                let done = format!("Wave {} complete!", state.game.wave);
                let next = format!(
                    "Wave {} in {}s...",
                    state.game.wave + 1,
                    seconds_left(state.waves.next_wave_delay as u64)
                );
                draw_banner(out, view, &[done.as_str(), next.as_str()])?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

/// Whole seconds shown for a countdown of `ticks`, rounded up.
fn seconds_left(ticks: u64) -> u64 {
    ticks.div_ceil(TICKS_PER_SECOND)
}

fn difficulty_color(d: Difficulty) -> Color {
    match d {
        Difficulty::Easy => Color::Green,
        Difficulty::Normal => Color::Yellow,
        Difficulty::Hard => Color::Red,
        Difficulty::Extreme => Color::Magenta,
    }
}

fn draw_hud<W: Write>(out: &mut W, state: &SimulationState, view: &Viewport) -> std::io::Result<()> {
    let game = &state.game;

    // Score, kills on the left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}  Kills:{:>4}", game.score, game.kills)))?;

    // Wave progress + difficulty in the centre
    let wave_str = format!(
        "Wave {} [{}/{}]",
        game.wave, state.waves.enemies_killed, game.enemies_this_wave
    );
    let diff_str = format!(" {}", state.difficulty.name().to_uppercase());
    let total = (wave_str.len() + diff_str.len()) as u16;
    out.queue(cursor::MoveTo((view.cols / 2).saturating_sub(total / 2), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;
    out.queue(style::SetForegroundColor(difficulty_color(state.difficulty)))?;
    out.queue(Print(&diff_str))?;

    // Weapon + lives on the right
    let weapon_tag = match state.player.effect {
        Some(effect) => {
            let left = seconds_left(effect.expires_at.saturating_sub(state.frame));
            format!("[{} {:>2}s] ", state.player.weapon.name, left)
        }
        None => format!("[{}] ", state.player.weapon.name),
    };
    let lives_str = format!("Lives:{}", "♥".repeat(game.lives as usize));
    let right_len = (weapon_tag.chars().count() + lives_str.chars().count()) as u16;
    out.queue(cursor::MoveTo(view.cols.saturating_sub(right_len + 1), 0))?;
    out.queue(style::SetForegroundColor(rgb(state.player.weapon.color)))?;
    out.queue(Print(&weapon_tag))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &SimulationState, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(state.player.pos) else {
        return Ok(());
    };
    // Eight facing arrows, indexed by the angle rounded to 45°.
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let octant = (state.player.angle / std::f32::consts::FRAC_PI_4).round() as i32;
    let arrow = ARROWS[octant.rem_euclid(8) as usize];

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print(arrow))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(enemy.pos) else {
        return Ok(());
    };
    let color = if enemy.health < enemy.max_health { C_ENEMY_HURT } else { C_ENEMY };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(enemy.glyph))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, view: &Viewport) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(bullet.pos) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(rgb(bullet.color)))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

/// Power-up symbols:
///   ♥ Life   ⚡ Rapid   ✹ Heavy   ★ Spread   $ Bonus score
fn draw_power_up<W: Write>(out: &mut W, power_up: &PowerUp, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(power_up.pos) else {
        return Ok(());
    };
    let (symbol, color) = match power_up.kind {
        PowerUpKind::Life => ("♥", Color::Magenta),
        PowerUpKind::RapidWeapon => ("⚡", Color::Cyan),
        PowerUpKind::HeavyWeapon => ("✹", Color::DarkRed),
        PowerUpKind::SpreadWeapon => ("★", Color::Yellow),
        PowerUpKind::BonusScore => ("$", Color::Green),
    };
    // Blink during the last two seconds.
    if power_up.life < 120 && (power_up.life / 8) % 2 == 0 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(symbol))?;
    Ok(())
}

fn draw_particle<W: Write>(out: &mut W, particle: &Particle, view: &Viewport) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(particle.pos) {
        let glyph = if particle.life * 2 > particle.max_life { "*" } else { "·" };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(rgb(particle.color)))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD / ←↑→↓ : Move   SPACE : Shoot   Mouse : Aim   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, view: &Viewport, lines: &[&str]) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_BANNER))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, state: &SimulationState, view: &Viewport) -> std::io::Result<()> {
    let summary = state.summary();
    let score_line = format!("Final Score: {:>6}", summary.score);
    let kills_line = format!("Kills: {}   Wave: {}", summary.kills, summary.wave);
    let diff_line = format!("Difficulty: {}", summary.difficulty.name());

    let lines: [(&str, Color); 7] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (kills_line.as_str(), Color::White),
        (diff_line.as_str(), difficulty_color(summary.difficulty)),
        ("R - Play Again  M - Menu  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
