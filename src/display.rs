/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands through the `Viewport` projection.

use std::io::Write;

use balloon_blaster::compute::EXPLOSION_FRAMES;
use balloon_blaster::entities::{BalloonTier, GameState, GameStatus, PowerUpKind, Upgrades};
use balloon_blaster::tiers::level_for;
use balloon_blaster::viewport::Viewport;
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_CHEAT: Color = Color::Magenta;
const C_PLAYER: Color = Color::DarkCyan;
const C_BULLET: Color = Color::Red;
const C_POWER_UP: Color = Color::Cyan;
const C_BOSS: Color = Color::Rgb { r: 139, g: 69, b: 19 };
const C_EXPLOSION: Color = Color::Rgb { r: 255, g: 165, b: 0 };
const C_HINT: Color = Color::DarkGrey;

fn tier_color(tier: BalloonTier) -> Color {
    match tier {
        BalloonTier::Red => Color::Red,
        BalloonTier::Blue => Color::Blue,
        BalloonTier::Green => Color::Green,
        BalloonTier::Yellow => Color::Yellow,
        BalloonTier::Pink => Color::Magenta,
        // pure black would vanish on most terminal backgrounds
        BalloonTier::Black => Color::DarkGrey,
        BalloonTier::White => Color::White,
        BalloonTier::Purple => Color::DarkMagenta,
    }
}

const HINT: &str = "WASD/←↑→↓ Move  Click/SPACE Fire  P Pause  Z Cheat  Q Quit";

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, vp)?;
    draw_hud(out, state, vp)?;

    for power_up in &state.power_ups {
        let glyph = match power_up.kind {
            PowerUpKind::BackwardsShooting => "◆",
            PowerUpKind::ExtraBullets => "✚",
        };
        fill(out, vp, power_up.pos, power_up.size, glyph, C_POWER_UP)?;
    }
    for balloon in &state.balloons {
        fill(out, vp, balloon.pos, balloon.size, "●", tier_color(balloon.tier))?;
    }
    if let Some(boss) = &state.boss {
        fill(out, vp, boss.pos, boss.size, "▓", C_BOSS)?;
    }
    for explosion in &state.explosions {
        // the pop grows as it ages
        let radius = explosion.frame as f32 / 2.0 * (20.0 / std::f32::consts::TAU);
        let glyph = if explosion.frame < EXPLOSION_FRAMES / 2 { "✶" } else { "·" };
        fill(out, vp, explosion.pos, radius * 2.0, glyph, C_EXPLOSION)?;
    }
    for bullet in &state.bullets {
        put(out, vp, bullet.pos, "•", C_BULLET)?;
    }
    fill(out, vp, state.player.pos, state.player.size, "■", C_PLAYER)?;

    draw_controls_hint(out, vp)?;

    if state.boss_incoming() {
        draw_centered(out, vp, &[("THE BOSS IS COMING", Color::White)])?;
    }
    match state.status {
        GameStatus::Playing => {}
        GameStatus::Paused => draw_paused(out, vp)?,
        GameStatus::GameOver => draw_game_over(out, state, vp)?,
        GameStatus::Busted => draw_busted(out, vp)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Title screen shown before the first run.
pub fn render_menu<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, vp)?;

    let legend: Vec<(String, Color)> = [
        BalloonTier::Red,
        BalloonTier::Blue,
        BalloonTier::Green,
        BalloonTier::Yellow,
        BalloonTier::Pink,
    ]
    .iter()
    .map(|t| (format!("● {:?}", t), tier_color(*t)))
    .collect();

    let mut lines: Vec<(&str, Color)> = vec![
        ("★  BALLOON  BLASTER  ★", Color::Cyan),
        ("", C_HINT),
        ("Pop the balloons before they reach you.", Color::White),
        ("Tougher balloons split when popped.", Color::White),
        ("Pop enough of them and the boss arrives.", Color::White),
        ("", C_HINT),
    ];
    lines.extend(legend.iter().map(|(s, c)| (s.as_str(), *c)));
    lines.push(("", C_HINT));
    lines.push(("ENTER / SPACE : Start    Q : Quit", Color::Yellow));
    draw_centered(out, vp, &lines)?;

    draw_controls_hint(out, vp)?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    let c = &state.counters;

    // Lives (+ cheat tag): left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", c.lives)))?;
    if state.invincible {
        out.queue(style::SetForegroundColor(C_HUD_CHEAT))?;
        out.queue(Print(" [INVINCIBLE]"))?;
    }

    // Score or boss health: centre
    let centre = match &state.boss {
        Some(boss) => format!("BOSS {}/{}", boss.health.saturating_sub(boss.hits), boss.health),
        None => format!("Score: {}", c.score),
    };
    let cx = (vp.cols / 2).saturating_sub(centre.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&centre))?;

    // Upgrades + kills + level: right
    let mut tags = String::new();
    if c.upgrades.contains(Upgrades::SPREAD_SHOT) {
        tags.push_str("[SPREAD] ");
    }
    if c.upgrades.contains(Upgrades::BACKWARDS) {
        tags.push_str("[BACK] ");
    }
    let right = format!(
        "{}Kills: {}  Level: {}",
        tags,
        c.defeated,
        level_for(c.defeated)
    );
    let rx = vp.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Paint the cell footprint of an entity of `size` centred on `pos`.
fn fill<W: Write>(
    out: &mut W,
    vp: &Viewport,
    pos: Vec2,
    size: f32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (w, h) = vp.cell_span(size);
    let (cx, cy) = vp.to_cell(pos);
    let left = cx.saturating_sub(w / 2).max(1);
    let top = cy.saturating_sub(h / 2).max(2);
    let right = (left + w).min(vp.cols - 1);
    let bottom = (top + h).min(vp.rows - 2);

    out.queue(style::SetForegroundColor(color))?;
    for row in top..bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(glyph.repeat((right - left) as usize)))?;
    }
    Ok(())
}

fn put<W: Write>(
    out: &mut W,
    vp: &Viewport,
    pos: Vec2,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = vp.to_cell(pos);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = vp.cols / 2;
    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    draw_centered(
        out,
        vp,
        &[
            ("╔════════════════════╗", Color::Yellow),
            ("║       PAUSED       ║", Color::Yellow),
            ("╚════════════════════╝", Color::Yellow),
            ("P - Resume  R - Restart", Color::White),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Score: {}", state.counters.score);
    draw_centered(
        out,
        vp,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║     GAME  OVER     ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            ("R - Restart  Q - Quit", Color::White),
        ],
    )
}

fn draw_busted<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    draw_centered(
        out,
        vp,
        &[
            ("╔════════════════════╗", Color::Magenta),
            ("║ You lose, cheater! ║", Color::Magenta),
            ("╚════════════════════╝", Color::Magenta),
            ("R - Restart  Q - Quit", Color::White),
        ],
    )
}
