//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer, an immutable view of the
//! session, and the driver's cosmetic state.  No game logic is performed;
//! arena coordinates are scaled onto the terminal grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_shooting::animation::{
    blink_on, death_frame_ms_for, frame_index, frame_ms_for, oneshot_frame, STAGE_BANNER_MS,
};
use space_shooting::constants::GUARD_MAX;
use space_shooting::entities::{BossPhase, Entity, EntityKind};
use space_shooting::session::{GameSession, SessionPhase, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_GUARD: Color = Color::Cyan;
const C_GRUNT: Color = Color::Green;
const C_HEAVY: Color = Color::Red;
const C_BOSS: Color = Color::Red;
const C_BOSS_ENRAGED: Color = Color::DarkYellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_STAR: Color = Color::DarkGrey;
const C_DEATH: Color = Color::Yellow;
const C_GUARD_READY: Color = Color::Cyan;
const C_GUARD_BROKEN: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

const DEATH_FRAMES: [&str; 4] = ["*", "✶", "✺", "·"];
const BAR_WIDTH: usize = 18;

// ── Driver-side cosmetic state ───────────────────────────────────────────────

/// A death animation playing where an entity was destroyed.
#[derive(Clone, Debug)]
pub struct DeathEffect {
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub started_ms: u64,
}

impl DeathEffect {
    pub fn frame(&self, now_ms: u64) -> Option<usize> {
        oneshot_frame(
            now_ms.saturating_sub(self.started_ms),
            death_frame_ms_for(self.kind),
            DEATH_FRAMES.len(),
        )
    }
}

/// Everything the renderer needs besides the session itself.
#[derive(Clone, Debug, Default)]
pub struct View {
    pub width: u16,
    pub height: u16,
    /// Wall-clock milliseconds since the program started.
    pub now_ms: u64,
    /// Stage number and the time its banner appeared.
    pub banner: Option<(u32, u64)>,
    pub effects: Vec<DeathEffect>,
}

impl View {
    /// Forget effects that have finished playing.
    pub fn prune_effects(&mut self) {
        let now = self.now_ms;
        self.effects.retain(|e| e.frame(now).is_some());
    }

    /// Map an arena position onto a play-area cell, if it is visible.
    fn cell(&self, session: &GameSession, x: f32, y: f32) -> Option<(u16, u16)> {
        let cols = self.width.saturating_sub(3) as f32;
        let rows = self.height.saturating_sub(5) as f32;
        if cols <= 0.0 || rows <= 0.0 {
            return None;
        }
        let fx = x / session.arena.width;
        let fy = y / session.arena.height;
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
            return None;
        }
        Some((1 + (fx * cols) as u16, 2 + (fy * rows) as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &GameSession, view: &View) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let snap = session.snapshot();

    draw_border(out, view)?;
    draw_stars(out, session, view)?;
    draw_hud(out, &snap, view)?;

    if snap.phase != SessionPhase::WaitingToStart {
        for enemy in session.wave.enemies() {
            draw_enemy(out, session, view, enemy)?;
        }
        for bullet in session.projectiles.player.iter().chain(&session.projectiles.enemy) {
            draw_bullet(out, session, view, bullet)?;
        }
        if session.player.alive {
            draw_player(out, session, view)?;
        }
        for effect in &view.effects {
            draw_effect(out, session, view, effect)?;
        }
        draw_status_bars(out, &snap, view)?;
    }

    match snap.phase {
        SessionPhase::WaitingToStart => draw_title(out, &snap, view)?,
        SessionPhase::Paused => draw_centered(
            out,
            view,
            &[("PAUSED", Color::White), ("(Press P to Resume)", C_HINT)],
        )?,
        SessionPhase::GameOver => draw_game_over(out, &snap, view)?,
        SessionPhase::Playing => {
            if let Some((stage, since)) = view.banner {
                if view.now_ms.saturating_sub(since) < STAGE_BANNER_MS {
                    let text = format!("STAGE {}", stage);
                    draw_centered(out, view, &[(text.as_str(), Color::White)])?;
                }
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &View) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_stars<W: Write>(out: &mut W, session: &GameSession, view: &View) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for star in &session.stars.stars {
        if let Some((col, row)) = view.cell(session, star.x, star.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(if star.radius >= 3 { "+" } else { "·" }))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, view: &View) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "STAGE:{} SCORE:{} HIGH:{}",
        snap.stage, snap.score, snap.high_score
    )))?;

    let hearts = "❤ ".repeat(snap.player_hp as usize);
    let rx = view
        .width
        .saturating_sub(hearts.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&hearts))?;
    Ok(())
}

/// Guard gauge bottom-left, boss HP bottom-right (last row).
fn draw_status_bars<W: Write>(out: &mut W, snap: &Snapshot, view: &View) -> std::io::Result<()> {
    let row = view.height.saturating_sub(1);

    let filled = ((snap.guard / GUARD_MAX).clamp(0.0, 1.0) * BAR_WIDTH as f32) as usize;
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(if snap.guard_cooldown {
        C_GUARD_BROKEN
    } else {
        C_GUARD_READY
    }))?;
    out.queue(Print(format!(
        "GUARD [{}{}] {:>3}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        snap.guard as u32
    )))?;

    if let Some(boss) = snap.boss {
        let ratio = boss.hp as f32 / boss.max_hp.max(1) as f32;
        let filled = (ratio * BAR_WIDTH as f32) as usize;
        let text = format!(
            "BOSS {:>2}/{:<2} [{}{}]",
            boss.hp,
            boss.max_hp,
            "█".repeat(filled),
            " ".repeat(BAR_WIDTH - filled)
        );
        let col = view.width.saturating_sub(text.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(match boss.phase {
            BossPhase::One => C_BOSS,
            BossPhase::Two => C_BOSS_ENRAGED,
        }))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, session: &GameSession, view: &View) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip, flickers between frames)
    //  /█\      ← row y+1    (fuselage + wings; [█] while guarding)
    let p = &session.player;
    let Some((col, row)) = view.cell(session, p.x(), p.y()) else {
        return Ok(());
    };
    let (tip, body, color) = if p.guarding {
        ("◆", "[█]", C_PLAYER_GUARD)
    } else {
        let tips = ["▲", "△"];
        let tip = tips[frame_index(view.now_ms, frame_ms_for(EntityKind::Player), tips.len())];
        (tip, "/█\\", C_PLAYER)
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(tip))?;
    if row + 1 < view.height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print(body))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &View,
    enemy: &Entity,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(session, enemy.x, enemy.y) else {
        return Ok(());
    };
    let frame = frame_index(view.now_ms, frame_ms_for(enemy.kind), 2);
    let (sprite, color) = match enemy.kind {
        EntityKind::Grunt => (["«▼»", "«▽»"][frame], C_GRUNT),
        EntityKind::Heavy => (["(◎)", "(◉)"][frame], C_HEAVY),
        EntityKind::Boss(BossPhase::One) => (["<╦═╦>", "<╤═╤>"][frame], C_BOSS),
        EntityKind::Boss(BossPhase::Two) => (["«╬═╬»", "«╪═╪»"][frame], C_BOSS_ENRAGED),
        _ => return Ok(()),
    };
    let half = sprite.chars().count() as u16 / 2;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col.saturating_sub(half).max(1), row))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &View,
    bullet: &Entity,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(session, bullet.x, bullet.y) else {
        return Ok(());
    };
    let angled = bullet.vx.abs() > 0.5;
    let (glyph, color) = match bullet.kind {
        EntityKind::PlayerBullet => (if angled { "•" } else { "║" }, C_BULLET_PLAYER),
        _ => (if angled { "•" } else { "↓" }, C_BULLET_ENEMY),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_effect<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &View,
    effect: &DeathEffect,
) -> std::io::Result<()> {
    let (Some(frame), Some((col, row))) = (
        effect.frame(view.now_ms),
        view.cell(session, effect.x, effect.y),
    ) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_DEATH))?;
    out.queue(Print(DEATH_FRAMES[frame]))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(out: &mut W, view: &View, lines: &[(&str, Color)]) -> std::io::Result<()> {
    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, snap: &Snapshot, view: &View) -> std::io::Result<()> {
    let prompt = if blink_on(view.now_ms) {
        "Press ENTER to start!"
    } else {
        " "
    };
    let high = format!("HIGH SCORE : {}", snap.high_score);
    draw_centered(
        out,
        view,
        &[
            ("★  SPACE  SHOOTING  ★", Color::Cyan),
            ("", Color::White),
            (prompt, Color::White),
            ("", Color::White),
            ("Move: ←↑→↓ / WASD   Fire: SPACE", C_HINT),
            ("Shotgun: Z (40 guard)   Guard: hold X", C_HINT),
            ("Pause: P   Quit: Q", C_HINT),
            ("", Color::White),
            (high.as_str(), C_HUD_SCORE),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, snap: &Snapshot, view: &View) -> std::io::Result<()> {
    let score_line = format!("SCORE : {:>6}", snap.score);
    let new_best = snap.score >= snap.high_score && snap.score > 0;
    let best_line = if new_best {
        format!("★ NEW HIGH: {:>6} ★", snap.high_score)
    } else {
        format!("HIGH  : {:>6}", snap.high_score)
    };
    draw_centered(
        out,
        view,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (best_line.as_str(), if new_best { Color::Yellow } else { Color::DarkGrey }),
            ("R - Title   Q - Quit", Color::White),
        ],
    )
}
