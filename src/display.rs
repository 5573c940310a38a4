//! Rendering layer — all terminal I/O lives here.
//!
//! The renderer receives an immutable snapshot of the session and only
//! translates it into terminal commands.  The 1200×900 world is scaled onto
//! whatever grid of cells sits inside the border.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::background::{Background, BackgroundFrame};
use space_shooter::entities::{GameStatus, Rect, Snapshot, SpriteKind};
use space_shooter::services::Renderer;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::DarkYellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Red;
const C_STAR: Color = Color::White;
const C_STAR_DIM: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Cells available to the play field: everything inside the border, which
/// spans rows 1 and h-2 with the HUD above and the hint line below.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    world_w: i32,
    world_h: i32,
}

impl Viewport {
    fn new(term_w: u16, term_h: u16, world_w: i32, world_h: i32) -> Self {
        Viewport {
            left: 1,
            top: 2,
            cols: term_w.saturating_sub(2),
            rows: term_h.saturating_sub(4),
            world_w: world_w.max(1),
            world_h: world_h.max(1),
        }
    }

    /// The cell showing world point (`x`, `y`), or `None` off the field.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if self.cols == 0 || self.rows == 0 {
            return None;
        }
        if x < 0 || y < 0 || x >= self.world_w || y >= self.world_h {
            return None;
        }
        let col = x as i64 * self.cols as i64 / self.world_w as i64;
        let row = y as i64 * self.rows as i64 / self.world_h as i64;
        Some((self.left + col as u16, self.top + row as u16))
    }

    /// Leftmost column that keeps a `glyph_w`-wide glyph centred on `col`
    /// inside the border.
    fn glyph_left(&self, col: u16, glyph_w: u16) -> u16 {
        let max_left = (self.left + self.cols).saturating_sub(glyph_w).max(self.left);
        col.saturating_sub(glyph_w / 2).clamp(self.left, max_left)
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    background: Background,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, background: Background) -> Self {
        TerminalRenderer { out, background }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    /// Render one complete frame.
    fn present(&mut self, snapshot: &Snapshot) -> std::io::Result<()> {
        let (width, height) = terminal::size()?;
        let view = Viewport::new(width, height, snapshot.width, snapshot.height);
        let out = &mut self.out;

        out.queue(terminal::Clear(terminal::ClearType::All))?;

        if snapshot.status == GameStatus::Start {
            draw_title(out, width, height)?;
        } else {
            if let Some(frame) = self.background.next_frame() {
                draw_background(out, &view, frame)?;
            }
            draw_border(out, width, height)?;
            draw_hud(out, snapshot, width)?;
            for sprite in &snapshot.sprites {
                draw_sprite(out, &view, sprite.kind, &sprite.rect)?;
            }
            draw_controls_hint(out, height)?;

            if snapshot.status == GameStatus::GameOver {
                draw_game_over(out, snapshot, width, height)?;
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_background<W: Write>(
    out: &mut W,
    view: &Viewport,
    frame: &BackgroundFrame,
) -> std::io::Result<()> {
    for star in &frame.stars {
        if let Some((col, row)) = view.cell(star.x, star.y) {
            out.queue(cursor::MoveTo(col, row))?;
            if star.bright {
                out.queue(style::SetForegroundColor(C_STAR))?;
                out.queue(Print("*"))?;
            } else {
                out.queue(style::SetForegroundColor(C_STAR_DIM))?;
                out.queue(Print("·"))?;
            }
        }
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, width: u16) -> std::io::Result<()> {
    // Best — left
    if snapshot.best_score > 0 {
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_BEST))?;
        out.queue(Print(format!("Best: {}", snapshot.best_score)))?;
    }

    // Score — centre
    let score_str = format!("Score: {}", snapshot.score);
    let sx = (width / 2).saturating_sub(score_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_str))?;

    // Lives — right
    let lives_str = format!("Lives: {}", "♥".repeat(snapshot.lives as usize));
    let lx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    kind: SpriteKind,
    rect: &Rect,
) -> std::io::Result<()> {
    // Anchor every glyph on the box centre; anything whose centre is off the
    // field (enemies queued above the screen) is not drawn.
    let Some((col, row)) = view.cell(rect.center_x(), rect.y + rect.h / 2) else {
        return Ok(());
    };
    let bottom = view.top + view.rows;

    match kind {
        SpriteKind::Player => {
            //   ▲       ← tip
            //  /█\      ← fuselage + wings
            out.queue(style::SetForegroundColor(C_PLAYER))?;
            out.queue(cursor::MoveTo(view.glyph_left(col, 1), row))?;
            out.queue(Print("▲"))?;
            if row + 1 < bottom {
                out.queue(cursor::MoveTo(view.glyph_left(col, 3), row + 1))?;
                out.queue(Print("/█\\"))?;
            }
        }
        SpriteKind::Enemy => {
            //   «▼»    ← swept-back wings
            //   ╚═╝    ← engine block
            let lx = view.glyph_left(col, 3);
            out.queue(style::SetForegroundColor(C_ENEMY))?;
            out.queue(cursor::MoveTo(lx, row))?;
            out.queue(Print("«▼»"))?;
            if row + 1 < bottom {
                out.queue(cursor::MoveTo(lx, row + 1))?;
                out.queue(Print("╚═╝"))?;
            }
        }
        SpriteKind::PlayerBullet => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        SpriteKind::EnemyBullet => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

// ── Title & game-over screens ─────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    width: u16,
    row: u16,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    print_centered(out, "★  SPACE  SHOOTER  ★", Color::Cyan, width, height / 4)?;
    print_centered(out, "Press any key to start", Color::White, width, height / 2)?;
    print_centered(out, CONTROLS_HINT, C_HINT, width, height / 2 + 2)?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let lines: &[&str] = &[
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];
    let total_rows = lines.len() as u16 + 3; // box + score + best + hint
    let start_row = (height / 2).saturating_sub(total_rows / 2);

    for (i, line) in lines.iter().enumerate() {
        print_centered(out, line, Color::Red, width, start_row + i as u16)?;
    }

    let score_row = start_row + lines.len() as u16;
    let score_line = format!("Final Score: {:>6}", snapshot.score);
    print_centered(out, &score_line, Color::Yellow, width, score_row)?;

    let new_best = snapshot.score > 0 && snapshot.score >= snapshot.best_score;
    let (best_line, best_color) = if new_best {
        (format!("★ NEW BEST: {:>6} ★", snapshot.best_score), Color::Yellow)
    } else {
        (format!("Best Score:  {:>6}", snapshot.best_score), Color::DarkGrey)
    };
    print_centered(out, &best_line, best_color, width, score_row + 1)?;

    print_centered(
        out,
        "Press any key to play again   Q - Quit",
        Color::White,
        width,
        score_row + 2,
    )?;

    Ok(())
}
