//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts can be asserted in unit tests.

use crate::core::{occupancy, GameSnapshot};
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{PieceKind, SessionStatus};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_MIN_W: u16 = 8;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal-space position of the board frame inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Draws the playfield, side panel and status overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            ghost: true,
        }
    }
}

impl GameView {
    pub fn with_ghost(mut self, ghost: bool) -> Self {
        self.ghost = ghost;
        self
    }

    /// Where the bordered board lands for a snapshot of `cols x rows`.
    pub fn layout(&self, cols: u16, rows: u16, viewport: Viewport) -> FrameLayout {
        let w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let with_panel = w.saturating_add(PANEL_MIN_W).saturating_add(2);
        FrameLayout {
            x: viewport.width.saturating_sub(with_panel) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Repaint `fb` from scratch; reuses the buffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().glyph(' '));

        let frame = self.layout(snap.cols, snap.rows, viewport);
        let border = GlyphStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        self.draw_border(fb, frame, border);

        let empty = GlyphStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        for row in 0..snap.rows {
            for col in 0..snap.cols {
                match PieceKind::from_color_id(snap.cell(col as i32, row as i32)) {
                    Some(kind) => self.fill_cell(fb, frame, col, row, '█', piece_style(kind)),
                    None => self.fill_cell(fb, frame, col, row, '·', empty),
                }
            }
        }

        if let Some(active) = snap.active {
            let shape = occupancy(active.kind, active.rotation);

            if let (true, Some(ghost_row)) = (self.ghost, snap.ghost_row) {
                let style = GlyphStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
                for (dc, dr) in shape.offsets() {
                    let (col, row) = (active.col + dc, ghost_row + dr);
                    self.fill_board_cell(fb, frame, snap, col, row, '░', style);
                }
            }

            // Rows above the field are simply not drawn.
            let style = piece_style(active.kind);
            for (dc, dr) in shape.offsets() {
                let (col, row) = (active.col + dc, active.row + dr);
                self.fill_board_cell(fb, frame, snap, col, row, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status {
            SessionStatus::Paused => {
                self.draw_overlay(fb, frame, "PAUSED", "P resume  R restart");
            }
            SessionStatus::GameOver => {
                self.draw_overlay(fb, frame, "GAME OVER", "R to restart");
            }
            SessionStatus::Idle => {
                self.draw_overlay(fb, frame, "BLOCKFALL", "ENTER to start");
            }
            SessionStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: FrameLayout, style: GlyphStyle) {
        if f.w < 2 || f.h < 2 {
            return;
        }
        let right = f.x.saturating_add(f.w - 1);
        let bottom = f.y.saturating_add(f.h - 1);

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for x in f.x.saturating_add(1)..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y.saturating_add(1)..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: FrameLayout,
        snap: &GameSnapshot,
        col: i32,
        row: i32,
        ch: char,
        style: GlyphStyle,
    ) {
        if col < 0 || row < 0 || col >= snap.cols as i32 || row >= snap.rows as i32 {
            return;
        }
        self.fill_cell(fb, frame, col as u16, row as u16, ch, style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: FrameLayout,
        col: u16,
        row: u16,
        ch: char,
        style: GlyphStyle,
    ) {
        let px = frame.x.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w));
        let py = frame.y.saturating_add(1).saturating_add(row.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: FrameLayout,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(PANEL_MIN_W) > viewport.width {
            return;
        }

        let label = GlyphStyle::default().bold();
        let value = GlyphStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let rows: [(&str, u32); 3] = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ];
        let mut y = frame.y;
        for (name, n) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "PIECE", label);
        match snap.active {
            Some(active) => {
                let style = GlyphStyle {
                    bg: SCREEN_BG,
                    ..piece_style(active.kind)
                };
                fb.put_str(panel_x, y.saturating_add(1), active.kind.letter(), style);
            }
            None => fb.put_str(panel_x, y.saturating_add(1), "-", value),
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: FrameLayout, title: &str, hint: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let title_style = GlyphStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let hint_style = GlyphStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.put_str(centered(frame, title), mid_y, title, title_style);
        fb.put_str(centered(frame, hint), mid_y.saturating_add(1), hint, hint_style);
    }
}

fn centered(frame: FrameLayout, text: &str) -> u16 {
    let text_w = text.chars().count() as u16;
    frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2)
}

fn piece_style(kind: PieceKind) -> GlyphStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    GlyphStyle::new(fg, PLAYFIELD_BG).bold()
}
