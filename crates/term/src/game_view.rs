//! GameView: maps a [`RenderSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::RenderSnapshot;
use crate::fb::{FrameBuffer, Style};
use crate::types::{Rgb, FIELD_WIDTH, MAX_SHAPE_DIM, VISIBLE_ROWS};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// A lightweight terminal view of the playing field and side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    show_help: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            show_help: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            show_help: true,
        }
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Outer size of the bordered field.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            FIELD_WIDTH as u16 * self.cell_w + 2,
            VISIBLE_ROWS as u16 * self.cell_h + 2,
        )
    }

    /// Top-left corner of the field border within `viewport`.
    ///
    /// The field sits left of center so the side panel fits on its right.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let y = viewport.height.saturating_sub(frame_h) / 2;
        (x, y)
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &RenderSnapshot,
        score_text: &str,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let border = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let empty = Style::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for (y, row) in snap.field.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, start_x, start_y, x as u16, y as u16, *color),
                    None => self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '·', empty),
                }
            }
        }

        self.draw_side_panel(fb, snap, score_text, viewport, start_x + frame_w + 2, start_y);

        if snap.paused() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
        } else if snap.game_over() {
            self.draw_overlay_text(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["GAME OVER", "r: restart"],
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RenderSnapshot, score_text: &str, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, score_text, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16, color: Rgb) {
        let style = Style::new(color, PLAY_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: Style,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RenderSnapshot,
        score_text: &str,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, score_text, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.rows_cleared as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "FALL MS", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.fall_interval_ms.round() as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            for (r, row) in next.cells().iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    if let Some(color) = cell {
                        let style = Style::new(*color, SCREEN_BG).bold();
                        fb.fill_rect(
                            panel_x + c as u16 * self.cell_w,
                            y + r as u16 * self.cell_h,
                            self.cell_w,
                            self.cell_h,
                            '█',
                            style,
                        );
                    }
                }
            }
        }
        y = y.saturating_add(MAX_SHAPE_DIM as u16 * self.cell_h + 1);

        if !self.show_help {
            return;
        }
        let help = value.dim();
        for line in ["←→ move", "↑  rotate", "↓  drop", "p  pause", "q  quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = Style::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, style);
        }
    }
}

/// Width reserved right of the field for the side panel.
const PANEL_W: u16 = 14;
