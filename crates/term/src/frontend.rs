//! TermFrontend: the terminal side of the game's render and score sinks.
//!
//! Sink calls only record what to show; nothing touches the terminal until
//! the host calls [`TermFrontend::present`], which is where I/O errors
//! surface.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::terminal;
use log::{debug, trace};

use crate::core::{RenderSink, RenderSnapshot, ScoreSink};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

pub struct TermFrontend<W: Write = io::Stdout> {
    view: GameView,
    renderer: TerminalRenderer<W>,
    fb: FrameBuffer,
    viewport: Viewport,
    snapshot: RenderSnapshot,
    score_text: String,
    dirty: bool,
}

impl TermFrontend<io::Stdout> {
    /// Frontend sized to the current terminal.
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_renderer(
            TerminalRenderer::new(),
            Viewport::new(width, height),
        ))
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl<W: Write> TermFrontend<W> {
    pub fn with_renderer(renderer: TerminalRenderer<W>, viewport: Viewport) -> Self {
        Self {
            view: GameView::default(),
            renderer,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            snapshot: RenderSnapshot::default(),
            score_text: String::from("0"),
            dirty: true,
        }
    }

    pub fn with_view(mut self, view: GameView) -> Self {
        self.view = view;
        self
    }

    /// Adopt a new terminal size; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!("terminal resized to {}x{}", width, height);
        self.viewport = Viewport::new(width, height);
        self.renderer.invalidate();
        self.dirty = true;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    /// Draw the latest snapshot and score if anything changed.
    ///
    /// Returns whether a frame was drawn.
    pub fn present(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.view
            .render_into(&self.snapshot, &self.score_text, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)?;
        self.dirty = false;
        trace!("frame presented");
        Ok(true)
    }
}

impl<W: Write> RenderSink for TermFrontend<W> {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        self.snapshot = *snapshot;
        self.dirty = true;
    }
}

impl<W: Write> ScoreSink for TermFrontend<W> {
    fn show_score(&mut self, text: &str) {
        self.score_text.clear();
        self.score_text.push_str(text);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedColor, GameState};
    use crate::types::Rgb;

    fn frontend() -> TermFrontend<Vec<u8>> {
        TermFrontend::with_renderer(TerminalRenderer::with_writer(Vec::new()), Viewport::new(60, 24))
    }

    #[test]
    fn test_present_only_when_dirty() {
        let mut fe = frontend();
        assert!(fe.present().unwrap());
        assert!(!fe.present().unwrap());

        fe.show_score("12");
        assert_eq!(fe.score_text(), "12");
        assert!(fe.present().unwrap());
    }

    #[test]
    fn test_game_flushes_into_frontend() {
        let mut game = GameState::with_colors(3, FixedColor(Rgb::new(250, 50, 0)));
        game.start();

        let mut fe = frontend();
        fe.present().unwrap();

        let mut score = String::new();
        struct Capture<'a>(&'a mut String);
        impl ScoreSink for Capture<'_> {
            fn show_score(&mut self, text: &str) {
                self.0.push_str(text);
            }
        }

        game.flush_to(&mut fe, &mut Capture(&mut score));
        assert!(fe.is_dirty());
        assert_eq!(score, "0");
        assert!(fe.present().unwrap());
    }

    #[test]
    fn test_resize_forces_redraw() {
        let mut fe = frontend();
        fe.present().unwrap();
        fe.resize(80, 30);
        assert_eq!(fe.viewport(), Viewport::new(80, 30));
        assert!(fe.present().unwrap());
    }
}
