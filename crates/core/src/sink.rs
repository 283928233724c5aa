//! Output side of the engine: redraw signals and the sinks that consume them
//!
//! The engine never calls a renderer while it mutates state. It raises flags
//! in [`Signals`] instead, and the host drains them once per loop iteration,
//! so any number of moves between two frames produce a single redraw.

use std::fmt;

use crate::snapshot::RenderSnapshot;

/// Text shown by the score display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreDisplay {
    Score(u64),
    GameOver { final_score: u64 },
}

impl fmt::Display for ScoreDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreDisplay::Score(score) => write!(f, "{}", score),
            ScoreDisplay::GameOver { final_score } => write!(f, "GAME OVER. score: {}", final_score),
        }
    }
}

/// Pending output requests, coalesced until taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    /// Field or active piece changed.
    pub redraw: bool,
    /// A new next piece was generated.
    pub redraw_next: bool,
    /// Latest score text; later updates overwrite earlier ones.
    pub score: Option<ScoreDisplay>,
}

impl Signals {
    pub fn is_empty(&self) -> bool {
        !self.redraw && !self.redraw_next && self.score.is_none()
    }

    pub fn needs_render(&self) -> bool {
        self.redraw || self.redraw_next
    }
}

/// Paints the playing field and the next-piece preview.
pub trait RenderSink {
    fn render(&mut self, snapshot: &RenderSnapshot);
}

/// Shows the score text.
pub trait ScoreSink {
    fn show_score(&mut self, text: &str);
}
