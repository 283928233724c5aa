//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the game core, the terminal frontend and the input mapping alike.
//!
//! # Field Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11, left to right)
//! - **Height**: 22 rows (indexed 0-21, top to bottom)
//! - **Hidden rows**: the top 2 rows are a spawn buffer and are never drawn
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_INTERVAL_MS` | 1000 | Gravity before any row is cleared |
//! | `TICK_MS` | 16 | Default host loop step (~60 FPS) |
//!
//! Gravity speeds up as rows are cleared: the interval is
//! `BASE_FALL_INTERVAL_MS / sqrt(rows_cleared)`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, RunState, FIELD_HEIGHT, FIELD_WIDTH, HIDDEN_ROWS};
//!
//! assert_eq!(FIELD_WIDTH, 12);
//! assert_eq!(FIELD_HEIGHT - HIDDEN_ROWS, 20);
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert!(RunState::Running.is_running());
//! ```

/// Field width in cells (12 columns)
pub const FIELD_WIDTH: u8 = 12;

/// Field height in cells, hidden rows included (22 rows)
pub const FIELD_HEIGHT: u8 = 22;

/// Rows above the visible playing area used as spawn/overflow buffer
pub const HIDDEN_ROWS: u8 = 2;

/// Number of rows a renderer shows
pub const VISIBLE_ROWS: u8 = FIELD_HEIGHT - HIDDEN_ROWS;

/// Fall interval before any row has been cleared (1000ms per row)
pub const BASE_FALL_INTERVAL_MS: u32 = 1000;

/// Pixel size of one block for graphical frontends.
///
/// The terminal frontend draws a block as 2x1 characters instead.
pub const BLOCK_SIZE: u16 = 24;

/// Default host loop step in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Largest number of rows or columns a shape may span
pub const MAX_SHAPE_DIM: usize = 4;


/// 24-bit color token carried by every filled cell.
///
/// The core treats colors as opaque; only renderers interpret the channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Cell holding a locked block of that color
pub type Cell = Option<Rgb>;

/// Run state gating every mutating operation.
///
/// `Stopped` means game over; it only ends through an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
    Stopped,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, RunState::Stopped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopped => "stopped",
        }
    }
}

/// Commands accepted from the input surface
///
/// Physical keys are mapped onto these by the input crate; anything that
/// does not map is dropped before it reaches the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Rotate the active piece 90° clockwise
    Rotate,
    /// Move the active piece one column left
    MoveLeft,
    /// Move the active piece one column right
    MoveRight,
    /// Move the active piece one row down
    SoftDrop,
    /// Toggle between running and paused
    Pause,
}

impl GameAction {
    pub const ALL: [GameAction; 5] = [
        GameAction::Rotate,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Pause,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("SOFTDROP"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(GameAction::Rotate),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Rotate => "rotate",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Pause => "pause",
        }
    }
}
