//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the game rules and the engine state. It has no
//! dependencies on terminals or I/O:
//!
//! - **Deterministic**: the same seed produces the same pieces
//! - **Testable**: colors are pluggable, time is a plain millisecond counter
//! - **Allocation-free**: the grid, shapes and clear reports are fixed-size
//!
//! # Module Structure
//!
//! - [`grid`]: 22x12 field of locked blocks (2 hidden rows on top)
//! - [`shapes`]: shape footprints, rotation and the piece catalog
//! - [`rng`]: seeded shape draws and the [`ColorSource`] strategies
//! - [`fit`]: the collision check every move goes through
//! - [`game_state`]: the engine aggregate - spawning, moves, locking, clearing, gravity
//! - [`scoring`]: points per cleared row and the speed-up formula
//! - [`fall`]: the single cancellable gravity deadline
//! - [`snapshot`], [`sink`]: what renderers and score displays receive
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, horizontally centered; a spawn that does not fit ends the game
//! - Rotation is clockwise inside the bounding box, with no wall kicks
//! - A piece that cannot fall locks, scoring `floor(multiplier)` points
//! - Each cleared row scores `floor(12 * total_rows * batch * multiplier)`
//! - The multiplier is `sqrt(total_rows)`; gravity runs every `1000 / multiplier` ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::SoftDrop);
//! assert_eq!(game.active().map(|p| p.row), Some(1));
//!
//! // One second later gravity has moved the piece one more row.
//! game.advance(1000);
//! assert_eq!(game.active().map(|p| p.row), Some(2));
//! ```

pub mod fall;
pub mod fit;
pub mod game_state;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod sink;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use fall::FallTimer;
pub use fit::fits;
pub use game_state::{ClearReport, GameState, Piece, SpawnRequest};
pub use grid::Grid;
pub use rng::{random_shape_index, ColorCycle, ColorSource, FixedColor, SimpleRng, WarmPalette};
pub use scoring::{fall_interval_for, line_clear_points, multiplier_for, ScoreState};
pub use shapes::{Catalog, Shape, ShapeError, STANDARD_SHAPES};
pub use sink::{RenderSink, ScoreDisplay, ScoreSink, Signals};
pub use snapshot::{NextSnapshot, RenderSnapshot};
