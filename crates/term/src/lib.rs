//! Terminal frontend.
//!
//! A small, game-oriented rendering layer: the game's [`RenderSnapshot`]
//! is drawn into a framebuffer by [`GameView`], and [`TerminalRenderer`]
//! flushes only the glyphs that changed since the previous frame.
//! [`TermFrontend`] ties both to the core's render and score sinks.
//!
//! Fields are drawn 2 columns per cell to compensate for the typical
//! terminal glyph aspect ratio.
//!
//! [`RenderSnapshot`]: crate::core::RenderSnapshot

pub mod fb;
pub mod frontend;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Style};
pub use frontend::TermFrontend;
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
