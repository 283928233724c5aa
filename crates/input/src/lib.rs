//! Terminal input mapping.
//!
//! Maps `crossterm` key events onto the game's fixed command set
//! ([`crate::types::GameAction`]). Keys outside that set map to `None` and
//! are dropped by the host. Quit and restart are host-level keys and never
//! reach the game.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_restart, should_quit};
