//! Runtime configuration read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | system clock | RNG seed for shapes and colors |
//! | `BLOCKFALL_TICK_MS` | 16 | host loop step in milliseconds |
//! | `BLOCKFALL_LOG_PATH` | `blockfall.log` | log file; empty disables logging |
//!
//! Values that do not parse fall back to the default. Game rules (field
//! size, base fall interval) are fixed and not configurable.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::TICK_MS;

pub const DEFAULT_LOG_PATH: &str = "blockfall.log";

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub tick_ms: u32,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            tick_ms: TICK_MS,
            log_path: Some(DEFAULT_LOG_PATH.to_string()),
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let log_path = match lookup("BLOCKFALL_LOG_PATH") {
            Some(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            None => Some(DEFAULT_LOG_PATH.to_string()),
        };

        Self {
            seed,
            tick_ms,
            log_path,
        }
    }
}

/// Seed derived from the wall clock; never 0.
fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    ((nanos as u32) ^ ((nanos >> 32) as u32)).max(1)
}
