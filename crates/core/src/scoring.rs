//! Scoring module - line-clear points and speed progression
//!
//! Every cleared row is scored on its own:
//! `floor(FIELD_WIDTH * rows_cleared * batch * multiplier)`, where
//! `rows_cleared` is the session total including this row, `batch` counts
//! rows cleared so far in the current clear pass and `multiplier` is the
//! value before this row is counted. Clearing several rows in one pass
//! therefore scores superlinearly.
//!
//! After each row the multiplier becomes `sqrt(rows_cleared)` and the fall
//! interval `BASE_FALL_INTERVAL_MS / multiplier`, so play only ever speeds up.

use crate::types::{BASE_FALL_INTERVAL_MS, FIELD_WIDTH};

/// Points for one cleared row.
pub fn line_clear_points(rows_cleared: u32, batch: u32, multiplier: f64) -> u64 {
    (FIELD_WIDTH as f64 * rows_cleared as f64 * batch as f64 * multiplier).floor() as u64
}

/// Speed/score multiplier after `rows_cleared` rows.
///
/// Before the first clear the multiplier is 1.0.
pub fn multiplier_for(rows_cleared: u32) -> f64 {
    if rows_cleared == 0 {
        1.0
    } else {
        (rows_cleared as f64).sqrt()
    }
}

/// Fall interval in milliseconds for a multiplier.
pub fn fall_interval_for(multiplier: f64) -> f64 {
    BASE_FALL_INTERVAL_MS as f64 / multiplier
}

/// Flat bonus added every time a piece locks.
pub fn lock_bonus(multiplier: f64) -> u64 {
    multiplier.floor() as u64
}

/// Cumulative score counters for one session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreState {
    pub score: u64,
    pub rows_cleared: u32,
    pub multiplier: f64,
    /// Exact interval; the scheduler truncates it to whole milliseconds.
    pub fall_interval_ms: f64,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            rows_cleared: 0,
            multiplier: 1.0,
            fall_interval_ms: BASE_FALL_INTERVAL_MS as f64,
        }
    }

    /// Count one cleared row that is the `batch`-th of the current pass.
    ///
    /// Returns the points it scored.
    pub fn record_row(&mut self, batch: u32) -> u64 {
        self.rows_cleared += 1;
        let points = line_clear_points(self.rows_cleared, batch, self.multiplier);
        self.score += points;
        self.multiplier = multiplier_for(self.rows_cleared);
        self.fall_interval_ms = fall_interval_for(self.multiplier);
        points
    }

    /// Add the lock bonus for the current multiplier. Returns it.
    pub fn record_lock(&mut self) -> u64 {
        let bonus = lock_bonus(self.multiplier);
        self.score += bonus;
        bonus
    }

    /// Interval handed to the fall timer: truncated to whole milliseconds, at least 1.
    pub fn fall_interval_whole_ms(&self) -> u64 {
        (self.fall_interval_ms.floor() as u64).max(1)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_scores_twelve() {
        assert_eq!(line_clear_points(1, 1, 1.0), 12);
    }

    #[test]
    fn test_multiplier_progression() {
        assert_eq!(multiplier_for(0), 1.0);
        assert_eq!(multiplier_for(1), 1.0);
        assert_eq!(multiplier_for(4), 2.0);
        assert!((multiplier_for(2) - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_fall_interval_for() {
        assert_eq!(fall_interval_for(1.0), 1000.0);
        assert_eq!(fall_interval_for(2.0), 500.0);
    }

    #[test]
    fn test_record_row_sequence() {
        let mut s = ScoreState::new();

        // Two rows in one pass: 12*1*1*1 then floor(12*2*2*1)
        assert_eq!(s.record_row(1), 12);
        assert_eq!(s.multiplier, 1.0);
        assert_eq!(s.fall_interval_ms, 1000.0);
        assert_eq!(s.record_row(2), 48);
        assert_eq!(s.score, 60);
        assert_eq!(s.rows_cleared, 2);

        // Third row alone uses sqrt(2) from before: floor(12*3*1*1.414..) = 50
        assert_eq!(s.record_row(1), 50);
        assert!((s.multiplier - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_interval_never_increases() {
        let mut s = ScoreState::new();
        let mut last = s.fall_interval_ms;
        for batch in [1, 1, 2, 3, 1, 4, 1, 2] {
            s.record_row(batch);
            assert!(s.fall_interval_ms <= last);
            last = s.fall_interval_ms;
        }
    }

    #[test]
    fn test_lock_bonus_floors_multiplier() {
        let mut s = ScoreState::new();
        assert_eq!(s.record_lock(), 1);
        s.record_row(1);
        s.record_row(2);
        // multiplier sqrt(2) -> 1
        assert_eq!(s.record_lock(), 1);
        s.record_row(1);
        s.record_row(2);
        // multiplier 2
        assert_eq!(s.record_lock(), 2);
    }

    #[test]
    fn test_whole_ms_interval() {
        let mut s = ScoreState::new();
        assert_eq!(s.fall_interval_whole_ms(), 1000);
        s.record_row(1);
        s.record_row(2);
        // 1000 / sqrt(2) = 707.1
        assert_eq!(s.fall_interval_whole_ms(), 707);
        s.fall_interval_ms = 577.9;
        assert_eq!(s.fall_interval_whole_ms(), 577);
        s.fall_interval_ms = 0.2;
        assert_eq!(s.fall_interval_whole_ms(), 1);
    }

    #[test]
    fn test_reset() {
        let mut s = ScoreState::new();
        s.record_row(1);
        s.record_lock();
        s.reset();
        assert_eq!(s, ScoreState::new());
    }
}
