use crate::shapes::Shape;
use crate::types::{
    Cell, Rgb, RunState, BASE_FALL_INTERVAL_MS, FIELD_WIDTH, MAX_SHAPE_DIM, VISIBLE_ROWS,
};

const WIDTH: usize = FIELD_WIDTH as usize;
const ROWS: usize = VISIBLE_ROWS as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub shape: Shape,
    pub color: Rgb,
}

impl NextSnapshot {
    /// Preview cells as a fixed box, shape anchored top-left.
    pub fn cells(&self) -> [[Cell; MAX_SHAPE_DIM]; MAX_SHAPE_DIM] {
        let mut out = [[None; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, c) in self.shape.filled_cells() {
            out[r as usize][c as usize] = Some(self.color);
        }
        out
    }
}

/// Read-only view handed to render sinks.
///
/// `field` holds the visible rows only; the active piece is already merged in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub field: [[Cell; WIDTH]; ROWS],
    pub next: Option<NextSnapshot>,
    pub score: u64,
    pub rows_cleared: u32,
    pub multiplier: f64,
    pub fall_interval_ms: f64,
    pub run_state: RunState,
}

impl RenderSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Visible cell at `(row, col)`; `None` when empty or out of range.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.field.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.field
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| c.is_some())
            .count()
    }

    pub fn paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.run_state.is_stopped()
    }
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            field: [[None; WIDTH]; ROWS],
            next: None,
            score: 0,
            rows_cleared: 0,
            multiplier: 1.0,
            fall_interval_ms: BASE_FALL_INTERVAL_MS as f64,
            run_state: RunState::Running,
        }
    }
}
