//! Grid module - the field of locked blocks
//!
//! The grid is a 22x12 matrix where each cell is empty or holds the color of a
//! locked block. The top two rows are hidden: pieces spawn there and blocks
//! may overflow into them, but renderers never draw them.
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 is the left edge.

use crate::types::{Cell, Rgb, FIELD_HEIGHT, FIELD_WIDTH, HIDDEN_ROWS};

/// Total number of cells on the field
const FIELD_SIZE: usize = FIELD_WIDTH as usize * FIELD_HEIGHT as usize;

const WIDTH: usize = FIELD_WIDTH as usize;

/// The locked-block field, flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; FIELD_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= FIELD_HEIGHT as i32 || col < 0 || col >= FIELD_WIDTH as i32 {
            return None;
        }
        Some(row as usize * WIDTH + col as usize)
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get the cell at `(row, col)`; `None` when out of range
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(row, col)`; false when out of range
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `(row, col)` is inside the grid and empty
    pub fn is_empty_at(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Borrow one row; `None` below the floor
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let start = row.checked_mul(WIDTH)?;
        self.cells.get(start..start.checked_add(WIDTH)?)
    }

    /// Rows top to bottom, hidden rows included
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Rows a renderer shows (hidden rows skipped)
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows().skip(HIDDEN_ROWS as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Write `color` into every filled cell of the footprint placed at
    /// `(row, col)`. Cells above the top row have no storage and are dropped.
    ///
    /// Returns how many cells were written.
    pub fn lock_cells<I>(&mut self, cells: I, row: i32, col: i32, color: Rgb) -> usize
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        let mut written = 0;
        for (dr, dc) in cells {
            if self.set(row + dr as i32, col + dc as i32, Some(color)) {
                written += 1;
            }
        }
        written
    }

    /// Remove `row` by moving every row in `window_top..row` down by one and
    /// emptying `window_top`. Rows below `row` stay where they are.
    pub fn shift_down_into(&mut self, row: usize, window_top: usize) {
        debug_assert!(window_top <= row && row < FIELD_HEIGHT as usize);

        // copy_within handles the overlapping ranges
        if row > window_top {
            self.cells
                .copy_within(window_top * WIDTH..row * WIDTH, (window_top + 1) * WIDTH);
        }
        let start = window_top * WIDTH;
        self.cells[start..start + WIDTH].fill(None);
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a whole row, handy for setting up positions in tests and benches
    pub fn fill_row(&mut self, row: usize, color: Rgb) {
        if row < FIELD_HEIGHT as usize {
            let start = row * WIDTH;
            self.cells[start..start + WIDTH].fill(Some(color));
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
