//! Fit checking - can a shape occupy a position on the grid?
//!
//! A placement fits when every filled cell of the shape lands on an empty grid
//! cell inside the column range and above the bottom edge. Rows above the top
//! are open: a piece may poke out upwards while it spawns. Empty cells of the
//! shape's bounding box are never checked, so a piece can rotate while its
//! padding overlaps walls or the stack.

use crate::grid::Grid;
use crate::shapes::Shape;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH};

/// Check whether `shape` placed with its top-left corner at `(row, col)` fits.
pub fn fits(grid: &Grid, shape: &Shape, row: i32, col: i32) -> bool {
    shape.filled_cells().all(|(dr, dc)| {
        let r = row + dr as i32;
        let c = col + dc as i32;
        if c < 0 || c >= FIELD_WIDTH as i32 || r >= FIELD_HEIGHT as i32 {
            return false;
        }
        r < 0 || grid.is_empty_at(r, c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::STANDARD_SHAPES;
    use crate::types::Rgb;

    const GREY: Rgb = Rgb::new(90, 90, 90);

    fn o_piece() -> Shape {
        STANDARD_SHAPES[1]
    }

    #[test]
    fn test_fits_on_empty_grid() {
        let grid = Grid::new();
        assert!(fits(&grid, &o_piece(), 0, 0));
        assert!(fits(&grid, &o_piece(), 20, 10));
    }

    #[test]
    fn test_rejects_walls_and_floor() {
        let grid = Grid::new();
        assert!(!fits(&grid, &o_piece(), 0, -1));
        assert!(!fits(&grid, &o_piece(), 0, 11));
        assert!(!fits(&grid, &o_piece(), 21, 0));
    }

    #[test]
    fn test_rows_above_top_are_open() {
        let grid = Grid::new();
        assert!(fits(&grid, &o_piece(), -2, 3));
        assert!(fits(&grid, &o_piece(), -1, 3));
    }

    #[test]
    fn test_rejects_occupied_cells() {
        let mut grid = Grid::new();
        grid.set(5, 5, Some(GREY));
        assert!(!fits(&grid, &o_piece(), 4, 4));
        assert!(fits(&grid, &o_piece(), 3, 4));
    }

    #[test]
    fn test_empty_padding_is_ignored() {
        // I piece: only row 1 of its 4x4 box is filled.
        let i = STANDARD_SHAPES[0];
        let mut grid = Grid::new();
        grid.set(0, 0, Some(GREY));
        assert!(fits(&grid, &i, -1, 0));
        // Padding columns may hang off the right wall.
        let upright = i.rotated_cw();
        assert!(fits(&grid, &upright, 0, 10));
    }

    #[test]
    fn fits_iff_no_filled_cell_is_blocked() {
        let mut grid = Grid::new();
        for c in [0, 3, 7, 11] {
            grid.set(21, c, Some(GREY));
        }
        grid.set(10, 6, Some(GREY));

        for shape in STANDARD_SHAPES.iter() {
            for row in -4..24 {
                for col in -4..14 {
                    let blocked = shape.filled_cells().any(|(dr, dc)| {
                        let r = row + dr as i32;
                        let c = col + dc as i32;
                        c < 0 || c >= 12 || r >= 22 || (r >= 0 && grid.get(r, c) != Some(None))
                    });
                    assert_eq!(fits(&grid, shape, row, col), !blocked, "row={} col={}", row, col);
                }
            }
        }
    }
}
