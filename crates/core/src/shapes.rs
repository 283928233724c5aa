//! Shapes module - piece footprints and the piece catalog
//!
//! A shape is a small boolean matrix (at most 4x4) describing which cells of
//! its bounding box a piece fills. Shapes rotate by transposing and reversing
//! the rows, so a piece turns inside its own bounding box and no wall kicks
//! are attempted.

use crate::types::MAX_SHAPE_DIM;
use thiserror::Error;

/// Validation errors raised while building shapes or catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape must have between 1 and {max} rows and columns, got {rows}x{cols}")]
    BadDimensions { rows: usize, cols: usize, max: usize },
    #[error("shape row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("shape has no filled cells")]
    NoFilledCells,
    #[error("catalog must contain at least one shape")]
    EmptyCatalog,
}

/// Boolean footprint of one piece orientation.
///
/// Cells outside `rows x cols` are always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from 0/1 rows, as written in the catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let t = Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]).unwrap();
    /// assert_eq!((t.rows(), t.cols()), (3, 3));
    /// assert_eq!(t.filled_count(), 4);
    /// assert!(Shape::from_rows(&[]).is_err());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if height == 0 || width == 0 || height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return Err(ShapeError::BadDimensions {
                rows: height,
                cols: width,
                max: MAX_SHAPE_DIM,
            });
        }

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ShapeError::RaggedRow {
                    row: r,
                    len: row.len(),
                    expected: width,
                });
            }
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }

        let shape = Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        };
        if shape.filled_count() == 0 {
            return Err(ShapeError::NoFilledCells);
        }
        Ok(shape)
    }

    /// Const constructor for the built-in catalog (no validation).
    const fn from_bits(rows: u8, cols: u8, bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        Self { rows, cols, bits }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at `(row, col)` of the bounding box is filled.
    #[inline]
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.bits[row as usize][col as usize]
    }

    /// Iterate `(row, col)` of every filled cell, top to bottom.
    pub fn filled_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.bits[r as usize][c as usize])
                .map(move |c| (r, c))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Rotate 90° clockwise: `rotated[r][c] = self[rows - 1 - c][r]`.
    ///
    /// Rows and columns swap, so rectangular shapes stay valid.
    pub fn rotated_cw(&self) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..self.cols as usize {
            for c in 0..self.rows as usize {
                bits[r][c] = self.bits[self.rows as usize - 1 - c][r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

const X: bool = true;
const O: bool = false;

/// The seven standard pieces, in catalog order I, O, T, S, Z, J, L.
pub const STANDARD_SHAPES: [Shape; 7] = [
    // I
    Shape::from_bits(
        4,
        4,
        [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
    ),
    // O
    Shape::from_bits(
        2,
        2,
        [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
    ),
    // T
    Shape::from_bits(
        3,
        3,
        [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
    ),
    // S
    Shape::from_bits(
        3,
        3,
        [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
    ),
    // Z
    Shape::from_bits(
        3,
        3,
        [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
    ),
    // J
    Shape::from_bits(
        3,
        3,
        [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
    ),
    // L
    Shape::from_bits(
        3,
        3,
        [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
    ),
];

/// The fixed set of shapes pieces are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    shapes: &'static [Shape],
}

impl Catalog {
    /// Catalog of the seven standard pieces.
    pub fn standard() -> Self {
        Self {
            shapes: &STANDARD_SHAPES,
        }
    }

    /// Use a custom catalog. It must not be empty.
    pub fn new(shapes: &'static [Shape]) -> Result<Self, ShapeError> {
        if shapes.is_empty() {
            return Err(ShapeError::EmptyCatalog);
        }
        Ok(Self { shapes })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn shapes(&self) -> &'static [Shape] {
        self.shapes
    }

    /// Widest and tallest extent over all shapes (sizes the next-piece preview).
    pub fn max_extent(&self) -> (u8, u8) {
        self.shapes.iter().fold((0, 0), |(r, c), s| {
            (r.max(s.rows()), c.max(s.cols()))
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
