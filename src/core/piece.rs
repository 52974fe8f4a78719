//! Tetromino patterns and active-piece state.
//!
//! A pattern is a small boolean matrix (at most 4x4) stored row-major.
//! Rotation produces a new matrix with swapped dimensions rather than
//! indexing into fixed orientation tables, so a piece received off the wire
//! with an arbitrary pattern still rotates correctly.

use crate::types::ShapeKind;

/// Maximum pattern edge length.
pub const PATTERN_MAX: usize = 4;

/// Row-major boolean matrix describing a shape's occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    width: u8,
    height: u8,
    cells: [bool; PATTERN_MAX * PATTERN_MAX],
}

impl Pattern {
    /// Spawn-orientation pattern for a shape.
    pub fn base(kind: ShapeKind) -> Pattern {
        let rows: &[&[bool]] = match kind {
            ShapeKind::I => &[&[true], &[true], &[true], &[true]],
            ShapeKind::O => &[&[true, true], &[true, true]],
            ShapeKind::T => &[&[false, true, false], &[true, true, true]],
            ShapeKind::L => &[&[true, false], &[true, false], &[true, true]],
            ShapeKind::J => &[&[false, true], &[false, true], &[true, true]],
            ShapeKind::Z => &[&[true, true, false], &[false, true, true]],
            ShapeKind::S => &[&[false, true, true], &[true, true, false]],
        };
        Pattern::from_rows(rows)
    }

    fn from_rows(rows: &[&[bool]]) -> Pattern {
        let height = rows.len();
        let width = rows[0].len();
        let mut cells = [false; PATTERN_MAX * PATTERN_MAX];
        for (row, row_cells) in rows.iter().enumerate() {
            for (col, &filled) in row_cells.iter().enumerate() {
                cells[row * PATTERN_MAX + col] = filled;
            }
        }
        Pattern {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    /// Builds a pattern from nested rows, as decoded from the wire.
    ///
    /// Returns `None` for an empty, ragged or oversized matrix.
    pub fn try_from_rows(rows: &[Vec<bool>]) -> Option<Pattern> {
        let height = rows.len();
        if height == 0 || height > PATTERN_MAX {
            return None;
        }
        let width = rows[0].len();
        if width == 0 || width > PATTERN_MAX {
            return None;
        }
        let mut cells = [false; PATTERN_MAX * PATTERN_MAX];
        for (row, row_cells) in rows.iter().enumerate() {
            if row_cells.len() != width {
                return None;
            }
            for (col, &filled) in row_cells.iter().enumerate() {
                cells[row * PATTERN_MAX + col] = filled;
            }
        }
        Some(Pattern {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Pattern width in cells.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Pattern height in cells.
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Whether the cell at (row, col) is occupied. Out of range is empty.
    pub fn filled(&self, row: usize, col: usize) -> bool {
        if row >= self.height() || col >= self.width() {
            return false;
        }
        self.cells[row * PATTERN_MAX + col]
    }

    /// This pattern rotated 90 degrees clockwise.
    ///
    /// `rotated[col][height - 1 - row] = self[row][col]`, with width and
    /// height swapped.
    pub fn rotated(&self) -> Pattern {
        let (w, h) = (self.width(), self.height());
        let mut cells = [false; PATTERN_MAX * PATTERN_MAX];
        for row in 0..h {
            for col in 0..w {
                if self.cells[row * PATTERN_MAX + col] {
                    cells[col * PATTERN_MAX + (h - 1 - row)] = true;
                }
            }
        }
        Pattern {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Copies the pattern into nested rows for the wire.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        (0..self.height())
            .map(|row| (0..self.width()).map(|col| self.filled(row, col)).collect())
            .collect()
    }
}

/// An active falling piece: its kind, pattern and board position.
///
/// Position is the top-left corner of the pattern. `y` is allowed to be
/// negative while the piece is still in the spawn buffer above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: ShapeKind,
    pub pattern: Pattern,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// New piece of the given kind in spawn orientation at the origin.
    pub fn new(kind: ShapeKind) -> Piece {
        Piece {
            kind,
            pattern: Pattern::base(kind),
            x: 0,
            y: 0,
        }
    }

    /// Piece with an explicit pattern, as reconstructed from the wire.
    pub fn with_pattern(kind: ShapeKind, pattern: Pattern, x: i32, y: i32) -> Piece {
        Piece { kind, pattern, x, y }
    }

    /// Pattern width in cells.
    pub fn width(&self) -> usize {
        self.pattern.width()
    }

    /// Pattern height in cells.
    pub fn height(&self) -> usize {
        self.pattern.height()
    }

    /// Whether the pattern cell at (row, col) is occupied.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.pattern.filled(row, col)
    }

    /// The pattern this piece would have after one clockwise rotation.
    ///
    /// O pieces are rotation-symmetric and return their pattern unchanged.
    pub fn rotated_pattern(&self) -> Pattern {
        if self.kind == ShapeKind::O {
            return self.pattern;
        }
        self.pattern.rotated()
    }

    /// Rotates the piece in place. No-op for O pieces.
    pub fn rotate(&mut self) {
        self.pattern = self.rotated_pattern();
    }
}
