//! Board module - the playfield grid and line clearing
//!
//! The board is a width x height grid where each cell is empty or filled
//! with a shape kind. Storage is a flat row-major vector so dimensions can
//! come from configuration or from the wire.
//! Coordinates: (x, y) with x left to right and y top to bottom. A falling
//! piece may sit partly above the top edge (negative y) right after spawn.

use crate::core::piece::Piece;
use crate::types::Cell;

/// The game grid with runtime dimensions, flat row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// New board with every cell empty
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Flat index for (x, y), None when out of bounds
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y), or None when outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Store a cell at (x, y), reporting whether it was in bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True when (x, y) is inside the grid and holds a shape
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a piece's pattern can sit at (x, y).
    ///
    /// Horizontal bounds and the bottom edge are hard limits. Cells above
    /// the top edge are allowed so a freshly spawned piece can enter the
    /// board gradually; collision is only tested for rows at y >= 0.
    pub fn is_valid_position(&self, piece: &Piece, x: i32, y: i32) -> bool {
        for row in 0..piece.height() {
            for col in 0..piece.width() {
                if !piece.is_filled(row, col) {
                    continue;
                }
                let board_x = x + col as i32;
                let board_y = y + row as i32;
                if board_x < 0 || board_x >= self.width as i32 {
                    return false;
                }
                if board_y >= self.height as i32 {
                    return false;
                }
                if board_y >= 0 && self.is_occupied(board_x, board_y) {
                    return false;
                }
            }
        }
        true
    }

    /// Write a piece's filled cells onto the board.
    /// Cells outside the grid (still in the spawn buffer) are skipped.
    pub fn place(&mut self, piece: &Piece) {
        for row in 0..piece.height() {
            for col in 0..piece.width() {
                if piece.is_filled(row, col) {
                    self.set(piece.x + col as i32, piece.y + row as i32, Some(piece.kind));
                }
            }
        }
    }

    /// Whether every cell in row y is filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        let end = start + self.width;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear a row and shift all rows above down by one
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }

        // copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * self.width;
            let dst_start = row * self.width;
            self.cells
                .copy_within(src_start..src_start + self.width, dst_start);
        }

        for cell in &mut self.cells[0..self.width] {
            *cell = None;
        }
    }

    /// Clear every full row and return how many were cleared.
    ///
    /// Scans top to bottom; after a clear the same index is re-checked,
    /// since the shift pulls a new row down into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = 0;
        while y < self.height {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Get a reference to the internal cells slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into nested rows for the wire
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        (0..self.height)
            .map(|y| {
                let start = y * self.width;
                self.cells[start..start + self.width].to_vec()
            })
            .collect()
    }

    /// Rebuild a board from nested rows, as decoded from the wire.
    /// Returns `None` for an empty or ragged grid.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let height = rows.len();
        if height == 0 {
            return None;
        }
        let width = rows[0].len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let mut board = Board::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                board.cells[y * width + x] = *cell;
            }
        }
        Some(board)
    }

    /// Fill a whole row for testing
    #[cfg(test)]
    pub fn fill_row(&mut self, y: usize, kind: crate::types::ShapeKind) {
        for x in 0..self.width {
            self.set(x as i32, y as i32, Some(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_get_set() {
        let mut board = Board::new(10, 20);

        assert!(board.set(0, 0, Some(ShapeKind::I)));
        assert!(board.set(5, 10, Some(ShapeKind::T)));
        assert!(!board.set(10, 0, Some(ShapeKind::Z)));

        assert_eq!(board.get(0, 0), Some(Some(ShapeKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(ShapeKind::T)));
        assert_eq!(board.get(1, 1), Some(None));
        assert_eq!(board.get(0, -1), None);
    }

    #[test]
    fn test_clear_row_shifts_rows_above() {
        let mut board = Board::new(4, 4);
        board.set(0, 1, Some(ShapeKind::L));
        board.fill_row(2, ShapeKind::I);
        board.set(3, 3, Some(ShapeKind::J));

        board.clear_row(2);

        // Row above moved down, bottom row untouched, top now empty.
        assert_eq!(board.get(0, 2), Some(Some(ShapeKind::L)));
        assert_eq!(board.get(0, 1), Some(None));
        assert_eq!(board.get(3, 3), Some(Some(ShapeKind::J)));
        assert!(board.cells()[0..4].iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_full_rows_rechecks_shifted_row() {
        // Two adjacent full rows: the second becomes the first's index
        // after the shift and must still be caught.
        let mut board = Board::new(4, 4);
        board.fill_row(2, ShapeKind::S);
        board.fill_row(3, ShapeKind::Z);

        assert_eq!(board.clear_full_rows(), 2);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_full_rows_at_top_edge() {
        let mut board = Board::new(4, 4);
        board.fill_row(0, ShapeKind::I);
        board.fill_row(1, ShapeKind::O);
        board.set(2, 3, Some(ShapeKind::T));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(2, 3), Some(Some(ShapeKind::T)));
        let filled = board.cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn test_clear_full_rows_empty_board() {
        let mut board = Board::new(10, 20);
        assert_eq!(board.clear_full_rows(), 0);
    }

    #[test]
    fn test_from_rows_round_trip() {
        let mut board = Board::new(5, 6);
        board.set(2, 4, Some(ShapeKind::O));
        board.set(0, 5, Some(ShapeKind::L));

        let rebuilt = Board::from_rows(&board.rows()).expect("round trip");
        assert_eq!(rebuilt, board);
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        assert!(Board::from_rows(&[]).is_none());
        assert!(Board::from_rows(&[vec![]]).is_none());
        let ragged = vec![vec![None; 3], vec![None; 2]];
        assert!(Board::from_rows(&ragged).is_none());
    }
}
