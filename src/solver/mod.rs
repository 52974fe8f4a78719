//! Solver module - heuristic placement search
//!
//! Enumerates every distinct rotation and column for the current shape,
//! simulates the vertical drop and the resulting row clears, and keeps the
//! placement whose board scores best. Ties keep the earliest candidate, so
//! the same position always yields the same move.

pub mod evaluator;

use arrayvec::ArrayVec;

use crate::core::{Board, Piece};
use crate::types::ShapeKind;

/// A target placement: destination column and clockwise rotations to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Move {
    pub column: i32,
    pub rotations: u32,
}

/// Number of distinct orientations for a shape
pub fn distinct_rotations(kind: ShapeKind) -> u32 {
    match kind {
        ShapeKind::O => 1,
        ShapeKind::I | ShapeKind::S | ShapeKind::Z => 2,
        ShapeKind::T | ShapeKind::L | ShapeKind::J => 4,
    }
}

/// Whether every filled cell of the pattern lands in bounds and on empty
/// cells. Unlike live-play validity this rejects negative rows: a simulated
/// drop must end fully inside the grid.
fn placement_fits(board: &Board, piece: &Piece, x: i32, y: i32) -> bool {
    for row in 0..piece.height() {
        for col in 0..piece.width() {
            if !piece.is_filled(row, col) {
                continue;
            }
            let board_x = x + col as i32;
            let board_y = y + row as i32;
            if board_x < 0 || board_x >= board.width() as i32 {
                return false;
            }
            if board_y < 0 || board_y >= board.height() as i32 {
                return false;
            }
            if board.is_occupied(board_x, board_y) {
                return false;
            }
        }
    }
    true
}

/// Lowest row the piece can rest at in the given column, or `None` when the
/// column cannot take the piece at all.
fn drop_row(board: &Board, piece: &Piece, x: i32) -> Option<i32> {
    if !placement_fits(board, piece, x, 0) {
        return None;
    }
    let mut y = 0;
    while placement_fits(board, piece, x, y + 1) {
        y += 1;
    }
    Some(y)
}

/// Find the best placement for a shape on the given board.
///
/// The shape is searched from its spawn orientation regardless of how the
/// live piece is currently rotated. Returns `None` when no rotation fits in
/// any column.
pub fn find_best_move(board: &Board, kind: ShapeKind) -> Option<Move> {
    let mut states: ArrayVec<Piece, 4> = ArrayVec::new();
    let mut piece = Piece::new(kind);
    for _ in 0..distinct_rotations(kind) {
        states.push(piece);
        piece.rotate();
    }

    let mut best: Option<(i32, Move)> = None;

    for (rotations, candidate) in states.iter().enumerate() {
        let width = candidate.width();
        if width > board.width() {
            continue;
        }
        for column in 0..=(board.width() - width) {
            let x = column as i32;
            let Some(y) = drop_row(board, candidate, x) else {
                continue;
            };

            let mut trial = board.clone();
            let mut placed = *candidate;
            placed.x = x;
            placed.y = y;
            trial.place(&placed);
            trial.clear_full_rows();

            let score = evaluator::evaluate(&trial);
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((
                    score,
                    Move {
                        column: x,
                        rotations: rotations as u32,
                    },
                ));
            }
        }
    }

    best.map(|(_, mv)| mv)
}
