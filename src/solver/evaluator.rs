//! Board evaluation heuristic.
//!
//! A placement is judged on the board that results from it: tall stacks,
//! buried holes and an uneven surface are penalized, completed rows are
//! rewarded. Weights are untuned hand-picked integers.

use crate::core::Board;

/// Penalty per cell of overall stack height
pub const HEIGHT_WEIGHT: i32 = -4;
/// Reward per completed row
pub const LINES_WEIGHT: i32 = 3;
/// Penalty per buried hole
pub const HOLES_WEIGHT: i32 = -5;
/// Penalty per cell of adjacent-column height difference
pub const BUMPINESS_WEIGHT: i32 = -2;

/// Raw surface measurements of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardMetrics {
    /// Height of the tallest column
    pub stack_height: i32,
    /// Rows that are completely filled
    pub full_rows: i32,
    /// Empty cells with at least one filled cell above them
    pub holes: i32,
    /// Sum of height differences between adjacent columns
    pub bumpiness: i32,
}

impl BoardMetrics {
    /// Measure a board
    pub fn measure(board: &Board) -> BoardMetrics {
        let width = board.width();
        let height = board.height();

        let mut stack_height = 0;
        let mut holes = 0;
        let mut bumpiness = 0;
        let mut prev_column_height: Option<i32> = None;

        for x in 0..width {
            let mut column_height = 0;
            let mut seen_filled = false;
            for y in 0..height {
                if board.is_occupied(x as i32, y as i32) {
                    if !seen_filled {
                        column_height = (height - y) as i32;
                        seen_filled = true;
                    }
                } else if seen_filled {
                    holes += 1;
                }
            }

            stack_height = stack_height.max(column_height);
            if let Some(prev) = prev_column_height {
                bumpiness += (prev - column_height).abs();
            }
            prev_column_height = Some(column_height);
        }

        let full_rows = (0..height).filter(|&y| board.is_row_full(y)).count() as i32;

        BoardMetrics {
            stack_height,
            full_rows,
            holes,
            bumpiness,
        }
    }

    /// Weighted score of these measurements. Higher is better.
    pub fn score(&self) -> i32 {
        HEIGHT_WEIGHT * self.stack_height
            + LINES_WEIGHT * self.full_rows
            + HOLES_WEIGHT * self.holes
            + BUMPINESS_WEIGHT * self.bumpiness
    }
}

/// Score a board directly
pub fn evaluate(board: &Board) -> i32 {
    BoardMetrics::measure(board).score()
}
