//! Protocol module - JSON message types for remote move advice
//!
//! One request/response pair of line-delimited JSON: the player side sends
//! a snapshot of its live position, the solver side answers with a target
//! column and rotation count. Board cells travel as colour names so the
//! snapshot stays renderable without knowing the shape enum.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Pattern, Piece};
use crate::solver::Move;
use crate::types::{Cell, ShapeKind};

/// Snapshot of a live position, sent by the player side.
///
/// `cells` holds only locked pieces; the falling piece travels separately
/// as its pattern and position. `nextShape` is omitted when no preview is
/// available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Option<String>>>,
    #[serde(rename = "currentShape")]
    pub current_shape: Vec<Vec<bool>>,
    #[serde(rename = "nextShape")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_shape: Option<Vec<Vec<bool>>>,
    #[serde(rename = "currentShapeX")]
    pub current_shape_x: i32,
    #[serde(rename = "currentShapeY")]
    pub current_shape_y: i32,
    #[serde(rename = "currentShapeType")]
    pub current_shape_type: String,
}

impl GameSnapshot {
    /// Build a snapshot from the board, the falling piece and the preview.
    pub fn from_parts(board: &Board, piece: &Piece, next: Option<ShapeKind>) -> Self {
        let cells = board
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|kind| kind.color_name().to_string()))
                    .collect()
            })
            .collect();

        Self {
            width: board.width(),
            height: board.height(),
            cells,
            current_shape: piece.pattern.rows(),
            next_shape: next.map(|kind| Pattern::base(kind).rows()),
            current_shape_x: piece.x,
            current_shape_y: piece.y,
            current_shape_type: piece.kind.as_str().to_string(),
        }
    }

    /// Rebuild the locked-piece board. Fails on dimension mismatches or
    /// unknown colour names.
    pub fn to_board(&self) -> Option<Board> {
        if self.cells.len() != self.height {
            return None;
        }
        let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(self.height);
        for row in &self.cells {
            if row.len() != self.width {
                return None;
            }
            let mut cells: Vec<Cell> = Vec::with_capacity(self.width);
            for cell in row {
                match cell {
                    None => cells.push(None),
                    Some(name) => cells.push(Some(ShapeKind::from_color_name(name)?)),
                }
            }
            rows.push(cells);
        }
        Board::from_rows(&rows)
    }

    /// Rebuild the falling piece with the exact pattern from the wire.
    pub fn to_piece(&self) -> Option<Piece> {
        let kind = ShapeKind::from_str(&self.current_shape_type)?;
        let pattern = Pattern::try_from_rows(&self.current_shape)?;
        Some(Piece::with_pattern(
            kind,
            pattern,
            self.current_shape_x,
            self.current_shape_y,
        ))
    }
}

/// The solver side's answer: target column and clockwise rotation count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAdvice {
    #[serde(rename = "opX")]
    pub op_x: i32,
    #[serde(rename = "opRotate")]
    pub op_rotate: u32,
}

impl MoveAdvice {
    /// The neutral answer sent when a request cannot be served: spawn
    /// orientation in the leftmost column.
    pub fn fallback() -> Self {
        Self {
            op_x: 0,
            op_rotate: 0,
        }
    }

    pub fn to_move(self) -> Move {
        Move {
            column: self.op_x,
            rotations: self.op_rotate,
        }
    }
}

impl From<Move> for MoveAdvice {
    fn from(mv: Move) -> Self {
        Self {
            op_x: mv.column,
            op_rotate: mv.rotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameConfig;

    fn sample_snapshot() -> GameSnapshot {
        let config = GameConfig::default();
        let mut board = Board::new(config.width, config.height);
        board.set(0, 19, Some(ShapeKind::Z));
        board.set(1, 19, Some(ShapeKind::I));

        let mut piece = Piece::new(ShapeKind::T);
        piece.x = 3;
        piece.y = -1;

        GameSnapshot::from_parts(&board, &piece, Some(ShapeKind::L))
    }

    #[test]
    fn test_snapshot_field_names() {
        let json = serde_json::to_value(sample_snapshot()).unwrap();
        assert!(json.get("width").is_some());
        assert!(json.get("height").is_some());
        assert!(json.get("cells").is_some());
        assert!(json.get("currentShape").is_some());
        assert!(json.get("nextShape").is_some());
        assert!(json.get("currentShapeX").is_some());
        assert!(json.get("currentShapeY").is_some());
        assert_eq!(json["currentShapeType"], "T");
    }

    #[test]
    fn test_snapshot_cells_are_color_names() {
        let json = serde_json::to_value(sample_snapshot()).unwrap();
        assert_eq!(json["cells"][19][0], "green");
        assert_eq!(json["cells"][19][1], "cyan");
        assert!(json["cells"][0][0].is_null());
    }

    #[test]
    fn test_next_shape_omitted_when_absent() {
        let board = Board::new(4, 4);
        let piece = Piece::new(ShapeKind::O);
        let snapshot = GameSnapshot::from_parts(&board, &piece, None);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("nextShape"));

        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.next_shape, None);
    }

    #[test]
    fn test_snapshot_round_trip_through_json() {
        let snapshot = sample_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);

        let board = parsed.to_board().expect("board rebuilds");
        assert_eq!(board.get(0, 19), Some(Some(ShapeKind::Z)));
        assert_eq!(board.get(2, 19), Some(None));

        let piece = parsed.to_piece().expect("piece rebuilds");
        assert_eq!(piece.kind, ShapeKind::T);
        assert_eq!((piece.x, piece.y), (3, -1));
        assert_eq!(piece.pattern, Pattern::base(ShapeKind::T));
    }

    #[test]
    fn test_to_board_rejects_bad_input() {
        let mut snapshot = sample_snapshot();
        snapshot.cells[0][0] = Some("mauve".to_string());
        assert!(snapshot.to_board().is_none());

        let mut snapshot = sample_snapshot();
        snapshot.cells.pop();
        assert!(snapshot.to_board().is_none());

        let mut snapshot = sample_snapshot();
        snapshot.cells[3].pop();
        assert!(snapshot.to_board().is_none());
    }

    #[test]
    fn test_to_piece_rejects_bad_input() {
        let mut snapshot = sample_snapshot();
        snapshot.current_shape_type = "Q".to_string();
        assert!(snapshot.to_piece().is_none());

        let mut snapshot = sample_snapshot();
        snapshot.current_shape = vec![vec![true], vec![true, true]];
        assert!(snapshot.to_piece().is_none());
    }

    #[test]
    fn test_advice_wire_names() {
        let advice = MoveAdvice { op_x: 5, op_rotate: 2 };
        let json = serde_json::to_value(advice).unwrap();
        assert_eq!(json["opX"], 5);
        assert_eq!(json["opRotate"], 2);
    }

    #[test]
    fn test_advice_fallback_is_origin() {
        let advice = MoveAdvice::fallback();
        assert_eq!(advice.op_x, 0);
        assert_eq!(advice.op_rotate, 0);
    }

    #[test]
    fn test_advice_move_conversion() {
        let mv = Move {
            column: 7,
            rotations: 3,
        };
        let advice = MoveAdvice::from(mv);
        assert_eq!(advice.to_move(), mv);
    }
}
