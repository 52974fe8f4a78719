//! Falling-block puzzle engine with a heuristic solver and a line-based
//! TCP protocol for remote move advice.
//!
//! The `core` module holds the grid and shape rules, `engine` drives a
//! session from wall-clock ticks and player commands, `solver` searches
//! placements, and `net` carries snapshots and advice over TCP.

pub mod core;
pub mod engine;
pub mod net;
pub mod solver;
pub mod types;

pub use crate::core::{Board, Pattern, Piece, PieceRng};
pub use crate::engine::{GameEngine, LockEvent, MoveSource};
pub use crate::net::{ClientConfig, GameSnapshot, MoveAdvice, RemoteAdvisor, ServerConfig};
pub use crate::solver::{find_best_move, Move};
pub use crate::types::{Cell, Command, GameConfig, GamePhase, MovePacing, ShapeKind};
