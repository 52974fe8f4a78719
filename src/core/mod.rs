//! Core module - game rules with no I/O anywhere
//!
//! Grid storage, shape patterns, the deterministic shape generator and
//! the scoring tables. Nothing in here touches the network or the clock.

pub mod board;
pub mod piece;
pub mod rng;
pub mod scoring;

// Short paths for the common types
pub use board::Board;
pub use piece::{Pattern, Piece};
pub use rng::PieceRng;
