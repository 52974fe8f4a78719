//! RNG module - deterministic shape drawing
//!
//! A simple LCG drives piece selection so two engines seeded alike produce
//! the same shape sequence, which keeps head-to-head sessions fair and
//! makes tests reproducible. Draws are uniform over the seven shapes.

use crate::types::ShapeKind;

/// LCG-backed shape generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct PieceRng {
    state: u32,
}

impl PieceRng {
    /// Create a new generator with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero seed joins the seed 1 stream.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Next raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula with a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Next value in [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw the next shape
    pub fn next_kind(&mut self) -> ShapeKind {
        let idx = self.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }

    /// Current generator state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new(1)
    }
}
