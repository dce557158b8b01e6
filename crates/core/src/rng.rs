//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled.
//! Draws from the bag until empty, then generates a new bag. A fixed-depth
//! preview queue sits in front of the bag and is topped up after every draw.
//!
//! Also provides a simple LCG for deterministic play and testing.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, MAX_PREVIEW_DEPTH};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// One shuffled permutation of all seven kinds at a time
#[derive(Debug, Clone)]
pub struct SevenBag {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag (7 = exhausted)
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: 7,
            rng: SimpleRng::new(seed),
        }
    }

    /// Next identifier; reshuffles a fresh bag when the current one is spent
    pub fn next_piece(&mut self) -> PieceKind {
        if self.bag_index >= 7 {
            self.refill_bag();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// Draws left before the next reshuffle
    pub fn remaining(&self) -> usize {
        7 - self.bag_index
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }
}

/// 7-bag generator with a fixed-length preview queue
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: SevenBag,
    preview: ArrayVec<PieceKind, MAX_PREVIEW_DEPTH>,
    seed: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed and preview depth
    ///
    /// Depth is clamped to 1..=`MAX_PREVIEW_DEPTH`.
    pub fn new(seed: u32, depth: usize) -> Self {
        let depth = depth.clamp(1, MAX_PREVIEW_DEPTH);
        let mut bag = SevenBag::new(seed);
        let preview = (0..depth).map(|_| bag.next_piece()).collect();
        Self { bag, preview, seed }
    }

    /// Take the front of the preview and append one fresh draw to the back
    pub fn draw(&mut self) -> PieceKind {
        let next = self.bag.next_piece();
        let kind = self.preview.remove(0);
        self.preview.push(next);
        kind
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.preview[0]
    }

    /// Upcoming pieces, front first
    pub fn preview(&self) -> &[PieceKind] {
        &self.preview
    }

    pub fn depth(&self) -> usize {
        self.preview.len()
    }

    /// Get the seed used to initialize the RNG
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// Seed from the high-resolution wall clock.
///
/// Deterministic callers (tests, replays) pass their own seed instead.
pub fn seed_from_clock() -> u32 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let folded = (nanos ^ (nanos >> 32)) as u32;
    if folded == 0 {
        1
    } else {
        folded
    }
}
