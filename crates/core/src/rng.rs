//! RNG module - uniform piece selection and the lookahead queue
//!
//! Each new piece is an independent uniform draw over the seven kinds (no bag).
//! A small LCG keeps sessions reproducible from a seed.

use std::collections::VecDeque;

use crate::piece::Piece;
use crate::types::PieceKind;

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draw one kind uniformly
pub fn random_kind(rng: &mut SimpleRng) -> PieceKind {
    PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
}

/// Fixed-length queue of upcoming pieces
///
/// Every [`PieceQueue::pop`] is matched by one fresh draw pushed onto the tail, so the
/// length never changes after construction.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<Piece>,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a queue holding `len` freshly drawn pieces (at least one)
    pub fn new(seed: u32, len: usize) -> Self {
        let len = len.max(1);
        let mut rng = SimpleRng::new(seed);
        let upcoming = (0..len).map(|_| Piece::new(random_kind(&mut rng))).collect();
        Self { upcoming, rng }
    }

    /// Take the front piece and refill the tail
    pub fn pop(&mut self) -> Piece {
        let fresh = Piece::new(random_kind(&mut self.rng));
        // Pop before pushing so the deque never grows past its initial capacity.
        let front = self.upcoming.pop_front();
        self.upcoming.push_back(fresh);
        // `new` guarantees at least one entry.
        front.unwrap_or(fresh)
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<&Piece> {
        self.upcoming.front()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Upcoming pieces, front first
    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.upcoming.iter()
    }

    /// Upcoming kinds, front first
    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.upcoming.iter().map(|p| p.kind)
    }

    /// Get the current RNG state (used to seed the next session on restart)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0).state(), 1);
    }

    #[test]
    fn test_random_kind_covers_all_kinds() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[random_kind(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }

    #[test]
    fn test_queue_length_is_preserved() {
        let mut queue = PieceQueue::new(42, 5);
        assert_eq!(queue.len(), 5);
        for _ in 0..50 {
            queue.pop();
            assert_eq!(queue.len(), 5);
        }
    }

    #[test]
    fn test_pop_returns_front() {
        let mut queue = PieceQueue::new(3, 5);
        let second = queue.iter().nth(1).copied();
        let front = queue.peek().copied();

        assert_eq!(Some(queue.pop()), front);
        assert_eq!(queue.peek().copied(), second);
    }

    #[test]
    fn test_queued_pieces_sit_at_spawn() {
        let queue = PieceQueue::new(9, 5);
        for piece in queue.iter() {
            assert_eq!(*piece, Piece::new(piece.kind));
        }
    }

    #[test]
    fn test_zero_length_is_clamped() {
        let queue = PieceQueue::new(1, 0);
        assert_eq!(queue.len(), 1);
    }
}
