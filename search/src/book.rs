use ahash::AHashMap;
use board::{parse_move, Move, Position};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::GameError;

/// Candidate moves kept per position.
pub const MAX_BOOK_MOVES: usize = 3;

/// Opening knowledge keyed by position hash.
pub trait Book: Send {
    fn lookup(&mut self, hash: u64) -> Option<Move>;
}

/// In-memory book that picks between up to three candidates per position.
pub struct MemoryBook {
    entries: AHashMap<u64, Vec<Move>>,
    rng: StdRng,
}

impl MemoryBook {
    pub fn new(seed: u64) -> Self {
        Self {
            entries: AHashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds a book from opening lines, one per line of text, each a
    /// whitespace-separated sequence of coordinate moves from the start
    /// position. Blank lines and lines starting with `#` are skipped.
    pub fn from_lines(text: &str, seed: u64) -> Result<Self, GameError> {
        let mut book = Self::new(seed);
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut position = Position::default();
            for notation in line.split_whitespace() {
                let mv = parse_move(&position, notation)?;
                book.insert(position.hash(), mv);
                position.apply(mv);
            }
        }
        debug!("opening book holds {} positions", book.len());
        Ok(book)
    }

    /// Adds a candidate for `hash`. Duplicates and candidates past the
    /// third are ignored.
    pub fn insert(&mut self, hash: u64, mv: Move) {
        let moves = self.entries.entry(hash).or_default();
        if moves.len() < MAX_BOOK_MOVES && !moves.contains(&mv) {
            moves.push(mv);
        }
    }

    pub fn candidates(&self, hash: u64) -> &[Move] {
        self.entries.get(&hash).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Book for MemoryBook {
    fn lookup(&mut self, hash: u64) -> Option<Move> {
        let moves = self.entries.get(&hash)?;
        if moves.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..moves.len());
        Some(moves[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: &str = "
        # open games
        e2e4 e7e5 g1f3
        e2e4 c7c5
        d2d4 d7d5
        c2c4
        g1f3
    ";

    #[test]
    fn test_from_lines() {
        let mut book = MemoryBook::from_lines(LINES, 7).unwrap();
        let start = Position::default();

        // Four distinct first moves, capped at three
        assert_eq!(book.candidates(start.hash()).len(), MAX_BOOK_MOVES);
        let first = book.lookup(start.hash()).unwrap();
        assert!(book.candidates(start.hash()).contains(&first));

        let mut after_e4 = start.clone();
        after_e4.apply(parse_move(&start, "e2e4").unwrap());
        assert_eq!(book.candidates(after_e4.hash()).len(), 2);

        assert_eq!(book.lookup(0xdead_beef), None);
    }

    #[test]
    fn test_bad_line_is_an_error() {
        assert!(MemoryBook::from_lines("e2e4 e2e4", 1).is_err());
        assert!(MemoryBook::from_lines("e2e9", 1).is_err());
    }
}
