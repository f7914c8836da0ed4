use board::Move;

use crate::MAX_DEPTH;

/// Quiet moves that caused beta cutoffs (2 per ply, most recent first), plus
/// the last move per ply whose cutoff score was a mate.
///
/// <https://www.chessprogramming.org/Killer_Heuristic>
pub struct KillerTable {
    killers: [[Option<Move>; 2]; MAX_DEPTH],
    mate_killers: [Option<Move>; MAX_DEPTH],
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            killers: [[None; 2]; MAX_DEPTH],
            mate_killers: [None; MAX_DEPTH],
        }
    }

    pub fn clear(&mut self) {
        self.killers = [[None; 2]; MAX_DEPTH];
        self.mate_killers = [None; MAX_DEPTH];
    }

    #[inline(always)]
    pub fn killers(&self, ply: usize) -> [Option<Move>; 2] {
        self.killers.get(ply).copied().unwrap_or([None; 2])
    }

    #[inline(always)]
    pub fn mate_killer(&self, ply: usize) -> Option<Move> {
        self.mate_killers.get(ply).copied().flatten()
    }

    #[inline(always)]
    pub fn store(&mut self, ply: usize, mv: Move) {
        let Some(killers) = self.killers.get_mut(ply) else {
            return;
        };
        if killers[0] != Some(mv) {
            killers[1] = killers[0];
            killers[0] = Some(mv);
        }
    }

    #[inline(always)]
    pub fn store_mate(&mut self, ply: usize, mv: Move) {
        if let Some(slot) = self.mate_killers.get_mut(ply) {
            *slot = Some(mv);
        }
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::{parse_move, Position};

    #[test]
    fn test_killers_shift_and_dedupe() {
        let position = Position::default();
        let a = parse_move(&position, "e2e4").unwrap();
        let b = parse_move(&position, "g1f3").unwrap();

        let mut table = KillerTable::new();
        table.store(3, a);
        table.store(3, a);
        assert_eq!(table.killers(3), [Some(a), None]);

        table.store(3, b);
        assert_eq!(table.killers(3), [Some(b), Some(a)]);
        assert_eq!(table.killers(4), [None, None]);

        table.store_mate(3, a);
        assert_eq!(table.mate_killer(3), Some(a));
        assert_eq!(table.killers(MAX_DEPTH + 5), [None, None]);

        table.clear();
        assert_eq!(table.mate_killer(3), None);
    }
}
