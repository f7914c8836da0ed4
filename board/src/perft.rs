//! Move path enumeration for move generator verification.
//!
//! <https://www.chessprogramming.org/Perft>

use std::ops::AddAssign;

use crate::movegen::legal_moves;
use crate::position::Position;

/// Leaf counts of a perft run, classified by the move that reached the leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftStats {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl AddAssign for PerftStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passant += other.en_passant;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
    }
}

/// Number of leaf nodes at `depth`, using bulk counting at the last ply.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    let moves = legal_moves(pos);
    if depth <= 1 {
        return if depth == 0 { 1 } else { moves.len() as u64 };
    }

    let mut nodes = 0;
    for mv in moves {
        let undo = pos.apply(mv);
        nodes += perft(pos, depth - 1);
        pos.undo(mv, undo);
    }
    nodes
}

/// Leaf counts at `depth` with the capture, castle and check breakdown.
pub fn perft_stats(pos: &mut Position, depth: u32) -> PerftStats {
    let mut stats = PerftStats::default();
    if depth == 0 {
        stats.nodes = 1;
        return stats;
    }

    for mv in legal_moves(pos) {
        let undo = pos.apply(mv);
        if depth == 1 {
            stats.nodes += 1;
            stats.captures += mv.is_capture() as u64;
            stats.en_passant += mv.is_en_passant() as u64;
            stats.castles += mv.is_castle() as u64;
            stats.promotions += mv.is_promotion() as u64;
            stats.checks += pos.is_in_check(pos.side_to_move()) as u64;
        } else {
            stats += perft_stats(pos, depth - 1);
        }
        pos.undo(mv, undo);
    }
    stats
}

/// Per root move node counts, sorted by move text.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let undo = pos.apply(mv);
            let nodes = perft(pos, depth.saturating_sub(1));
            pos.undo(mv, undo);
            (mv.to_string(), nodes)
        })
        .collect();
    counts.sort();
    counts
}
