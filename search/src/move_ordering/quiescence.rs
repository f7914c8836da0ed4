// Move ordering for quiescence search

use arrayvec::ArrayVec;
use board::{Move, MoveSet, Position, MAX_MOVES};
use evaluation::PieceValues;

use crate::utils::see::see;

use super::utils::{mvv_lva, select_highest, ScoredMove};

/// Orders the forcing moves of a quiescence node. Captures come by exchange
/// value, so losing ones are tried last; evasions put king moves and cheap
/// blockers first.
pub struct QMoveGenerator {
    forcing_moves: ArrayVec<ScoredMove, MAX_MOVES>,
}

impl QMoveGenerator {
    pub fn new(position: &Position, moves: &MoveSet, phase: i32, piece_values: &PieceValues) -> Self {
        let forcing_moves = if moves.in_check() {
            Self::gen_evasions(moves, phase, piece_values)
        } else {
            Self::gen_captures(position, moves, phase, piece_values)
        };
        Self { forcing_moves }
    }

    fn gen_captures(
        position: &Position,
        moves: &MoveSet,
        phase: i32,
        piece_values: &PieceValues,
    ) -> ArrayVec<ScoredMove, MAX_MOVES> {
        moves
            .iter()
            .map(|&mov| ScoredMove {
                mov,
                score: see(position, &mov, phase, piece_values) * 64
                    + mvv_lva(&mov, phase, piece_values) / 16,
            })
            .collect()
    }

    fn gen_evasions(
        moves: &MoveSet,
        phase: i32,
        piece_values: &PieceValues,
    ) -> ArrayVec<ScoredMove, MAX_MOVES> {
        moves
            .iter()
            .map(|&mov| {
                // Captures of the checker first, then king steps and cheap interpositions
                let score = if mov.is_tactical() {
                    mvv_lva(&mov, phase, piece_values)
                } else {
                    -piece_values.get(mov.piece, phase)
                };
                ScoredMove { mov, score }
            })
            .collect()
    }

    pub fn next(&mut self) -> Option<Move> {
        let index = select_highest(&self.forcing_moves)?;
        Some(self.forcing_moves.swap_remove(index).mov)
    }
}
