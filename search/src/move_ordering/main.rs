// Staged move ordering for the main search

use arrayvec::ArrayVec;
use board::{Move, MoveSet, Position, MAX_MOVES};
use evaluation::PieceValues;

use crate::history::HistoryHeuristic;
use crate::utils::gives_direct_check;
use crate::utils::see::see;

use super::utils::{mvv_lva, select_highest, ScoredMove};

// Quiet ordering weights
const SEE_WEIGHT: i32 = 8;
const CHECK_BONUS: i32 = 2_000;
const UNDEFENDED_PENALTY: i32 = 400;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Phase {
    TtMove,
    MateKiller,
    GenCaptures,
    GoodCaptures,
    Killers,
    GenRemaining,
    Remaining,
    Done,
}

/// Yields the legal moves of one node best-first:
/// 1. the transposition table move
/// 2. the ply's mate killer
/// 3. captures and promotions that do not lose material, by SEE
/// 4. the two killers
/// 5. everything else, by history, SEE and check/defence adjustments
pub struct MainMoveGenerator {
    gen_phase: Phase,
    moves: ArrayVec<Move, MAX_MOVES>,

    tt_move: Option<Move>,
    mate_killer: Option<Move>,
    killer_moves: [Option<Move>; 2],
    killer_index: usize,

    good_captures: ArrayVec<ScoredMove, MAX_MOVES>,
    remaining: ArrayVec<ScoredMove, MAX_MOVES>,

    game_phase: i32,
    piece_values: PieceValues,
}

impl MainMoveGenerator {
    /// `tt_move` must already be resolved against `moves`; killers are checked here.
    pub fn new(
        moves: &MoveSet,
        tt_move: Option<Move>,
        mate_killer: Option<Move>,
        killer_moves: [Option<Move>; 2],
        game_phase: i32,
        piece_values: PieceValues,
    ) -> Self {
        let mate_killer = mate_killer.filter(|mv| Some(*mv) != tt_move && moves.contains(mv));
        let killer_moves = killer_moves.map(|killer| {
            killer.filter(|mv| {
                !mv.is_tactical()
                    && Some(*mv) != tt_move
                    && Some(*mv) != mate_killer
                    && moves.contains(mv)
            })
        });

        Self {
            gen_phase: Phase::TtMove,
            moves: moves.iter().copied().collect(),
            tt_move,
            mate_killer,
            killer_moves,
            killer_index: 0,
            good_captures: ArrayVec::new(),
            remaining: ArrayVec::new(),
            game_phase,
            piece_values,
        }
    }

    #[inline(always)]
    fn is_staged(&self, mv: &Move) -> bool {
        Some(*mv) == self.tt_move
            || Some(*mv) == self.mate_killer
            || self.killer_moves.contains(&Some(*mv))
    }

    pub fn next(
        &mut self,
        position: &Position,
        move_set: &MoveSet,
        history: &HistoryHeuristic,
    ) -> Option<Move> {
        if self.gen_phase == Phase::TtMove {
            self.gen_phase = Phase::MateKiller;
            if self.tt_move.is_some() {
                return self.tt_move;
            }
        }

        if self.gen_phase == Phase::MateKiller {
            self.gen_phase = Phase::GenCaptures;
            if self.mate_killer.is_some() {
                return self.mate_killer;
            }
        }

        if self.gen_phase == Phase::GenCaptures {
            self.gen_phase = Phase::GoodCaptures;

            for i in 0..self.moves.len() {
                let mov = self.moves[i];
                if !mov.is_tactical() || self.is_staged(&mov) {
                    continue;
                }
                let exchange = see(position, &mov, self.game_phase, &self.piece_values);
                if exchange >= 0 {
                    let score = exchange * 16 + mvv_lva(&mov, self.game_phase, &self.piece_values);
                    self.good_captures.push(ScoredMove { mov, score });
                } else {
                    // Losing captures are ranked with the quiet moves
                    self.remaining.push(ScoredMove {
                        mov,
                        score: exchange * SEE_WEIGHT,
                    });
                }
            }
        }

        if self.gen_phase == Phase::GoodCaptures {
            if let Some(index) = select_highest(&self.good_captures) {
                return Some(self.good_captures.swap_remove(index).mov);
            }
            self.gen_phase = Phase::Killers;
        }

        if self.gen_phase == Phase::Killers {
            while self.killer_index < 2 {
                let killer = self.killer_moves[self.killer_index];
                self.killer_index += 1;
                if killer.is_some() {
                    return killer;
                }
            }
            self.gen_phase = Phase::GenRemaining;
        }

        if self.gen_phase == Phase::GenRemaining {
            self.gen_phase = Phase::Remaining;

            let us = position.side_to_move();
            for i in 0..self.moves.len() {
                let mov = self.moves[i];
                if mov.is_tactical() || self.is_staged(&mov) {
                    continue;
                }

                let mut score = history.get(us, &mov)
                    + SEE_WEIGHT * see(position, &mov, self.game_phase, &self.piece_values);
                if gives_direct_check(position, &mov) {
                    score += CHECK_BONUS;
                }
                if !move_set.own_attacks().contains(mov.to)
                    && move_set.opponent_attacks().contains(mov.to)
                {
                    score -= UNDEFENDED_PENALTY;
                }

                self.remaining.push(ScoredMove { mov, score });
            }
        }

        if self.gen_phase == Phase::Remaining {
            if let Some(index) = select_highest(&self.remaining) {
                return Some(self.remaining.swap_remove(index).mov);
            }
            self.gen_phase = Phase::Done;
        }

        None
    }
}
