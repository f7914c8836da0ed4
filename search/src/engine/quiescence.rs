use board::{legal_captures, Move, Piece};
use evaluation::piece_values::game_phase;
use evaluation::scores::{MATE_VALUE, NEG_INFINITY};

use crate::{move_ordering::QMoveGenerator, pruning::delta_prune, MAX_DEPTH};

use super::Engine;

impl Engine {
    /// Resolves captures and promotions until the position is quiet. In
    /// check every evasion is searched and standing pat is not allowed.
    ///
    /// <https://www.chessprogramming.org/Quiescence_Search>
    pub(super) fn quiescence_search(
        &mut self,
        ply: u8,
        mut alpha: i16,
        beta: i16,
    ) -> (i16, Vec<Move>) {
        if self.poll() {
            return (0, Vec::new());
        }
        self.stats.qnodes += 1;

        let moves = legal_captures(&self.position);
        let in_check = moves.in_check();

        if in_check && moves.is_empty() {
            return (-(MATE_VALUE - ply as i16), Vec::new());
        }

        if ply as usize >= MAX_DEPTH - 1 {
            return (self.eval(&moves), Vec::new());
        }

        let stand_pat = if in_check {
            None
        } else {
            Some(self.eval(&moves))
        };

        if let Some(stand_pat) = stand_pat {
            if stand_pat >= beta {
                return (stand_pat, Vec::new());
            }
            alpha = alpha.max(stand_pat);
        }

        let phase = game_phase(&self.position);
        let mut best_value = stand_pat.unwrap_or(NEG_INFINITY);
        let mut best_line = Vec::new();

        let mut generator = QMoveGenerator::new(&self.position, &moves, phase, &self.piece_values);
        while let Some(mv) = generator.next() {
            if let Some(stand_pat) = stand_pat {
                let captured = mv.captured.map_or(0, |p| self.piece_values.get(p, phase));
                let promoted = mv.promotion.map_or(0, |p| {
                    self.piece_values.get(p, phase) - self.piece_values.get(Piece::Pawn, phase)
                });
                if delta_prune(
                    stand_pat,
                    captured + promoted,
                    self.config.qs_delta_margin.value,
                    alpha,
                ) {
                    continue;
                }
            }

            let undo = self.position.apply(mv);
            let (child_value, mut line) = self.quiescence_search(ply + 1, -beta, -alpha);
            self.position.undo(mv, undo);

            if self.aborted {
                return (0, Vec::new());
            }

            let value = -child_value;
            if value > best_value {
                best_value = value;
                line.insert(0, mv);
                best_line = line;
            }

            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        (best_value, best_line)
    }
}
