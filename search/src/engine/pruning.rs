use board::Move;
use evaluation::scores::{is_mate_score, MATE_SCORE_BOUND};

use crate::{
    pruning::{can_futility_prune, can_null_move_prune, futility_margin, null_move_reduction},
    utils::see::see,
};

use super::Engine;

/// Outcome of trying a null move at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NullMove {
    /// Passing still beats beta
    Cutoff(i16),
    /// Passing lets the opponent mate
    MateThreat,
    /// Nothing learned; search normally
    Fail,
}

impl Engine {
    /// Null move pruning: give opponent a free move; if we still beat beta, prune the subtree.
    /// When passing fails, a second probe against a mate window tells whether
    /// the opponent threatens mate.
    ///
    /// <https://www.chessprogramming.org/Null_Move_Pruning>
    pub(super) fn try_null_move_prune(
        &mut self,
        ply: u8,
        max_depth: u8,
        beta: i16,
        remaining_depth: u8,
        in_check: bool,
        try_null_move: bool,
    ) -> NullMove {
        if !(try_null_move
            && can_null_move_prune(
                &self.position,
                remaining_depth,
                in_check,
                self.config.nmp_min_depth.value,
                self.config.nmp_min_pieces.value,
            ))
        {
            return NullMove::Fail;
        }

        let r = null_move_reduction(
            remaining_depth,
            self.config.nmp_base_reduction.value,
            self.config.nmp_depth_divisor.value,
        );
        let null_max_depth = max_depth - r;

        let undo = self.position.apply_null();
        self.search_stack.push(self.position.hash());

        let (score, _) =
            self.search_subtree(ply + 1, null_max_depth, -beta, -beta + 1, false, false);
        let score = -score;

        // Can the opponent mate us if we pass?
        let mate_threat = score < beta
            && !self.aborted
            && self
                .search_subtree(
                    ply + 1,
                    null_max_depth,
                    MATE_SCORE_BOUND - 1,
                    MATE_SCORE_BOUND,
                    false,
                    false,
                )
                .0
                >= MATE_SCORE_BOUND;

        self.search_stack.pop();
        self.position.undo_null(undo);

        if self.aborted {
            NullMove::Fail
        } else if score >= beta {
            // Unproven mates from a null search are not trusted, so report beta
            NullMove::Cutoff(beta)
        } else if mate_threat {
            NullMove::MateThreat
        } else {
            NullMove::Fail
        }
    }

    /// Internal Iterative Deepening: do a shallow search to get a best move for ordering when TT misses.
    ///
    /// <https://www.chessprogramming.org/Internal_Iterative_Deepening>
    #[allow(clippy::too_many_arguments)]
    pub(super) fn try_iid(
        &mut self,
        ply: u8,
        max_depth: u8,
        alpha: i16,
        beta: i16,
        is_pv_node: bool,
        allow_iid: bool,
        need_iid: bool,
        remaining_depth: u8,
    ) -> Option<Move> {
        if !(allow_iid && need_iid && is_pv_node && remaining_depth >= self.config.iid_min_depth.value)
        {
            return None;
        }
        let shallow_max = max_depth - self.config.iid_reduction.value.min(remaining_depth - 1);
        let (.., shallow_line) = self.search_subtree(
            ply,
            shallow_max,
            alpha,
            beta,
            true,
            false, // disable nested IID
        );
        shallow_line.first().copied()
    }

    /// Static score plus margin, when quiet moves at this node may be
    /// futility pruned against it.
    ///
    /// <https://www.chessprogramming.org/Futility_Pruning>
    pub(super) fn futility_base(
        &self,
        remaining_depth: u8,
        in_check: bool,
        alpha: i16,
        static_eval: Option<i16>,
    ) -> Option<i16> {
        if is_mate_score(alpha)
            || !can_futility_prune(
                remaining_depth,
                in_check,
                self.config.futility_max_depth.value,
            )
        {
            return None;
        }
        let margins = [
            self.config.futility_margin_1.value,
            self.config.futility_margin_2.value,
        ];
        let margin = futility_margin(remaining_depth, &margins)?;
        static_eval.map(|eval| eval.saturating_add(margin))
    }

    /// Capture pruning: a losing capture at a quiet non-PV node is skipped.
    ///
    /// <https://www.chessprogramming.org/Static_Exchange_Evaluation>
    pub(super) fn is_losing_capture(&self, mv: &Move, phase: i32) -> bool {
        mv.is_capture()
            && !mv.is_promotion()
            && see(&self.position, mv, phase, &self.piece_values) < 0
    }
}
