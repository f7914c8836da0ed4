use board::attacks::{bishop_attacks, rook_attacks};
use board::{Bitboard, Color};

use super::context::EvalContext;
use super::HCEConfig;

/// Penalizes queens standing on a line with an enemy slider, whatever is in between.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let enemy = !color;

    let mut cp = 0;
    for sq in ctx.queens_for(color) {
        let xrays = (rook_attacks(sq, Bitboard::EMPTY) & ctx.rooks_for(enemy))
            | (bishop_attacks(sq, Bitboard::EMPTY) & ctx.bishops_for(enemy));
        if xrays.is_nonempty() {
            cp += config.queen_xrayed_penalty;
        }
    }
    cp
}
