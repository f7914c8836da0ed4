use board::attacks::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use board::Color;

use super::context::EvalContext;
use super::tables::{lookup, MOBILITY_BISHOP, MOBILITY_KNIGHT, MOBILITY_QUEEN, MOBILITY_ROOK};

/// Table-driven bonus by the number of squares each piece reaches.
///
/// <https://www.chessprogramming.org/Mobility>
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color) -> i32 {
    let own = ctx.color_mask_for(color);
    let occupied = ctx.all_pieces;
    let mut cp = 0;

    for sq in ctx.knights_for(color) {
        let reach = knight_attacks(sq) & !own;
        cp += lookup(&MOBILITY_KNIGHT, reach.count() as usize);
    }
    for sq in ctx.bishops_for(color) {
        let reach = bishop_attacks(sq, occupied) & !own;
        cp += lookup(&MOBILITY_BISHOP, reach.count() as usize);
    }
    for sq in ctx.rooks_for(color) {
        let reach = rook_attacks(sq, occupied) & !own;
        cp += lookup(&MOBILITY_ROOK, reach.count() as usize);
    }
    for sq in ctx.queens_for(color) {
        let reach = queen_attacks(sq, occupied) & !own;
        cp += lookup(&MOBILITY_QUEEN, reach.count() as usize);
    }

    cp
}
