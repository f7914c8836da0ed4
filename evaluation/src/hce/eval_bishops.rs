use board::{Bitboard, Color, Square};

use super::context::EvalContext;
use super::tables::{lookup, BISHOP_OBSTRUCTION, BISHOP_OWN_OBSTRUCTION};
use super::HCEConfig;

// c3-f6
const CENTER: Bitboard = Bitboard(0x0000_3c3c_3c3c_0000);

#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let bishops = ctx.bishops_for(color);
    if bishops.is_empty() {
        return 0;
    }

    let own_center = ctx.pawns_for(color) & CENTER;
    let enemy_center = ctx.pawns_for(!color) & CENTER;

    let mut cp = 0;
    for sq in bishops {
        let squares = if sq.is_dark() {
            Bitboard::DARK_SQUARES
        } else {
            Bitboard::LIGHT_SQUARES
        };
        cp += lookup(&BISHOP_OWN_OBSTRUCTION, (own_center & squares).count() as usize);
        cp += lookup(&BISHOP_OBSTRUCTION, (enemy_center & squares).count() as usize);
        cp += outpost(
            ctx,
            color,
            sq,
            config.bishop_outpost_bonus,
            config.bishop_almost_outpost_bonus,
        );
    }

    cp
}

/// Bonus for a minor piece on a hole of the enemy structure in enemy territory.
///
/// The full bonus needs a pawn guarding the square.
///
/// <https://www.chessprogramming.org/Outposts>
#[inline(always)]
pub(super) fn outpost(
    ctx: &EvalContext,
    color: Color,
    sq: Square,
    supported: i32,
    unsupported: i32,
) -> i32 {
    let rank = sq.relative_rank(color);
    if !(3..=5).contains(&rank) || !ctx.holes_for(!color).contains(sq) {
        return 0;
    }
    if ctx.pawn_attacks_for(color).contains(sq) {
        supported
    } else {
        unsupported
    }
}
