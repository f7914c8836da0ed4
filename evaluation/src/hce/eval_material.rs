use board::{Color, Piece};

use super::context::EvalContext;
use super::pst::{sum_pst, BISHOP, KING_MG, KNIGHT, QUEEN, ROOK};
use super::tables::{lookup, KNIGHT_MATERIAL_ADJ, QUEEN_MATERIAL_ADJ, ROOK_MATERIAL_ADJ};
use super::HCEConfig;
use crate::piece_values::PieceValues;

/// Middlegame material and piece placement for `color`.
///
/// Knights gain and rooks lose value as the pawn count rises.
pub(super) fn evaluate(
    ctx: &EvalContext,
    color: Color,
    piece_values: &PieceValues,
    config: &HCEConfig,
) -> i32 {
    let pawns = ctx.pawns_for(color);
    let knights = ctx.knights_for(color);
    let bishops = ctx.bishops_for(color);
    let rooks = ctx.rooks_for(color);
    let queens = ctx.queens_for(color);
    let pawn_count = pawns.count() as usize;

    let mut cp = 0;

    cp += piece_values.mg(Piece::Pawn) * pawns.count() as i32;
    cp += (piece_values.mg(Piece::Knight) + lookup(&KNIGHT_MATERIAL_ADJ, pawn_count))
        * knights.count() as i32;
    cp += piece_values.mg(Piece::Bishop) * bishops.count() as i32;
    cp += (piece_values.mg(Piece::Rook) + lookup(&ROOK_MATERIAL_ADJ, pawn_count))
        * rooks.count() as i32;
    cp += (piece_values.mg(Piece::Queen) + lookup(&QUEEN_MATERIAL_ADJ, pawn_count))
        * queens.count() as i32;

    if bishops.more_than_one() {
        cp += config.bishop_pair_bonus;
    }
    if rooks.more_than_one() {
        cp += config.rook_pair_bonus;
    }

    cp += sum_pst(knights, &KNIGHT, color);
    cp += sum_pst(bishops, &BISHOP, color);
    cp += sum_pst(rooks, &ROOK, color);
    cp += sum_pst(queens, &QUEEN, color);
    cp += sum_pst(ctx.king_sq_for(color).bb(), &KING_MG, color);

    cp
}
