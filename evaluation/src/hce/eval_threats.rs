use board::{Color, Piece};

use super::context::EvalContext;
use super::HCEConfig;

/// Penalizes undefended pieces under attack and pieces pinned to their king.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let position = ctx.position;
    let pieces = ctx.color_mask_for(color)
        & !position.pieces(color, Piece::Pawn)
        & !position.pieces(color, Piece::King);

    let hanging = pieces & ctx.attacks_for(!color) & !ctx.attacks_for(color);
    let pinned = ctx.pinned_for(color);

    config.hanging_piece_penalty * hanging.count() as i32
        + config.pinned_piece_penalty * pinned.count() as i32
}
