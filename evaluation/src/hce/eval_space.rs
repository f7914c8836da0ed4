use board::{Bitboard, Color};

use super::context::EvalContext;
use super::tables::{lookup, SPACE};
use super::HCEConfig;

const CENTER_FILES: Bitboard = Bitboard(0x3c3c_3c3c_3c3c_3c3c);

/// Safe central squares on our side of the board, behind our pawns.
///
/// Also rewards pieces that sit right in front of enemy central pawns.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let own_pawns = ctx.pawns_for(color);
    let home = match color {
        Color::White => Bitboard::rank(1) | Bitboard::rank(2) | Bitboard::rank(3),
        Color::Black => Bitboard::rank(6) | Bitboard::rank(5) | Bitboard::rank(4),
    };
    let behind = own_pawns.fill_forward(!color, Bitboard::EMPTY);
    let safe = CENTER_FILES & home & behind & !own_pawns & !ctx.pawn_attacks_for(!color);

    let blockers = ctx.color_mask_for(color) & !own_pawns;
    let blocked = (ctx.pawns_for(!color) & CENTER_FILES).forward(!color) & blockers;

    lookup(&SPACE, safe.count() as usize) + config.center_pawn_block_bonus * blocked.count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hce::eval_pawns;
    use board::{legal_moves, Position};

    #[test]
    fn test_space_grows_with_advanced_center() {
        let eval = |fen: &str| {
            let position = Position::from_fen(fen).unwrap();
            let moves = legal_moves(&position);
            let config = HCEConfig::default();
            let pawns = eval_pawns::evaluate(&position, &config);
            let ctx = EvalContext::new(&position, &moves, &pawns);
            evaluate(&ctx, Color::White, &config)
        };
        let start = eval("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let advanced = eval("rnbqkbnr/pppppppp/8/8/2PPPP2/8/8/RNBQKBNR w KQkq - 0 1");
        assert_eq!(start, 0);
        assert!(advanced > start);
    }
}
