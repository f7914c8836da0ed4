use board::attacks::rook_attacks;
use board::{Bitboard, Color};

use super::context::EvalContext;
use super::HCEConfig;

#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let rooks = ctx.rooks_for(color);
    if rooks.is_empty() {
        return 0;
    }

    let our_pawns = ctx.pawns_for(color);
    let their_pawns = ctx.pawns_for(!color);
    let our_passers = ctx.passed_for(color);
    let enemy_holes = ctx.holes_for(!color);

    let mut cp = 0;
    for sq in rooks {
        let file_mask = Bitboard::file(sq.file());
        let ahead = Bitboard::forward_file(color, sq);

        cp += match (
            (our_pawns & file_mask).is_empty(),
            (their_pawns & file_mask).is_empty(),
        ) {
            (true, true) => config.rook_open_file,
            (true, false) => config.rook_semi_open_file,
            _ if (ahead & our_pawns & !our_passers).is_nonempty() => config.rook_blocked_file,
            _ => 0,
        };

        // Tarrasch: rooks belong behind passed pawns
        if (ahead & our_passers).is_nonempty() {
            cp += config.rook_tarrasch_bonus;
        }

        if sq.relative_rank(color) >= 4 && enemy_holes.contains(sq) {
            cp += config.rook_outpost_bonus;
        }
    }

    // Connected on a file, counted once per pair
    if rooks.more_than_one() {
        let first = rooks.lsb();
        if (rook_attacks(first, ctx.all_pieces) & rooks).is_nonempty()
            && first.file() == rooks.msb().file()
        {
            cp += config.rook_doubled_bonus;
        }
    }

    cp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hce::eval_pawns;
    use board::{legal_moves, Position};

    fn rooks(fen: &str, color: Color) -> i32 {
        let position = Position::from_fen(fen).unwrap();
        let moves = legal_moves(&position);
        let config = HCEConfig::default();
        let pawns = eval_pawns::evaluate(&position, &config);
        let ctx = EvalContext::new(&position, &moves, &pawns);
        evaluate(&ctx, color, &config)
    }

    #[test]
    fn test_open_file_beats_blocked_file() {
        let open = rooks("4k3/p7/8/8/8/8/P7/3RK3 w - - 0 1", Color::White);
        let blocked = rooks("4k3/p7/8/8/8/8/P7/R3K3 w - - 0 1", Color::White);
        assert!(open > blocked);
    }

    #[test]
    fn test_doubled_rooks() {
        let doubled = rooks("4k3/8/8/8/8/8/3R4/3RK3 w - - 0 1", Color::White);
        let apart = rooks("4k3/8/8/8/8/8/2R5/3RK3 w - - 0 1", Color::White);
        assert_eq!(doubled - apart, HCEConfig::default().rook_doubled_bonus);
    }

    #[test]
    fn test_rook_behind_passed_pawn() {
        let behind = rooks("4k3/8/8/P7/8/8/8/R3K3 w - - 0 1", Color::White);
        let beside = rooks("4k3/8/8/P7/8/8/8/1R2K3 w - - 0 1", Color::White);
        assert!(behind > beside);
    }
}
