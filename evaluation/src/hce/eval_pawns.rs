use board::attacks::pawn_attacks;
use board::{Bitboard, Color, Piece, Position, Square};

use super::context::EvalContext;
use super::pawn_cache::CachedPawnEvaluation;
use super::pst::{pst_index, PAWN_EG, PAWN_MG};
use super::tables::{
    DOUBLED_PAWN_EG, DOUBLED_PAWN_MG, ISOLATED_PAWN_EG, ISOLATED_PAWN_MG,
    PASSED_PAWN_BLOCKADE_MG, PASSED_PAWN_EG, PASSED_PAWN_MG,
};
use super::HCEConfig;

struct PawnSide {
    mg: i32,
    eg: i32,
    passed: Bitboard,
    holes: Bitboard,
}

/// Scores the pawn skeleton of both sides, White minus Black.
///
/// <https://www.chessprogramming.org/Pawn_Structure>
pub(super) fn evaluate(position: &Position, config: &HCEConfig) -> CachedPawnEvaluation {
    let white = evaluate_side(position, Color::White, config);
    let black = evaluate_side(position, Color::Black, config);

    CachedPawnEvaluation {
        key: position.pawn_hash(),
        mg: white.mg - black.mg,
        eg: white.eg - black.eg,
        passed: [white.passed, black.passed],
        holes: [white.holes, black.holes],
    }
}

fn evaluate_side(position: &Position, color: Color, config: &HCEConfig) -> PawnSide {
    let own_pawns = position.pieces(color, Piece::Pawn);
    let enemy_pawns = position.pieces(!color, Piece::Pawn);
    let all_pawns = own_pawns | enemy_pawns;

    let mut side = PawnSide {
        mg: 0,
        eg: 0,
        passed: Bitboard::EMPTY,
        holes: !own_pawns.fill_forward(color, all_pawns).pawn_attacks(color),
    };

    if own_pawns.is_empty() {
        side.mg += config.no_pawns_mg;
        side.eg += config.no_pawns_eg;
        return side;
    }

    for sq in own_pawns {
        let file = sq.file() as usize;
        let relative_rank = sq.relative_rank(color) as usize;
        let ahead = Bitboard::forward_file(color, sq);

        side.mg += PAWN_MG[pst_index(color, sq)];
        side.eg += PAWN_EG[pst_index(color, sq)];

        let mut penalized = false;
        if is_backward(sq, color, own_pawns, enemy_pawns) {
            penalized = true;
            side.mg += config.backward_pawn_mg;
            side.eg += config.backward_pawn_eg;
        } else if (pawn_attacks(!color, sq) & own_pawns).is_nonempty() {
            side.mg += config.supported_pawn_mg;
            side.eg += config.supported_pawn_eg;
        }

        let own_ahead = ahead & own_pawns;
        if !penalized && own_ahead.is_nonempty() {
            let nearest = match color {
                Color::White => own_ahead.lsb(),
                Color::Black => own_ahead.msb(),
            };
            let distance = sq.rank().abs_diff(nearest.rank()) as i32;
            side.mg += DOUBLED_PAWN_MG[file] / distance;
            side.eg -= DOUBLED_PAWN_EG[file] / distance;
        }

        if (Bitboard::passed_span(color, sq) & enemy_pawns).is_empty() && own_ahead.is_empty() {
            side.mg += PASSED_PAWN_MG[relative_rank];
            side.eg += PASSED_PAWN_EG[relative_rank];
            side.passed |= sq;
        }

        if !penalized && (Bitboard::adjacent_files(sq.file()) & own_pawns).is_empty() {
            side.mg += ISOLATED_PAWN_MG[file];
            side.eg -= ISOLATED_PAWN_EG[file];
        }
    }

    side
}

/// Pieces standing right in front of enemy passed pawns.
pub(super) fn blockade(ctx: &EvalContext, color: Color) -> i32 {
    let enemy = !color;
    let blockers = ctx.color_mask_for(color) & !ctx.pawns_for(color);
    (ctx.passed_for(enemy).forward(enemy) & blockers)
        .map(|sq| PASSED_PAWN_BLOCKADE_MG[sq.relative_rank(enemy) as usize])
        .sum()
}

// No friendly pawn level with or behind it on the neighbouring files, its
// stop square is covered by an enemy pawn, and it cannot capture its way out.
fn is_backward(sq: Square, color: Color, own_pawns: Bitboard, enemy_pawns: Bitboard) -> bool {
    if sq.relative_rank(color) >= 6 {
        return false;
    }

    let support = Bitboard::adjacent_files(sq.file()) & !Bitboard::forward_ranks(color, sq.rank());
    if (support & own_pawns).is_nonempty() {
        return false;
    }

    let stop = sq.shift(color.forward());
    (pawn_attacks(color, sq) & enemy_pawns).is_empty()
        && (pawn_attacks(color, stop) & enemy_pawns).is_nonempty()
}
