//! Endgame scoring: material-signature knowledge, the KPK bitbase and
//! king activity terms that only matter once the pieces come off.

use board::attacks::king_attacks;
use board::{Bitboard, Color, Piece, Position, Square};
use once_cell::sync::Lazy;

use super::context::EvalContext;
use super::pst::{sum_pst, BISHOP, KING_EG, KNIGHT, ROOK};
use super::tables::{DISTANCE_TO_SCORE, PASSED_PAWN_BLOCKADE_EG};
use super::HCEConfig;
use crate::kpk;
use crate::piece_values::PieceValues;

const CHECKMATE: i32 = 4096;
// Radix-3 signature over (queens, rooks, bishops, knights) per side
const SIGNATURES: usize = 6561;
// Above this much material the endgame material edge is not amplified
const MATERIAL_SCALE: i32 = 4000;

/// Known outcomes of pawnless material signatures, White-relative.
///
/// `Some(0)` is a dead draw, large values are wins the search still has to
/// convert, and values below 10 in magnitude mark drawish imbalances.
static MATERIAL_TABLE: Lazy<Vec<Option<i32>>> = Lazy::new(build_material_table);

#[allow(clippy::too_many_arguments)]
#[inline(always)]
const fn signature(
    wq: usize,
    bq: usize,
    wr: usize,
    br: usize,
    wb: usize,
    bb: usize,
    wn: usize,
    bn: usize,
) -> usize {
    wq + bq * 3 + wr * 9 + br * 27 + wb * 81 + bb * 243 + wn * 729 + bn * 2187
}

fn build_material_table() -> Vec<Option<i32>> {
    let mut table = vec![None; SIGNATURES];
    let mut set = |index: usize, value: i32| table[index] = Some(value);

    // Dead draws
    set(signature(0, 0, 0, 0, 0, 0, 0, 0), 0);
    set(signature(0, 0, 0, 0, 1, 0, 0, 0), 0);
    set(signature(0, 0, 0, 0, 0, 1, 0, 0), 0);
    set(signature(0, 0, 0, 0, 1, 1, 0, 0), 0);
    set(signature(0, 0, 0, 0, 0, 0, 1, 0), 0);
    set(signature(0, 0, 0, 0, 0, 0, 0, 1), 0);
    set(signature(0, 0, 0, 0, 0, 0, 1, 1), 0);
    set(signature(0, 0, 0, 0, 0, 0, 2, 1), 0);
    set(signature(0, 0, 0, 0, 0, 0, 1, 2), 0);
    set(signature(0, 0, 0, 0, 0, 0, 2, 2), 0);

    for r in 0..=2 {
        for b in 0..=2 {
            for n in 0..=2 {
                // Queen against a bare king
                set(signature(1, 0, r, 0, b, 0, n, 0), CHECKMATE);
                set(signature(0, 1, 0, r, 0, b, 0, n), -CHECKMATE);
                // Queen against a rook
                set(signature(1, 0, r, 1, b, 0, n, 0), CHECKMATE / 4);
                set(signature(0, 1, 1, r, 0, b, 0, n), -CHECKMATE / 4);
                // Queen against minor pieces
                set(signature(1, 0, r, 0, b, 1, n, 0), CHECKMATE / 8);
                set(signature(0, 1, 0, r, 1, b, 0, n), -CHECKMATE / 8);
                set(signature(1, 0, r, 0, b, 2, n, 0), CHECKMATE / 8);
                set(signature(0, 1, 0, r, 2, b, 0, n), -CHECKMATE / 8);
                set(signature(1, 0, r, 0, b, 1, n, 1), CHECKMATE / 8);
                set(signature(0, 1, 0, r, 1, b, 1, n), -CHECKMATE / 8);
                set(signature(1, 0, r, 0, b, 0, n, 2), CHECKMATE / 8);
                set(signature(0, 1, 0, r, 0, b, 2, n), -CHECKMATE / 8);
            }
        }
    }

    for b in 0..=2 {
        for n in 0..=2 {
            // One rook against a bare king
            set(signature(0, 0, 1, 0, b, 0, n, 0), CHECKMATE / 2);
            set(signature(0, 0, 0, 1, 0, b, 0, n), -CHECKMATE / 2);
        }
    }

    for n in 0..=2 {
        set(signature(0, 0, 0, 0, 2, 0, n, 0), 3 * CHECKMATE / 8);
        set(signature(0, 0, 0, 0, 0, 2, 0, n), -3 * CHECKMATE / 8);
    }
    for n in 1..=2 {
        set(signature(0, 0, 0, 0, 1, 0, n, 0), CHECKMATE / 4);
        set(signature(0, 0, 0, 0, 0, 1, 0, n), -CHECKMATE / 4);
    }

    // Rook against a minor piece, and rook plus minor against rook
    set(signature(0, 0, 1, 0, 0, 1, 0, 0), 2);
    set(signature(0, 0, 0, 1, 1, 0, 0, 0), -2);
    set(signature(0, 0, 1, 0, 0, 0, 0, 1), 2);
    set(signature(0, 0, 0, 1, 0, 0, 1, 0), -2);
    set(signature(0, 0, 1, 1, 0, 1, 0, 0), -2);
    set(signature(0, 0, 1, 1, 1, 0, 0, 0), 2);
    set(signature(0, 0, 1, 1, 0, 0, 0, 1), -2);
    set(signature(0, 0, 1, 1, 0, 0, 1, 0), 2);

    table
}

/// Builds the material table now instead of on first use.
pub fn init() {
    Lazy::force(&MATERIAL_TABLE);
}

/// Table entry for a pawnless position, if its signature is known.
pub fn material_table_value(position: &Position) -> Option<i32> {
    if position.pieces_of_kind(Piece::Pawn).is_nonempty() {
        return None;
    }

    let count = |color: Color, piece: Piece| position.pieces(color, piece).count() as usize;
    let counts = [
        count(Color::White, Piece::Queen),
        count(Color::Black, Piece::Queen),
        count(Color::White, Piece::Rook),
        count(Color::Black, Piece::Rook),
        count(Color::White, Piece::Bishop),
        count(Color::Black, Piece::Bishop),
        count(Color::White, Piece::Knight),
        count(Color::Black, Piece::Knight),
    ];
    if counts.iter().any(|&c| c > 2) {
        return None;
    }

    let [wq, bq, wr, br, wb, bb, wn, bn] = counts;
    MATERIAL_TABLE[signature(wq, bq, wr, br, wb, bb, wn, bn)]
}

/// Positions no amount of play can win: bare kings, drawn material
/// signatures and drawn king-and-pawn endings.
pub fn is_known_draw(position: &Position) -> bool {
    let pawns = position.pieces_of_kind(Piece::Pawn);
    let pieces = Color::ALL.iter().map(|&c| position.piece_count(c)).sum::<u32>();

    if pieces == 0 && pawns.is_empty() {
        return true;
    }
    if material_table_value(position) == Some(0) {
        return true;
    }

    if pieces == 0 && pawns.count() == 1 {
        let pawn = pawns.lsb();
        if let Some(strong) = position.color_on(pawn) {
            return !kpk::probe(
                strong,
                position.king_square(strong),
                pawn,
                position.king_square(!strong),
                position.side_to_move(),
            );
        }
    }
    false
}

/// Endgame score, White-relative. Known draws are handled by the caller.
pub(super) fn evaluate(ctx: &EvalContext, piece_values: &PieceValues, config: &HCEConfig) -> i32 {
    let position = ctx.position;
    let pawns = position.pieces_of_kind(Piece::Pawn);
    let pawn_ending = Color::ALL.iter().all(|&c| position.piece_count(c) == 0);

    let mut score = 0;

    let table_value = material_table_value(position);
    if let Some(value) = table_value {
        score += value;
    }

    if pawn_ending {
        for color in Color::ALL {
            if ctx.pawns_for(color).more_than_one() && ctx.pawns_for(!color).is_empty() {
                score += color.sign() * config.pawns_vs_none_bonus;
            }
        }
    }

    score += lone_king_mobility(ctx, config);

    let mut material = material_and_placement(ctx, piece_values, config);
    if table_value.is_some_and(|v| v.abs() < 10) {
        material /= 4;
    }
    score += material;

    let winning_side = if material >= 100 {
        1
    } else if material <= -100 {
        -1
    } else {
        0
    };

    for color in Color::ALL {
        score += color.sign() * pieces(ctx, color, config);
    }
    score += pawn_king_distance(ctx, pawn_ending, config);

    let kings = Square::distance(ctx.king_sq_for(Color::White), ctx.king_sq_for(Color::Black));
    let mut king_distance = winning_side * DISTANCE_TO_SCORE[kings as usize];
    if pawns.is_empty() {
        king_distance *= config.king_distance_pawnless_scale;
    }
    score + king_distance
}

// A king left alone should have as little room as possible.
fn lone_king_mobility(ctx: &EvalContext, config: &HCEConfig) -> i32 {
    let position = ctx.position;
    let material = |c: Color| ctx.color_mask_for(c) & !position.pieces(c, Piece::King);

    let Some(defender) = Color::ALL
        .into_iter()
        .find(|&c| material(c).is_empty() && material(!c).is_nonempty())
    else {
        return 0;
    };

    let blocked = ctx.all_pieces | ctx.attacks_for(!defender);

    let mut reachable = ctx.king_sq_for(defender).bb();
    let mut examined = Bitboard::EMPTY;
    while reachable != examined {
        let sq = (reachable & !examined).lsb();
        examined |= sq;
        reachable |= king_attacks(sq) & !blocked;
    }

    defender.sign() * config.lone_king_square_penalty * reachable.count() as i32
}

fn material_and_placement(ctx: &EvalContext, piece_values: &PieceValues, config: &HCEConfig) -> i32 {
    let position = ctx.position;
    let white = piece_values.material_eg(position, Color::White);
    let black = piece_values.material_eg(position, Color::Black);
    let total = white + black;

    let mut score = if total < MATERIAL_SCALE {
        (white - black) * (2 * MATERIAL_SCALE - total) / MATERIAL_SCALE
    } else {
        white - black
    };
    score += ctx.pawn_structure.eg;

    for color in Color::ALL {
        let bishops = ctx.bishops_for(color);
        let mut side = sum_pst(ctx.knights_for(color), &KNIGHT, color)
            + sum_pst(bishops, &BISHOP, color)
            + sum_pst(ctx.rooks_for(color), &ROOK, color)
            + sum_pst(ctx.king_sq_for(color).bb(), &KING_EG, color);
        if bishops.count() == 2 {
            side += config.bishop_pair_bonus_eg;
        }
        score += color.sign() * side;
    }
    score
}

// Blockaders, bishop colour and heavy piece placement for one side.
fn pieces(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let enemy = !color;
    let own_pawns = ctx.pawns_for(color);
    let enemy_pawns = ctx.pawns_for(enemy);
    let majors = ctx.rooks_for(color) | ctx.queens_for(color);
    let blockers = ctx.color_mask_for(color) & !own_pawns;

    let mut cp = 0;

    for sq in ctx.passed_for(enemy).forward(enemy) & blockers {
        cp += PASSED_PAWN_BLOCKADE_EG[sq.relative_rank(enemy) as usize];
    }

    let promotion_rank = match enemy {
        Color::White => Bitboard::RANK_8,
        Color::Black => Bitboard::RANK_1,
    };
    let promotions = ctx.passed_for(enemy).fill_forward(enemy, Bitboard::EMPTY) & promotion_rank;

    for sq in ctx.bishops_for(color) {
        let squares = if sq.is_dark() {
            Bitboard::DARK_SQUARES
        } else {
            Bitboard::LIGHT_SQUARES
        };
        cp += config.bishop_enemy_pawn_color * (enemy_pawns & squares).count() as i32;
        cp += config.bishop_own_pawn_color * (own_pawns & squares).count() as i32;

        let unreachable = promotions & !squares;
        cp += config.wrong_bishop_penalty * unreachable.count() as i32;
        cp += config.wrong_bishop_rook_file_penalty
            * (unreachable & (Bitboard::FILE_A | Bitboard::FILE_H)).count() as i32;
    }

    let mut files_done = Bitboard::EMPTY;
    for sq in ctx.rooks_for(color) {
        let file = Bitboard::file(sq.file());
        if (file & (majors ^ sq)).is_nonempty() {
            cp += config.heavy_pieces_doubled_eg;
        }
        if (files_done & sq).is_empty() && rook_behind_passer(ctx, sq) {
            cp += config.rook_behind_passer_eg;
        }
        files_done |= file;
    }
    for sq in ctx.queens_for(color) {
        if (Bitboard::file(sq.file()) & (majors ^ sq)).is_nonempty() {
            cp += config.heavy_pieces_doubled_eg;
        }
    }

    cp
}

// Behind the most advanced passed pawn of either colour on the rook's file.
fn rook_behind_passer(ctx: &EvalContext, rook: Square) -> bool {
    let file = Bitboard::file(rook.file());
    Color::ALL.into_iter().any(|pawn_color| {
        let passers = ctx.passed_for(pawn_color) & file;
        if passers.is_empty() {
            return false;
        }
        match pawn_color {
            Color::White => passers.msb().rank() > rook.rank(),
            Color::Black => passers.lsb().rank() < rook.rank(),
        }
    })
}

// Kings should stay close to pawns, passed pawns above all.
fn pawn_king_distance(ctx: &EvalContext, pawn_ending: bool, config: &HCEConfig) -> i32 {
    let white_king = ctx.king_sq_for(Color::White);
    let black_king = ctx.king_sq_for(Color::Black);
    let passed = ctx.passed_for(Color::White) | ctx.passed_for(Color::Black);

    let mut score = 0;
    for sq in ctx.position.pieces_of_kind(Piece::Pawn) {
        let edge =
            Square::distance(sq, black_king) as i32 - Square::distance(sq, white_king) as i32;
        let mut term = edge * config.pawn_king_distance;
        if passed.contains(sq) {
            term += edge * config.passed_pawn_king_distance;
        }
        if pawn_ending {
            term *= config.pawn_ending_distance_scale;
        }
        score += term;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_known_draws() {
        assert!(is_known_draw(&position("8/8/8/4k3/8/8/8/4K3 w - - 0 1")));
        assert!(is_known_draw(&position("8/8/8/4k3/8/8/8/3NK3 w - - 0 1")));
        assert!(is_known_draw(&position("8/8/3b4/4k3/8/8/8/3BK3 b - - 0 1")));
        assert!(is_known_draw(&position("8/8/3n4/4k3/8/8/8/2NNK3 w - - 0 1")));
        // Rook pawn with the defender in the corner
        assert!(is_known_draw(&position("7k/8/6KP/8/8/8/8/8 w - - 0 1")));

        assert!(!is_known_draw(&position("8/8/8/4k3/8/8/8/3QK3 w - - 0 1")));
        assert!(!is_known_draw(&position("8/8/8/8/8/4k3/8/R3K3 w - - 0 1")));
        assert!(!is_known_draw(&position("4k3/8/4K3/4P3/8/8/8/8 b - - 0 1")));
    }

    #[test]
    fn test_material_table_signs() {
        assert_eq!(
            material_table_value(&position("8/8/8/4k3/8/8/8/3QK3 w - - 0 1")),
            Some(CHECKMATE)
        );
        assert_eq!(
            material_table_value(&position("3qk3/8/8/8/8/8/8/4K3 w - - 0 1")),
            Some(-CHECKMATE)
        );
        assert_eq!(
            material_table_value(&position("3rk3/8/8/8/8/8/8/3BK3 w - - 0 1")),
            Some(-2)
        );
        assert_eq!(
            material_table_value(&position("3rk3/8/8/8/8/8/8/2BRK3 w - - 0 1")),
            Some(2)
        );
        // Pawns on the board or three of a kind leave the table
        assert_eq!(material_table_value(&position("4k3/p7/8/8/8/8/8/3QK3 w - - 0 1")), None);
        assert_eq!(material_table_value(&position("4k3/8/8/8/8/8/8/NNNNK3 w - - 0 1")), None);
        // Two rooks against a bare king is not tabulated
        assert_eq!(material_table_value(&position("4k3/8/8/8/8/8/8/RR2K3 w - - 0 1")), None);
    }
}
