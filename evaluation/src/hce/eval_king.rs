use board::attacks::{
    between, bishop_attacks, king_attacks, knight_attacks, queen_attacks, rook_attacks,
};
use board::{Bitboard, CastleRights, Color, Square};

use super::context::EvalContext;
use super::tables::{lookup, KING_ATTACKER, PAWN_SHIELD, PAWN_STORM};
use super::HCEConfig;

/// Middlegame safety of `color`'s king.
///
/// <https://www.chessprogramming.org/King_Safety>
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let king = ctx.king_sq_for(color);
    let enemy = !color;

    let mut cp = 0;
    cp += file_exposure(ctx, color, king, config);
    cp += pawn_cover(ctx, color, king);
    cp -= lookup(&KING_ATTACKER, attacker_weight(ctx, enemy, king, config));

    let position = ctx.position;
    if (rook_attacks(king, Bitboard::EMPTY) & position.orthogonal_sliders(enemy)).is_nonempty()
        || (bishop_attacks(king, Bitboard::EMPTY) & position.diagonal_sliders(enemy)).is_nonempty()
    {
        cp += config.king_xrayed_penalty;
    }

    cp += castling(ctx, color, king, config);
    cp
}

// Open and half-open files on and beside the king.
#[inline(always)]
fn file_exposure(ctx: &EvalContext, color: Color, king: Square, config: &HCEConfig) -> i32 {
    let own_pawns = ctx.pawns_for(color);
    let enemy_pawns = ctx.pawns_for(!color);
    let files = Bitboard::file(king.file()) | Bitboard::adjacent_files(king.file());

    let mut cp = 0;
    for file in 0..8 {
        let mask = Bitboard::file(file);
        if (mask & files).is_empty() || (mask & own_pawns).is_nonempty() {
            continue;
        }
        cp += if (mask & enemy_pawns).is_nonempty() {
            config.king_semi_open_file_penalty
        } else {
            config.king_open_file_penalty
        };
    }
    cp
}

// Shield pawns are worth more the more enemy pieces remain; storming enemy
// pawns hurt more the more pieces the attacker can bring along.
#[inline(always)]
fn pawn_cover(ctx: &EvalContext, color: Color, king: Square) -> i32 {
    let enemy = !color;
    let shield = ranks_ahead(color, king, 2) & ctx.pawns_for(color);
    let storm = ranks_ahead(color, king, 4) & !ranks_ahead(color, king, 1) & ctx.pawns_for(enemy);

    let mut cp = lookup(&PAWN_SHIELD, shield.count() as usize * ctx.piece_count_for(enemy));
    if storm.is_nonempty() {
        cp -= lookup(&PAWN_STORM, storm.count() as usize * ctx.piece_count_for(enemy));
    }
    cp
}

// The king's file and its neighbours over the next `depth` ranks.
#[inline(always)]
fn ranks_ahead(color: Color, king: Square, depth: i8) -> Bitboard {
    let files = Bitboard::file(king.file()) | Bitboard::adjacent_files(king.file());
    let direction = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    let mut ranks = Bitboard::EMPTY;
    for step in 1..=depth {
        if let Some(sq) = king.offset(0, step * direction) {
            ranks |= Bitboard::rank(sq.rank());
        }
    }
    files & ranks
}

#[inline(always)]
fn attacker_weight(ctx: &EvalContext, attacker: Color, king: Square, config: &HCEConfig) -> usize {
    let zone = king_attacks(king) | king;
    let occupied = ctx.all_pieces;
    let mut weight = 0;

    for sq in ctx.knights_for(attacker) {
        if (knight_attacks(sq) & zone).is_nonempty() {
            weight += config.king_attack_weight_knight;
        }
    }
    for sq in ctx.bishops_for(attacker) {
        if (bishop_attacks(sq, occupied) & zone).is_nonempty() {
            weight += config.king_attack_weight_bishop;
        }
    }
    for sq in ctx.rooks_for(attacker) {
        if (rook_attacks(sq, occupied) & zone).is_nonempty() {
            weight += config.king_attack_weight_rook;
        }
    }
    for sq in ctx.queens_for(attacker) {
        if (queen_attacks(sq, occupied) & zone).is_nonempty() {
            weight += config.king_attack_weight_queen;
        }
    }
    weight
}

#[inline(always)]
fn castling(ctx: &EvalContext, color: Color, king: Square, config: &HCEConfig) -> i32 {
    let rights = ctx.position.castling();
    let (king_rook, queen_rook) = match color {
        Color::White => (Square::H1, Square::A1),
        Color::Black => (Square::H8, Square::A8),
    };

    let mut cp = 0;
    if rights.contains(CastleRights::king_side(color))
        || rights.contains(CastleRights::queen_side(color))
    {
        cp += config.can_castle_bonus;
    }

    let own = ctx.color_mask_for(color);
    for (right, rook) in [
        (CastleRights::king_side(color), king_rook),
        (CastleRights::queen_side(color), queen_rook),
    ] {
        if rights.contains(right) {
            let blockers = between(king, rook) & own;
            cp += config.castle_obstruction_penalty * blockers.count() as i32;
        }
    }
    cp
}
