//! Legal move generation.
//!
//! Moves are produced fully legal: pins, checks and king safety are resolved
//! while generating, so no move needs to be tried on the board first.

use arrayvec::ArrayVec;

use crate::attacks::{
    between, bishop_attacks, king_attacks, line, pawn_attacks, piece_attacks, rook_attacks,
};
use crate::bitboard::Bitboard;
use crate::moves::{Move, MoveFlag};
use crate::position::{castle_for_king_target, Position};
use crate::types::{Color, Piece, Square};

pub const MAX_MOVES: usize = 256;

/// Legal moves of one position together with the attack data computed along the way.
#[derive(Clone, Debug)]
pub struct MoveSet {
    moves: ArrayVec<Move, MAX_MOVES>,
    checkers: Bitboard,
    /// Friendly pieces pinned to their king
    pinned: Bitboard,
    /// Squares the opponent attacks, looking through our king
    opponent_attacks: Bitboard,
    /// Squares the side to move attacks
    own_attacks: Bitboard,
}

impl MoveSet {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline(always)]
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    /// The legal move with these squares and promotion, if any.
    pub fn find(&self, from: Square, to: Square, promotion: Option<Piece>) -> Option<Move> {
        self.moves
            .iter()
            .find(|m| m.from == from && m.to == to && m.promotion == promotion)
            .copied()
    }

    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.checkers.is_nonempty()
    }

    #[inline(always)]
    pub fn checkers(&self) -> Bitboard {
        self.checkers
    }

    #[inline(always)]
    pub fn pinned(&self) -> Bitboard {
        self.pinned
    }

    #[inline(always)]
    pub fn opponent_attacks(&self) -> Bitboard {
        self.opponent_attacks
    }

    #[inline(always)]
    pub fn own_attacks(&self) -> Bitboard {
        self.own_attacks
    }

    #[inline(always)]
    fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }
}

impl<'a> IntoIterator for &'a MoveSet {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveSet {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_MOVES>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

/// Every legal move for the side to move.
pub fn legal_moves(pos: &Position) -> MoveSet {
    generate(pos, false)
}

/// Captures and promotions for the side to move, or every legal move when in check.
pub fn legal_captures(pos: &Position) -> MoveSet {
    generate(pos, true)
}

/// Friendly pieces standing alone between `color`'s king and an enemy slider.
pub fn pinned_pieces(pos: &Position, color: Color) -> Bitboard {
    let king = pos.king_square(color);
    let them = !color;
    let enemy = pos.occupancy(them);
    let occupied = pos.occupied();

    let snipers = (rook_attacks(king, enemy) & pos.orthogonal_sliders(them))
        | (bishop_attacks(king, enemy) & pos.diagonal_sliders(them));

    let mut pinned = Bitboard::EMPTY;
    for sniper in snipers {
        let blockers = between(king, sniper) & occupied;
        if blockers.is_nonempty() && !blockers.more_than_one() {
            pinned |= blockers & pos.occupancy(color);
        }
    }
    pinned
}

fn generate(pos: &Position, captures_only: bool) -> MoveSet {
    let us = pos.side_to_move();
    let them = !us;
    let own = pos.occupancy(us);
    let enemy = pos.occupancy(them);
    let occupied = own | enemy;
    let king = pos.king_square(us);

    let checkers = pos.attackers_of(king, them, occupied);
    let in_check = checkers.is_nonempty();
    let captures_only = captures_only && !in_check;

    let mut set = MoveSet {
        moves: ArrayVec::new(),
        checkers,
        pinned: pinned_pieces(pos, us),
        opponent_attacks: pos.attacked_squares(them, occupied ^ king),
        own_attacks: pos.attacked_squares(us, occupied),
    };

    let targets = if captures_only { enemy } else { !own };

    if !checkers.more_than_one() {
        let check_mask = if in_check {
            let checker = checkers.lsb();
            between(king, checker) | checker
        } else {
            Bitboard::FULL
        };
        let mask = targets & check_mask;

        gen_piece_moves(pos, &mut set, Piece::Knight, mask);
        gen_piece_moves(pos, &mut set, Piece::Bishop, mask);
        gen_pawn_moves(pos, &mut set, check_mask, captures_only);
        gen_piece_moves(pos, &mut set, Piece::Queen, mask);
        gen_piece_moves(pos, &mut set, Piece::Rook, mask);
    }

    for to in king_attacks(king) & targets & !set.opponent_attacks {
        set.push(Move::new(king, to, Piece::King, pos.piece_on(to)));
    }

    if !in_check && !captures_only {
        gen_castles(pos, &mut set);
    }

    set
}

fn gen_piece_moves(pos: &Position, set: &mut MoveSet, piece: Piece, mask: Bitboard) {
    let us = pos.side_to_move();
    let king = pos.king_square(us);
    let occupied = pos.occupied();

    for from in pos.pieces(us, piece) {
        let mut targets = piece_attacks(piece, us, from, occupied) & mask;
        if set.pinned.contains(from) {
            targets &= line(king, from);
        }
        for to in targets {
            set.push(Move::new(from, to, piece, pos.piece_on(to)));
        }
    }
}

fn gen_pawn_moves(pos: &Position, set: &mut MoveSet, check_mask: Bitboard, captures_only: bool) {
    let us = pos.side_to_move();
    let them = !us;
    let king = pos.king_square(us);
    let enemy = pos.occupancy(them);
    let occupied = pos.occupied();
    let forward = us.forward();

    for from in pos.pieces(us, Piece::Pawn) {
        let pin_mask = if set.pinned.contains(from) {
            line(king, from)
        } else {
            Bitboard::FULL
        };
        let allowed = check_mask & pin_mask;

        for to in pawn_attacks(us, from) & enemy & allowed {
            push_pawn_move(set, Move::new(from, to, Piece::Pawn, pos.piece_on(to)));
        }

        let one = from.shift(forward);
        if !occupied.contains(one) {
            let promotes = one.relative_rank(us) == 7;
            if allowed.contains(one) && (!captures_only || promotes) {
                push_pawn_move(set, Move::new(from, one, Piece::Pawn, None));
            }
            if !captures_only && from.relative_rank(us) == 1 {
                let two = one.shift(forward);
                if !occupied.contains(two) && allowed.contains(two) {
                    set.push(Move::new(from, two, Piece::Pawn, None));
                }
            }
        }

        if let Some(ep) = pos.en_passant() {
            if pawn_attacks(us, from).contains(ep) && en_passant_is_legal(pos, from, ep) {
                let mut mv = Move::new(from, ep, Piece::Pawn, Some(Piece::Pawn));
                mv.flag = MoveFlag::EnPassant;
                set.push(mv);
            }
        }
    }
}

/// Re-tests check with both pawns lifted off the board. This covers the
/// horizontal discovered check that a pin test on a single piece misses.
fn en_passant_is_legal(pos: &Position, from: Square, ep: Square) -> bool {
    let us = pos.side_to_move();
    let captured = ep.shift(-us.forward());
    let occupied = (pos.occupied() ^ from ^ captured) | ep;
    let attackers = pos.attackers_of(pos.king_square(us), !us, occupied) & !captured.bb();
    attackers.is_empty()
}

fn push_pawn_move(set: &mut MoveSet, mv: Move) {
    if mv.to.rank() == 0 || mv.to.rank() == 7 {
        for promotion in Piece::PROMOTIONS {
            let mut promo = mv;
            promo.promotion = Some(promotion);
            set.push(promo);
        }
    } else {
        set.push(mv);
    }
}

fn gen_castles(pos: &Position, set: &mut MoveSet) {
    let us = pos.side_to_move();
    let king = pos.king_square(us);
    let home = if us == Color::White { Square::E1 } else { Square::E8 };
    if king != home {
        return;
    }

    let occupied = pos.occupied();
    let targets = if us == Color::White {
        [Square::G1, Square::C1]
    } else {
        [Square::G8, Square::C8]
    };

    for king_to in targets {
        let Some((right, rook_from)) = castle_for_king_target(us, king_to) else {
            continue;
        };
        if !pos.castling().contains(right)
            || !pos.pieces(us, Piece::Rook).contains(rook_from)
            || (between(king, rook_from) & occupied).is_nonempty()
        {
            continue;
        }
        let transit = between(king, king_to) | king_to;
        if (transit & set.opponent_attacks).is_nonempty() {
            continue;
        }
        let mut mv = Move::new(king, king_to, Piece::King, None);
        mv.flag = MoveFlag::Castle;
        set.push(mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_start_position_move_count() {
        let moves = legal_moves(&Position::default());
        assert_eq!(moves.len(), 20);
        assert!(!moves.in_check());
        assert!(legal_captures(&Position::default()).is_empty());
    }

    #[test]
    fn test_pinned_piece_stays_on_line() {
        // Bishop on d2 pinned by the rook on d8.
        let pos = position("3rk3/8/8/8/8/8/3B4/3K4 w - - 0 1");
        let moves = legal_moves(&pos);
        assert!(moves.pinned().contains(Square::D2));
        assert!(moves.iter().all(|m| m.piece != Piece::Bishop));

        // Rook pinned on the file can slide along it and capture the pinner.
        let pos = position("3rk3/8/8/8/8/8/3R4/3K4 w - - 0 1");
        let rook_moves: Vec<_> = legal_moves(&pos)
            .into_iter()
            .filter(|m| m.piece == Piece::Rook)
            .collect();
        assert_eq!(rook_moves.len(), 6);
        assert!(rook_moves.iter().all(|m| m.to.file() == 3));
    }

    #[test]
    fn test_double_check_allows_only_king_moves() {
        let pos = position("4k3/8/8/8/8/5n2/8/r3K2R w K - 0 1");
        let moves = legal_moves(&pos);
        assert_eq!(moves.checkers().count(), 2);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.piece == Piece::King));
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn test_single_check_block_or_capture() {
        let pos = position("4k3/8/8/8/8/8/3N4/r3K3 w - - 0 1");
        let moves = legal_moves(&pos);
        assert!(moves.in_check());
        for mv in moves.iter().filter(|m| m.piece != Piece::King) {
            assert!(mv.to == Square::B1 || mv.to == Square::C1 || mv.to == Square::D1);
        }
        assert!(moves.iter().any(|m| m.piece == Piece::Knight && m.to == Square::B1));
    }

    #[test]
    fn test_en_passant_discovered_check_is_illegal() {
        // Capturing en passant would open the fifth rank to the rook.
        let pos = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(legal_moves(&pos).iter().all(|m| !m.is_en_passant()));

        let pos = position("8/8/8/3pP3/8/8/8/K6k w - d6 0 1");
        let ep: Vec<_> = legal_moves(&pos).into_iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, Square::D6);
        assert_eq!(ep[0].captured, Some(Piece::Pawn));
    }

    #[test]
    fn test_en_passant_removes_checking_pawn() {
        let pos = position("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1");
        let moves = legal_moves(&pos);
        assert!(moves.in_check());
        assert!(moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn test_castling_through_attack_is_illegal() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(legal_moves(&pos).iter().filter(|m| m.is_castle()).count(), 2);

        // Rook on f8 covers f1.
        let pos = position("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1");
        let castles: Vec<_> = legal_moves(&pos).into_iter().filter(|m| m.is_castle()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, Square::C1);

        // b1 may be attacked on the queen side.
        let pos = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(legal_moves(&pos).iter().filter(|m| m.is_castle()).count(), 1);
    }

    #[test]
    fn test_promotions_expand_to_four() {
        let pos = position("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let moves = legal_moves(&pos);
        let promotions: Vec<_> = moves.iter().filter(|m| m.is_promotion()).collect();
        assert_eq!(promotions.len(), 8);

        let captures = legal_captures(&pos);
        assert_eq!(captures.len(), 8);
        assert!(captures.iter().all(|m| m.is_promotion()));
    }

    #[test]
    fn test_king_cannot_retreat_along_checking_ray() {
        let pos = position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        let moves = legal_moves(&pos);
        assert!(moves.find(Square::E1, Square::F1, None).is_none());
        assert!(moves.find(Square::E1, Square::E2, None).is_some());
    }
}
