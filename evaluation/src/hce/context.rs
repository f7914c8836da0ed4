use board::movegen::pinned_pieces;
use board::{Bitboard, Color, MoveSet, Piece, Position, Square};

use super::pawn_cache::CachedPawnEvaluation;

// Pre-computed evaluation context to avoid redundant bitboard lookups
pub struct EvalContext<'a> {
    pub position: &'a Position,
    pub pawn_structure: &'a CachedPawnEvaluation,

    pub all_pieces: Bitboard,
    pub pieces_by_color: [Bitboard; 2],
    pub king_sqs: [Square; 2],

    pub attacks: [Bitboard; 2],
    pub pinned: [Bitboard; 2],
}

impl<'a> EvalContext<'a> {
    #[inline(always)]
    pub fn new(
        position: &'a Position,
        moves: &MoveSet,
        pawn_structure: &'a CachedPawnEvaluation,
    ) -> Self {
        let us = position.side_to_move();
        let them = !us;
        let all_pieces = position.occupied();

        let mut attacks = [Bitboard::EMPTY; 2];
        attacks[us.index()] = moves.own_attacks();
        attacks[them.index()] = position.attacked_squares(them, all_pieces);

        let mut pinned = [Bitboard::EMPTY; 2];
        pinned[us.index()] = moves.pinned();
        pinned[them.index()] = pinned_pieces(position, them);

        Self {
            position,
            pawn_structure,
            all_pieces,
            pieces_by_color: [
                position.occupancy(Color::White),
                position.occupancy(Color::Black),
            ],
            king_sqs: [
                position.king_square(Color::White),
                position.king_square(Color::Black),
            ],
            attacks,
            pinned,
        }
    }

    #[inline(always)]
    pub fn color_mask_for(&self, color: Color) -> Bitboard {
        self.pieces_by_color[color.index()]
    }

    #[inline(always)]
    pub fn king_sq_for(&self, color: Color) -> Square {
        self.king_sqs[color.index()]
    }

    #[inline(always)]
    pub fn attacks_for(&self, color: Color) -> Bitboard {
        self.attacks[color.index()]
    }

    #[inline(always)]
    pub fn pinned_for(&self, color: Color) -> Bitboard {
        self.pinned[color.index()]
    }

    #[inline(always)]
    pub fn holes_for(&self, color: Color) -> Bitboard {
        self.pawn_structure.holes[color.index()]
    }

    #[inline(always)]
    pub fn passed_for(&self, color: Color) -> Bitboard {
        self.pawn_structure.passed[color.index()]
    }

    #[inline(always)]
    pub fn pawns_for(&self, color: Color) -> Bitboard {
        self.position.pieces(color, Piece::Pawn)
    }

    #[inline(always)]
    pub fn knights_for(&self, color: Color) -> Bitboard {
        self.position.pieces(color, Piece::Knight)
    }

    #[inline(always)]
    pub fn bishops_for(&self, color: Color) -> Bitboard {
        self.position.pieces(color, Piece::Bishop)
    }

    #[inline(always)]
    pub fn rooks_for(&self, color: Color) -> Bitboard {
        self.position.pieces(color, Piece::Rook)
    }

    #[inline(always)]
    pub fn queens_for(&self, color: Color) -> Bitboard {
        self.position.pieces(color, Piece::Queen)
    }

    /// Pieces other than pawns and the king.
    #[inline(always)]
    pub fn piece_count_for(&self, color: Color) -> usize {
        self.position.piece_count(color) as usize
    }

    /// Squares attacked by `color`'s pawns.
    #[inline(always)]
    pub fn pawn_attacks_for(&self, color: Color) -> Bitboard {
        self.pawns_for(color).pawn_attacks(color)
    }
}
