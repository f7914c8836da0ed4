use std::fmt;

use crate::types::{CastleRights, Piece, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveFlag {
    #[default]
    Normal,
    Castle,
    EnPassant,
}

/// A fully described move. Two moves are equal when every field matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Kind of the piece being moved
    pub piece: Piece,
    /// Kind of the piece being taken, if any (a pawn for en passant)
    pub captured: Option<Piece>,
    /// Promotion target, only set for pawns reaching the last rank
    pub promotion: Option<Piece>,
    pub flag: MoveFlag,
}

impl Move {
    #[inline(always)]
    pub const fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            promotion: None,
            flag: MoveFlag::Normal,
        }
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    #[inline(always)]
    pub fn is_castle(&self) -> bool {
        self.flag == MoveFlag::Castle
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.flag == MoveFlag::EnPassant
    }

    /// Captures and promotions.
    #[inline(always)]
    pub const fn is_tactical(&self) -> bool {
        self.captured.is_some() || self.promotion.is_some()
    }

    /// The piece standing on `to` after the move.
    #[inline(always)]
    pub fn placed_piece(&self) -> Piece {
        self.promotion.unwrap_or(self.piece)
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`, castling as the king's move (`e1g1`).
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

/// State `Position::apply` hands back so `Position::undo` can restore it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub(crate) en_passant: Option<Square>,
    pub(crate) castling: CastleRights,
    pub(crate) halfmove_clock: u16,
    /// hash_after ^ hash_before
    pub(crate) hash_delta: u64,
    pub(crate) pawn_hash_delta: u64,
}
