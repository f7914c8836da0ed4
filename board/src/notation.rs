//! Coordinate move notation (`e2e4`, `e7e8q`, castling as `e1g1`).

use thiserror::Error;

use crate::movegen::legal_moves;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Piece, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move '{0}' must be 4 or 5 characters")]
    Length(String),
    #[error("invalid square in move '{0}'")]
    Square(String),
    #[error("invalid promotion letter in move '{0}'")]
    Promotion(String),
    #[error("move '{0}' is not legal in this position")]
    Illegal(String),
}

/// Splits coordinate notation into its squares and promotion piece without
/// looking at a position.
pub fn parse_coordinates(text: &str) -> Result<(Square, Square, Option<Piece>), MoveParseError> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(MoveParseError::Length(text.to_string()));
    }
    let from = Square::parse(&text[0..2]).ok_or_else(|| MoveParseError::Square(text.to_string()))?;
    let to = Square::parse(&text[2..4]).ok_or_else(|| MoveParseError::Square(text.to_string()))?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => match Piece::from_char(c) {
            Some(piece) if Piece::PROMOTIONS.contains(&piece) => Some(piece),
            _ => return Err(MoveParseError::Promotion(text.to_string())),
        },
    };
    Ok((from, to, promotion))
}

/// Resolves coordinate notation against the legal moves of `pos`.
pub fn parse_move(pos: &Position, text: &str) -> Result<Move, MoveParseError> {
    let (from, to, promotion) = parse_coordinates(text.trim())?;
    legal_moves(pos)
        .find(from, to, promotion)
        .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
}
