use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::position::Position;
use crate::types::{CastleRights, Color, Piece, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least 4 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("invalid piece letter '{0}'")]
    PieceLetter(char),
    #[error("rank {0} does not describe exactly 8 squares")]
    RankLength(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("invalid side to move '{0}'")]
    Side(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("{0:?} must have exactly one king")]
    KingCount(Color),
}

impl Position {
    /// Parses a FEN string. The half-move and full-move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Position, ParseError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ParseError::FieldCount(fields.len()));
        }

        let mut position = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseError::RankCount(ranks.len()));
        }
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(ParseError::RankLength(rank as usize + 1));
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(c).ok_or(ParseError::PieceLetter(c))?;
                    if file >= 8 {
                        return Err(ParseError::RankLength(rank as usize + 1));
                    }
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    position.put_piece(color, piece, Square::from_coords(file, rank));
                    file += 1;
                }
                if file > 8 {
                    return Err(ParseError::RankLength(rank as usize + 1));
                }
            }
            if file != 8 {
                return Err(ParseError::RankLength(rank as usize + 1));
            }
        }

        for color in Color::ALL {
            if position.pieces(color, Piece::King).count() != 1 {
                return Err(ParseError::KingCount(color));
            }
        }

        position.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ParseError::Side(other.to_string())),
        };

        position.castling = parse_castling(fields[2])?;

        position.en_passant = match fields[3] {
            "-" => None,
            text => {
                let sq = Square::parse(text).ok_or_else(|| ParseError::EnPassant(text.to_string()))?;
                let expected_rank = if position.side_to_move == Color::White { 5 } else { 2 };
                if sq.rank() != expected_rank {
                    return Err(ParseError::EnPassant(text.to_string()));
                }
                Some(sq)
            }
        };

        position.halfmove_clock = match fields.get(4) {
            Some(text) => text
                .parse()
                .map_err(|_| ParseError::Counter(text.to_string()))?,
            None => 0,
        };
        let fullmove_text = fields.get(5).copied().unwrap_or("1");
        let fullmove: u16 = fullmove_text
            .parse()
            .map_err(|_| ParseError::Counter(fullmove_text.to_string()))?;
        position.ply = (fullmove.max(1) - 1)
            .checked_mul(2)
            .and_then(|ply| ply.checked_add((position.side_to_move == Color::Black) as u16))
            .ok_or_else(|| ParseError::Counter(fullmove_text.to_string()))?;

        position.hash = position.compute_hash();
        position.pawn_hash = position.compute_pawn_hash();
        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_coords(file, rank);
                match (self.piece_on(sq), self.color_on(sq)) {
                    (Some(piece), Some(color)) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        let c = piece.to_char();
                        fen.push(if color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        });
                    }
                    _ => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move == Color::White { 'w' } else { 'b' });
        fen.push(' ');

        if self.castling.is_empty() {
            fen.push('-');
        } else {
            for (right, c) in CASTLE_LETTERS {
                if self.castling.contains(right) {
                    fen.push(c);
                }
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.ply / 2 + 1));
        fen
    }
}

const CASTLE_LETTERS: [(CastleRights, char); 4] = [
    (CastleRights::WHITE_KING, 'K'),
    (CastleRights::WHITE_QUEEN, 'Q'),
    (CastleRights::BLACK_KING, 'k'),
    (CastleRights::BLACK_QUEEN, 'q'),
];

fn parse_castling(text: &str) -> Result<CastleRights, ParseError> {
    let mut rights = CastleRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for c in text.chars() {
        let (right, _) = CASTLE_LETTERS
            .iter()
            .find(|(_, letter)| *letter == c)
            .ok_or_else(|| ParseError::Castling(text.to_string()))?;
        rights.insert(*right);
    }
    Ok(rights)
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl Default for Position {
    fn default() -> Self {
        // The starting position always parses.
        match Position::from_fen(STARTING_FEN) {
            Ok(position) => position,
            Err(_) => unreachable!(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}
