use std::fmt;
use std::ops::Not;

use crate::bitboard::Bitboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// +1 for White, -1 for Black.
    #[inline(always)]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Square offset of a single pawn push.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline(always)]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Pieces a pawn may promote to, most valuable first.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase letter used by FEN and coordinate notation.
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }
}

/// A board square, a1 = 0 through h8 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

macro_rules! squares {
    ($($name:ident = $idx:expr),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($idx);)*
        }
    };
}

squares!(
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
);

impl Square {
    #[inline(always)]
    pub const fn new(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    #[inline(always)]
    pub const fn from_coords(file: u8, rank: u8) -> Self {
        Square(rank * 8 + file)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// Rank as seen from `color`'s side of the board (0 = home rank).
    #[inline(always)]
    pub const fn relative_rank(self, color: Color) -> u8 {
        match color {
            Color::White => self.rank(),
            Color::Black => 7 - self.rank(),
        }
    }

    /// Vertical mirror (a1 <-> a8).
    #[inline(always)]
    pub const fn flip(self) -> Square {
        Square(self.0 ^ 56)
    }

    /// Horizontal mirror (a1 <-> h1).
    #[inline(always)]
    pub const fn mirror_file(self) -> Square {
        Square(self.0 ^ 7)
    }

    #[inline(always)]
    pub const fn bb(self) -> Bitboard {
        Bitboard(1u64 << self.0)
    }

    /// Shifts the square by whole files and ranks, `None` when it leaves the board.
    #[inline(always)]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Square((rank * 8 + file) as u8))
        }
    }

    /// Adds a raw index offset. The caller guarantees the result stays on the board.
    #[inline(always)]
    pub const fn shift(self, delta: i8) -> Square {
        Square((self.0 as i8 + delta) as u8)
    }

    /// Chebyshev (king-move) distance.
    #[inline(always)]
    pub const fn distance(a: Square, b: Square) -> u8 {
        let df = (a.file() as i8 - b.file() as i8).unsigned_abs();
        let dr = (a.rank() as i8 - b.rank() as i8).unsigned_abs();
        if df > dr {
            df
        } else {
            dr
        }
    }

    /// True for the dark squares (a1, c1, ...).
    #[inline(always)]
    pub const fn is_dark(self) -> bool {
        (self.file() + self.rank()) % 2 == 0
    }

    pub fn parse(text: &str) -> Option<Square> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Square::from_coords(file as u8 - b'a', rank as u8 - b'1'))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The four castling flags packed into a nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const WHITE_KING: CastleRights = CastleRights(1);
    pub const WHITE_QUEEN: CastleRights = CastleRights(2);
    pub const BLACK_KING: CastleRights = CastleRights(4);
    pub const BLACK_QUEEN: CastleRights = CastleRights(8);
    pub const ALL: CastleRights = CastleRights(15);

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Self {
        CastleRights(bits & 15)
    }

    #[inline(always)]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub fn insert(&mut self, other: CastleRights) {
        self.0 |= other.0;
    }

    #[inline(always)]
    pub fn remove(&mut self, other: CastleRights) {
        self.0 &= !other.0;
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn king_side(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights::WHITE_KING,
            Color::Black => CastleRights::BLACK_KING,
        }
    }

    pub const fn queen_side(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights::WHITE_QUEEN,
            Color::Black => CastleRights::BLACK_QUEEN,
        }
    }

    pub const fn for_color(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(3),
            Color::Black => CastleRights(12),
        }
    }
}

/// Rights lost when a piece leaves or arrives on each square.
pub(crate) const CASTLE_MASK: [u8; 64] = {
    let mut mask = [0u8; 64];
    mask[Square::A1.index()] = CastleRights::WHITE_QUEEN.0;
    mask[Square::H1.index()] = CastleRights::WHITE_KING.0;
    mask[Square::E1.index()] = CastleRights::WHITE_KING.0 | CastleRights::WHITE_QUEEN.0;
    mask[Square::A8.index()] = CastleRights::BLACK_QUEEN.0;
    mask[Square::H8.index()] = CastleRights::BLACK_KING.0;
    mask[Square::E8.index()] = CastleRights::BLACK_KING.0 | CastleRights::BLACK_QUEEN.0;
    mask
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_parse_display() {
        for sq in Square::all() {
            let text = sq.to_string();
            assert_eq!(Square::parse(&text), Some(sq));
        }
        assert_eq!(Square::parse("i1"), None);
        assert_eq!(Square::parse("a9"), None);
        assert_eq!(Square::parse("a10"), None);
    }

    #[test]
    fn test_square_geometry() {
        assert_eq!(Square::E4.file(), 4);
        assert_eq!(Square::E4.rank(), 3);
        assert_eq!(Square::E4.flip(), Square::E5);
        assert_eq!(Square::A1.mirror_file(), Square::H1);
        assert_eq!(Square::E2.relative_rank(Color::Black), 6);
        assert_eq!(Square::distance(Square::A1, Square::H8), 7);
        assert_eq!(Square::distance(Square::E4, Square::F6), 2);
        assert_eq!(Square::H4.offset(1, 0), None);
        assert_eq!(Square::A1.offset(1, 2), Some(Square::B3));
        assert!(Square::A1.is_dark());
        assert!(!Square::H1.is_dark());
    }

    #[test]
    fn test_castle_rights() {
        let mut rights = CastleRights::ALL;
        rights.remove(CastleRights::for_color(Color::White));
        assert!(!rights.contains(CastleRights::WHITE_KING));
        assert!(rights.contains(CastleRights::BLACK_QUEEN));
        assert_eq!(rights.bits(), 12);
    }
}
