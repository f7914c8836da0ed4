use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::types::{Color, Square};

/// A set of squares, one bit per square (a1 = bit 0).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(!0);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00ff);
    pub const RANK_8: Bitboard = Bitboard(0xff00_0000_0000_0000);

    pub const DARK_SQUARES: Bitboard = Bitboard(0xaa55_aa55_aa55_aa55);
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55aa_55aa_55aa_55aa);

    #[inline(always)]
    pub const fn file(file: u8) -> Bitboard {
        Bitboard(Self::FILE_A.0 << file)
    }

    #[inline(always)]
    pub const fn rank(rank: u8) -> Bitboard {
        Bitboard(Self::RANK_1.0 << (8 * rank))
    }

    /// Files directly left and right of `file`.
    #[inline(always)]
    pub const fn adjacent_files(file: u8) -> Bitboard {
        let mut bb = 0;
        if file > 0 {
            bb |= Self::FILE_A.0 << (file - 1);
        }
        if file < 7 {
            bb |= Self::FILE_A.0 << (file + 1);
        }
        Bitboard(bb)
    }

    /// Ranks strictly in front of `rank` from `color`'s point of view.
    #[inline(always)]
    pub const fn forward_ranks(color: Color, rank: u8) -> Bitboard {
        match color {
            Color::White => {
                if rank >= 7 {
                    Bitboard(0)
                } else {
                    Bitboard(!0u64 << (8 * (rank + 1)))
                }
            }
            Color::Black => {
                if rank == 0 {
                    Bitboard(0)
                } else {
                    Bitboard(!0u64 >> (8 * (8 - rank)))
                }
            }
        }
    }

    /// Squares on the same file in front of `sq`.
    #[inline(always)]
    pub const fn forward_file(color: Color, sq: Square) -> Bitboard {
        Bitboard(Self::forward_ranks(color, sq.rank()).0 & Self::file(sq.file()).0)
    }

    /// Squares an enemy pawn must not occupy for a pawn on `sq` to be passed.
    #[inline(always)]
    pub const fn passed_span(color: Color, sq: Square) -> Bitboard {
        let files = Self::file(sq.file()).0 | Self::adjacent_files(sq.file()).0;
        Bitboard(Self::forward_ranks(color, sq.rank()).0 & files)
    }

    /// Squares on adjacent files in front of `sq` (everything a pawn on `sq` may ever attack).
    #[inline(always)]
    pub const fn attack_span(color: Color, sq: Square) -> Bitboard {
        Bitboard(Self::forward_ranks(color, sq.rank()).0 & Self::adjacent_files(sq.file()).0)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_nonempty(self) -> bool {
        self.0 != 0
    }

    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    #[inline(always)]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    /// Lowest set square. The set must not be empty.
    #[inline(always)]
    pub const fn lsb(self) -> Square {
        debug_assert!(self.0 != 0);
        Square::new(self.0.trailing_zeros() as u8)
    }

    /// Highest set square. The set must not be empty.
    #[inline(always)]
    pub const fn msb(self) -> Square {
        debug_assert!(self.0 != 0);
        Square::new(63 - self.0.leading_zeros() as u8)
    }

    #[inline(always)]
    pub const fn north(self) -> Bitboard {
        Bitboard(self.0 << 8)
    }

    #[inline(always)]
    pub const fn south(self) -> Bitboard {
        Bitboard(self.0 >> 8)
    }

    #[inline(always)]
    pub const fn east(self) -> Bitboard {
        Bitboard((self.0 << 1) & !Self::FILE_A.0)
    }

    #[inline(always)]
    pub const fn west(self) -> Bitboard {
        Bitboard((self.0 >> 1) & !Self::FILE_H.0)
    }

    /// One rank toward the opponent.
    #[inline(always)]
    pub const fn forward(self, color: Color) -> Bitboard {
        match color {
            Color::White => self.north(),
            Color::Black => self.south(),
        }
    }

    /// Squares attacked by a set of pawns of `color`.
    #[inline(always)]
    pub const fn pawn_attacks(self, color: Color) -> Bitboard {
        let pushed = self.forward(color);
        Bitboard(pushed.east().0 | pushed.west().0)
    }

    /// Fills every square in front of the set, stopping at `blockers`.
    pub fn fill_forward(self, color: Color, blockers: Bitboard) -> Bitboard {
        let mut fill = self;
        let mut frontier = self;
        loop {
            frontier = frontier.forward(color) & !blockers;
            if frontier.is_empty() {
                return fill;
            }
            fill |= frontier;
        }
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = Square::new(self.0.trailing_zeros() as u8);
        self.0 &= self.0 - 1;
        Some(sq)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bitboard {}

macro_rules! bitboard_ops {
    ($($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt;)*) => {
        $(
            impl $trait for Bitboard {
                type Output = Bitboard;

                #[inline(always)]
                fn $fn(self, rhs: Bitboard) -> Bitboard {
                    Bitboard(self.0 $op rhs.0)
                }
            }

            impl $trait<Square> for Bitboard {
                type Output = Bitboard;

                #[inline(always)]
                fn $fn(self, rhs: Square) -> Bitboard {
                    Bitboard(self.0 $op rhs.bb().0)
                }
            }

            impl $assign_trait for Bitboard {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Bitboard) {
                    self.0 = self.0 $op rhs.0;
                }
            }

            impl $assign_trait<Square> for Bitboard {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Square) {
                    self.0 = self.0 $op rhs.bb().0;
                }
            }
        )*
    };
}

bitboard_ops!(
    BitAnd, bitand, BitAndAssign, bitand_assign, &;
    BitOr, bitor, BitOrAssign, bitor_assign, |;
    BitXor, bitxor, BitXorAssign, bitxor_assign, ^;
);

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline(always)]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = if self.contains(Square::from_coords(file, rank)) {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
