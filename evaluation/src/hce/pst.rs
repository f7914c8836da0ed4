use board::{Bitboard, Color, Square};

// Tables are laid out from the owner's point of view with the far rank first.
// White reads them rotated (63 - sq), Black reads them as stored.

#[inline(always)]
pub fn pst_index(color: Color, sq: Square) -> usize {
    match color {
        Color::White => 63 - sq.index(),
        Color::Black => sq.index(),
    }
}

#[inline(always)]
pub fn sum_pst(pieces: Bitboard, table: &[i32; 64], color: Color) -> i32 {
    pieces.map(|sq| table[pst_index(color, sq)]).sum()
}

// The far rank is unreachable for pawns; 800 stands in for a promoted pawn.
pub const PAWN_MG: [i32; 64] = [
    800, 800, 800, 800, 800, 800, 800, 800, //
    -6, 7, -4, -2, -2, -4, 7, -6, //
    -7, -6, -3, -1, -1, -3, -6, -7, //
    -7, 0, 5, 13, 13, 5, 0, -7, //
    -12, -7, 10, 17, 17, 10, -7, -12, //
    -13, -3, 10, 12, 12, 10, -3, -13, //
    -10, 0, 2, 4, 4, 2, 0, -10, //
    0, 0, 0, 0, 0, 0, 0, 0,
];

pub const PAWN_EG: [i32; 64] = [
    800, 800, 800, 800, 800, 800, 800, 800, //
    15, 17, 14, 14, 14, 14, 17, 15, //
    15, 17, 19, 19, 19, 19, 17, 15, //
    10, 12, 14, 14, 14, 14, 12, 10, //
    5, 7, 8, 8, 8, 8, 7, 5, //
    0, 2, 3, 3, 3, 3, 2, 0, //
    -5, -3, -2, -2, -2, -2, -3, -5, //
    0, 0, 0, 0, 0, 0, 0, 0,
];

pub const KNIGHT: [i32; 64] = [
    -83, -48, -32, -21, -21, -32, -48, -83, //
    -49, -32, -5, -4, -4, -5, -32, -49, //
    -43, 0, 9, 10, 10, 9, 0, -43, //
    -11, 9, 18, 15, 15, 18, 9, -11, //
    4, 11, 23, 21, 21, 23, 11, 4, //
    -18, 0, 8, 18, 18, 8, 0, -18, //
    -19, -14, -3, 5, 5, -3, -14, -19, //
    -34, -15, -14, 0, 0, -14, -15, -34,
];

pub const BISHOP: [i32; 64] = [
    -24, -28, -37, -25, -25, -37, -28, -24, //
    -23, -8, -8, -5, -5, -8, -8, -23, //
    -1, -2, 0, 0, 0, 0, -2, -1, //
    -8, -12, 4, 10, 10, 4, -12, -8, //
    -9, -1, 4, 13, 13, 4, -1, -9, //
    -4, 6, 9, 8, 8, 9, 6, -4, //
    -21, 6, 0, 4, 4, 0, 6, -21, //
    -28, -9, -11, -9, -9, -11, -9, -28,
];

pub const ROOK: [i32; 64] = [
    -7, -9, -12, 0, 0, -12, -9, -7, //
    -10, -6, -1, -12, -12, -1, -6, -10, //
    -26, -12, -21, -16, -16, -21, -12, -26, //
    -22, -24, -19, -26, -26, -19, -24, -22, //
    -28, -17, -28, -24, -24, -28, -17, -28, //
    -35, -21, -25, -19, -19, -25, -21, -25, //
    -29, -22, -14, -20, -20, -14, -22, -29, //
    -16, -14, -7, -9, -9, -27, -14, -16,
];

pub const QUEEN: [i32; 64] = [
    13, 1, 12, 6, 6, 12, 1, 13, //
    -1, -32, 4, -3, -3, 4, -32, -1, //
    19, 11, 14, 14, 14, 14, 11, 19, //
    5, -15, 5, -15, -15, 5, -15, 5, //
    11, -4, -3, -10, -10, -3, -4, 11, //
    2, -6, -1, -1, -1, -1, -6, 2, //
    -20, -12, 7, 6, 6, 7, -12, -20, //
    -31, -24, -18, -1, -1, -18, -24, -31,
];

pub const KING_MG: [i32; 64] = [
    -8, 23, 31, -22, -22, 31, 23, -8, //
    -4, -2, 26, 44, 44, 26, -2, -4, //
    -1, 64, 85, 62, 62, 85, 64, -1, //
    -34, 16, 32, 40, 40, 32, 16, -34, //
    -54, 3, 6, 11, 11, 6, 3, -54, //
    -31, 13, 12, 8, 8, 12, 13, -31, //
    -8, 13, 0, -10, -10, 0, 13, -8, //
    0, 25, -6, -25, -25, -6, 25, 0,
];

pub const KING_EG: [i32; 64] = [
    -30, -15, -15, -15, -15, -15, -15, -30, //
    -10, -5, 0, 0, 0, 0, -5, -10, //
    0, 15, 25, 35, 35, 25, 15, 0, //
    -10, 10, 20, 30, 30, 20, 10, -10, //
    -10, 5, 15, 20, 20, 15, 0, -10, //
    -15, 0, 10, 15, 15, 10, 0, -15, //
    -20, -15, -10, -10, -10, -10, -15, -20, //
    -40, -20, -15, -15, -15, -15, -20, -40,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pst_index_is_mirrored_between_colors() {
        // A white pawn on e2 and a black pawn on e7 read the same row.
        let white = pst_index(Color::White, Square::E2);
        let black = pst_index(Color::Black, Square::E7);
        assert_eq!(white / 8, black / 8);
        assert_eq!(PAWN_MG[white], PAWN_MG[black]);
        assert_eq!(KNIGHT[pst_index(Color::White, Square::G1)], -15);
    }
}
