//! Precomputed attack sets.
//!
//! Sliding pieces use fixed-shift "fancy" magic bitboards: the relevant blockers are
//! masked, multiplied by a per-square magic and shifted into a slot of one shared table.
//!
//! <https://www.chessprogramming.org/Magic_Bitboards>

use once_cell::sync::Lazy;

use crate::bitboard::Bitboard;
use crate::types::{Color, Piece, Square};

const SLIDING_TABLE_SIZE: usize = 88772;
const BISHOP_SHIFT: u32 = 64 - 9;
const ROOK_SHIFT: u32 = 64 - 12;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

// (magic, offset into the shared table) per square.
// Fixed-shift magics by Volker Annuss; several squares deliberately share slots
// where their attack sets agree.
const BISHOP_MAGICS: [(u64, usize); 64] = [
    (0x007f_bfbf_bfbf_bfff, 5378),
    (0x0000_a060_4010_07fc, 4093),
    (0x0001_0040_0802_0000, 4314),
    (0x0000_8060_0400_0000, 6587),
    (0x0000_1004_0000_0000, 6491),
    (0x0000_21c1_00b2_0000, 6330),
    (0x0000_0400_4100_8000, 5609),
    (0x0000_0fb0_203f_ff80, 22236),
    (0x0000_0401_0040_1004, 6106),
    (0x0000_0200_8020_0802, 5625),
    (0x0000_0040_1020_2000, 16785),
    (0x0000_0080_6004_0000, 16817),
    (0x0000_0044_0200_0000, 6842),
    (0x0000_0008_0100_8000, 7003),
    (0x0000_07ef_e0bf_ff80, 4197),
    (0x0000_0008_2082_0020, 7356),
    (0x0000_4000_8080_8080, 4602),
    (0x0002_1f01_0040_0808, 4538),
    (0x0001_8000_c06f_3fff, 29531),
    (0x0000_2582_0080_1000, 45393),
    (0x0000_2400_8084_0000, 12420),
    (0x0000_1800_0c03_fff8, 15763),
    (0x0000_0a58_4020_8020, 5050),
    (0x0000_0200_0820_8020, 4346),
    (0x0000_8040_0081_0100, 6074),
    (0x0001_0119_0080_2008, 7866),
    (0x0000_8040_0081_0100, 32139),
    (0x0001_0040_3c04_03ff, 57673),
    (0x0007_8402_a880_2000, 55365),
    (0x0000_1010_0080_4400, 15818),
    (0x0000_0808_0010_4100, 5562),
    (0x0000_4004_c008_2008, 6390),
    (0x0001_0101_2000_8020, 7930),
    (0x0000_8080_9a00_4010, 13329),
    (0x0007_fefe_0881_0010, 7170),
    (0x0003_ff0f_833f_c080, 27267),
    (0x007f_e080_1900_3042, 53787),
    (0x003f_ffef_ea00_3000, 5097),
    (0x0000_1010_1000_2080, 6643),
    (0x0000_8020_0508_0804, 6138),
    (0x0000_8080_80a8_0040, 7418),
    (0x0000_1041_0020_0040, 7898),
    (0x0003_ffdf_7f83_3fc0, 42012),
    (0x0000_0088_4045_0020, 57350),
    (0x0000_7ffc_8018_0030, 22813),
    (0x007f_ffdd_8014_0028, 56693),
    (0x0002_0080_200a_0004, 5818),
    (0x0000_1010_1010_0020, 7098),
    (0x0007_ffdf_c180_5000, 4451),
    (0x0003_ffef_e0c0_2200, 4709),
    (0x0000_0008_2080_6000, 4794),
    (0x0000_0000_0840_3000, 13364),
    (0x0000_0001_0020_2000, 4570),
    (0x0000_0040_4080_2000, 4282),
    (0x0004_0100_4010_0400, 14964),
    (0x0000_6020_6018_03f4, 4026),
    (0x0003_ffdf_dfc2_8048, 4826),
    (0x0000_0008_2082_0020, 7354),
    (0x0000_0000_0820_8060, 4848),
    (0x0000_0000_0080_8020, 15946),
    (0x0000_0000_0100_2020, 14932),
    (0x0000_0004_0100_2008, 16588),
    (0x0000_0040_4040_4040, 6905),
    (0x007f_ff9f_df7f_f813, 16076),
];

const ROOK_MAGICS: [(u64, usize); 64] = [
    (0x0028_0077_ffeb_fffe, 26304),
    (0x2004_0102_0109_7fff, 35520),
    (0x0010_0200_1005_3fff, 38592),
    (0x0040_0400_0800_4002, 8026),
    (0x7fd0_0441_ffff_d003, 22196),
    (0x4020_0088_87df_fffe, 80870),
    (0x0040_0088_8847_ffff, 76747),
    (0x0068_00fb_ff75_fffd, 30400),
    (0x0000_2801_0113_ffff, 11115),
    (0x0020_0402_01fc_ffff, 18205),
    (0x007f_e800_42ff_ffe8, 53577),
    (0x0000_1800_217f_ffe8, 62724),
    (0x0000_1800_073f_ffe8, 34282),
    (0x0000_1800_e05f_ffe8, 29196),
    (0x0000_1800_602f_ffe8, 23806),
    (0x0000_3000_2fff_ffa0, 49481),
    (0x0030_0018_010b_ffff, 2410),
    (0x0003_000c_0085_fffb, 36498),
    (0x0004_0008_0201_0008, 24478),
    (0x0004_0020_2002_0004, 10074),
    (0x0001_0020_0200_2001, 79315),
    (0x0001_0010_0080_1040, 51779),
    (0x0000_0040_4000_8001, 13586),
    (0x0000_0068_00cd_fff4, 19323),
    (0x0040_2000_1008_0010, 70612),
    (0x0000_0800_1004_0010, 83652),
    (0x0004_0100_0802_0008, 63110),
    (0x0000_0400_2020_0200, 34496),
    (0x0002_0080_1010_0100, 84966),
    (0x0000_0080_2001_0020, 54341),
    (0x0000_0080_2020_0040, 60421),
    (0x0000_8200_2000_4020, 86402),
    (0x00ff_fd18_0030_0030, 50245),
    (0x007f_ff7f_bfd4_0020, 76622),
    (0x003f_ffbd_0018_0018, 84676),
    (0x001f_ffde_8018_0018, 78757),
    (0x000f_ffe0_bfe8_0018, 37346),
    (0x0001_0000_8020_2001, 370),
    (0x0003_fffb_ff98_0180, 42182),
    (0x0001_fffd_ff90_00e0, 45385),
    (0x00ff_fefe_ebff_d800, 61659),
    (0x007f_fff7_ffc0_1400, 12790),
    (0x003f_ffbf_e4ff_e800, 16762),
    (0x001f_fff0_1fc0_3000, 0),
    (0x000f_ffe7_f8bf_e800, 38380),
    (0x0007_ffdf_df3f_f808, 11098),
    (0x0003_fff8_5fff_a804, 21803),
    (0x0001_fffd_75ff_a802, 39189),
    (0x00ff_ffd7_ffeb_ffd8, 58628),
    (0x007f_ff75_ff7f_bfd8, 44116),
    (0x003f_ff86_3fbf_7fd8, 78357),
    (0x001f_ffbf_dfd7_ffd8, 44481),
    (0x000f_fff8_1028_0028, 64134),
    (0x0007_ffd7_f7fe_ffd8, 41759),
    (0x0003_fffc_0c48_0048, 1394),
    (0x0001_ffff_afd7_ffd8, 40910),
    (0x00ff_ffe4_ffdf_a3ba, 66516),
    (0x007f_ffef_7ff3_d3da, 3897),
    (0x003f_ffbf_dfef_f7fa, 3930),
    (0x001f_ffef_f7fb_fc22, 72934),
    (0x0000_0204_0800_1001, 72662),
    (0x0007_fffe_ffff_77fd, 56325),
    (0x0003_ffff_bf7d_feec, 66501),
    (0x0001_ffff_9dff_a333, 14826),
];

#[derive(Clone, Copy)]
struct Magic {
    mask: Bitboard,
    magic: u64,
    offset: usize,
}

impl Magic {
    #[inline(always)]
    fn index(&self, occupied: Bitboard, shift: u32) -> usize {
        self.offset + ((occupied & self.mask).0.wrapping_mul(self.magic) >> shift) as usize
    }
}

struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    bishop: [Magic; 64],
    rook: [Magic; 64],
    sliding: Vec<Bitboard>,
    between: Vec<[Bitboard; 64]>,
    line: Vec<[Bitboard; 64]>,
}

static TABLES: Lazy<AttackTables> = Lazy::new(AttackTables::build);

impl AttackTables {
    fn build() -> Self {
        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        let mut pawn = [[Bitboard::EMPTY; 64]; 2];

        for sq in Square::all() {
            knight[sq.index()] = step_attacks(sq, &KNIGHT_DELTAS);
            king[sq.index()] = step_attacks(sq, &KING_DELTAS);
            pawn[Color::White.index()][sq.index()] = step_attacks(sq, &[(-1, 1), (1, 1)]);
            pawn[Color::Black.index()][sq.index()] = step_attacks(sq, &[(-1, -1), (1, -1)]);
        }

        let mut sliding = vec![Bitboard::EMPTY; SLIDING_TABLE_SIZE];
        let bishop = init_magics(&mut sliding, &BISHOP_MAGICS, &BISHOP_DIRECTIONS, BISHOP_SHIFT);
        let rook = init_magics(&mut sliding, &ROOK_MAGICS, &ROOK_DIRECTIONS, ROOK_SHIFT);

        let mut between = vec![[Bitboard::EMPTY; 64]; 64];
        let mut line = vec![[Bitboard::EMPTY; 64]; 64];
        for a in Square::all() {
            for b in Square::all() {
                if a == b {
                    continue;
                }
                for directions in [&ROOK_DIRECTIONS, &BISHOP_DIRECTIONS] {
                    let from_a = sliding_attack(a, Bitboard::EMPTY, directions);
                    if !from_a.contains(b) {
                        continue;
                    }
                    let from_b = sliding_attack(b, Bitboard::EMPTY, directions);
                    line[a.index()][b.index()] = (from_a & from_b) | a | b;
                    between[a.index()][b.index()] =
                        sliding_attack(a, b.bb(), directions) & sliding_attack(b, a.bb(), directions);
                }
            }
        }

        Self {
            knight,
            king,
            pawn,
            bishop,
            rook,
            sliding,
            between,
            line,
        }
    }
}

fn step_attacks(sq: Square, deltas: &[(i8, i8)]) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .fold(Bitboard::EMPTY, |bb, to| bb | to)
}

/// Ray-traced slider attacks. Each ray stops at, and includes, the first blocker.
fn sliding_attack(sq: Square, occupied: Bitboard, directions: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(df, dr) in directions {
        let mut current = sq;
        while let Some(next) = current.offset(df, dr) {
            attacks |= next;
            if occupied.contains(next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

fn init_magics(
    table: &mut [Bitboard],
    init: &[(u64, usize); 64],
    directions: &[(i8, i8); 4],
    shift: u32,
) -> [Magic; 64] {
    let mut magics = [Magic {
        mask: Bitboard::EMPTY,
        magic: 0,
        offset: 0,
    }; 64];

    for sq in Square::all() {
        // Edges only matter when the slider stands on them.
        let edges = ((Bitboard::RANK_1 | Bitboard::RANK_8) & !Bitboard::rank(sq.rank()))
            | ((Bitboard::FILE_A | Bitboard::FILE_H) & !Bitboard::file(sq.file()));
        let (magic, offset) = init[sq.index()];
        let entry = Magic {
            mask: sliding_attack(sq, Bitboard::EMPTY, directions) & !edges,
            magic,
            offset,
        };

        // Carry-Rippler walk over every subset of the mask, empty and full included.
        let mut subset = Bitboard::EMPTY;
        loop {
            table[entry.index(subset, shift)] = sliding_attack(sq, subset, directions);
            subset = Bitboard(subset.0.wrapping_sub(entry.mask.0)) & entry.mask;
            if subset.is_empty() {
                break;
            }
        }

        magics[sq.index()] = entry;
    }

    magics
}

/// Forces table construction. Calling it is optional; the first lookup builds them too.
pub fn init() {
    Lazy::force(&TABLES);
}

#[inline(always)]
pub fn knight_attacks(sq: Square) -> Bitboard {
    TABLES.knight[sq.index()]
}

#[inline(always)]
pub fn king_attacks(sq: Square) -> Bitboard {
    TABLES.king[sq.index()]
}

#[inline(always)]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    TABLES.pawn[color.index()][sq.index()]
}

#[inline(always)]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let tables = &*TABLES;
    tables.sliding[tables.bishop[sq.index()].index(occupied, BISHOP_SHIFT)]
}

#[inline(always)]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let tables = &*TABLES;
    tables.sliding[tables.rook[sq.index()].index(occupied, ROOK_SHIFT)]
}

#[inline(always)]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Squares attacked by `piece` of `color` standing on `sq`.
#[inline(always)]
pub fn piece_attacks(piece: Piece, color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
    match piece {
        Piece::Pawn => pawn_attacks(color, sq),
        Piece::Knight => knight_attacks(sq),
        Piece::Bishop => bishop_attacks(sq, occupied),
        Piece::Rook => rook_attacks(sq, occupied),
        Piece::Queen => queen_attacks(sq, occupied),
        Piece::King => king_attacks(sq),
    }
}

/// Squares strictly between two aligned squares; empty when they share no line.
#[inline(always)]
pub fn between(a: Square, b: Square) -> Bitboard {
    TABLES.between[a.index()][b.index()]
}

/// The full edge-to-edge line through two aligned squares; empty when they share no line.
#[inline(always)]
pub fn line(a: Square, b: Square) -> Bitboard {
    TABLES.line[a.index()][b.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_every_subset(directions: &[(i8, i8); 4], lookup: fn(Square, Bitboard) -> Bitboard) {
        for sq in Square::all() {
            let edges = ((Bitboard::RANK_1 | Bitboard::RANK_8) & !Bitboard::rank(sq.rank()))
                | ((Bitboard::FILE_A | Bitboard::FILE_H) & !Bitboard::file(sq.file()));
            let mask = sliding_attack(sq, Bitboard::EMPTY, directions) & !edges;

            let mut subset = Bitboard::EMPTY;
            loop {
                // Pieces outside the mask must not change the answer.
                let noisy = subset | edges;
                assert_eq!(
                    lookup(sq, noisy),
                    sliding_attack(sq, noisy, directions),
                    "wrong attacks from {sq} with blockers {noisy:?}"
                );
                subset = Bitboard(subset.0.wrapping_sub(mask.0)) & mask;
                if subset.is_empty() {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_bishop_magics_cover_every_subset() {
        check_every_subset(&BISHOP_DIRECTIONS, bishop_attacks);
    }

    #[test]
    fn test_rook_magics_cover_every_subset() {
        check_every_subset(&ROOK_DIRECTIONS, rook_attacks);
    }

    #[test]
    fn test_leaper_attacks() {
        assert_eq!(knight_attacks(Square::A1).count(), 2);
        assert_eq!(knight_attacks(Square::D4).count(), 8);
        assert_eq!(king_attacks(Square::H8).count(), 3);
        assert_eq!(
            pawn_attacks(Color::White, Square::E4),
            Square::D5.bb() | Square::F5.bb()
        );
        assert_eq!(pawn_attacks(Color::Black, Square::A7), Square::B6.bb());
    }

    #[test]
    fn test_sliders_stop_at_first_blocker() {
        let occupied = Square::D6.bb() | Square::F4.bb();
        let attacks = rook_attacks(Square::D4, occupied);
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
        assert!(attacks.contains(Square::F4));
        assert!(!attacks.contains(Square::G4));
        assert!(attacks.contains(Square::A4));
        assert_eq!(attacks.count(), 10);
    }

    #[test]
    fn test_between_and_line() {
        assert_eq!(between(Square::A1, Square::D4), Square::B2.bb() | Square::C3.bb());
        assert_eq!(between(Square::A1, Square::B3), Bitboard::EMPTY);
        assert_eq!(between(Square::E1, Square::E2), Bitboard::EMPTY);
        assert_eq!(line(Square::B2, Square::C3).count(), 8);
        assert!(line(Square::E1, Square::E4).contains(Square::E8));
        assert_eq!(line(Square::A1, Square::B3), Bitboard::EMPTY);
    }
}
