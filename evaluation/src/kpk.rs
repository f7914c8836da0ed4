//! King and pawn versus king bitbase.
//!
//! Built once by retrograde classification and probed with the strong side
//! normalized to White and the pawn on files a-d.
//!
//! <https://www.chessprogramming.org/KPK>

use board::attacks::{king_attacks, pawn_attacks};
use board::{Color, Square};
use once_cell::sync::Lazy;

// 24 pawn squares (files a-d, ranks 2-7) x 2 sides x 64 x 64 king squares
const MAX_INDEX: usize = 2 * 24 * 64 * 64;

const INVALID: u8 = 0;
const UNKNOWN: u8 = 1;
const DRAW: u8 = 2;
const WIN: u8 = 4;

static KPK_BITBASE: Lazy<Vec<u32>> = Lazy::new(generate);

// bit  0- 5: white king square
// bit  6-11: black king square
// bit    12: side to move
// bit 13-14: pawn file (a-d)
// bit 15-17: 6 - pawn rank
#[inline(always)]
fn index(stm: Color, black_king: Square, white_king: Square, pawn: Square) -> usize {
    white_king.index()
        | (black_king.index() << 6)
        | (stm.index() << 12)
        | ((pawn.file() as usize) << 13)
        | ((6 - pawn.rank() as usize) << 15)
}

struct KpkPosition {
    stm: Color,
    kings: [Square; 2],
    pawn: Square,
    result: u8,
}

impl KpkPosition {
    fn new(idx: usize) -> Self {
        let white_king = Square::new((idx & 0x3f) as u8);
        let black_king = Square::new(((idx >> 6) & 0x3f) as u8);
        let stm = if (idx >> 12) & 1 == 0 {
            Color::White
        } else {
            Color::Black
        };
        let pawn = Square::from_coords(((idx >> 13) & 3) as u8, 6 - ((idx >> 15) & 7) as u8);
        let push = pawn.shift(8);

        let result = if Square::distance(white_king, black_king) <= 1
            || white_king == pawn
            || black_king == pawn
            || (stm == Color::White && pawn_attacks(Color::White, pawn).contains(black_king))
        {
            INVALID
        } else if stm == Color::White
            && pawn.rank() == 6
            && white_king != push
            && (Square::distance(black_king, push) > 1 || king_attacks(white_king).contains(push))
        {
            WIN
        } else if stm == Color::Black
            && ((king_attacks(black_king) & !(king_attacks(white_king) | pawn_attacks(Color::White, pawn)))
                .is_empty()
                || (king_attacks(black_king) & !king_attacks(white_king)).contains(pawn))
        {
            DRAW
        } else {
            UNKNOWN
        };

        Self {
            stm,
            kings: [white_king, black_king],
            pawn,
            result,
        }
    }

    // White to move: one winning move makes a win, all drawing moves make a draw.
    // Black to move: one drawing move makes a draw, all losing moves make a win.
    fn classify(&self, db: &[KpkPosition]) -> u8 {
        let us = self.stm;
        let them = !us;
        let (good, bad) = if us == Color::White {
            (WIN, DRAW)
        } else {
            (DRAW, WIN)
        };
        let [white_king, black_king] = self.kings;

        let mut r = INVALID;
        for to in king_attacks(self.kings[us.index()]) {
            r |= match us {
                Color::White => db[index(them, black_king, to, self.pawn)].result,
                Color::Black => db[index(them, to, white_king, self.pawn)].result,
            };
        }

        if us == Color::White {
            let push = self.pawn.shift(8);
            if self.pawn.rank() < 6 {
                r |= db[index(them, black_king, white_king, push)].result;
            }
            if self.pawn.rank() == 1 && push != white_king && push != black_king {
                r |= db[index(them, black_king, white_king, push.shift(8))].result;
            }
        }

        if r & good != 0 {
            good
        } else if r & UNKNOWN != 0 {
            UNKNOWN
        } else {
            bad
        }
    }
}

fn generate() -> Vec<u32> {
    let mut db: Vec<KpkPosition> = (0..MAX_INDEX).map(KpkPosition::new).collect();

    let mut changed = true;
    while changed {
        changed = false;
        for idx in 0..MAX_INDEX {
            if db[idx].result == UNKNOWN {
                let result = db[idx].classify(&db);
                if result != UNKNOWN {
                    db[idx].result = result;
                    changed = true;
                }
            }
        }
    }

    let mut bits = vec![0u32; MAX_INDEX / 32];
    for (idx, position) in db.iter().enumerate() {
        if position.result == WIN {
            bits[idx / 32] |= 1 << (idx % 32);
        }
    }
    bits
}

/// Builds the bitbase now instead of on first probe.
pub fn init() {
    Lazy::force(&KPK_BITBASE);
}

/// True when the side owning the pawn wins with best play.
pub fn probe(strong_side: Color, strong_king: Square, pawn: Square, weak_king: Square, stm: Color) -> bool {
    let normalize = |sq: Square| {
        let sq = if strong_side == Color::Black { sq.flip() } else { sq };
        if pawn.file() >= 4 {
            sq.mirror_file()
        } else {
            sq
        }
    };
    let stm = if strong_side == Color::White { stm } else { !stm };
    let idx = index(stm, normalize(weak_king), normalize(strong_king), normalize(pawn));
    KPK_BITBASE[idx / 32] & (1 << (idx % 32)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpk_known_results() {
        // King in front of its pawn with the opposition wins.
        assert!(probe(Color::White, Square::E6, Square::E5, Square::E8, Color::Black));
        // Defending king wins the pawn before the attacker arrives.
        assert!(!probe(Color::White, Square::A1, Square::E4, Square::E5, Color::White));
        // Rook pawn with the defender in the corner is a draw.
        assert!(!probe(Color::White, Square::G6, Square::H6, Square::H8, Color::White));
        // Unstoppable pawn.
        assert!(probe(Color::White, Square::A1, Square::H6, Square::A8, Color::White));
    }

    #[test]
    fn test_kpk_color_symmetry() {
        assert!(probe(Color::Black, Square::E3, Square::E4, Square::E1, Color::White));
        assert!(!probe(Color::Black, Square::H8, Square::E5, Square::E4, Color::Black));
        assert!(probe(Color::Black, Square::H8, Square::A3, Square::H1, Color::Black));
    }
}
