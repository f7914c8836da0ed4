//! Zobrist hashing keys.
//!
//! <https://www.chessprogramming.org/Zobrist_Hashing>

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{CastleRights, Color, Piece, Square};

const SEED: u64 = 0x6b65_7374_7265_6c21;

pub struct ZobristKeys {
    pieces: [[[u64; 64]; 6]; 2],
    side: u64,
    castling: [u64; 4],
    en_passant: [u64; 8],
}

pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(SEED);

    let mut pieces = [[[0u64; 64]; 6]; 2];
    for color in pieces.iter_mut() {
        for piece in color.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }
    }

    ZobristKeys {
        pieces,
        side: rng.gen(),
        castling: [rng.gen(), rng.gen(), rng.gen(), rng.gen()],
        en_passant: [
            rng.gen(),
            rng.gen(),
            rng.gen(),
            rng.gen(),
            rng.gen(),
            rng.gen(),
            rng.gen(),
            rng.gen(),
        ],
    }
});

impl ZobristKeys {
    #[inline(always)]
    pub fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.pieces[color.index()][piece.index()][sq.index()]
    }

    #[inline(always)]
    pub fn side(&self) -> u64 {
        self.side
    }

    /// XOR of the key of every right present in `rights`.
    #[inline(always)]
    pub fn castling(&self, rights: CastleRights) -> u64 {
        let bits = rights.bits();
        (0..4)
            .filter(|i| bits & (1 << i) != 0)
            .fold(0, |key, i| key ^ self.castling[i])
    }

    #[inline(always)]
    pub fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant[sq.file() as usize]
    }
}
