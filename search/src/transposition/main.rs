use std::mem::size_of;

use board::{Move, MoveSet, Piece, Position, Square};
use evaluation::scores::is_mate_score;

/// Indicates whether the stored value is exact, a bound, or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    /// True minimax value (alpha < value < beta)
    #[default]
    Exact,
    /// Value >= beta (beta cutoff)
    Lower,
    /// Value <= alpha (all moves failed)
    Upper,
    /// Only the move is usable, for ordering
    MoveOnly,
}

/// From, to and promotion of a stored move. Enough to rebuild the full move
/// against the position it was stored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl TTMove {
    /// Rebuilds the move in `position`, rejecting anything that is not in `moves`.
    pub fn resolve(&self, position: &Position, moves: &MoveSet) -> Option<Move> {
        let mv = position.decode_move(self.from, self.to, self.promotion)?;
        if position.is_pseudo_legal(&mv) && moves.contains(&mv) {
            Some(mv)
        } else {
            None
        }
    }
}

impl From<Move> for TTMove {
    fn from(mv: Move) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

/// Result from probing the transposition table.
/// Caller should check `depth` to decide if `value`/`bound` are trustworthy for cutoffs.
#[derive(Debug, Clone, Copy)]
pub struct ProbeResult {
    /// Score from searching this position (mate-adjusted for the probing ply)
    pub value: i16,
    pub bound: Bound,
    pub best_move: Option<TTMove>,
    /// Remaining depth of the search that produced this result
    pub depth: u8,
}

#[derive(Debug, Clone, Copy)]
struct TTEntry {
    /// High 32 bits of the Zobrist hash for verification
    signature: u32,
    /// Best move, packed as: [14:12]=promo, [11:6]=to, [5:0]=from
    best_move_packed: u16,
    value: i16,
    bound: Bound,
    depth: u8,
    /// Distance from the search root the entry was written at
    ply: u16,
}

const BUCKET_SIZE: usize = 2;
const MIN_BUCKETS: usize = 1024;

type Bucket = [Option<TTEntry>; BUCKET_SIZE];

/// Hash table for memoizing search results.
/// Two-way buckets indexed by the low bits of the hash. A signature match in
/// either slot is overwritten, otherwise the shallower entry is evicted.
///
/// <https://www.chessprogramming.org/Transposition_Table>
pub struct TranspositionTable {
    buckets: Vec<Bucket>,
    mask: usize,
}

impl TranspositionTable {
    /// Creates a new TT with the given size in megabytes.
    pub fn new(mb: usize) -> Self {
        let bytes = mb.saturating_mul(1024 * 1024);
        let bucket_size = size_of::<Bucket>().max(1);
        let buckets = (bytes / bucket_size).max(MIN_BUCKETS);
        // Round down so the index is a mask of the low hash bits
        let buckets = if buckets.is_power_of_two() {
            buckets
        } else {
            buckets.next_power_of_two() / 2
        };

        Self {
            buckets: vec![[None; BUCKET_SIZE]; buckets],
            mask: buckets - 1,
        }
    }

    pub fn clear(&mut self) {
        self.buckets.fill([None; BUCKET_SIZE]);
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    /// Returns hash table fill rate in permille (0-1000).
    ///
    /// Samples the first 500 buckets to get an approximation of the fill rate.
    pub fn hashfull(&self) -> u16 {
        const MAX_SAMPLE: usize = 500;

        let sample = &self.buckets[..self.buckets.len().min(MAX_SAMPLE)];
        let filled = sample
            .iter()
            .flat_map(|bucket| bucket.iter())
            .filter(|slot| slot.is_some())
            .count();

        ((filled * 1000) / (sample.len() * BUCKET_SIZE)) as u16
    }

    #[inline(always)]
    fn split(&self, hash: u64) -> (usize, u32) {
        (hash as usize & self.mask, (hash >> 32) as u32)
    }

    /// Looks up `hash`. Mate scores are re-biased from the storing ply to `ply`.
    pub fn probe(&self, hash: u64, ply: u16) -> Option<ProbeResult> {
        let (index, signature) = self.split(hash);
        let entry = self.buckets[index]
            .iter()
            .flatten()
            .find(|entry| entry.signature == signature)?;

        Some(ProbeResult {
            value: rebias(entry.value, entry.ply, ply),
            bound: entry.bound,
            best_move: unpack_move(entry.best_move_packed),
            depth: entry.depth,
        })
    }

    /// Stores a search result for `hash`, written `ply` plies below the root.
    pub fn store(
        &mut self,
        hash: u64,
        ply: u16,
        depth: u8,
        value: i16,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        let (index, signature) = self.split(hash);
        let bucket = &mut self.buckets[index];

        let slot = match bucket
            .iter()
            .position(|slot| slot.is_some_and(|e| e.signature == signature))
        {
            Some(i) => i,
            None => match (bucket[0], bucket[1]) {
                (None, _) => 0,
                (_, None) => 1,
                (Some(a), Some(b)) => usize::from(b.depth < a.depth),
            },
        };

        let mut packed = pack_move(best_move.map(TTMove::from));
        if packed == 0 {
            // Keep the previous move of the same position as an ordering hint
            if let Some(old) = bucket[slot].filter(|e| e.signature == signature) {
                packed = old.best_move_packed;
            }
        }

        bucket[slot] = Some(TTEntry {
            signature,
            best_move_packed: packed,
            value,
            bound,
            depth,
            ply,
        });
    }

    /// Records only a move hint for `hash`, leaving deeper results alone.
    pub fn store_move(&mut self, hash: u64, ply: u16, best_move: Move) {
        let (index, signature) = self.split(hash);
        if let Some(entry) = self.buckets[index]
            .iter_mut()
            .flatten()
            .find(|entry| entry.signature == signature)
        {
            entry.best_move_packed = pack_move(Some(TTMove::from(best_move)));
            return;
        }
        self.store(hash, ply, 0, 0, Bound::MoveOnly, Some(best_move));
    }
}

/// Moves a mate score stored `stored_ply` plies below a root to the same
/// mate as seen from a node `ply` plies below the current root.
#[inline(always)]
fn rebias(value: i16, stored_ply: u16, ply: u16) -> i16 {
    if !is_mate_score(value) {
        return value;
    }
    let shift = ply as i32 - stored_ply as i32;
    let adjusted = if value > 0 {
        value as i32 - shift
    } else {
        value as i32 + shift
    };
    adjusted.clamp(i16::MIN as i32 + 1, i16::MAX as i32) as i16
}

/// Packs a move into 16 bits: [14:12]=promo, [11:6]=to, [5:0]=from
fn pack_move(mv: Option<TTMove>) -> u16 {
    let Some(m) = mv else {
        return 0;
    };
    let promo = match m.promotion {
        Some(Piece::Knight) => 1u16,
        Some(Piece::Bishop) => 2u16,
        Some(Piece::Rook) => 3u16,
        Some(Piece::Queen) => 4u16,
        _ => 0u16,
    };
    (m.from.index() as u16 & 0x3F) | ((m.to.index() as u16 & 0x3F) << 6) | (promo << 12)
}

/// Unpacks a 16-bit encoded move.
fn unpack_move(code: u16) -> Option<TTMove> {
    if code == 0 {
        return None;
    }
    let from = Square::new((code & 0x3F) as u8);
    let to = Square::new(((code >> 6) & 0x3F) as u8);
    let promotion = match (code >> 12) & 0x07 {
        1 => Some(Piece::Knight),
        2 => Some(Piece::Bishop),
        3 => Some(Piece::Rook),
        4 => Some(Piece::Queen),
        _ => None,
    };
    Some(TTMove {
        from,
        to,
        promotion,
    })
}
