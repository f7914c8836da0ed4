use board::Bitboard;

const PAWN_CACHE_SIZE: usize = 8192;

/// Everything the evaluator needs from the pawn skeleton alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedPawnEvaluation {
    pub key: u64,
    /// White minus Black.
    pub mg: i32,
    pub eg: i32,
    pub passed: [Bitboard; 2],
    /// Squares the color's pawns can never attack.
    pub holes: [Bitboard; 2],
}

// Pawn structures change very little between moves, so a small direct-mapped
// table keyed by the pawn hash hits almost every time.
pub struct PawnCache {
    entries: Vec<Option<CachedPawnEvaluation>>,
}

impl PawnCache {
    pub fn new() -> Self {
        Self {
            entries: vec![None; PAWN_CACHE_SIZE],
        }
    }

    #[inline(always)]
    fn slot(key: u64) -> usize {
        key as usize & (PAWN_CACHE_SIZE - 1)
    }

    pub fn get(&self, key: u64) -> Option<CachedPawnEvaluation> {
        self.entries[Self::slot(key)].filter(|entry| entry.key == key)
    }

    pub fn set(&mut self, entry: CachedPawnEvaluation) {
        self.entries[Self::slot(entry.key)] = Some(entry);
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}

impl Default for PawnCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u64, mg: i32) -> CachedPawnEvaluation {
        CachedPawnEvaluation {
            key,
            mg,
            eg: 0,
            passed: [Bitboard::EMPTY; 2],
            holes: [Bitboard::FULL; 2],
        }
    }

    #[test]
    fn test_collision_is_a_miss() {
        let mut cache = PawnCache::new();
        cache.set(entry(5, 12));
        assert_eq!(cache.get(5).map(|e| e.mg), Some(12));

        // Same slot, different key
        let other = 5 + PAWN_CACHE_SIZE as u64;
        assert!(cache.get(other).is_none());
        cache.set(entry(other, -3));
        assert!(cache.get(5).is_none());

        cache.clear();
        assert!(cache.get(other).is_none());
    }
}
