#[derive(Debug, Clone, Copy)]
struct Entry {
    key: u64,
    score: i16,
}

/// Direct-mapped memo of blended static scores, keyed by the full position hash.
pub struct EvalCache {
    entries: Vec<Option<Entry>>,
    mask: usize,
}

impl EvalCache {
    /// `size` is rounded up to a power of two.
    pub fn new(size: usize) -> Self {
        let size = size.max(1).next_power_of_two();
        Self {
            entries: vec![None; size],
            mask: size - 1,
        }
    }

    #[inline(always)]
    pub fn probe(&self, key: u64) -> Option<i16> {
        match self.entries[key as usize & self.mask] {
            Some(entry) if entry.key == key => Some(entry.score),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn store(&mut self, key: u64, score: i16) {
        self.entries[key as usize & self.mask] = Some(Entry { key, score });
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_requires_full_key() {
        let mut cache = EvalCache::new(1000);
        assert_eq!(cache.len(), 1024);

        cache.store(0xdead_beef, 42);
        assert_eq!(cache.probe(0xdead_beef), Some(42));
        assert_eq!(cache.probe(0xdead_beef + 1024), None);

        cache.store(0xdead_beef + 1024, -7);
        assert_eq!(cache.probe(0xdead_beef), None);
        assert_eq!(cache.probe(0xdead_beef + 1024), Some(-7));
    }
}
