const SLOTS: usize = 256;

#[derive(Clone, Copy, Default)]
struct Slot {
    tag: u64,
    count: u8,
}

/// Direct-mapped count of how often each position occurred in the game.
/// A slot holds one hash; a colliding position takes the slot over, which
/// can only undercount.
pub struct RepetitionTable {
    slots: [Slot; SLOTS],
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self {
            slots: [Slot::default(); SLOTS],
        }
    }

    #[inline(always)]
    fn index(hash: u64) -> usize {
        (hash as usize) & (SLOTS - 1)
    }

    /// Records one more occurrence and returns the new count.
    pub fn record(&mut self, hash: u64) -> u8 {
        let slot = &mut self.slots[Self::index(hash)];
        if slot.tag == hash && slot.count > 0 {
            slot.count = slot.count.saturating_add(1);
        } else {
            *slot = Slot { tag: hash, count: 1 };
        }
        slot.count
    }

    pub fn count(&self, hash: u64) -> u8 {
        let slot = &self.slots[Self::index(hash)];
        if slot.tag == hash {
            slot.count
        } else {
            0
        }
    }
}

impl Default for RepetitionTable {
    fn default() -> Self {
        Self::new()
    }
}
