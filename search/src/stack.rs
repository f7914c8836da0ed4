/// Hashes of the positions on the current line, seeded with the game history
/// so repetitions of positions played before the root are seen too.
pub struct SearchStack {
    hashes: Vec<u64>,
}

impl SearchStack {
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hashes: Vec::with_capacity(capacity),
        }
    }

    /// Resets the stack to the game history, whose last entry is the root.
    pub fn seed(&mut self, history: &[u64]) {
        self.hashes.clear();
        self.hashes.extend_from_slice(history);
    }

    #[inline(always)]
    pub fn push(&mut self, hash: u64) {
        self.hashes.push(hash);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<u64> {
        self.hashes.pop()
    }

    #[inline(always)]
    pub fn current(&self) -> Option<u64> {
        self.hashes.last().copied()
    }

    /// True when the current position occurred before with the same side to
    /// move and no irreversible move since, i.e. within the last
    /// `halfmove_clock` plies.
    #[inline(always)]
    pub fn is_repetition(&self, halfmove_clock: u16) -> bool {
        let Some(current) = self.current() else {
            return false;
        };

        let window = (halfmove_clock as usize).min(self.hashes.len() - 1);
        let earlier = &self.hashes[self.hashes.len() - 1 - window..self.hashes.len() - 1];
        earlier.iter().rev().skip(1).step_by(2).any(|&hash| hash == current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repetition_within_clock() {
        let mut stack = SearchStack::with_capacity(16);
        stack.seed(&[1, 2, 3, 4]);
        stack.push(3);
        assert!(stack.is_repetition(10));
        // An irreversible move since then hides the earlier occurrence
        assert!(!stack.is_repetition(1));
        stack.pop();

        // Same hash with the other side to move is not a repetition
        stack.push(4);
        assert!(!stack.is_repetition(10));
        stack.pop();

        stack.push(9);
        assert!(!stack.is_repetition(10));
        assert_eq!(stack.pop(), Some(9));
        assert_eq!(stack.current(), Some(4));
    }
}
