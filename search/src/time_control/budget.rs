// Moves assumed to remain when the clock gives no moves-to-go
const DEFAULT_MOVES_LEFT: u64 = 25;
// Hard ceiling as a share of the remaining time without moves-to-go
const DEFAULT_MAX_DIVISOR: u64 = 12;
// Growth of the soft limit when the best move changes, in percent
const INSTABILITY_GROWTH: u64 = 121;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBudget {
    /// Never expires; only a stop request ends the search
    Infinite,
    /// Spend exactly this amount (fixed move time)
    Exact { millis: u64 },
    /// Soft target that may grow while the best move is unstable, capped by `max`
    Managed { allotted: u64, max: u64 },
}

impl TimeBudget {
    /// Budget for one move from the remaining clock time.
    pub fn from_clock(time_left: u64, moves_to_go: Option<u64>) -> Self {
        match moves_to_go.filter(|&m| m > 0) {
            Some(moves) => Self::Managed {
                allotted: time_left / moves,
                max: (2 * time_left / moves).min(time_left / moves.min(2)),
            },
            None => Self::Managed {
                allotted: time_left / DEFAULT_MOVES_LEFT,
                max: time_left / DEFAULT_MAX_DIVISOR,
            },
        }
    }

    pub fn move_time(millis: u64) -> Self {
        Self::Exact { millis }
    }

    /// Limit checked between iterations.
    pub fn allotted(&self) -> Option<u64> {
        match *self {
            TimeBudget::Infinite => None,
            TimeBudget::Exact { millis } => Some(millis),
            TimeBudget::Managed { allotted, .. } => Some(allotted),
        }
    }

    /// Limit checked inside the tree.
    pub fn max(&self) -> Option<u64> {
        match *self {
            TimeBudget::Infinite => None,
            TimeBudget::Exact { millis } => Some(millis),
            TimeBudget::Managed { max, .. } => Some(max),
        }
    }

    /// Gives an unstable search more time, never past the ceiling.
    pub fn advise(&mut self, best_move_changed: bool) {
        if let TimeBudget::Managed { allotted, max } = self {
            if best_move_changed {
                *allotted = (*allotted * INSTABILITY_GROWTH / 100).min(*max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_clock() {
        assert_eq!(
            TimeBudget::from_clock(60_000, None),
            TimeBudget::Managed { allotted: 2_400, max: 5_000 }
        );
        assert_eq!(
            TimeBudget::from_clock(60_000, Some(10)),
            TimeBudget::Managed { allotted: 6_000, max: 12_000 }
        );
        // One move left: the whole clock is available
        assert_eq!(
            TimeBudget::from_clock(10_000, Some(1)),
            TimeBudget::Managed { allotted: 10_000, max: 10_000 }
        );
    }

    #[test]
    fn test_advise_grows_to_ceiling() {
        let mut budget = TimeBudget::Managed { allotted: 1_000, max: 1_300 };
        budget.advise(false);
        assert_eq!(budget.allotted(), Some(1_000));
        budget.advise(true);
        assert_eq!(budget.allotted(), Some(1_210));
        budget.advise(true);
        assert_eq!(budget.allotted(), Some(1_300));

        let mut exact = TimeBudget::move_time(500);
        exact.advise(true);
        assert_eq!(exact.allotted(), Some(500));
        assert_eq!(TimeBudget::Infinite.max(), None);
    }
}
