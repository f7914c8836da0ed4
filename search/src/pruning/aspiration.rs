use evaluation::scores::{NEG_INFINITY, POS_INFINITY};

#[derive(PartialEq, Debug)]
pub enum Pass {
    Hit(i16),
    FailLow,
    FailHigh,
}

/// Manages aspiration window bounds across search iterations.
/// Starts with a narrow window around the previous score. Each failure
/// multiplies the failing side's width by `widen`; after `retries` failures
/// the window is fully open.
///
/// <https://www.chessprogramming.org/Aspiration_Windows>
#[derive(Copy, Clone, Debug)]
pub struct AspirationWindow {
    alpha: i16,
    beta: i16,
    start_half: i16,
    low_half: i16,
    high_half: i16,
    widen: i16,
    retries: usize,
    failures: usize,
}

impl AspirationWindow {
    pub fn new(start_half: i16, widen: i16, retries: usize) -> Self {
        Self {
            alpha: NEG_INFINITY,
            beta: POS_INFINITY,
            start_half,
            low_half: start_half,
            high_half: start_half,
            widen,
            retries,
            failures: 0,
        }
    }

    /// Full window, used before any score is known.
    pub fn open(&mut self) {
        self.failures = 0;
        self.fully_extend();
    }

    /// Sets up the window for a new depth around the previous score.
    pub fn begin_depth(&mut self, prev_score: i16) {
        self.failures = 0;
        self.low_half = self.start_half;
        self.high_half = self.start_half;
        self.alpha = prev_score.saturating_sub(self.low_half).max(NEG_INFINITY);
        self.beta = prev_score.saturating_add(self.high_half).min(POS_INFINITY);
    }

    pub fn bounds(&self) -> (i16, i16) {
        (self.alpha, self.beta)
    }

    pub fn is_full(&self) -> bool {
        self.alpha == NEG_INFINITY && self.beta == POS_INFINITY
    }

    /// Checks score against bounds; widens window on failure.
    pub fn analyse_pass(&mut self, score: i16) -> Pass {
        if score > self.alpha && score < self.beta {
            return Pass::Hit(score);
        }
        if self.is_full() {
            return Pass::Hit(score);
        }

        self.failures += 1;
        let pass = if score <= self.alpha {
            // fail-low, only the low side moves
            self.low_half = self.low_half.saturating_mul(self.widen);
            self.alpha = score.saturating_sub(self.low_half).max(NEG_INFINITY);
            Pass::FailLow
        } else {
            self.high_half = self.high_half.saturating_mul(self.widen);
            self.beta = score.saturating_add(self.high_half).min(POS_INFINITY);
            Pass::FailHigh
        };

        if self.failures >= self.retries {
            self.fully_extend();
        }
        pass
    }

    /// Fully opens the window after too many failures.
    pub fn fully_extend(&mut self) {
        self.alpha = NEG_INFINITY;
        self.beta = POS_INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_widens_on_failure() {
        let mut window = AspirationWindow::new(35, 2, 4);
        window.begin_depth(100);
        assert_eq!(window.bounds(), (65, 135));

        assert_eq!(window.analyse_pass(80), Pass::Hit(80));
        assert_eq!(window.analyse_pass(50), Pass::FailLow);
        assert_eq!(window.bounds(), (-20, 135));

        assert_eq!(window.analyse_pass(200), Pass::FailHigh);
        assert_eq!(window.bounds(), (-20, 270));
    }

    #[test]
    fn test_window_opens_after_retries() {
        let mut window = AspirationWindow::new(35, 2, 2);
        window.begin_depth(0);
        assert_eq!(window.analyse_pass(-35), Pass::FailLow);
        assert_eq!(window.analyse_pass(-200), Pass::FailLow);
        assert!(window.is_full());
        assert_eq!(window.analyse_pass(-5000), Pass::Hit(-5000));
    }
}
