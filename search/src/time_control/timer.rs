use std::time::{Duration, Instant};

use super::budget::TimeBudget;

/// Clock consulted by the search. Iterations start only while
/// `should_continue` holds; the node poll aborts once the deadline passes.
pub trait Timer {
    fn start(&mut self);
    fn should_continue(&self) -> bool;
    fn advise(&mut self, best_move_changed: bool);
    /// Hard limit for the search in progress, `None` when unbounded.
    fn deadline(&self) -> Option<Instant>;
    fn elapsed(&self) -> Duration;

    fn out_of_time(&self) -> bool {
        self.deadline().is_some_and(|deadline| Instant::now() >= deadline)
    }
}

pub struct ClockTimer {
    budget: TimeBudget,
    started: Instant,
}

impl ClockTimer {
    pub fn new(budget: TimeBudget) -> Self {
        Self {
            budget,
            started: Instant::now(),
        }
    }

    pub fn budget(&self) -> TimeBudget {
        self.budget
    }
}

impl Timer for ClockTimer {
    fn start(&mut self) {
        self.started = Instant::now();
    }

    fn should_continue(&self) -> bool {
        self.budget
            .allotted()
            .map_or(true, |allotted| self.elapsed() < Duration::from_millis(allotted))
    }

    fn advise(&mut self, best_move_changed: bool) {
        self.budget.advise(best_move_changed);
    }

    fn deadline(&self) -> Option<Instant> {
        self.budget
            .max()
            .map(|max| self.started + Duration::from_millis(max))
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_timer_limits() {
        let mut infinite = ClockTimer::new(TimeBudget::Infinite);
        infinite.start();
        assert!(infinite.should_continue());
        assert!(!infinite.out_of_time());
        assert_eq!(infinite.deadline(), None);

        let mut expired = ClockTimer::new(TimeBudget::move_time(0));
        expired.start();
        assert!(!expired.should_continue());
        assert!(expired.out_of_time());

        let mut managed = ClockTimer::new(TimeBudget::from_clock(60_000, None));
        managed.start();
        assert!(managed.should_continue());
        assert!(!managed.out_of_time());
    }
}
