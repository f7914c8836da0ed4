use board::{Color, Move};

use super::utils::apply_gravity;
use crate::EngineConfig;

const HISTORY_SIZE: usize = 2 * 64 * 64;

/// Quiet move scores indexed by [side][from][to], raised by depth² whenever
/// the move causes a beta cutoff.
///
/// <https://www.chessprogramming.org/History_Heuristic>
#[derive(Clone)]
pub struct HistoryHeuristic {
    history: Vec<i32>,
    max_history: i32,
}

impl HistoryHeuristic {
    pub fn new(max_history: i32) -> Self {
        Self {
            history: vec![0; HISTORY_SIZE],
            max_history: max_history.max(1),
        }
    }

    pub fn configure(&mut self, config: &EngineConfig) {
        self.max_history = config.history_max_value.value.max(1);
        self.reset();
    }

    pub fn matches_config(&self, config: &EngineConfig) -> bool {
        self.max_history == config.history_max_value.value
    }

    #[inline(always)]
    pub fn reset(&mut self) {
        self.history.fill(0);
    }

    /// Halves every entry so older searches weigh less than the current one.
    pub fn age(&mut self) {
        for entry in self.history.iter_mut() {
            *entry /= 2;
        }
    }

    #[inline(always)]
    pub fn get(&self, color: Color, mv: &Move) -> i32 {
        self.history[Self::index(color, mv)]
    }

    #[inline(always)]
    pub fn get_bonus(remaining_depth: u8) -> i32 {
        let depth = remaining_depth as i32;
        depth * depth
    }

    #[inline(always)]
    pub fn update(&mut self, color: Color, mv: &Move, remaining_depth: u8) {
        let idx = Self::index(color, mv);
        let bonus = Self::get_bonus(remaining_depth);
        apply_gravity(&mut self.history[idx], bonus, self.max_history);
    }

    #[inline(always)]
    fn index(color: Color, mv: &Move) -> usize {
        color.index() * 64 * 64 + mv.from.index() * 64 + mv.to.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::{parse_move, Position};

    #[test]
    fn test_cutoffs_accumulate_by_depth_squared() {
        let position = Position::default();
        let e4 = parse_move(&position, "e2e4").unwrap();
        let d4 = parse_move(&position, "d2d4").unwrap();

        let mut history = HistoryHeuristic::new(1 << 14);
        history.update(Color::White, &e4, 3);
        history.update(Color::White, &e4, 2);

        assert!(history.get(Color::White, &e4) > history.get(Color::White, &d4));
        assert_eq!(history.get(Color::Black, &e4), 0);

        history.age();
        assert!(history.get(Color::White, &e4) > 0);
        history.reset();
        assert_eq!(history.get(Color::White, &e4), 0);
    }
}
