use board::{Color, MoveSet};
use evaluation::HCE;

use super::Engine;

impl Engine {
    /// Static score of the current position for the side to move.
    #[inline(always)]
    pub(super) fn eval(&mut self, moves: &MoveSet) -> i16 {
        let score = self.evaluator.evaluate(&self.position, moves);
        match self.position.side_to_move() {
            Color::White => score,
            Color::Black => -score,
        }
    }
}
