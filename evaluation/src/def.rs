use board::{MoveSet, Position};

/// Hand-Crafted Evaluation interface.
pub trait HCE: Send {
    fn name(&self) -> String;
    /// Evaluate position from White's perspective. Positive = White advantage.
    ///
    /// `moves` must come from `position` (all legal moves or the capture
    /// subset); its attack maps are reused.
    fn evaluate(&mut self, position: &Position, moves: &MoveSet) -> i16;
}
