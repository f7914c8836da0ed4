mod aspiration;
mod futility;
mod mate_distance;
mod null_move;
mod reductions;

pub use aspiration::{AspirationWindow, Pass};
pub use futility::{can_futility_prune, delta_prune, futility_margin};
pub use mate_distance::mate_distance_prune;
pub use null_move::{can_null_move_prune, null_move_reduction};
pub use reductions::lmr;
