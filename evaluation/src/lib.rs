pub mod def;
pub mod hce;
pub mod kpk;
pub mod piece_values;
pub mod scores;

pub use def::HCE;
pub use hce::{EvalStats, Evaluator, HCEConfig};
pub use piece_values::PieceValues;
