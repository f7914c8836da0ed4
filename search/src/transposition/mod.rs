mod main;

pub use main::{Bound, ProbeResult, TTMove, TranspositionTable};
