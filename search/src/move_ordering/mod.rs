mod main;
mod quiescence;
mod utils;

pub use main::MainMoveGenerator;
pub use quiescence::QMoveGenerator;
