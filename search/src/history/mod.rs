mod history_heuristic;
mod killers;
mod utils;

pub use history_heuristic::HistoryHeuristic;
pub use killers::KillerTable;
