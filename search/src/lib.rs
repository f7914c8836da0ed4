mod book;
mod config;
pub mod engine;
mod extensions;
mod game;
mod history;
mod move_ordering;
mod pruning;
mod repetition;
mod stack;
mod time_control;
mod transposition;
mod utils;

/// Maximum search depth supported by the engine.
pub const MAX_DEPTH: usize = 100;

pub use book::{Book, MemoryBook, MAX_BOOK_MOVES};
pub use config::{ConfigParam, EngineConfig};
pub use engine::{Engine, SearchFlags, SearchResult, SearchStats};
pub use game::{DrawReason, Game, GameError, GameStatus, FIFTY_MOVE_LIMIT, REPETITION_LIMIT};
pub use repetition::RepetitionTable;
pub use time_control::{ClockTimer, TimeBudget, Timer};
pub use transposition::{Bound, ProbeResult, TTMove, TranspositionTable};
pub use utils::format_score;
pub use utils::see::see;
