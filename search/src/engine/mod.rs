use std::fmt;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Instant;

use board::{Move, Position};
use evaluation::{EvalStats, Evaluator, HCEConfig, PieceValues};
use log::debug;

use crate::{
    book::Book,
    history::{HistoryHeuristic, KillerTable},
    stack::SearchStack,
    transposition::TranspositionTable,
    EngineConfig,
};

mod eval;
mod extensions;
mod pruning;
mod quiescence;
mod search;

/// Options of a single `find_best_move` call.
#[derive(Debug, Clone, Copy)]
pub struct SearchFlags {
    /// Deepen iteratively until the clock runs out instead of stopping at
    /// the fixed depth
    pub dynamic_depth: bool,
    /// Play a book move when the position is in the book
    pub use_opening_book: bool,
}

impl Default for SearchFlags {
    fn default() -> Self {
        Self {
            dynamic_depth: true,
            use_opening_book: false,
        }
    }
}

/// Counters of one search. Purely observational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub qnodes: u64,
    pub beta_cutoffs: u64,
    pub tt_probes: u64,
    pub tt_hits: u64,
    pub eval_cache_hits: u64,
    pub pawn_cache_hits: u64,
    /// Deepest ply from the root reached by the main search
    pub seldepth: u8,
}

impl SearchStats {
    fn absorb_eval(&mut self, eval: EvalStats) {
        self.eval_cache_hits = eval.eval_cache_hits;
        self.pawn_cache_hits = eval.pawn_cache_hits;
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rate = |hits: u64, total: u64| {
            if total == 0 {
                0.0
            } else {
                hits as f64 * 100.0 / total as f64
            }
        };
        write!(
            f,
            "nodes {} qnodes {} cutoffs {} tt hits {:.1}% eval cache hits {} pawn cache hits {} seldepth {}",
            self.nodes,
            self.qnodes,
            self.beta_cutoffs,
            rate(self.tt_hits, self.tt_probes),
            self.eval_cache_hits,
            self.pawn_cache_hits,
            self.seldepth,
        )
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score for the side to move, mate scores counted in plies from the root
    pub score: i16,
    /// Deepest fully completed iteration, 0 for book moves
    pub depth: u8,
    pub pv: Vec<Move>,
    pub stats: SearchStats,
    pub from_book: bool,
}

pub struct Engine {
    /// Configuration for the engine
    config: EngineConfig,

    /// Signal to terminate search (time control or external stop)
    stop: Arc<AtomicBool>,
    /// Set once the current search must unwind
    aborted: bool,
    /// Hard limit of the running search, only enforced past the minimum depth
    deadline: Option<Instant>,
    /// Best root move of the iteration in progress
    partial_best: Option<Move>,

    piece_values: PieceValues,
    evaluator: Evaluator,
    book: Option<Box<dyn Book>>,

    /// Root position, mutated in place during the search
    position: Position,
    /// Depth of the iteration in progress
    iteration_depth: u8,
    /// Deepest a line may be extended to in this iteration
    extension_limit: u8,

    stats: SearchStats,
    /// Principal variation of the last completed iteration
    current_pv: Vec<Move>,

    /// Main transposition table
    tt: TranspositionTable,
    /// Hashes of the game and the current line, for repetition detection
    search_stack: SearchStack,
    /// Scores quiet moves by search success
    history_heuristic: HistoryHeuristic,
    /// Quiet cutoff moves and mate killers per ply
    killers: KillerTable,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        let piece_values = PieceValues::default();
        Self {
            config: config.clone(),
            stop: Arc::new(AtomicBool::new(false)),
            aborted: false,
            deadline: None,
            partial_best: None,

            piece_values,
            evaluator: Evaluator::with_cache_size(
                piece_values,
                HCEConfig::default(),
                config.eval_cache_size.value,
            ),
            book: None,

            position: Position::default(),
            iteration_depth: 0,
            extension_limit: 0,

            stats: SearchStats::default(),
            current_pv: Vec::new(),

            tt: TranspositionTable::new(config.hash_size.value),
            search_stack: SearchStack::with_capacity(1024),
            history_heuristic: HistoryHeuristic::new(config.history_max_value.value),
            killers: KillerTable::new(),
        }
    }

    pub fn with_book(mut self, book: Box<dyn Book>) -> Self {
        self.book = Some(book);
        self
    }

    pub fn set_book(&mut self, book: Option<Box<dyn Book>>) {
        self.book = book;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn configure(&mut self, config: &EngineConfig) {
        let old_config = std::mem::replace(&mut self.config, config.clone());

        if old_config.hash_size.value != config.hash_size.value {
            self.tt = TranspositionTable::new(config.hash_size.value);
        }
        if old_config.eval_cache_size.value != config.eval_cache_size.value {
            self.evaluator = Evaluator::with_cache_size(
                self.piece_values,
                HCEConfig::default(),
                config.eval_cache_size.value,
            );
        }
        if !self.history_heuristic.matches_config(config) {
            self.history_heuristic.configure(config);
        }
    }

    pub fn name(&self) -> String {
        "Kestrel (HCE)".to_string()
    }

    /// Forgets everything learned in the previous game.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.evaluator.clear();
        self.history_heuristic.reset();
        self.killers.clear();
        self.current_pv.clear();
        debug!("engine state cleared for a new game");
    }

    /// Asks a running search to return as soon as it next polls.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Shared stop flag, for stopping the search from another thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn tt_hashfull(&self) -> u16 {
        self.tt.hashfull()
    }

    /// Counts a node and checks the stop flag and the clock every
    /// `poll_interval` nodes. Returns true once the search must unwind.
    #[inline(always)]
    pub(super) fn poll(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        self.stats.nodes += 1;

        if self.stats.nodes % self.config.poll_interval.value != 0 {
            return false;
        }
        if self.stop.load(Ordering::Relaxed) {
            self.aborted = true;
        } else if self.iteration_depth > self.config.min_depth.value {
            self.aborted = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        }
        self.aborted
    }
}
