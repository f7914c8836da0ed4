mod config;
mod context;
mod endgame;
mod eval_bishops;
mod eval_cache;
mod eval_king;
mod eval_knights;
mod eval_material;
mod eval_mobility;
mod eval_pawns;
mod eval_queens;
mod eval_rooks;
mod eval_space;
mod eval_threats;
mod pawn_cache;
mod pst;
mod tables;

pub use config::HCEConfig;
pub use endgame::{is_known_draw, material_table_value};
pub use eval_cache::EvalCache;
use context::EvalContext;
use pawn_cache::{CachedPawnEvaluation, PawnCache};

use board::{Color, MoveSet, Position};
use log::debug;

use crate::def::HCE;
use crate::piece_values::{game_phase, PieceValues, MAX_PHASE};
use crate::scores::MAX_EVAL;

pub const DEFAULT_EVAL_CACHE_SIZE: usize = 1 << 16;

/// Cache and call counters, reported with the search statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    pub evaluations: u64,
    pub eval_cache_hits: u64,
    pub pawn_cache_hits: u64,
    pub known_draws: u64,
}

pub struct Evaluator {
    piece_values: PieceValues,
    config: HCEConfig,
    pawn_cache: PawnCache,
    eval_cache: EvalCache,
    stats: EvalStats,
}

impl Evaluator {
    pub fn new(piece_values: PieceValues, config: HCEConfig) -> Self {
        Self::with_cache_size(piece_values, config, DEFAULT_EVAL_CACHE_SIZE)
    }

    pub fn with_cache_size(piece_values: PieceValues, config: HCEConfig, entries: usize) -> Self {
        endgame::init();
        crate::kpk::init();
        Self {
            piece_values,
            config,
            pawn_cache: PawnCache::new(),
            eval_cache: EvalCache::new(entries),
            stats: EvalStats::default(),
        }
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EvalStats::default();
    }

    /// Forgets every cached score, for a new game.
    pub fn clear(&mut self) {
        self.pawn_cache.clear();
        self.eval_cache.clear();
        debug!("evaluation caches cleared");
    }

    fn pawn_structure(&mut self, position: &Position) -> CachedPawnEvaluation {
        let key = position.pawn_hash();
        if let Some(entry) = self.pawn_cache.get(key) {
            self.stats.pawn_cache_hits += 1;
            return entry;
        }
        let entry = eval_pawns::evaluate(position, &self.config);
        self.pawn_cache.set(entry);
        entry
    }

    fn compute(&mut self, position: &Position, moves: &MoveSet) -> i16 {
        if endgame::is_known_draw(position) {
            self.stats.known_draws += 1;
            return 0;
        }

        let pawns = self.pawn_structure(position);
        let ctx = EvalContext::new(position, moves, &pawns);

        // https://www.chessprogramming.org/Tapered_Eval
        let phase = game_phase(position);
        let score = match phase {
            0 => endgame::evaluate(&ctx, &self.piece_values, &self.config),
            MAX_PHASE => self.middlegame(&ctx),
            _ => {
                let mg = self.middlegame(&ctx);
                let eg = endgame::evaluate(&ctx, &self.piece_values, &self.config);
                (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE
            }
        };

        score.clamp(-MAX_EVAL, MAX_EVAL) as i16
    }

    fn middlegame(&self, ctx: &EvalContext) -> i32 {
        let config = &self.config;
        let mut cp = ctx.pawn_structure.mg;

        cp += eval_material::evaluate(ctx, Color::White, &self.piece_values, config);
        cp -= eval_material::evaluate(ctx, Color::Black, &self.piece_values, config);

        cp += eval_pawns::blockade(ctx, Color::White);
        cp -= eval_pawns::blockade(ctx, Color::Black);

        cp += eval_mobility::evaluate(ctx, Color::White);
        cp -= eval_mobility::evaluate(ctx, Color::Black);

        cp += eval_rooks::evaluate(ctx, Color::White, config);
        cp -= eval_rooks::evaluate(ctx, Color::Black, config);

        cp += eval_bishops::evaluate(ctx, Color::White, config);
        cp -= eval_bishops::evaluate(ctx, Color::Black, config);

        cp += eval_knights::evaluate(ctx, Color::White, config);
        cp -= eval_knights::evaluate(ctx, Color::Black, config);

        cp += eval_queens::evaluate(ctx, Color::White, config);
        cp -= eval_queens::evaluate(ctx, Color::Black, config);

        cp += eval_king::evaluate(ctx, Color::White, config);
        cp -= eval_king::evaluate(ctx, Color::Black, config);

        cp += eval_threats::evaluate(ctx, Color::White, config);
        cp -= eval_threats::evaluate(ctx, Color::Black, config);

        cp += eval_space::evaluate(ctx, Color::White, config);
        cp -= eval_space::evaluate(ctx, Color::Black, config);

        cp += ctx.position.side_to_move().sign() * config.tempo_bonus;

        cp
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(PieceValues::default(), HCEConfig::default())
    }
}

impl HCE for Evaluator {
    fn name(&self) -> String {
        "HCE".to_string()
    }

    fn evaluate(&mut self, position: &Position, moves: &MoveSet) -> i16 {
        self.stats.evaluations += 1;

        let key = position.hash();
        if let Some(score) = self.eval_cache.probe(key) {
            self.stats.eval_cache_hits += 1;
            return score;
        }

        let score = self.compute(position, moves);
        self.eval_cache.store(key, score);
        score
    }
}
