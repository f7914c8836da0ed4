use std::sync::atomic::Ordering;

use board::{legal_moves, Move, MoveSet};
use evaluation::piece_values::game_phase;
use evaluation::scores::{is_mate_score, MATE_SCORE_BOUND, MATE_VALUE, NEG_INFINITY};
use log::{debug, info, warn};

use crate::{
    extensions::extension_limit,
    game::{Game, FIFTY_MOVE_LIMIT},
    move_ordering::MainMoveGenerator,
    pruning::{lmr, mate_distance_prune, AspirationWindow, Pass},
    time_control::Timer,
    transposition::Bound,
    utils::{format_score, gives_direct_check},
    MAX_DEPTH,
};

use super::{pruning::NullMove, Engine, SearchFlags, SearchResult};

/// Best move, score and line of one pass over the root moves.
struct RootPass {
    best_move: Option<Move>,
    score: i16,
    pv: Vec<Move>,
}

fn format_line(line: &[Move]) -> String {
    line.iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Engine {
    /// Picks a move for the side to move in `game`. Returns `None` only when
    /// there is no legal move.
    pub fn find_best_move(
        &mut self,
        game: &Game,
        timer: &mut dyn Timer,
        flags: SearchFlags,
    ) -> Option<SearchResult> {
        let root_moves = game.legal_moves();
        if root_moves.is_empty() {
            debug!("no legal moves, nothing to search");
            return None;
        }

        if flags.use_opening_book {
            if let Some(mv) = self.book_move(game, &root_moves) {
                info!("book move {}", mv);
                return Some(SearchResult {
                    best_move: mv,
                    score: 0,
                    depth: 0,
                    pv: vec![mv],
                    stats: self.stats,
                    from_book: true,
                });
            }
        }

        self.init_search(game);
        timer.start();
        self.deadline = if flags.dynamic_depth {
            timer.deadline()
        } else {
            None
        };

        let max_iteration = if flags.dynamic_depth {
            MAX_DEPTH as u8 - 1
        } else {
            self.config.fixed_depth.value
        };

        let mut window = AspirationWindow::new(
            self.config.aspiration_window_size.value,
            self.config.aspiration_window_widen.value,
            self.config.aspiration_window_retries.value,
        );

        let mut completed: Option<(RootPass, u8)> = None;
        let mut partial: Option<Move> = None;

        for depth in 1..=max_iteration {
            if depth > self.config.min_depth.value {
                if self.stop.load(Ordering::Relaxed) {
                    break;
                }
                if flags.dynamic_depth && !timer.should_continue() {
                    break;
                }
            }

            self.iteration_depth = depth;
            self.extension_limit =
                extension_limit(depth, self.config.max_extension_ratio.value).max(depth);

            match &completed {
                Some((pass, _)) => window.begin_depth(pass.score),
                None => window.open(),
            }

            let pass = loop {
                let (alpha, beta) = window.bounds();
                let pass = self.search_root(&root_moves, depth, alpha, beta);

                if self.aborted {
                    break None;
                }

                match window.analyse_pass(pass.score) {
                    Pass::Hit(_) => break Some(pass),
                    Pass::FailLow | Pass::FailHigh => {
                        debug!(
                            "depth {} aspiration miss at {}, window now {:?}",
                            depth,
                            pass.score,
                            window.bounds()
                        );
                    }
                }
            };

            let Some(pass) = pass else {
                partial = self.partial_best.take();
                break;
            };

            let best_move_changed = completed
                .as_ref()
                .is_some_and(|(previous, _)| previous.best_move != pass.best_move);
            timer.advise(best_move_changed);

            self.stats.absorb_eval(self.evaluator.stats());
            debug!(
                "depth {} score {} nodes {} time {}ms pv {}",
                depth,
                format_score(pass.score),
                self.stats.nodes,
                timer.elapsed().as_millis(),
                format_line(&pass.pv)
            );

            self.current_pv = pass.pv.clone();
            let found_mate = is_mate_score(pass.score);
            completed = Some((pass, depth));

            if found_mate {
                break;
            }
        }

        self.stats.absorb_eval(self.evaluator.stats());
        debug!("search stats: {}", self.stats);

        let result = match completed {
            Some((pass, depth)) => pass.best_move.map(|best_move| SearchResult {
                best_move,
                score: pass.score,
                depth,
                pv: pass.pv,
                stats: self.stats,
                from_book: false,
            }),
            None => None,
        };

        let result = result.or_else(|| {
            // Stopped before the first iteration finished
            let fallback = partial.or_else(|| root_moves.iter().next().copied())?;
            warn!("search stopped before any iteration completed, playing {}", fallback);
            Some(SearchResult {
                best_move: fallback,
                score: 0,
                depth: 0,
                pv: vec![fallback],
                stats: self.stats,
                from_book: false,
            })
        });

        if let Some(result) = &result {
            info!(
                "best move {} score {} depth {} nodes {}",
                result.best_move,
                format_score(result.score),
                result.depth,
                result.stats.nodes
            );
        }
        result
    }

    fn book_move(&mut self, game: &Game, moves: &MoveSet) -> Option<Move> {
        let book = self.book.as_mut()?;
        let mv = book.lookup(game.position().hash())?;
        moves.contains(&mv).then_some(mv)
    }

    fn init_search(&mut self, game: &Game) {
        self.stop.store(false, Ordering::Relaxed);
        self.aborted = false;
        self.partial_best = None;

        self.stats = Default::default();
        self.evaluator.reset_stats();

        self.position = game.position().clone();
        self.search_stack.seed(game.hash_history());
        self.current_pv.clear();

        self.killers.clear();
        self.history_heuristic.age();
    }

    fn search_root(&mut self, moves: &MoveSet, depth: u8, mut alpha: i16, beta: i16) -> RootPass {
        let hash = self.position.hash();
        let in_check = moves.in_check();

        let tt_move = self
            .current_pv
            .first()
            .copied()
            .filter(|mv| moves.contains(mv))
            .or_else(|| {
                self.tt
                    .probe(hash, 0)
                    .and_then(|entry| entry.best_move)
                    .and_then(|mv| mv.resolve(&self.position, moves))
            });

        let mut movegen = MainMoveGenerator::new(
            moves,
            tt_move,
            self.killers.mate_killer(0),
            self.killers.killers(0),
            game_phase(&self.position),
            self.piece_values,
        );

        let original_alpha = alpha;
        let mut pass = RootPass {
            best_move: None,
            score: NEG_INFINITY,
            pv: Vec::new(),
        };

        let mut move_index = 0;
        while let Some(mv) = movegen.next(&self.position, moves, &self.history_heuristic) {
            let (score, mut line) =
                self.search_move(mv, 0, depth, alpha, beta, move_index, true, in_check);
            move_index += 1;

            if self.aborted {
                break;
            }

            if score > pass.score {
                line.insert(0, mv);
                pass = RootPass {
                    best_move: Some(mv),
                    score,
                    pv: line,
                };
                self.partial_best = Some(mv);
            }

            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if !self.aborted {
            let bound = if pass.score >= beta {
                Bound::Lower
            } else if pass.score > original_alpha {
                Bound::Exact
            } else {
                Bound::Upper
            };
            self.tt
                .store(hash, 0, depth, pass.score, bound, pass.best_move);
        }

        pass
    }

    /// Negamax with alpha-beta over the node `ply` plies below the root.
    /// Returns the fail-soft score for the side to move and its line.
    ///
    /// <https://www.chessprogramming.org/Alpha-Beta>
    pub(super) fn search_subtree(
        &mut self,
        ply: u8,
        max_depth: u8,
        mut alpha: i16,
        mut beta: i16,
        try_null_move: bool,
        allow_iid: bool,
    ) -> (i16, Vec<Move>) {
        if self.poll() {
            return (0, Vec::new());
        }
        self.stats.seldepth = self.stats.seldepth.max(ply);

        let root_distance = ply as u16;
        if self.search_stack.is_repetition(self.position.halfmove_clock()) {
            return (0, Vec::new());
        }

        if mate_distance_prune(&mut alpha, &mut beta, root_distance) {
            return (alpha, Vec::new());
        }

        let moves = legal_moves(&self.position);
        let in_check = moves.in_check();
        if moves.is_empty() {
            return if in_check {
                (-(MATE_VALUE - ply as i16), Vec::new()) // Checkmate
            } else {
                (0, Vec::new()) // Stalemate
            };
        }
        if self.position.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            return (0, Vec::new());
        }

        let entry_max_depth = max_depth;
        let mut max_depth = self.extend(max_depth, in_check, moves.len() == 1, false);
        let extended = max_depth > entry_max_depth;

        if ply >= max_depth || ply as usize >= MAX_DEPTH - 1 {
            return self.quiescence_search(ply, alpha, beta);
        }

        let hash = self.position.hash();
        let is_pv_node = beta > alpha + 1;

        // Transposition table probe
        self.stats.tt_probes += 1;
        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash, root_distance) {
            self.stats.tt_hits += 1;
            tt_move = entry
                .best_move
                .and_then(|mv| mv.resolve(&self.position, &moves));

            if entry.bound != Bound::MoveOnly && entry.depth >= max_depth - ply {
                let line = tt_move.map_or(Vec::new(), |mv| vec![mv]);
                match entry.bound {
                    Bound::Exact if tt_move.is_some() => return (entry.value, line),
                    Bound::Lower if entry.value >= beta => return (entry.value, line),
                    Bound::Upper if entry.value <= alpha => return (entry.value, line),
                    _ => {}
                }
            }
        }

        let static_eval = if in_check {
            None
        } else {
            Some(self.eval(&moves))
        };

        match self.try_null_move_prune(
            ply,
            max_depth,
            beta,
            max_depth - ply,
            in_check,
            try_null_move,
        ) {
            NullMove::Cutoff(score) => {
                self.tt
                    .store(hash, root_distance, max_depth - ply, score, Bound::Lower, None);
                return (score, Vec::new());
            }
            NullMove::MateThreat if !extended => {
                max_depth = self.extend(max_depth, false, false, true);
            }
            _ => {}
        }
        if self.aborted {
            return (0, Vec::new());
        }

        let remaining_depth = max_depth - ply;

        // Internal Iterative Deepening (IID)
        if let Some(mv) = self.try_iid(
            ply,
            max_depth,
            alpha,
            beta,
            is_pv_node,
            allow_iid,
            tt_move.is_none(),
            remaining_depth,
        ) {
            tt_move = Some(mv).filter(|mv| moves.contains(mv));
        }
        if self.aborted {
            return (0, Vec::new());
        }

        let futility_base = self.futility_base(remaining_depth, in_check, alpha, static_eval);
        let phase = game_phase(&self.position);
        let color = self.position.side_to_move();

        let mut movegen = MainMoveGenerator::new(
            &moves,
            tt_move,
            self.killers.mate_killer(ply as usize),
            self.killers.killers(ply as usize),
            phase,
            self.piece_values,
        );

        let original_alpha = alpha;
        let mut best_value = NEG_INFINITY;
        let mut best_move = None;
        let mut best_line = Vec::new();

        let mut move_index = 0;
        let mut pruned = false;
        let mut skipped_losing_capture = false;

        while let Some(mv) = movegen.next(&self.position, &moves, &self.history_heuristic) {
            if move_index > 0 {
                // Futility prune
                if let Some(base) = futility_base {
                    if base <= alpha
                        && !mv.is_tactical()
                        && !gives_direct_check(&self.position, &mv)
                    {
                        pruned = true;
                        continue;
                    }
                }

                // One losing capture per node is not worth a search
                if !is_pv_node
                    && !in_check
                    && !skipped_losing_capture
                    && self.is_losing_capture(&mv, phase)
                {
                    skipped_losing_capture = true;
                    pruned = true;
                    continue;
                }
            }

            let (value, mut line) = self.search_move(
                mv,
                ply,
                max_depth,
                alpha,
                beta,
                move_index,
                is_pv_node,
                in_check,
            );
            move_index += 1;

            if self.aborted {
                return (0, Vec::new());
            }

            if value > best_value {
                best_value = value;
                best_move = Some(mv);
                line.insert(0, mv);
                best_line = line;
            }

            alpha = alpha.max(value);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if !mv.is_tactical() {
                    self.killers.store(ply as usize, mv);
                    self.history_heuristic.update(color, &mv, remaining_depth);
                }
                if value >= MATE_SCORE_BOUND {
                    self.killers.store_mate(ply as usize, mv);
                }
                break; // beta cutoff
            }
        }

        let bound = if best_value >= beta {
            Bound::Lower
        } else if best_value > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };

        match best_move {
            // Pruned moves make a fail-low score unreliable; keep only the move
            Some(mv) if pruned && bound == Bound::Upper => {
                self.tt.store_move(hash, root_distance, mv);
            }
            _ => {
                self.tt
                    .store(hash, root_distance, remaining_depth, best_value, bound, best_move);
            }
        }

        (best_value, best_line)
    }

    /// Searches one move: the first at full window, later ones with a
    /// possibly reduced null window, re-searched when they beat alpha.
    ///
    /// <https://www.chessprogramming.org/Principal_Variation_Search>
    #[allow(clippy::too_many_arguments)]
    #[inline(always)]
    pub(super) fn search_move(
        &mut self,
        mv: Move,
        ply: u8,
        max_depth: u8,
        alpha: i16,
        beta: i16,
        move_index: usize,
        is_pv_node: bool,
        in_check: bool,
    ) -> (i16, Vec<Move>) {
        #[cfg(debug_assertions)]
        let hash_before = self.position.hash();

        let undo = self.position.apply(mv);
        self.search_stack.push(self.position.hash());

        let gives_check = self.position.is_in_check(self.position.side_to_move());
        let remaining_depth = max_depth - ply;

        let (value, line) = if move_index == 0 {
            let (value, line) = self.search_subtree(ply + 1, max_depth, -beta, -alpha, true, true);
            (-value, line)
        } else {
            // Late move reduction
            let reduction = lmr(
                remaining_depth,
                mv.is_tactical() || in_check || gives_check,
                move_index,
                self.config.lmr_min_depth.value,
                self.config.lmr_min_moves.value,
                self.config.lmr_divisor.value,
                self.config.lmr_max_reduction_ratio.value,
            );

            let (value, line) = self.search_subtree(
                ply + 1,
                max_depth - reduction,
                -alpha - 1,
                -alpha,
                true,
                true,
            );
            let (mut value, mut line) = (-value, line);

            if reduction > 0 && value > alpha && !self.aborted {
                let (v, l) =
                    self.search_subtree(ply + 1, max_depth, -alpha - 1, -alpha, true, true);
                (value, line) = (-v, l);
            }

            if is_pv_node && value > alpha && value < beta && !self.aborted {
                let (v, l) = self.search_subtree(ply + 1, max_depth, -beta, -alpha, true, true);
                (value, line) = (-v, l);
            }

            (value, line)
        };

        self.search_stack.pop();
        self.position.undo(mv, undo);

        #[cfg(debug_assertions)]
        debug_assert_eq!(self.position.hash(), hash_before, "undo of {} lost the hash", mv);

        (value, line)
    }
}
