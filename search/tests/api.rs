use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use board::{parse_move, Position};
use evaluation::piece_values::game_phase;
use evaluation::PieceValues;
use search::{
    see, Bound, ClockTimer, Engine, EngineConfig, Game, GameError, MemoryBook, SearchFlags,
    TimeBudget, Timer, TranspositionTable, MAX_DEPTH,
};

/// Never declines a new iteration, but sets a hard deadline `limit` after start.
struct DeadlineOnly {
    started: Instant,
    limit: Duration,
}

impl Timer for DeadlineOnly {
    fn start(&mut self) {
        self.started = Instant::now();
    }

    fn should_continue(&self) -> bool {
        true
    }

    fn advise(&mut self, _best_move_changed: bool) {}

    fn deadline(&self) -> Option<Instant> {
        Some(self.started + self.limit)
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Raises the engine's stop flag as soon as the search starts.
struct StopOnStart {
    stop: Arc<AtomicBool>,
    started: Instant,
}

impl Timer for StopOnStart {
    fn start(&mut self) {
        self.started = Instant::now();
        self.stop.store(true, Ordering::Relaxed);
    }

    fn should_continue(&self) -> bool {
        true
    }

    fn advise(&mut self, _best_move_changed: bool) {}

    fn deadline(&self) -> Option<Instant> {
        None
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

fn small_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.update("Hash", "8").unwrap();
    config
}

#[test]
fn test_new_game_rejects_bad_fen() {
    assert!(matches!(Game::new("not a fen"), Err(GameError::Parse(_))));
    assert!(matches!(
        Game::new("8/8/8/8/8/8/8/8 w - - 0 1"),
        Err(GameError::Parse(_))
    ));
}

#[test]
fn test_engine_move_is_legal_and_playable() {
    let mut game = Game::start();
    let mut engine = Engine::new(&EngineConfig::default());
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    let flags = SearchFlags {
        dynamic_depth: false,
        use_opening_book: false,
    };

    for _ in 0..4 {
        let result = engine.find_best_move(&game, &mut timer, flags).unwrap();
        assert!(game.legal_moves().contains(&result.best_move));
        assert_eq!(result.pv.first(), Some(&result.best_move));
        assert!(result.stats.nodes > 0);
        game.apply_move(result.best_move).unwrap();
    }
}

#[test]
fn test_minimum_depth_survives_an_expired_clock() {
    let game = Game::start();
    let mut engine = Engine::new(&EngineConfig::default());
    let mut timer = ClockTimer::new(TimeBudget::move_time(0));

    let result = engine
        .find_best_move(&game, &mut timer, SearchFlags::default())
        .unwrap();
    assert_eq!(result.depth, 4);
    assert!(!result.from_book);
}

#[test]
fn test_deadline_mid_iteration_returns_last_completed_depth() {
    let game = Game::start();
    let mut engine = Engine::new(&small_config());
    let mut timer = DeadlineOnly {
        started: Instant::now(),
        limit: Duration::from_millis(50),
    };

    let result = engine
        .find_best_move(&game, &mut timer, SearchFlags::default())
        .unwrap();
    assert!(game.legal_moves().contains(&result.best_move));
    assert!(result.depth >= engine.config().min_depth.value);
    assert!((result.depth as usize) < MAX_DEPTH - 1);
    assert_eq!(result.pv.first(), Some(&result.best_move));
}

#[test]
fn test_stop_from_another_thread() {
    let game = Game::start();
    let mut engine = Engine::new(&small_config());
    let mut timer = ClockTimer::new(TimeBudget::Infinite);

    let stop = engine.stop_handle();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        stop.store(true, Ordering::Relaxed);
    });

    let result = engine
        .find_best_move(&game, &mut timer, SearchFlags::default())
        .unwrap();
    stopper.join().unwrap();

    assert!(game.legal_moves().contains(&result.best_move));
    assert!((result.depth as usize) < MAX_DEPTH - 1);
}

#[test]
fn test_stop_before_first_iteration_still_moves() {
    let game = Game::start();
    let mut config = small_config();
    config.update("Poll Interval", "5").unwrap();
    let mut engine = Engine::new(&config);
    let mut timer = StopOnStart {
        stop: engine.stop_handle(),
        started: Instant::now(),
    };

    let result = engine
        .find_best_move(&game, &mut timer, SearchFlags::default())
        .unwrap();
    assert!(game.legal_moves().contains(&result.best_move));
    assert_eq!(result.depth, 0);
    assert_eq!(result.pv, vec![result.best_move]);

    // The next search starts with the flag cleared
    let mut timer = ClockTimer::new(TimeBudget::move_time(0));
    let result = engine
        .find_best_move(&game, &mut timer, SearchFlags::default())
        .unwrap();
    assert_eq!(result.depth, 4);
}

#[test]
fn test_no_move_when_checkmated() {
    let mut game = Game::start();
    for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.apply_notation(mv).unwrap();
    }
    let mut engine = Engine::new(&EngineConfig::default());
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    assert!(engine
        .find_best_move(&game, &mut timer, SearchFlags::default())
        .is_none());
}

#[test]
fn test_book_move_is_played() {
    let book = MemoryBook::from_lines("e2e4 e7e5\n", 3).unwrap();
    let mut engine = Engine::new(&EngineConfig::default()).with_book(Box::new(book));
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    let flags = SearchFlags {
        dynamic_depth: false,
        use_opening_book: true,
    };

    let mut game = Game::start();
    let result = engine.find_best_move(&game, &mut timer, flags).unwrap();
    assert!(result.from_book);
    assert_eq!(result.best_move, parse_move(game.position(), "e2e4").unwrap());

    // Out of book after a different first move
    game.apply_notation("d2d4").unwrap();
    let result = engine.find_best_move(&game, &mut timer, flags).unwrap();
    assert!(!result.from_book);
}

#[test]
fn test_transposition_round_trip() {
    let position = Position::default();
    let mv = parse_move(&position, "g1f3").unwrap();

    let mut tt = TranspositionTable::new(1);
    tt.store(position.hash(), position.ply(), 7, 42, Bound::Exact, Some(mv));

    let entry = tt.probe(position.hash(), position.ply()).unwrap();
    assert_eq!(entry.value, 42);
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.depth, 7);
    let moves = board::legal_moves(&position);
    assert_eq!(entry.best_move.unwrap().resolve(&position, &moves), Some(mv));
}

#[test]
fn test_see_sanity() {
    let values = PieceValues::default();

    let free = Position::from_fen("4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1").unwrap();
    let capture = parse_move(&free, "d1d5").unwrap();
    assert!(see(&free, &capture, game_phase(&free), &values) >= 0);

    let defended = Position::from_fen("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
    let capture = parse_move(&defended, "d1d5").unwrap();
    assert!(see(&defended, &capture, game_phase(&defended), &values) < 0);
}

#[test]
fn test_new_game_clears_state() {
    let game = Game::start();
    let mut engine = Engine::new(&EngineConfig::default());
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    let flags = SearchFlags {
        dynamic_depth: false,
        use_opening_book: false,
    };

    let first = engine.find_best_move(&game, &mut timer, flags).unwrap();
    engine.new_game();
    assert_eq!(engine.tt_hashfull(), 0);

    // Same position, same fixed depth, same answer from a clean slate
    let again = engine.find_best_move(&game, &mut timer, flags).unwrap();
    assert_eq!(again.best_move, first.best_move);
    assert_eq!(again.score, first.score);
}
