use board::{legal_moves, Position};
use evaluation::{Evaluator, HCE};
use search::{
    ClockTimer, DrawReason, Engine, EngineConfig, Game, GameStatus, SearchFlags, TimeBudget,
};

fn fixed_depth_engine(depth: u8) -> Engine {
    let mut config = EngineConfig::default();
    config.update("Hash", "8").unwrap();
    config.update("Fixed Depth", &depth.to_string()).unwrap();
    Engine::new(&config)
}

const FIXED: SearchFlags = SearchFlags {
    dynamic_depth: false,
    use_opening_book: false,
};

#[test]
fn test_bare_kings_are_exactly_zero() {
    let position = Position::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
    let mut evaluator = Evaluator::default();
    assert_eq!(evaluator.evaluate(&position, &legal_moves(&position)), 0);

    let game = Game::new("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
    let mut engine = fixed_depth_engine(4);
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    let result = engine.find_best_move(&game, &mut timer, FIXED).unwrap();
    assert_eq!(result.score, 0);
}

#[test]
fn test_fourth_occurrence_ends_the_game() {
    let mut game = Game::start();
    let shuffle = ["b1c3", "b8c6", "c3b1", "c6b8"];
    for round in 0..3 {
        assert_eq!(game.status(), GameStatus::Ongoing, "round {round}");
        for mv in shuffle {
            game.apply_notation(mv).unwrap();
        }
    }
    assert_eq!(game.status(), GameStatus::Draw(DrawReason::Repetition));
}

#[test]
fn test_fifty_move_rule_in_search() {
    // A rook up, but every move reaches the hundredth half-move
    let game = Game::new("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
    let mut engine = fixed_depth_engine(4);
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    let result = engine.find_best_move(&game, &mut timer, FIXED).unwrap();
    assert_eq!(result.score, 0);

    let clock = Game::new("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
    assert_eq!(clock.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
}

#[test]
fn test_stalemate_and_insufficient_material() {
    let stalemate = Game::new("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(stalemate.status(), GameStatus::Draw(DrawReason::Stalemate));

    let mut engine = fixed_depth_engine(4);
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    assert!(engine.find_best_move(&stalemate, &mut timer, FIXED).is_none());

    let minor = Game::new("8/8/4k3/8/8/3KB3/8/8 w - - 0 1").unwrap();
    assert_eq!(minor.status(), GameStatus::Draw(DrawReason::InsufficientMaterial));
}
