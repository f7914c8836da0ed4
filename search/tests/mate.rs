use board::parse_move;
use evaluation::scores::is_mate_score;
use search::{
    format_score, ClockTimer, Engine, EngineConfig, Game, SearchFlags, SearchResult, TimeBudget,
};

fn search_fixed(fen: &str, depth: u8) -> SearchResult {
    let mut config = EngineConfig::default();
    config.update("Hash", "8").unwrap();
    config.update("Fixed Depth", &depth.to_string()).unwrap();

    let game = Game::new(fen).unwrap();
    let mut engine = Engine::new(&config);
    let mut timer = ClockTimer::new(TimeBudget::Infinite);
    let flags = SearchFlags {
        dynamic_depth: false,
        use_opening_book: false,
    };
    engine.find_best_move(&game, &mut timer, flags).unwrap()
}

#[test]
fn test_back_rank_mate_in_one() {
    let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    let result = search_fixed(fen, 4);
    let game = Game::new(fen).unwrap();

    assert_eq!(result.best_move, parse_move(game.position(), "a1a8").unwrap());
    assert_eq!(format_score(result.score), "mate 1");
    assert_eq!(result.depth, 1);
}

#[test]
fn test_mate_score_late_in_the_game() {
    for fullmove in [700, 32_768] {
        let fen = format!("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 {fullmove}");
        let result = search_fixed(&fen, 4);
        let game = Game::new(&fen).unwrap();

        assert_eq!(result.best_move, parse_move(game.position(), "a1a8").unwrap());
        assert!(is_mate_score(result.score), "{fen}: {}", result.score);
        assert_eq!(format_score(result.score), "mate 1");
        assert_eq!(result.depth, 1);
    }
}

#[test]
fn test_scholars_mate() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    let result = search_fixed(fen, 4);
    let game = Game::new(fen).unwrap();

    assert_eq!(result.best_move, parse_move(game.position(), "h5f7").unwrap());
    assert_eq!(format_score(result.score), "mate 1");
}

#[test]
fn test_rook_mate_in_two() {
    let fen = "k7/8/2K5/8/8/8/8/7R w - - 0 1";
    let result = search_fixed(fen, 5);
    assert_eq!(format_score(result.score), "mate 2");

    // The engine finishes the job against any defence
    let mut game = Game::new(fen).unwrap();
    game.apply_move(result.best_move).unwrap();
    let reply = game.legal_moves().iter().next().copied().unwrap();
    game.apply_move(reply).unwrap();

    let finish = search_fixed(&game.position().to_fen(), 4);
    game.apply_move(finish.best_move).unwrap();
    assert_eq!(game.status(), search::GameStatus::WhiteWins);
}

#[test]
fn test_wins_hanging_queen() {
    let fen = "4k3/8/8/8/3q4/8/8/3RK3 w - - 0 1";
    let result = search_fixed(fen, 4);
    let game = Game::new(fen).unwrap();
    assert_eq!(result.best_move, parse_move(game.position(), "d1d4").unwrap());
    assert!(result.score > 300);
}

#[test]
fn test_mated_side_sees_it_coming() {
    // Black's only move walks into Rh8 mate
    let fen = "k7/8/1K6/8/8/8/8/7R b - - 0 1";
    let result = search_fixed(fen, 4);
    assert_eq!(format_score(result.score), "mate -1");
}
