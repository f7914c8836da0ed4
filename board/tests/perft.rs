use board::perft::{perft, perft_stats, PerftStats};
use board::{legal_moves, Piece, Position, STARTING_FEN};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const DISCOVERED: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn nodes(fen: &str, depth: u32) -> u64 {
    let mut pos = Position::from_fen(fen).unwrap();
    perft(&mut pos, depth)
}

#[test]
fn test_perft_start_position() {
    assert_eq!(nodes(STARTING_FEN, 1), 20);
    assert_eq!(nodes(STARTING_FEN, 2), 400);
    assert_eq!(nodes(STARTING_FEN, 4), 197_281);
}

#[test]
fn test_perft_start_position_breakdown() {
    let mut pos = Position::from_fen(STARTING_FEN).unwrap();
    assert_eq!(
        perft_stats(&mut pos, 3),
        PerftStats {
            nodes: 8_902,
            captures: 34,
            en_passant: 0,
            castles: 0,
            promotions: 0,
            checks: 12,
        }
    );
}

#[test]
#[ignore]
fn test_perft_start_position_depth_5() {
    let mut pos = Position::from_fen(STARTING_FEN).unwrap();
    let stats = perft_stats(&mut pos, 5);
    assert_eq!(stats.nodes, 4_865_609);
    assert_eq!(stats.captures, 82_719);
    assert_eq!(stats.en_passant, 258);
}

#[test]
#[ignore]
fn test_perft_start_position_depth_6() {
    assert_eq!(nodes(STARTING_FEN, 6), 119_060_324);
}

#[test]
fn test_perft_kiwipete() {
    let mut pos = Position::from_fen(KIWIPETE).unwrap();
    let stats = perft_stats(&mut pos, 1);
    assert_eq!(stats.nodes, 48);
    assert_eq!(stats.captures, 8);
    assert_eq!(stats.castles, 2);

    let stats = perft_stats(&mut pos, 2);
    assert_eq!(stats.nodes, 2_039);
    assert_eq!(stats.captures, 351);
    assert_eq!(stats.en_passant, 1);
    assert_eq!(stats.castles, 91);
    assert_eq!(stats.checks, 3);

    assert_eq!(nodes(KIWIPETE, 3), 97_862);
}

#[test]
fn test_perft_tricky_positions() {
    assert_eq!(nodes(ENDGAME, 1), 14);
    assert_eq!(nodes(ENDGAME, 2), 191);
    assert_eq!(nodes(ENDGAME, 3), 2_812);
    assert_eq!(nodes(ENDGAME, 4), 43_238);

    assert_eq!(nodes(PROMOTIONS, 1), 6);
    assert_eq!(nodes(PROMOTIONS, 2), 264);
    assert_eq!(nodes(PROMOTIONS, 3), 9_467);

    assert_eq!(nodes(DISCOVERED, 1), 44);
    assert_eq!(nodes(DISCOVERED, 2), 1_486);
    assert_eq!(nodes(DISCOVERED, 3), 62_379);
}

/// Walks the tree checking that at most two pieces ever give check and that a
/// double check leaves only king moves.
fn check_invariant(pos: &mut Position, depth: u32) {
    let moves = legal_moves(pos);
    let checkers = pos.checkers();
    assert_eq!(checkers, moves.checkers());
    assert!(checkers.count() <= 2);
    if checkers.count() == 2 {
        assert!(moves.iter().all(|m| m.piece == Piece::King));
    }
    if depth == 0 {
        return;
    }
    for mv in moves {
        let undo = pos.apply(mv);
        assert_eq!(pos.hash(), pos.compute_hash());
        check_invariant(pos, depth - 1);
        pos.undo(mv, undo);
    }
}

#[test]
fn test_check_invariant() {
    for fen in [KIWIPETE, ENDGAME, DISCOVERED] {
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        check_invariant(&mut pos, 3);
        assert_eq!(pos, before);
    }
}
