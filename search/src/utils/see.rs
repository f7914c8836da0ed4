use board::{Bitboard, Color, Move, Piece, Position, Square};
use evaluation::PieceValues;

const KING_VALUE: i32 = 20_000;
const MAX_EXCHANGE: usize = 32;

#[inline(always)]
fn value(piece: Piece, phase: i32, piece_values: &PieceValues) -> i32 {
    match piece {
        Piece::King => KING_VALUE,
        _ => piece_values.get(piece, phase),
    }
}

/// Cheapest piece of `color` among `attackers`.
#[inline(always)]
fn least_valuable(position: &Position, attackers: Bitboard, color: Color) -> Option<(Piece, Square)> {
    Piece::ALL.iter().find_map(|&piece| {
        let candidates = attackers & position.pieces(color, piece);
        candidates.is_nonempty().then(|| (piece, candidates.lsb()))
    })
}

/// Static exchange evaluation of `mv`: the material the mover nets once both
/// sides have recaptured on the target square with their cheapest pieces,
/// each side free to stop when continuing would lose.
///
/// Sliders revealed behind a capturer join the exchange. Pins are ignored.
///
/// <https://www.chessprogramming.org/Static_Exchange_Evaluation>
pub fn see(position: &Position, mv: &Move, phase: i32, piece_values: &PieceValues) -> i32 {
    let target = mv.to;
    let mut gains = [0i32; MAX_EXCHANGE];

    let mut occupied = position.occupied() ^ mv.from;
    if mv.is_en_passant() {
        occupied ^= target.shift(-position.side_to_move().forward());
    }

    gains[0] = mv.captured.map_or(0, |p| value(p, phase, piece_values));
    if let Some(promotion) = mv.promotion {
        gains[0] += value(promotion, phase, piece_values) - value(Piece::Pawn, phase, piece_values);
    }

    // Value of the piece standing on the target, next in line to be taken
    let mut on_target = value(mv.placed_piece(), phase, piece_values);
    let mut side = !position.side_to_move();
    let mut depth = 0;

    loop {
        depth += 1;
        // Speculative: what `side` nets if it recaptures
        gains[depth] = on_target - gains[depth - 1];
        if (-gains[depth - 1]).max(gains[depth]) < 0 || depth + 1 >= MAX_EXCHANGE {
            break;
        }

        let attackers = position.all_attackers_of(target, occupied) & occupied;
        let Some((piece, from)) = least_valuable(position, attackers, side) else {
            break;
        };

        on_target = value(piece, phase, piece_values);
        occupied ^= from;
        side = !side;
    }

    while depth > 1 {
        depth -= 1;
        gains[depth - 1] = -(-gains[depth - 1]).max(gains[depth]);
    }

    gains[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::parse_move;
    use evaluation::piece_values::game_phase;

    fn see_of(fen: &str, mv: &str) -> i32 {
        let position = Position::from_fen(fen).unwrap();
        let mv = parse_move(&position, mv).unwrap();
        see(&position, &mv, game_phase(&position), &PieceValues::default())
    }

    #[test]
    fn test_rook_takes_undefended_pawn() {
        assert!(see_of("4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1", "d1d5") >= 0);
    }

    #[test]
    fn test_queen_takes_defended_pawn() {
        assert!(see_of("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1", "d1d5") < 0);
    }

    #[test]
    fn test_xray_recapture_counts() {
        // The rook behind the first one settles the exchange
        let doubled = see_of("4k3/3r4/8/3p4/8/8/3R4/3RK3 w - - 0 1", "d2d5");
        let single = see_of("4k3/3r4/8/3p4/8/8/8/3RK3 w - - 0 1", "d1d5");
        assert!(doubled > single);
        assert!(single < 0);
    }

    #[test]
    fn test_quiet_move_to_attacked_square() {
        // Knight steps onto a square a pawn covers
        assert_eq!(see_of("4k3/8/8/4p3/8/8/8/4K1N1 w - - 0 1", "g1f3"), 0);
        assert!(see_of("4k3/8/8/8/6p1/8/8/4K1N1 w - - 0 1", "g1f3") < 0);
    }
}
