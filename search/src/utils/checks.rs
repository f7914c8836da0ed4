use board::attacks::piece_attacks;
use board::{Move, Piece, Position};

/// True when `mv` attacks the enemy king from its destination. Discovered
/// checks are not detected.
#[inline(always)]
pub fn gives_direct_check(position: &Position, mv: &Move) -> bool {
    let us = position.side_to_move();
    let king = position.king_square(!us);
    let occupied = (position.occupied() ^ mv.from) | mv.to;
    let piece = mv.placed_piece();
    piece != Piece::King && piece_attacks(piece, us, mv.to, occupied).contains(king)
}

/// True when the side to move keeps enough pieces for a null move to be
/// trusted. With fewer, zugzwang makes passing look better than it is.
#[inline(always)]
pub fn has_null_move_material(position: &Position, min_pieces: u32) -> bool {
    position.piece_count(position.side_to_move()) >= min_pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::parse_move;

    #[test]
    fn test_direct_checks() {
        let position = Position::from_fen("4k3/8/8/8/4N3/8/8/R3K3 w - - 0 1").unwrap();
        assert!(gives_direct_check(&position, &parse_move(&position, "a1a8").unwrap()));
        assert!(!gives_direct_check(&position, &parse_move(&position, "a1a7").unwrap()));
        assert!(gives_direct_check(&position, &parse_move(&position, "e4f6").unwrap()));

        let promotion = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(gives_direct_check(&promotion, &parse_move(&promotion, "b7b8q").unwrap()));
        assert!(!gives_direct_check(&promotion, &parse_move(&promotion, "b7b8n").unwrap()));
    }

    #[test]
    fn test_null_move_material() {
        let start = Position::default();
        assert!(has_null_move_material(&start, 3));
        let rooks = Position::from_fen("4k3/pppp4/8/8/8/8/PPPP4/R3K2R w - - 0 1").unwrap();
        assert!(!has_null_move_material(&rooks, 3));
    }
}
