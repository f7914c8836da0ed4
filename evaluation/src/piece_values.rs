use board::{Color, Piece, Position};

/// Full material: every knight, bishop, rook and queen on the board.
pub const MAX_PHASE: i32 = 8;

/// Piece values for middlegame (mg) and endgame (eg), interpolated by game phase.
///
/// <https://www.chessprogramming.org/Tapered_Eval>
#[derive(Debug, Clone, Copy)]
pub struct PieceValues {
    pub pawn_value_mg: i32,
    pub pawn_value_eg: i32,
    pub knight_value_mg: i32,
    pub knight_value_eg: i32,
    pub bishop_value_mg: i32,
    pub bishop_value_eg: i32,
    pub rook_value_mg: i32,
    pub rook_value_eg: i32,
    pub queen_value_mg: i32,
    pub queen_value_eg: i32,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn_value_mg: 100,
            pawn_value_eg: 100,
            knight_value_mg: 322,
            knight_value_eg: 275,
            bishop_value_mg: 337,
            bishop_value_eg: 300,
            rook_value_mg: 488,
            rook_value_eg: 550,
            queen_value_mg: 996,
            queen_value_eg: 900,
        }
    }
}

impl PieceValues {
    #[inline(always)]
    pub fn mg(&self, piece: Piece) -> i32 {
        match piece {
            Piece::Pawn => self.pawn_value_mg,
            Piece::Knight => self.knight_value_mg,
            Piece::Bishop => self.bishop_value_mg,
            Piece::Rook => self.rook_value_mg,
            Piece::Queen => self.queen_value_mg,
            Piece::King => 0,
        }
    }

    #[inline(always)]
    pub fn eg(&self, piece: Piece) -> i32 {
        match piece {
            Piece::Pawn => self.pawn_value_eg,
            Piece::Knight => self.knight_value_eg,
            Piece::Bishop => self.bishop_value_eg,
            Piece::Rook => self.rook_value_eg,
            Piece::Queen => self.queen_value_eg,
            Piece::King => 0,
        }
    }

    /// Returns the interpolated piece value based on game phase (MAX_PHASE = opening, 0 = endgame).
    pub fn get(&self, piece: Piece, phase: i32) -> i32 {
        (self.mg(piece) * phase + self.eg(piece) * (MAX_PHASE - phase)) / MAX_PHASE
    }

    /// Sums the endgame values of all of `color`'s pieces.
    pub fn material_eg(&self, position: &Position, color: Color) -> i32 {
        Piece::ALL
            .iter()
            .map(|&piece| self.eg(piece) * position.pieces(color, piece).count() as i32)
            .sum()
    }
}

/// Material phase from 0 (pawns and kings only) to MAX_PHASE.
///
/// Minor pieces count 1, rooks 2 and queens 4 out of 24 for the starting set.
pub fn game_phase(position: &Position) -> i32 {
    let points = position.pieces_of_kind(Piece::Knight).count()
        + position.pieces_of_kind(Piece::Bishop).count()
        + 2 * position.pieces_of_kind(Piece::Rook).count()
        + 4 * position.pieces_of_kind(Piece::Queen).count();
    ((points as i32 * MAX_PHASE + 12) / 24).clamp(0, MAX_PHASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_extremes() {
        assert_eq!(game_phase(&Position::default()), MAX_PHASE);
        let kpk = Position::from_fen("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(game_phase(&kpk), 0);
        let rooks = Position::from_fen("r3k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(game_phase(&rooks), 1);
    }

    #[test]
    fn test_interpolation() {
        let values = PieceValues::default();
        assert_eq!(values.get(Piece::Knight, MAX_PHASE), 322);
        assert_eq!(values.get(Piece::Knight, 0), 275);
        assert_eq!(values.get(Piece::Pawn, 3), 100);
    }
}
