use board::Move;
use evaluation::PieceValues;

pub(super) struct ScoredMove {
    pub mov: Move,
    pub score: i32,
}

pub(super) fn select_highest(array: &[ScoredMove]) -> Option<usize> {
    if array.is_empty() {
        return None;
    }
    let mut best_score = array[0].score;
    let mut best_index = 0;
    for (index, mv) in array.iter().enumerate().skip(1) {
        if mv.score > best_score {
            best_score = mv.score;
            best_index = index;
        }
    }
    Some(best_index)
}

/// Most valuable victim, least valuable attacker. Promotions count as
/// capturing the promotion gain.
#[inline(always)]
pub(super) fn mvv_lva(mv: &Move, phase: i32, piece_values: &PieceValues) -> i32 {
    let victim = mv.captured.map_or(0, |p| piece_values.get(p, phase));
    let promotion = mv.promotion.map_or(0, |p| piece_values.get(p, phase));
    16 * (victim + promotion) - mv.piece.index() as i32
}
