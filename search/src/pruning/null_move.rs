use board::Position;

use crate::utils::has_null_move_material;

// Null Move Pruning
// Try passing the turn to the opponent. If they still can't beat beta with a free move,
// the position is likely so good we can prune this branch.
// https://www.chessprogramming.org/Null_Move_Pruning
#[inline(always)]
pub fn can_null_move_prune(
    position: &Position,
    remaining_depth: u8,
    in_check: bool,
    min_depth: u8,
    min_pieces: u32,
) -> bool {
    remaining_depth >= min_depth && !in_check && has_null_move_material(position, min_pieces)
}

/// Depth reduction of the null-move search: a base plus one ply for every
/// `depth_divisor` plies of remaining depth, leaving at least one ply.
#[inline(always)]
pub fn null_move_reduction(remaining_depth: u8, base_reduction: u8, depth_divisor: u8) -> u8 {
    let r = base_reduction + remaining_depth / depth_divisor.max(1);
    r.min(remaining_depth.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_grows_with_depth() {
        assert_eq!(null_move_reduction(3, 2, 4), 2);
        assert_eq!(null_move_reduction(8, 2, 4), 4);
        assert_eq!(null_move_reduction(12, 2, 4), 5);
        assert_eq!(null_move_reduction(2, 2, 4), 1);
    }

    #[test]
    fn test_zugzwang_guard() {
        let start = Position::default();
        assert!(can_null_move_prune(&start, 4, false, 3, 3));
        assert!(!can_null_move_prune(&start, 4, true, 3, 3));
        assert!(!can_null_move_prune(&start, 2, false, 3, 3));

        let pawns = Position::from_fen("4k3/pppp4/8/8/8/8/PPPP4/4K2R w - - 0 1").unwrap();
        assert!(!can_null_move_prune(&pawns, 6, false, 3, 3));
    }
}
