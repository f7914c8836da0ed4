// Late Move Reduction (LMR)
// Reduces search depth for moves that are likely to be bad (searched late in move ordering)
// https://www.chessprogramming.org/Late_Move_Reductions
#[inline(always)]
pub fn lmr(
    remaining_depth: u8,
    tactical: bool,
    move_index: usize,
    min_depth: u8,
    min_moves: usize,
    divisor: i32,
    max_reduction_ratio: i32,
) -> u8 {
    if tactical || remaining_depth < min_depth || move_index < min_moves {
        return 0;
    }

    let depth_factor = (remaining_depth as f32).ln();
    let move_factor = (move_index as f32).ln();
    let reduction = (depth_factor * move_factor * 100.0 / divisor as f32).round() as i32;

    let max_reduction = remaining_depth as i32 * max_reduction_ratio / 100;
    reduction.clamp(0, max_reduction.max(1)).min(remaining_depth as i32 - 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lmr() {
        // Early, tactical and shallow moves are never reduced
        assert_eq!(lmr(8, false, 1, 3, 3, 230, 50), 0);
        assert_eq!(lmr(8, true, 20, 3, 3, 230, 50), 0);
        assert_eq!(lmr(2, false, 20, 3, 3, 230, 50), 0);

        assert_eq!(lmr(3, false, 3, 3, 3, 230, 50), 1);
        let late = lmr(10, false, 30, 3, 3, 230, 50);
        assert!(late > lmr(10, false, 5, 3, 3, 230, 50));
        assert!(late <= 5);
    }
}
