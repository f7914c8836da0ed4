// Futility Pruning
// Skip quiet moves near the horizon when the static score plus a margin
// cannot reach alpha.
// https://www.chessprogramming.org/Futility_Pruning

/// Margin for `remaining_depth` plies above the horizon, `None` when the
/// depth is too high to prune.
#[inline(always)]
pub fn futility_margin(remaining_depth: u8, margins: &[i16]) -> Option<i16> {
    match remaining_depth {
        0 => None,
        d => margins.get(d as usize - 1).copied(),
    }
}

#[inline(always)]
pub fn can_futility_prune(remaining_depth: u8, in_check: bool, max_depth: u8) -> bool {
    remaining_depth > 0 && remaining_depth <= max_depth && !in_check
}

// Delta Pruning (quiescence search)
// Skip a capture whose best case still leaves the score below alpha.
#[inline(always)]
pub fn delta_prune(stand_pat: i16, gain: i32, margin: i16, alpha: i16) -> bool {
    stand_pat as i32 + gain + (margin as i32) < alpha as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins() {
        let margins = [300, 520];
        assert_eq!(futility_margin(0, &margins), None);
        assert_eq!(futility_margin(1, &margins), Some(300));
        assert_eq!(futility_margin(2, &margins), Some(520));
        assert_eq!(futility_margin(3, &margins), None);

        assert!(can_futility_prune(2, false, 2));
        assert!(!can_futility_prune(2, true, 2));
        assert!(!can_futility_prune(3, false, 2));
    }

    #[test]
    fn test_delta() {
        assert!(delta_prune(0, 100, 230, 400));
        assert!(!delta_prune(0, 900, 230, 400));
    }
}
