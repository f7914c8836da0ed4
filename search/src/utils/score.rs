use evaluation::scores::{is_mate_score, MATE_VALUE};

/// Formats a score for logs: `cp 35`, or `mate 3` / `mate -2` in moves from
/// the search root.
pub fn format_score(score: i16) -> String {
    if !is_mate_score(score) {
        return format!("cp {}", score);
    }
    let plies = ((MATE_VALUE - score.abs()) as i32).max(1);
    let moves = (plies + 1) / 2;
    if score > 0 {
        format!("mate {}", moves)
    } else {
        format!("mate -{}", moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(35), "cp 35");
        assert_eq!(format_score(-120), "cp -120");
        // Mate delivered on the first ply after the root
        assert_eq!(format_score(MATE_VALUE - 1), "mate 1");
        assert_eq!(format_score(MATE_VALUE - 3), "mate 2");
        // Mated two plies after the root
        assert_eq!(format_score(-(MATE_VALUE - 2)), "mate -1");
    }
}
