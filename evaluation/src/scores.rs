// Score bounds and special values for alpha-beta search.
const SCORE_INF: i16 = 30_000;
pub const POS_INFINITY: i16 = SCORE_INF;
pub const NEG_INFINITY: i16 = -SCORE_INF;
/// Base value for checkmate. A mate `n` plies below the search root scores
/// `MATE_VALUE - n`, so faster mates score higher.
pub const MATE_VALUE: i16 = SCORE_INF - 1000;
/// Scores beyond this magnitude are mate scores.
pub const MATE_SCORE_BOUND: i16 = MATE_VALUE - 1000;

/// Static evaluations are clamped below the mate range.
pub const MAX_EVAL: i32 = MATE_SCORE_BOUND as i32 - 1;

#[inline(always)]
pub const fn is_mate_score(score: i16) -> bool {
    score.abs() >= MATE_SCORE_BOUND
}
