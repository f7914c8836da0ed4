use crate::MAX_DEPTH;

/// Plies added at a node: one when the side to move is in check, has a
/// single legal reply, or would be mated if it passed.
/// <https://www.chessprogramming.org/Extensions>
#[inline(always)]
pub fn node_extension(in_check: bool, single_reply: bool, mate_threat: bool) -> u8 {
    (in_check || single_reply || mate_threat) as u8
}

/// Deepest a line may be extended to within an iteration of `iteration_depth`.
#[inline(always)]
pub fn extension_limit(iteration_depth: u8, ratio: u8) -> u8 {
    let limit = iteration_depth as usize * ratio.max(1) as usize;
    limit.min(MAX_DEPTH - 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(node_extension(false, false, false), 0);
        assert_eq!(node_extension(true, true, false), 1);
        assert_eq!(node_extension(false, false, true), 1);

        assert_eq!(extension_limit(6, 2), 12);
        assert_eq!(extension_limit(80, 2), MAX_DEPTH as u8 - 1);
    }
}
