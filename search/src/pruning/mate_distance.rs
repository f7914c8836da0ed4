use evaluation::scores::MATE_VALUE;

// Mate Distance Pruning (MDP)
//
// Mate scores count plies from the root, so a node `ply` plies deep can at
// best mate on the next ply and at worst be mated right here. Returns true if the
// window is empty and the node can be pruned.
// https://www.chessprogramming.org/Mate_Distance_Pruning
#[inline(always)]
pub fn mate_distance_prune(alpha: &mut i16, beta: &mut i16, ply: u16) -> bool {
    let ply = ply.min(MATE_VALUE as u16 / 2) as i16;
    let mate_next = MATE_VALUE - ply - 1;
    let mated_here = -(MATE_VALUE - ply);

    *alpha = (*alpha).max(mated_here);
    *beta = (*beta).min(mate_next);

    *alpha >= *beta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_distance_prune() {
        let (mut alpha, mut beta) = (-100, 100);
        assert!(!mate_distance_prune(&mut alpha, &mut beta, 10));
        assert_eq!((alpha, beta), (-100, 100));

        // A mate already found 12 plies deep cannot be beaten by a deeper node
        let (mut alpha, mut beta) = (MATE_VALUE - 12, MATE_VALUE);
        assert!(mate_distance_prune(&mut alpha, &mut beta, 20));
    }
}
