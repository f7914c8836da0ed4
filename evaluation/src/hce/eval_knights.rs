use board::Color;

use super::context::EvalContext;
use super::eval_bishops::outpost;
use super::HCEConfig;

#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    ctx.knights_for(color)
        .map(|sq| {
            outpost(
                ctx,
                color,
                sq,
                config.knight_outpost_bonus,
                config.knight_almost_outpost_bonus,
            )
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hce::eval_pawns;
    use board::{legal_moves, Position};

    fn knights(fen: &str) -> i32 {
        let position = Position::from_fen(fen).unwrap();
        let moves = legal_moves(&position);
        let config = HCEConfig::default();
        let pawns = eval_pawns::evaluate(&position, &config);
        let ctx = EvalContext::new(&position, &moves, &pawns);
        evaluate(&ctx, Color::White, &config)
    }

    #[test]
    fn test_knight_outposts() {
        let config = HCEConfig::default();
        // e5 supported by d4, no black pawn on d or f can challenge it
        assert_eq!(
            knights("4k3/p6p/8/4N3/3P4/8/8/4K3 w - - 0 1"),
            config.knight_outpost_bonus
        );
        assert_eq!(
            knights("4k3/p6p/8/4N3/8/8/8/4K3 w - - 0 1"),
            config.knight_almost_outpost_bonus
        );
        // A black pawn on f7 can still drive it away
        assert_eq!(knights("4k3/p4p1p/8/4N3/3P4/8/8/4K3 w - - 0 1"), 0);
        // Own half of the board
        assert_eq!(knights("4k3/p6p/8/8/3P4/4N3/8/4K3 w - - 0 1"), 0);
    }
}
