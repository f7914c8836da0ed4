/// Scalar weights of the hand-crafted evaluator, in centipawns.
///
/// Table-shaped terms (piece-square tables, mobility, king attack) live in
/// `tables.rs` and `pst.rs`.
#[derive(Debug, Clone, Copy)]
pub struct HCEConfig {
    pub tempo_bonus: i32,

    // Material
    pub bishop_pair_bonus: i32,
    pub rook_pair_bonus: i32,
    pub bishop_pair_bonus_eg: i32,

    // Pawn structure
    pub backward_pawn_mg: i32,
    pub backward_pawn_eg: i32,
    pub supported_pawn_mg: i32,
    pub supported_pawn_eg: i32,
    pub no_pawns_mg: i32,
    pub no_pawns_eg: i32,

    // Outposts on holes of the enemy structure
    pub knight_outpost_bonus: i32,
    pub knight_almost_outpost_bonus: i32,
    pub bishop_outpost_bonus: i32,
    pub bishop_almost_outpost_bonus: i32,
    pub rook_outpost_bonus: i32,

    // Rooks and queens
    pub rook_open_file: i32,
    pub rook_semi_open_file: i32,
    pub rook_blocked_file: i32,
    pub rook_doubled_bonus: i32,
    pub rook_tarrasch_bonus: i32,
    pub queen_xrayed_penalty: i32,

    // King safety
    pub king_xrayed_penalty: i32,
    pub king_semi_open_file_penalty: i32,
    pub king_open_file_penalty: i32,
    pub castle_obstruction_penalty: i32,
    pub can_castle_bonus: i32,
    pub king_attack_weight_knight: usize,
    pub king_attack_weight_bishop: usize,
    pub king_attack_weight_rook: usize,
    pub king_attack_weight_queen: usize,

    // Threats
    pub hanging_piece_penalty: i32,
    pub pinned_piece_penalty: i32,

    // Space
    pub center_pawn_block_bonus: i32,

    // Endgame
    pub pawns_vs_none_bonus: i32,
    pub lone_king_square_penalty: i32,
    pub pawn_king_distance: i32,
    pub passed_pawn_king_distance: i32,
    pub pawn_ending_distance_scale: i32,
    pub bishop_enemy_pawn_color: i32,
    pub bishop_own_pawn_color: i32,
    pub wrong_bishop_penalty: i32,
    pub wrong_bishop_rook_file_penalty: i32,
    pub heavy_pieces_doubled_eg: i32,
    pub rook_behind_passer_eg: i32,
    pub king_distance_pawnless_scale: i32,
}

impl Default for HCEConfig {
    fn default() -> Self {
        Self {
            tempo_bonus: 20,

            bishop_pair_bonus: 46,
            rook_pair_bonus: -23,
            bishop_pair_bonus_eg: 60,

            backward_pawn_mg: -11,
            backward_pawn_eg: -30,
            supported_pawn_mg: 14,
            supported_pawn_eg: 3,
            no_pawns_mg: -50,
            no_pawns_eg: -60,

            knight_outpost_bonus: 30,
            knight_almost_outpost_bonus: 25,
            bishop_outpost_bonus: 20,
            bishop_almost_outpost_bonus: 6,
            rook_outpost_bonus: 8,

            rook_open_file: 10,
            rook_semi_open_file: -10,
            rook_blocked_file: -27,
            rook_doubled_bonus: 30,
            rook_tarrasch_bonus: 22,
            queen_xrayed_penalty: -20,

            king_xrayed_penalty: -56,
            king_semi_open_file_penalty: -23,
            king_open_file_penalty: 0,
            castle_obstruction_penalty: -7,
            can_castle_bonus: 31,
            king_attack_weight_knight: 2,
            king_attack_weight_bishop: 2,
            king_attack_weight_rook: 3,
            king_attack_weight_queen: 5,

            hanging_piece_penalty: -18,
            pinned_piece_penalty: -31,

            center_pawn_block_bonus: 8,

            pawns_vs_none_bonus: 500,
            lone_king_square_penalty: 5,
            pawn_king_distance: 5,
            passed_pawn_king_distance: 10,
            pawn_ending_distance_scale: 4,
            bishop_enemy_pawn_color: 6,
            bishop_own_pawn_color: -2,
            wrong_bishop_penalty: -5,
            wrong_bishop_rook_file_penalty: -20,
            heavy_pieces_doubled_eg: 5,
            rook_behind_passer_eg: 25,
            king_distance_pawnless_scale: 5,
        }
    }
}
