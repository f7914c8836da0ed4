// Lookup tables indexed by counts, ranks or files.

/// Knight material adjustment by own pawn count.
pub const KNIGHT_MATERIAL_ADJ: [i32; 9] = [-91, -23, -9, 2, 8, 15, 21, 30, 46];
/// Rook material adjustment by own pawn count.
pub const ROOK_MATERIAL_ADJ: [i32; 9] = [14, 14, 19, 18, 13, 8, -3, -20, -37];
/// Queen material adjustment by own pawn count, saturating at six.
pub const QUEEN_MATERIAL_ADJ: [i32; 7] = [-64, -27, 15, 43, 49, 27, -43];

// Pawn structure, indexed by file
pub const DOUBLED_PAWN_MG: [i32; 8] = [-15, -7, 0, -16, -16, 0, -7, -15];
pub const DOUBLED_PAWN_EG: [i32; 8] = [20, 25, 25, 30, 30, 25, 25, 20];
pub const ISOLATED_PAWN_MG: [i32; 8] = [-4, 0, -1, -21, -21, -1, 0, -4];
pub const ISOLATED_PAWN_EG: [i32; 8] = [20, 25, 25, 25, 25, 25, 25, 20];

// Passed pawns, indexed by relative rank
pub const PASSED_PAWN_MG: [i32; 8] = [0, -13, -12, -17, 3, 16, 129, 0];
pub const PASSED_PAWN_EG: [i32; 8] = [0, 20, 30, 40, 77, 154, 256, 800];

// Blockers in front of an enemy passed pawn, indexed by the blocked pawn's relative rank
pub const PASSED_PAWN_BLOCKADE_MG: [i32; 8] = [0, 0, 36, 36, 30, 28, 35, 58];
pub const PASSED_PAWN_BLOCKADE_EG: [i32; 8] = [0, 0, 30, 30, 40, 50, 80, 120];

// Mobility, indexed by the number of reachable squares
pub const MOBILITY_KNIGHT: [i32; 9] = [-39, -21, -7, -5, 1, 10, 13, 24, 30];
pub const MOBILITY_BISHOP: [i32; 15] = [-25, -19, -5, 0, 3, 6, 8, 5, 11, 13, 18, 28, 29, 29, 29];
pub const MOBILITY_ROOK: [i32; 16] = [
    -35, -27, -24, -17, -16, -14, -5, 1, 7, 8, 18, 28, 31, 40, 40, 40,
];
pub const MOBILITY_QUEEN: [i32; 29] = [
    -24, -28, -25, -22, -18, -17, -13, -11, -9, -7, 0, 3, 6, 7, 15, 20, 33, 39, 42, 69, 67, 71,
    72, 72, 72, 72, 72, 72, 72,
];

// Central pawns on a bishop's colour
pub const BISHOP_OBSTRUCTION: [i32; 9] = [6, 0, -6, -11, -13, -19, -20, -20, -20];
pub const BISHOP_OWN_OBSTRUCTION: [i32; 9] = [16, 8, -5, -10, -12, -13, -14, -15, -16];

/// Weighted king-zone attacker sum mapped to a penalty.
pub const KING_ATTACKER: [i32; 100] = {
    let ramp = [
        0, 0, 0, 1, 2, 26, 19, 36, 42, 54, 81, 54, 90, 100, 113, 115, 125,
    ];
    let mut table = [130; 100];
    let mut i = 0;
    while i < ramp.len() {
        table[i] = ramp[i];
        i += 1;
    }
    table
};

/// Shield pawns times enemy piece count.
pub const PAWN_SHIELD: [i32; 100] = {
    let ramp = [0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 4, 4];
    let mut table = [5; 100];
    let mut i = 0;
    while i < ramp.len() {
        table[i] = ramp[i];
        i += 1;
    }
    table
};

/// Storming pawns times own piece count.
pub const PAWN_STORM: [i32; 100] = {
    let ramp = [3, 3, 5, 6, 7, 8, 9, 11, 12];
    let mut table = [13; 100];
    let mut i = 0;
    while i < ramp.len() {
        table[i] = ramp[i];
        i += 1;
    }
    table
};

/// Safe central squares behind the pawn chain.
pub const SPACE: [i32; 32] = [
    0, 5, 10, 15, 22, 30, 39, 46, 50, 54, 60, 65, 70, 73, 75, 77, 80, 80, 80, 80, 80, 80, 80, 80,
    80, 80, 80, 80, 80, 80, 80, 80,
];

/// Endgame king proximity, indexed by king distance.
pub const DISTANCE_TO_SCORE: [i32; 9] = [21, 21, 15, 10, 5, 0, -5, -10, -15];

#[inline(always)]
pub fn lookup<const N: usize>(table: &[i32; N], index: usize) -> i32 {
    table[index.min(N - 1)]
}
