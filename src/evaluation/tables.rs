//! Hand-tuned evaluation constants: material values, piece-square tables and
//! the weights of every positional term.
//!
//! Tables are indexed by standard squares from white's perspective (index 0
//! is a8); black lookups mirror the index with `^ 56`. The numbers are tuned
//! as a set: changing one in isolation is rarely an improvement.

use crate::evaluation::Score;

/// Per-piece contribution to the game phase, capped at 24 in the tapered
/// combination (promotions can push the raw sum above the cap).
pub const GAME_PHASE_SCORES: [Score; 6] = [0, 1, 1, 2, 4, 0];

/// Middlegame material values, pawn through king.
pub const PIECE_VALUES_MID: [Score; 6] = [82, 326, 352, 486, 982, 0];
/// Endgame material values.
pub const PIECE_VALUES_END: [Score; 6] = [96, 292, 304, 512, 936, 0];

/// Flat bonus for having the move.
pub const TEMPO_BONUS: Score = 8;

pub const DOUBLED_PAWN_PENALTY_MID: Score = 14;
/// Doubled pawns are very easy to target in the endgame.
pub const DOUBLED_PAWN_PENALTY_END: Score = 20;

pub const ISOLATED_PAWN_PENALTY_MID: Score = 18;
/// The side with the isolated pawn should trade off pieces.
pub const ISOLATED_PAWN_PENALTY_END: Score = 12;

pub const BACKWARDS_PAWN_PENALTY_MID: Score = 6;
/// Higher base score; the multipliers shrink in the pawn evaluation.
pub const BACKWARDS_PAWN_PENALTY_END: Score = 8;

/// Multiplied by the pawn's row, so the base value stays small.
pub const PASSED_PAWN_BONUS_MID: Score = 9;
pub const PASSED_PAWN_BONUS_END: Score = 17;

pub const BISHOP_PAIR_BONUS_MID: Score = 55;
pub const BISHOP_PAIR_BONUS_END: Score = 40;

pub const ROOK_SEMI_OPEN_FILE_BONUS_MID: Score = 15;
pub const ROOK_SEMI_OPEN_FILE_BONUS_END: Score = 20;

pub const ROOK_OPEN_FILE_BONUS_MID: Score = 27;
pub const ROOK_OPEN_FILE_BONUS_END: Score = 32;

pub const QUEEN_SEMI_OPEN_FILE_BONUS_MID: Score = 5;
pub const QUEEN_SEMI_OPEN_FILE_BONUS_END: Score = 8;

pub const QUEEN_OPEN_FILE_BONUS_MID: Score = 10;
pub const QUEEN_OPEN_FILE_BONUS_END: Score = 12;

// King tropism weights: multiplied by the euclidean distance between the
// piece and the king, then subtracted.
pub const KNIGHT_OWN_KING_TROPISM_MID: f64 = 4.0;
pub const KNIGHT_OWN_KING_TROPISM_END: f64 = 1.0;
pub const KNIGHT_ENEMY_KING_TROPISM_MID: f64 = 4.0;
pub const KNIGHT_ENEMY_KING_TROPISM_END: f64 = 3.0;
pub const BISHOP_ENEMY_KING_TROPISM_MID: f64 = 2.0;
pub const BISHOP_ENEMY_KING_TROPISM_END: f64 = 1.0;
pub const ROOK_ENEMY_KING_TROPISM_MID: f64 = 2.0;
pub const ROOK_ENEMY_KING_TROPISM_END: f64 = 1.0;
pub const QUEEN_ENEMY_KING_TROPISM_MID: f64 = 4.0;
pub const QUEEN_ENEMY_KING_TROPISM_END: f64 = 3.0;

// Pawns in the center are good.
// Pawns near the king (generally the king side) are good.
// Pawns on the 7th rank do not get high PST values since they get passed
// pawn bonuses.
#[rustfmt::skip]
pub const PAWN_PST_MID: [Score; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     45,  50,  55,  60,  65,  55,  30,  10,
     35,  40,  45,  50,  60,  45,  40,  25,
      8,   9,  20,  25,  30,  20,   7,   3,
      0,   0,  13,  18,  20,   8,   3,  -4,
      2,   2,   0,   2,   4,  -5,  12,   0,
      0,   0,   3, -26, -26,  12,  15,  -5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

// Pawns on the 6th and 7th rank are excellent, but they get passed pawn
// bonuses rather than big PST scores. Let pawns stay on the second rank
// unless they can be pushed forwards. Pawns on the flank files are better
// when they are pushed more since they can become outside passed pawns.
#[rustfmt::skip]
pub const PAWN_PST_END: [Score; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     75,  70,  60,  55,  55,  55,  65,  70,
     55,  50,  45,  40,  40,  45,  50,  50,
     30,  30,  20,  26,  26,  20,  25,  30,
     10,   0,   5,   4,   4,   5,   0,   0,
      2,   2,   0,   3,   3,   0,   2,   2,
     10,  10,   5,   5,   5,   3,   1,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
pub const KNIGHT_PST_MID: [Score; 64] = [
    -70, -60, -30, -35,  -5, -30, -20, -70,
    -60,  -5,  40,  20,  20,  40,   5, -40,
    -30,  30,  30,  45,  45,  70,  10,  15,
      0,  10,  30,  50,  50,  60,  10,   5,
    -10,   0,  15,  40,  40,  15,   0, -30,
    -30,   5,  10,  20,  20,  10,  10, -30,
    -40, -20,   1,   5,   5,   1, -20, -40,
    -60, -40, -30, -30, -30, -20, -40, -40,
];

#[rustfmt::skip]
pub const KNIGHT_PST_END: [Score; 64] = [
    -60, -40, -30, -30, -30, -30, -40, -80,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  20,  25,  25,  20,   0, -30,
    -30,   5,  25,  30,  30,  25,   5, -30,
    -30,   0,  25,  30,  30,  25,   0, -30,
    -30,   5,  20,  25,  25,  20,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
pub const BISHOP_PST_MID: [Score; 64] = [
    -20, -15, -10, -10, -10, -10, -15, -20,
    -15,   0,   0,   5,  10,  20,   0, -15,
    -10,  20,   5,  45,  30,  45,   0, -10,
    -10,  15,   5,  45,  35,  35,  15, -10,
    -10,  12,  15,  15,  15,  15,  12, -10,
    -10,  10,  10,   7,   7,  10,  10, -10,
    -10,  10,   0,   0,   0,   0,  10, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
pub const BISHOP_PST_END: [Score; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,  15,   5,  25,  25,   5,  15, -10,
    -10,   5,  20,  15,  15,  20,   5, -10,
    -10,  15,  15,  10,  10,  15,  15, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
pub const ROOK_PST_MID: [Score; 64] = [
     30,  30,  30,  35,  35,  30,  30,  35,
     25,  30,  40,  40,  45,  40,  30,  30,
      5,  10,  10,  30,  20,  30,  10,   5,
    -20,  -5,  10,  15,  15,  20,  -5, -20,
    -30,  -5,  -1,   0,   5,  -1,  -5, -20,
    -35,   0,   0,   0,   0,   0,   0, -30,
    -30, -10,   4,   6,   6,   4,  -5, -40,
    -10,  -8,   8,  10,  10,   8, -15, -15,
];

#[rustfmt::skip]
pub const ROOK_PST_END: [Score; 64] = [
     10,  10,  15,  15,  10,  10,   5,   5,
     20,  30,  33,  35,  35,  33,  30,  20,
      4,  18,  23,  25,  25,  23,  18,   4,
     -5,   0,   8,   8,   8,   8,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   5,  10,  14,  14,  10,   5,   0,
];

#[rustfmt::skip]
pub const QUEEN_PST_MID: [Score; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,  -5,   5,  -5,  -1,   5,   5, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,  10,   5,   5,   5,   0,  -5,
     -5,   5,  10,   1,  -1,   5,   5,  -5,
    -10,  15,  15,  15,  15,  15,  10, -10,
    -10,  -2,   5,   0,   0,  -2,   0, -10,
    -20, -10, -10,  -5,  -5, -15, -10, -20,
];

#[rustfmt::skip]
pub const QUEEN_PST_END: [Score; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,  30,  40,  60,  10,   0, -10,
    -10,   0,  20,  45,  50,  20,   0, -10,
     -5,   0,  10,  45,  55,  30,   0,  -5,
     -5,   0,  20,  45,  35,  20,   0,  -5,
    -10,   5,  20,  20,  20,  20,   5, -10,
    -10,   0,   5,   0,   0,   5,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
pub const KING_PST_MID: [Score; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -40, -40, -20, -20, -10,
     10,  12, -10, -55, -55, -15,  14,  13,
     19,  25,   3, -30,  -5, -20,  27,  22,
];

#[rustfmt::skip]
pub const KING_PST_END: [Score; 64] = [
      2,   8,  16,  14,  14,  16,   8,   2,
     14,  16,  20,  26,  26,  20,  16,  14,
     16,  25,  30,  31,  31,  30,  25,  16,
     16,  26,  32,  35,  35,  32,  26,  16,
      8,  25,  30,  33,  33,  30,  25,   8,
      2,   8,  16,  14,  14,  16,   8,   2,
    -18, -14, -10, -10, -10, -10, -14, -18,
    -20, -20, -20, -20, -20, -20, -20, -20,
];

/// Middlegame piece-square tables indexed by piece kind.
pub const PST_MID: [[Score; 64]; 6] = [
    PAWN_PST_MID,
    KNIGHT_PST_MID,
    BISHOP_PST_MID,
    ROOK_PST_MID,
    QUEEN_PST_MID,
    KING_PST_MID,
];

/// Endgame piece-square tables indexed by piece kind.
pub const PST_END: [[Score; 64]; 6] = [
    PAWN_PST_END,
    KNIGHT_PST_END,
    BISHOP_PST_END,
    ROOK_PST_END,
    QUEEN_PST_END,
    KING_PST_END,
];
