//! Static [evaluation]: a tapered middlegame/endgame score of a position
//! without any search, in centipawn units from the side to move's
//! perspective.
//!
//! [evaluation]: https://www.chessprogramming.org/Evaluation

pub mod tables;

use crate::chess::core::{
    piece_kind, piece_side, BLACK, BLACK_PAWN, EMPTY, MAILBOX_TO_STANDARD, STANDARD_TO_MAILBOX,
    WHITE, WHITE_PAWN,
};
use crate::chess::position::Position;
use tables::*;

/// Centipawn score. Positive is good for the side it is expressed for.
pub type Score = i32;

/// How close a material configuration is to an unwinnable ending.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DrawScale {
    DeadDraw,
    CloseToDraw,
    Decisive,
}

/// Evaluates the position from the side to move's perspective.
///
/// Two passes over the board: the first fills the pawn-rank arrays, the
/// second accumulates middlegame and endgame scores per side which are then
/// blended by the game phase, scaled by the material-draw classifier and
/// returned with a tempo bonus.
#[must_use]
pub fn evaluate(position: &Position) -> Score {
    // `pawn_rank[0][file]` holds the row of the least advanced white pawn on
    // that file (9 when there is none), `pawn_rank[1][file]` the same for
    // black (0 when there is none). Rows count 1..8 from white's back rank.
    // Files 0 and 9 are sentinels so neighbour lookups need no bounds check.
    let mut pawn_rank = [[9; 10], [0; 10]];
    for standard in 0..64 {
        let piece = position.at(STANDARD_TO_MAILBOX[standard]);
        let row = (8 - standard / 8) as Score;
        let file = standard % 8 + 1;
        if piece == WHITE_PAWN && row < pawn_rank[WHITE][file] {
            pawn_rank[WHITE][file] = row;
        }
        if piece == BLACK_PAWN && row > pawn_rank[BLACK][file] {
            pawn_rank[BLACK][file] = row;
        }
    }

    let kings = [
        MAILBOX_TO_STANDARD[position.king_square(WHITE)],
        MAILBOX_TO_STANDARD[position.king_square(BLACK)],
    ];

    let mut mid = [0; 2];
    let mut end = [0; 2];
    let mut shield = [0; 2];
    let mut game_phase = 0;
    // Piece counts per side for the bishop pair and draw recognition:
    // pawns, knights, bishops, rooks, queens.
    let mut counts = [[0u32; 5]; 2];

    for standard in 0..64 {
        let piece = position.at(STANDARD_TO_MAILBOX[standard]);
        if piece >= EMPTY {
            continue;
        }
        let side = piece_side(piece);
        let kind = piece_kind(piece);
        // Black reads the tables through the vertical mirror.
        let pst_index = if side == WHITE { standard } else { standard ^ 56 };

        mid[side] += PIECE_VALUES_MID[kind] + PST_MID[kind][pst_index];
        end[side] += PIECE_VALUES_END[kind] + PST_END[kind][pst_index];
        game_phase += GAME_PHASE_SCORES[kind];
        if kind < 5 {
            counts[side][kind] += 1;
        }

        let own_king_distance = king_distance(standard, kings[side]);
        let enemy_king_distance = king_distance(standard, kings[side ^ 1]);
        let file = standard % 8 + 1;
        let own_pawnless_file = pawn_rank[side][file] == if side == WHITE { 9 } else { 0 };
        let enemy_pawnless_file = pawn_rank[side ^ 1][file] == if side == WHITE { 0 } else { 9 };

        match kind {
            0 => {
                let (pawn_mid, pawn_end) = evaluate_pawn(&pawn_rank, standard, side);
                mid[side] += pawn_mid;
                end[side] += pawn_end;
            }
            1 => {
                // A knight far from the action is a spectator.
                mid[side] -= (own_king_distance * KNIGHT_OWN_KING_TROPISM_MID) as Score;
                end[side] -= (own_king_distance * KNIGHT_OWN_KING_TROPISM_END) as Score;
                mid[side] -= (enemy_king_distance * KNIGHT_ENEMY_KING_TROPISM_MID) as Score;
                end[side] -= (enemy_king_distance * KNIGHT_ENEMY_KING_TROPISM_END) as Score;
            }
            2 => {
                mid[side] -= (enemy_king_distance * BISHOP_ENEMY_KING_TROPISM_MID) as Score;
                end[side] -= (enemy_king_distance * BISHOP_ENEMY_KING_TROPISM_END) as Score;
            }
            3 => {
                if own_pawnless_file {
                    if enemy_pawnless_file {
                        mid[side] += ROOK_OPEN_FILE_BONUS_MID;
                        end[side] += ROOK_OPEN_FILE_BONUS_END;
                    } else {
                        mid[side] += ROOK_SEMI_OPEN_FILE_BONUS_MID;
                        end[side] += ROOK_SEMI_OPEN_FILE_BONUS_END;
                    }
                }
                mid[side] -= (enemy_king_distance * ROOK_ENEMY_KING_TROPISM_MID) as Score;
                end[side] -= (enemy_king_distance * ROOK_ENEMY_KING_TROPISM_END) as Score;
            }
            4 => {
                if own_pawnless_file {
                    if enemy_pawnless_file {
                        mid[side] += QUEEN_OPEN_FILE_BONUS_MID;
                        end[side] += QUEEN_OPEN_FILE_BONUS_END;
                    } else {
                        mid[side] += QUEEN_SEMI_OPEN_FILE_BONUS_MID;
                        end[side] += QUEEN_SEMI_OPEN_FILE_BONUS_END;
                    }
                }
                mid[side] -= (enemy_king_distance * QUEEN_ENEMY_KING_TROPISM_MID) as Score;
                end[side] -= (enemy_king_distance * QUEEN_ENEMY_KING_TROPISM_END) as Score;
            }
            _ => shield[side] = evaluate_king_shield(&pawn_rank, standard, side),
        }
    }

    for side in [WHITE, BLACK] {
        if counts[side][2] >= 2 {
            mid[side] += BISHOP_PAIR_BONUS_MID;
            end[side] += BISHOP_PAIR_BONUS_END;
        }
    }

    // King safety matters in proportion to the attacking material the
    // opponent still has: an exposed king with queens on the board is a
    // target, the same king in a pawn ending is fine. Both penalties are
    // computed from the pre-penalty scores to keep the term symmetric.
    let danger = [
        king_danger(shield[WHITE], KING_PST_MID[kings[WHITE]], mid[BLACK]),
        king_danger(shield[BLACK], KING_PST_MID[kings[BLACK] ^ 56], mid[WHITE]),
    ];
    mid[WHITE] += danger[WHITE];
    mid[BLACK] += danger[BLACK];

    let phase = game_phase.min(24);
    let white_score = (mid[WHITE] * phase + end[WHITE] * (24 - phase)) / 24;
    let black_score = (mid[BLACK] * phase + end[BLACK] * (24 - phase)) / 24;

    let difference = match material_draw_scale(&counts) {
        DrawScale::DeadDraw => 0,
        DrawScale::CloseToDraw => (white_score - black_score) / 2,
        DrawScale::Decisive => white_score - black_score,
    };

    (1 - 2 * position.side() as Score) * difference + TEMPO_BONUS
}

/// Doubled, isolated, backwards and passed pawn terms for the pawn on the
/// given standard square.
fn evaluate_pawn(pawn_rank: &[[Score; 10]; 2], standard: usize, side: usize) -> (Score, Score) {
    let file = standard % 8 + 1;
    let row = (8 - standard / 8) as Score;

    let mut mid_score = 0;
    let mut end_score = 0;

    if side == WHITE {
        // Doubled: this pawn stands in front of the least advanced pawn of
        // its own file.
        if row > pawn_rank[WHITE][file] {
            mid_score -= DOUBLED_PAWN_PENALTY_MID;
            end_score -= DOUBLED_PAWN_PENALTY_END;
        }

        // Isolated: no friendly pawns on the neighbouring files.
        if pawn_rank[WHITE][file - 1] == 9 && pawn_rank[WHITE][file + 1] == 9 {
            if pawn_rank[BLACK][file] == 0 {
                // The opponent owns the semi-open file to attack it; in the
                // endgame the pawn at least has a chance to run.
                mid_score -= ISOLATED_PAWN_PENALTY_MID * 3 / 2;
                end_score -= ISOLATED_PAWN_PENALTY_END * 4 / 5;
            } else {
                mid_score -= ISOLATED_PAWN_PENALTY_MID;
                end_score -= ISOLATED_PAWN_PENALTY_END;
            }
        } else if row < pawn_rank[WHITE][file - 1] && row < pawn_rank[WHITE][file + 1] {
            // Backwards: both neighbours have advanced past this pawn, so it
            // can no longer be protected by them.
            let lag = pawn_rank[WHITE][file - 1] - row + pawn_rank[WHITE][file + 1] - row - 2;
            mid_score -= BACKWARDS_PAWN_PENALTY_MID + 2 * lag;
            end_score -= BACKWARDS_PAWN_PENALTY_END + lag;
            if pawn_rank[BLACK][file] == 0 {
                // The square in front is an outpost on a semi-open file.
                mid_score -= 3 * BACKWARDS_PAWN_PENALTY_MID;
            }
        }

        // Passed: no opposing pawn ahead on this or the neighbouring files.
        // The bonus grows linearly with advancement.
        if row >= pawn_rank[BLACK][file - 1]
            && row >= pawn_rank[BLACK][file]
            && row >= pawn_rank[BLACK][file + 1]
        {
            mid_score += row * PASSED_PAWN_BONUS_MID;
            end_score += row * PASSED_PAWN_BONUS_END;
        }
    } else {
        if row < pawn_rank[BLACK][file] {
            mid_score -= DOUBLED_PAWN_PENALTY_MID;
            end_score -= DOUBLED_PAWN_PENALTY_END;
        }

        if pawn_rank[BLACK][file - 1] == 0 && pawn_rank[BLACK][file + 1] == 0 {
            if pawn_rank[WHITE][file] == 9 {
                mid_score -= ISOLATED_PAWN_PENALTY_MID * 3 / 2;
                end_score -= ISOLATED_PAWN_PENALTY_END * 4 / 5;
            } else {
                mid_score -= ISOLATED_PAWN_PENALTY_MID;
                end_score -= ISOLATED_PAWN_PENALTY_END;
            }
        } else if row > pawn_rank[BLACK][file - 1] && row > pawn_rank[BLACK][file + 1] {
            let lag = row - pawn_rank[BLACK][file - 1] + row - pawn_rank[BLACK][file + 1] - 2;
            mid_score -= BACKWARDS_PAWN_PENALTY_MID + 2 * lag;
            end_score -= BACKWARDS_PAWN_PENALTY_END + lag;
            if pawn_rank[WHITE][file] == 9 {
                mid_score -= 3 * BACKWARDS_PAWN_PENALTY_MID;
            }
        }

        if row <= pawn_rank[WHITE][file - 1]
            && row <= pawn_rank[WHITE][file]
            && row <= pawn_rank[WHITE][file + 1]
        {
            mid_score += (9 - row) * PASSED_PAWN_BONUS_MID;
            end_score += (9 - row) * PASSED_PAWN_BONUS_END;
        }
    }

    (mid_score, end_score)
}

/// Shield contribution of a single file in front of the king: penalties for
/// the own pawn having moved (or being gone) and for an approaching enemy
/// pawn.
fn evaluate_king_pawn(pawn_rank: &[[Score; 10]; 2], file: usize, side: usize) -> Score {
    let mut score = 0;

    if side == WHITE {
        match pawn_rank[WHITE][file] {
            2 => {}         // Still at home.
            3 => score -= 6,
            4 => score -= 20,
            _ => score -= 27, // Further than two squares, or gone.
        }
        match pawn_rank[BLACK][file] {
            0 => score -= 18, // No enemy pawn left to block the file.
            4 => score -= 8,
            3 => score -= 15,
            _ => {}
        }
    } else {
        match pawn_rank[BLACK][file] {
            7 => {}
            6 => score -= 6,
            5 => score -= 20,
            _ => score -= 27,
        }
        match pawn_rank[WHITE][file] {
            9 => score -= 18,
            5 => score -= 8,
            6 => score -= 15,
            _ => {}
        }
    }

    score
}

/// Pawn-shield term for the king on the given standard square. Only a
/// middlegame score: king safety stops mattering in the endgame.
fn evaluate_king_shield(pawn_rank: &[[Score; 10]; 2], standard: usize, side: usize) -> Score {
    let column = standard % 8;
    let mut score = 0.0;

    match column {
        // Queenside: weight the three files around the king, the edge file
        // and the one closest to the center count less.
        0..=2 => {
            score += f64::from(evaluate_king_pawn(pawn_rank, 1, side)) * 0.8;
            score += f64::from(evaluate_king_pawn(pawn_rank, 2, side));
            score += f64::from(evaluate_king_pawn(pawn_rank, 3, side)) * 0.6;
        }
        // Kingside.
        5..=7 => {
            score += f64::from(evaluate_king_pawn(pawn_rank, 8, side)) * 0.5;
            score += f64::from(evaluate_king_pawn(pawn_rank, 7, side));
            score += f64::from(evaluate_king_pawn(pawn_rank, 6, side)) * 0.3;
        }
        // A centered king only worries about fully missing pawns in the
        // files around it.
        _ => {
            for file in column..column + 3 {
                if side == WHITE {
                    if pawn_rank[WHITE][file] == 9 {
                        score -= 7.0;
                        if pawn_rank[BLACK][file] == 0 {
                            score -= 15.0;
                        }
                    }
                } else if pawn_rank[BLACK][file] == 0 {
                    score -= 7.0;
                    if pawn_rank[WHITE][file] == 9 {
                        score -= 15.0;
                    }
                }
            }
        }
    }

    score as Score
}

/// Couples the king's exposure (shield damage plus a bad king PST value) to
/// the opponent's middlegame strength, clamped so that a bare-bones opponent
/// cannot generate threats.
fn king_danger(shield: Score, king_pst_mid: Score, enemy_mid: Score) -> Score {
    let exposure = shield + king_pst_mid.min(0);
    let pressure = f64::from((enemy_mid - 800).clamp(0, 2400)) / 2400.0;
    (f64::from(exposure) * pressure) as Score
}

/// Distance between two standard squares on the 8x8 board.
fn king_distance(a: usize, b: usize) -> f64 {
    let file_delta = (a % 8) as f64 - (b % 8) as f64;
    let rank_delta = (a / 8) as f64 - (b / 8) as f64;
    (file_delta * file_delta + rank_delta * rank_delta).sqrt()
}

/// Classifies endings where neither side has mating material. Counts are
/// indexed pawn, knight, bishop, rook, queen.
fn material_draw_scale(counts: &[[u32; 5]; 2]) -> DrawScale {
    for side in [WHITE, BLACK] {
        if counts[side][0] > 0 || counts[side][3] > 0 || counts[side][4] > 0 {
            return DrawScale::Decisive;
        }
    }
    let minors = [counts[WHITE][1] + counts[WHITE][2], counts[BLACK][1] + counts[BLACK][2]];
    // Lone kings, or king and minor versus king.
    if minors[WHITE] + minors[BLACK] <= 1 {
        return DrawScale::DeadDraw;
    }
    // Two knights cannot force mate against a lone king.
    for side in [WHITE, BLACK] {
        if counts[side][1] == 2 && minors[side] == 2 && minors[side ^ 1] == 0 {
            return DrawScale::DeadDraw;
        }
    }
    // Minor versus minor endings without pawns are nearly always drawn.
    if minors[WHITE] <= 1 && minors[BLACK] <= 1 {
        return DrawScale::CloseToDraw;
    }
    DrawScale::Decisive
}
