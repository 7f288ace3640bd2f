//! Move ordering: priority scores and the lazy selection sort.
//!
//! Sorting the full move list up front is wasted work when an early move
//! causes a cutoff, so the list is sorted lazily: before each iteration the
//! best-scored move in the unsorted tail is hoisted to the current index.

use crate::chess::core::{piece_kind, piece_side, MAILBOX_TO_STANDARD, WHITE};
use crate::chess::moves::{Move, MoveKind, MoveList};
use crate::evaluation::tables::{PIECE_VALUES_MID, PST_MID};
use crate::evaluation::Score;
use crate::search::SearchState;

/// Priority of a move in the main search.
///
/// Transposition-table move first, then captures by
/// most-valuable-victim/least-valuable-attacker, promotions, killers and
/// finally quiet moves by history, each shaded by the piece-square delta of
/// the move itself.
#[must_use]
pub fn score_move(state: &SearchState, m: Move, tt_move: Move) -> Score {
    if m == tt_move {
        return 100_000;
    }

    let mut score = 0;
    let from_standard = MAILBOX_TO_STANDARD[m.from()];
    let to_standard = MAILBOX_TO_STANDARD[m.to()];
    let piece = m.piece();
    let side = piece_side(piece);
    let kind = piece_kind(piece);

    if m.is_capture() {
        let victim_kind = piece_kind(m.captured());
        score += 10_000 + 2 * (PIECE_VALUES_MID[victim_kind] - PIECE_VALUES_MID[kind]);
        // Victim's square value from its owner's perspective.
        let victim_index = if side == WHITE { to_standard ^ 56 } else { to_standard };
        score += PST_MID[victim_kind][victim_index];
    } else if state.killer_moves[0][state.ply] == m {
        score += 9_000;
    } else if state.killer_moves[1][state.ply] == m {
        score += 8_000;
    } else {
        score += 500 + state.history_moves[piece as usize][to_standard] as Score;
    }

    match m.kind() {
        MoveKind::Promotion => score += 15_000 + PIECE_VALUES_MID[piece_kind(m.promotion())],
        MoveKind::EnPassant => score += 2_000,
        // A nudge so that castling sorts ahead of shuffling moves.
        MoveKind::Castle => score += 1_000,
        MoveKind::Normal => {}
    }

    let (from_index, to_index) = if side == WHITE {
        (from_standard, to_standard)
    } else {
        (from_standard ^ 56, to_standard ^ 56)
    };
    score + PST_MID[kind][to_index] - PST_MID[kind][from_index]
}

/// Priority of a capture in quiescence search: a steeper
/// victim-minus-attacker ramp than the main search, since captures are all
/// there is to order.
#[must_use]
pub fn score_capture(m: Move, tt_move: Move) -> Score {
    if m == tt_move {
        return 100_000;
    }

    let from_standard = MAILBOX_TO_STANDARD[m.from()];
    let to_standard = MAILBOX_TO_STANDARD[m.to()];
    let piece = m.piece();
    let side = piece_side(piece);
    let kind = piece_kind(piece);
    // En passant stores EMPTY as the captured piece; EMPTY % 6 folds to the
    // pawn it actually removes.
    let victim_kind = piece_kind(m.captured());

    let mut score = 8 * (PIECE_VALUES_MID[victim_kind] - PIECE_VALUES_MID[kind]);
    let victim_index = if side == WHITE { to_standard ^ 56 } else { to_standard };
    score += PST_MID[victim_kind][victim_index];

    let (from_index, to_index) = if side == WHITE {
        (from_standard, to_standard)
    } else {
        (from_standard ^ 56, to_standard ^ 56)
    };
    score + PST_MID[kind][to_index] - PST_MID[kind][from_index]
}

/// Hoists the best-scored move of the unsorted tail to `current`. Called
/// once per iteration index, this is a selection sort that stops paying as
/// soon as a cutoff ends the loop.
pub fn sort_next_move(moves: &mut MoveList, scores: &mut [Score], current: usize) {
    for next in current + 1..moves.len() {
        if scores[current] < scores[next] {
            moves.swap(current, next);
            scores.swap(current, next);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::{BLACK_QUEEN, EMPTY, WHITE_PAWN, WHITE_ROOK};
    use crate::chess::moves::NO_MOVE;

    #[test]
    fn tt_move_sorts_first() {
        let state = SearchState::new();
        let m = Move::new(85, 65, WHITE_PAWN, EMPTY, MoveKind::Normal, 0, false);
        assert_eq!(score_move(&state, m, m), 100_000);
        assert!(score_move(&state, m, NO_MOVE) < 100_000);
    }

    #[test]
    fn winning_captures_beat_quiet_moves() {
        let state = SearchState::new();
        // Pawn takes queen on d4.
        let capture = Move::new(75, 64, WHITE_PAWN, BLACK_QUEEN, MoveKind::Normal, 0, true);
        let quiet = Move::new(85, 75, WHITE_PAWN, EMPTY, MoveKind::Normal, 0, false);
        assert!(score_move(&state, capture, NO_MOVE) > score_move(&state, quiet, NO_MOVE));
        // Rook takes queen scores below pawn takes queen.
        let rook_capture = Move::new(91, 64, WHITE_ROOK, BLACK_QUEEN, MoveKind::Normal, 0, true);
        assert!(
            score_move(&state, capture, NO_MOVE) > score_move(&state, rook_capture, NO_MOVE)
        );
    }

    #[test]
    fn lazy_sort_hoists_maximum() {
        let mut moves = MoveList::new();
        for (index, square) in [81, 82, 83, 84].iter().enumerate() {
            moves.push(Move::new(
                *square,
                square - 10,
                WHITE_PAWN,
                EMPTY,
                MoveKind::Normal,
                index as u8,
                false,
            ));
        }
        let mut scores = vec![10, 40, 20, 30];
        sort_next_move(&mut moves, &mut scores, 0);
        assert_eq!(scores[0], 40);
        assert_eq!(moves[0].from(), 82);
        sort_next_move(&mut moves, &mut scores, 1);
        assert_eq!(scores[1], 30);
    }
}
