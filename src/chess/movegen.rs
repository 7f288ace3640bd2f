//! Pseudo-legal move generation from the mailbox board.
//!
//! Candidate moves are produced by walking each piece's increment list until
//! a border sentinel or an own piece is met; sliders continue through empty
//! squares, everything else stops after one step. Legality (not leaving the
//! own king in check, castling transit safety) is *not* checked here: it is
//! the job of [`Position::make_move`], which rejects illegal candidates.

use crate::chess::core::{
    piece_kind, piece_side, Piece, Square, A1, A8, BLACK_INCREMENTS, BLACK_KING, BLACK_PAWN,
    BLACK_ROOK, C1, C8, E1, E8, EMPTY, G1, G8, H1, H8, PADDING, WHITE, WHITE_INCREMENTS,
    WHITE_KING, WHITE_ROOK,
};
use crate::chess::moves::{Move, MoveKind, MoveList};
use crate::chess::position::{CastleRights, Position};

/// The playable mailbox cells: everything outside is `PADDING` and the
/// border columns inside the range are skipped by the piece-code check.
const BOARD_CELLS: std::ops::Range<Square> = 21..99;

/// Generates all pseudo-legal moves for the side to move.
#[must_use]
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let side = position.side();

    for from in BOARD_CELLS {
        let piece = position.at(from);
        if piece >= EMPTY || piece_side(piece) != side {
            continue;
        }
        match piece_kind(piece) {
            0 => generate_pawn_moves(position, from, piece, false, &mut moves),
            5 => {
                generate_piece_moves(position, from, piece, false, &mut moves);
                generate_castles(position, &mut moves);
            }
            _ => generate_piece_moves(position, from, piece, false, &mut moves),
        }
    }
    moves
}

/// Generates only capturing moves (including en passant and capturing
/// promotions) for quiescence search.
#[must_use]
pub fn generate_captures(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let side = position.side();

    for from in BOARD_CELLS {
        let piece = position.at(from);
        if piece >= EMPTY || piece_side(piece) != side {
            continue;
        }
        match piece_kind(piece) {
            0 => generate_pawn_moves(position, from, piece, true, &mut moves),
            _ => generate_piece_moves(position, from, piece, true, &mut moves),
        }
    }
    moves
}

/// Walks the increment rays of a non-pawn piece. With `captures_only` the
/// rays are still traversed through empty squares but only capture moves are
/// recorded.
fn generate_piece_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    captures_only: bool,
    moves: &mut MoveList,
) {
    let side = piece_side(piece);
    let kind = piece_kind(piece);
    let increments = if side == WHITE {
        &WHITE_INCREMENTS[kind]
    } else {
        &BLACK_INCREMENTS[kind]
    };
    // Bishop, rook and queen slide; knight and king take a single step.
    let slider = matches!(kind, 2 | 3 | 4);

    for &increment in increments {
        if increment == 0 {
            break;
        }
        let mut to = from;
        loop {
            to = (to as isize + increment) as usize;
            let occupied = position.at(to);
            if occupied == PADDING || (occupied < EMPTY && piece_side(occupied) == side) {
                break;
            }
            if occupied < EMPTY {
                moves.push(Move::new(from, to, piece, occupied, MoveKind::Normal, 0, true));
                break;
            }
            if !captures_only {
                moves.push(Move::new(from, to, piece, EMPTY, MoveKind::Normal, 0, false));
            }
            if !slider {
                break;
            }
        }
    }
}

/// Pawn moves are fully special-cased: single pushes need an empty square
/// ahead, double pushes need the starting rank and two empty squares,
/// diagonal steps need an enemy piece or the en passant square, and any
/// arrival on the last rank fans out into the four promotions.
fn generate_pawn_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    captures_only: bool,
    moves: &mut MoveList,
) {
    let side = piece_side(piece);
    let forward: isize = if side == WHITE { -10 } else { 10 };

    if !captures_only {
        let single = (from as isize + forward) as usize;
        if position.at(single) == EMPTY {
            push_pawn_move(from, single, piece, EMPTY, false, moves);
            let on_starting_rank = if side == WHITE {
                (81..=88).contains(&from)
            } else {
                (31..=38).contains(&from)
            };
            if on_starting_rank {
                let double = (single as isize + forward) as usize;
                if position.at(double) == EMPTY {
                    moves.push(Move::new(from, double, piece, EMPTY, MoveKind::Normal, 0, false));
                }
            }
        }
    }

    for increment in [forward - 1, forward + 1] {
        let to = (from as isize + increment) as usize;
        let occupied = position.at(to);
        if occupied < EMPTY && piece_side(occupied) != side {
            push_pawn_move(from, to, piece, occupied, true, moves);
        } else if occupied == EMPTY && to == position.ep_square() {
            moves.push(Move::new(from, to, piece, EMPTY, MoveKind::EnPassant, 0, false));
        }
    }
}

/// Emits a pawn move, fanning out into the four promotions when the
/// destination is the last rank.
fn push_pawn_move(
    from: Square,
    to: Square,
    piece: Piece,
    occupied: Piece,
    is_capture: bool,
    moves: &mut MoveList,
) {
    let side = piece_side(piece);
    let last_rank = if side == WHITE {
        (21..=28).contains(&to)
    } else {
        (91..=98).contains(&to)
    };
    if last_rank {
        // Knight, bishop, rook, queen.
        for promotion_kind in 1..=4 {
            let promotion = promotion_kind + side as Piece * BLACK_PAWN;
            moves.push(Move::new(from, to, piece, occupied, MoveKind::Promotion, promotion, is_capture));
        }
    } else {
        moves.push(Move::new(from, to, piece, occupied, MoveKind::Normal, 0, is_capture));
    }
}

/// Castling is emitted only when the ability bit survives, king and rook
/// still sit on their home squares and the squares between are empty. The
/// safety of the king's path is deferred to `make_move`.
fn generate_castles(position: &Position, moves: &mut MoveList) {
    let castling = position.castling();
    if position.side() == WHITE {
        if castling.contains(CastleRights::WHITE_SHORT)
            && position.at(E1) == WHITE_KING
            && position.at(H1) == WHITE_ROOK
            && position.at(96) == EMPTY
            && position.at(97) == EMPTY
        {
            moves.push(Move::new(E1, G1, WHITE_KING, EMPTY, MoveKind::Castle, 0, false));
        }
        if castling.contains(CastleRights::WHITE_LONG)
            && position.at(E1) == WHITE_KING
            && position.at(A1) == WHITE_ROOK
            && position.at(92) == EMPTY
            && position.at(93) == EMPTY
            && position.at(94) == EMPTY
        {
            moves.push(Move::new(E1, C1, WHITE_KING, EMPTY, MoveKind::Castle, 0, false));
        }
    } else {
        if castling.contains(CastleRights::BLACK_SHORT)
            && position.at(E8) == BLACK_KING
            && position.at(H8) == BLACK_ROOK
            && position.at(26) == EMPTY
            && position.at(27) == EMPTY
        {
            moves.push(Move::new(E8, G8, BLACK_KING, EMPTY, MoveKind::Castle, 0, false));
        }
        if castling.contains(CastleRights::BLACK_LONG)
            && position.at(E8) == BLACK_KING
            && position.at(A8) == BLACK_ROOK
            && position.at(22) == EMPTY
            && position.at(23) == EMPTY
            && position.at(24) == EMPTY
        {
            moves.push(Move::new(E8, C8, BLACK_KING, EMPTY, MoveKind::Castle, 0, false));
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sorted_moves(position: &Position) -> Vec<String> {
        generate_moves(position)
            .iter()
            .map(Move::to_string)
            .sorted()
            .collect()
    }

    #[test]
    fn starting_moves() {
        let position = Position::starting();
        // Every move is legal from the starting position.
        assert_eq!(generate_moves(&position).len(), 20);
        assert_eq!(generate_captures(&position).len(), 0);
    }

    #[test]
    fn kiwipete_moves() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let mut legal = 0;
        let saved = position.undo_state();
        let mut scratch = position.clone();
        for m in generate_moves(&position) {
            if scratch.make_move(m) {
                legal += 1;
            }
            scratch.undo_move(m, &saved);
        }
        assert_eq!(legal, 48);
    }

    #[test]
    fn en_passant_and_promotions() {
        let position = Position::from_fen("4k3/6P1/8/8/2pP4/8/8/4K3 b - d3 0 1").unwrap();
        let moves = sorted_moves(&position);
        assert!(moves.contains(&"c4d3".to_string()));
        assert!(moves.contains(&"c4c3".to_string()));

        let position = Position::from_fen("4k3/6P1/8/8/2pP4/8/8/4K3 w - - 0 1").unwrap();
        let moves = sorted_moves(&position);
        for promotion in ["g7g8q", "g7g8r", "g7g8b", "g7g8n"] {
            assert!(moves.contains(&promotion.to_string()));
        }
    }

    #[test]
    fn castling_requires_empty_path_and_rights() {
        let position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = sorted_moves(&position);
        assert!(moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));

        // Without the rights the same structure generates no castles.
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        let moves = sorted_moves(&position);
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));

        // A blocked path suppresses the castle.
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R2QK2R w KQkq - 0 1").unwrap();
        let moves = sorted_moves(&position);
        assert!(moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn captures_subset_of_moves() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let all: Vec<Move> = generate_moves(&position).into_iter().collect();
        for capture in generate_captures(&position) {
            assert!(capture.is_capture() || capture.kind() == MoveKind::EnPassant);
            assert!(all.contains(&capture));
        }
    }
}
