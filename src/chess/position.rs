//! Fully-specified [chess position]: the mailbox board, castling state, en
//! passant square, side to move and the incrementally maintained Zobrist
//! hash.
//!
//! Moves are applied with make/undo: [`Position::make_move`] mutates the
//! position in place and reports whether the move was legal, and
//! [`Position::undo_move`] restores it from a caller-saved [`UndoState`].
//! [Perft] lives here as well since it exercises exactly this make/undo
//! machinery.
//!
//! [chess position]: https://www.chessprogramming.org/Chess_Position
//! [Perft]: https://www.chessprogramming.org/Perft

use std::fmt::{self, Write};

use anyhow::{bail, Context};

use crate::chess::core::{
    piece_kind, piece_side, piece_symbol, standard_square_from_name, standard_square_name, Piece,
    Square, A1, A8, BLACK, BLACK_KING, BLACK_PAWN, DIAGONAL_INCREMENTS, EMPTY, H1, H8,
    MAILBOX_TO_STANDARD, PADDING, STANDARD_TO_MAILBOX, STRAIGHT_INCREMENTS, WHITE,
    WHITE_ATK_INCREMENTS, WHITE_KING, WHITE_PAWN, WHITE_ROOK,
};
use crate::chess::movegen;
use crate::chess::moves::{Move, MoveKind, MoveList};
use crate::chess::zobrist;

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

bitflags::bitflags! {
    /// Tracks the ability to [castle] each side (kingside is often referred
    /// to as O-O, queenside as O-O-O). A bit is cleared permanently when the
    /// relevant king or rook moves, or when the rook's home square is
    /// captured. A set bit without the rook at home is permitted but
    /// harmless: the move generator checks the rook's presence.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct CastleRights: u8 {
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b0001;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0010;
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0100;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b1000;
    }
}

impl fmt::Display for CastleRights {
    /// Renders the rights in the FEN format (`KQkq`, or `-` when empty).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }
        for (flag, symbol) in [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ] {
            if self.contains(flag) {
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

/// State that [`Position::make_move`] cannot recover on its own. The caller
/// snapshots it before making a move and hands it back to
/// [`Position::undo_move`].
#[derive(Copy, Clone, Debug)]
pub struct UndoState {
    ep_square: Square,
    castling: CastleRights,
    hash: zobrist::Key,
}

/// Square-centric board state. The mailbox plus cached king positions is all
/// the search ever reads; everything else (castling, en passant, hash) is
/// bookkeeping maintained by make/undo.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: [Piece; 120],
    king_positions: [Square; 2],
    castling: CastleRights,
    /// Mailbox cell a pawn just double-pushed over, 0 when there is none.
    ep_square: Square,
    /// 0 when white is to move, 1 for black.
    side: usize,
    hash: zobrist::Key,
}

impl Position {
    /// Creates the starting position of standard chess.
    #[must_use]
    pub fn starting() -> Self {
        Self::from_fen(STARTING_FEN).expect("the starting position is valid")
    }

    /// Parses a position from [Forsyth-Edwards Notation]. All six fields are
    /// accepted; the halfmove clock and fullmove counter are parsed but not
    /// tracked, so a four-field EPD-style string works too.
    ///
    /// A small set of sanity checks (exactly one king per side, no pawns on
    /// the backranks) rejects inputs the engine could not reason about.
    /// Rejection leaves the caller's current position untouched since a new
    /// value is only produced on success.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split_ascii_whitespace();

        let placement = parts.next().context("missing piece placement")?;
        let mut board = [PADDING; 120];
        for cell in STANDARD_TO_MAILBOX {
            board[cell] = EMPTY;
        }
        let mut king_positions = [0; 2];
        let mut kings = [0u32; 2];
        let mut pawns_on_backranks = 0u32;

        let mut standard = 0;
        for symbol in placement.chars() {
            match symbol {
                '/' => {
                    if standard % 8 != 0 || standard == 0 {
                        bail!("rank break after {standard} squares in '{placement}'");
                    }
                }
                '1'..='8' => standard += symbol as usize - '0' as usize,
                _ => {
                    if standard >= 64 {
                        bail!("piece placement overflows the board: '{placement}'");
                    }
                    let piece = match symbol {
                        'P' => WHITE_PAWN,
                        'N' => 1,
                        'B' => 2,
                        'R' => 3,
                        'Q' => 4,
                        'K' => WHITE_KING,
                        'p' => BLACK_PAWN,
                        'n' => 7,
                        'b' => 8,
                        'r' => 9,
                        'q' => 10,
                        'k' => BLACK_KING,
                        _ => bail!("unknown piece symbol '{symbol}' in '{placement}'"),
                    };
                    let cell = STANDARD_TO_MAILBOX[standard];
                    board[cell] = piece;
                    if piece == WHITE_KING || piece == BLACK_KING {
                        king_positions[piece_side(piece)] = cell;
                        kings[piece_side(piece)] += 1;
                    }
                    if piece_kind(piece) == WHITE_PAWN as usize && !(8..56).contains(&standard) {
                        pawns_on_backranks += 1;
                    }
                    standard += 1;
                }
            }
        }
        if standard != 64 {
            bail!("piece placement covers {standard} squares, expected 64");
        }
        if kings != [1, 1] {
            bail!("expected exactly one king per side, got {} white and {} black", kings[0], kings[1]);
        }
        if pawns_on_backranks != 0 {
            bail!("pawns can not be placed on backranks");
        }

        let side = match parts.next().context("missing side to move")? {
            "w" => WHITE,
            "b" => BLACK,
            other => bail!("unknown side to move '{other}'"),
        };

        let mut castling = CastleRights::empty();
        for symbol in parts.next().context("missing castling rights")?.chars() {
            match symbol {
                'K' => castling |= CastleRights::WHITE_SHORT,
                'Q' => castling |= CastleRights::WHITE_LONG,
                'k' => castling |= CastleRights::BLACK_SHORT,
                'q' => castling |= CastleRights::BLACK_LONG,
                '-' => {}
                _ => bail!("unknown castling symbol '{symbol}'"),
            }
        }

        let ep_square = match parts.next().context("missing en passant square")? {
            "-" => 0,
            name => STANDARD_TO_MAILBOX[standard_square_from_name(name)?],
        };

        // Halfmove clock and fullmove counter: accepted, not tracked.
        let mut result = Self {
            board,
            king_positions,
            castling,
            ep_square,
            side,
            hash: 0,
        };
        result.hash = result.compute_hash();
        Ok(result)
    }

    /// The piece code on the given mailbox cell ([`EMPTY`] or [`PADDING`]
    /// for non-pieces).
    #[inline]
    #[must_use]
    pub fn at(&self, square: Square) -> Piece {
        self.board[square]
    }

    /// 0 when white is to move, 1 for black.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Mailbox cell of the given side's king.
    #[inline]
    #[must_use]
    pub const fn king_square(&self, side: usize) -> Square {
        self.king_positions[side]
    }

    #[allow(missing_docs)]
    #[inline]
    #[must_use]
    pub const fn ep_square(&self) -> Square {
        self.ep_square
    }

    #[allow(missing_docs)]
    #[inline]
    #[must_use]
    pub const fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Zobrist hash of the position, maintained incrementally.
    #[inline]
    #[must_use]
    pub const fn hash(&self) -> zobrist::Key {
        self.hash
    }

    /// Passes the turn to the opponent. The side-to-move hash key is already
    /// toggled by [`Position::make_move`], so this only flips the field: the
    /// search and the UCI driver call it around every made move.
    #[inline]
    pub fn flip_side(&mut self) {
        self.side ^= 1;
    }

    /// Snapshot of the state make/undo cannot reconstruct by itself.
    #[inline]
    #[must_use]
    pub const fn undo_state(&self) -> UndoState {
        UndoState {
            ep_square: self.ep_square,
            castling: self.castling,
            hash: self.hash,
        }
    }

    /// Whether the side to move's king is attacked.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.is_attacked(self.king_positions[self.side])
    }

    /// Calculates the list of pseudo-legal moves. Moves that leave the own
    /// king in check are filtered later: [`Position::make_move`] reports
    /// them as illegal.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        movegen::generate_moves(self)
    }

    /// Capture-only move list for quiescence search.
    #[must_use]
    pub fn generate_captures(&self) -> MoveList {
        movegen::generate_captures(self)
    }

    /// Returns whether the side to move's opponent attacks `square`.
    ///
    /// Rays are cast outward *from* the queried square using queen and then
    /// knight increments; a hit is recognized when the first piece met on a
    /// ray is an enemy piece whose kind is compatible with that ray (sliders
    /// along their directions, king and pawn only on the first step).
    #[must_use]
    pub fn is_attacked(&self, square: Square) -> bool {
        const QUEEN_KIND: usize = 4;
        const KNIGHT_KIND: usize = 1;

        let attacker = self.side ^ 1;
        // Black pawns attack downward, so they hit `square` from above.
        let pawn_directions: [isize; 2] = if attacker == BLACK { [-11, -9] } else { [11, 9] };

        for probe in [QUEEN_KIND, KNIGHT_KIND] {
            // Queen and knight increments are color-symmetric.
            for &increment in &WHITE_ATK_INCREMENTS[probe] {
                if increment == 0 {
                    break;
                }
                let mut pos = square;
                let mut first_step = true;
                loop {
                    pos = (pos as isize + increment) as usize;
                    let occupied = self.board[pos];
                    if occupied == PADDING || (occupied < EMPTY && piece_side(occupied) != attacker)
                    {
                        break;
                    }
                    if occupied < EMPTY {
                        let kind = piece_kind(occupied);
                        if kind == probe {
                            return true;
                        }
                        if probe == KNIGHT_KIND {
                            break;
                        }
                        match kind {
                            // King: only adjacent squares.
                            5 => {
                                if first_step {
                                    return true;
                                }
                                break;
                            }
                            // Pawn: single diagonal step from the right side.
                            0 => {
                                if first_step && pawn_directions.contains(&increment) {
                                    return true;
                                }
                                break;
                            }
                            // Bishop on a diagonal ray.
                            2 => {
                                if DIAGONAL_INCREMENTS.contains(&increment) {
                                    return true;
                                }
                                break;
                            }
                            // Rook on a straight ray.
                            3 => {
                                if STRAIGHT_INCREMENTS.contains(&increment) {
                                    return true;
                                }
                                break;
                            }
                            // Enemy knight blocks a queen ray.
                            _ => break,
                        }
                    }
                    if probe == KNIGHT_KIND {
                        break;
                    }
                    first_step = false;
                }
            }
        }
        false
    }

    /// Applies a move and returns whether it was legal. On `false` the board
    /// is left mid-update and the caller **must** restore it with
    /// [`Position::undo_move`] and the [`UndoState`] captured beforehand.
    ///
    /// The hash is updated incrementally with every mutation; the
    /// side-to-move key is toggled here, while the `side` field itself is
    /// flipped by the caller via [`Position::flip_side`].
    pub fn make_move(&mut self, m: Move) -> bool {
        let from = m.from();
        let to = m.to();
        let piece = m.piece();
        let captured = m.captured();
        let side = self.side;

        let mut castle_transit: Square = 0;
        match m.kind() {
            MoveKind::Normal => {
                self.board[to] = piece;
                self.hash ^= zobrist::PIECE_KEYS[piece as usize][MAILBOX_TO_STANDARD[to]];
            }
            MoveKind::EnPassant => {
                self.board[to] = piece;
                self.hash ^= zobrist::PIECE_KEYS[piece as usize][MAILBOX_TO_STANDARD[to]];
                // The captured pawn sits behind the destination square.
                let captured_square = if side == WHITE { to + 10 } else { to - 10 };
                let captured_pawn = if side == WHITE { BLACK_PAWN } else { WHITE_PAWN };
                self.board[captured_square] = EMPTY;
                self.hash ^= zobrist::PIECE_KEYS[captured_pawn as usize]
                    [MAILBOX_TO_STANDARD[captured_square]];
            }
            MoveKind::Castle => {
                self.board[to] = piece;
                self.hash ^= zobrist::PIECE_KEYS[piece as usize][MAILBOX_TO_STANDARD[to]];
                // Queenside: rook from the A file lands right of the king.
                // Kingside: rook from the H file lands left of the king.
                let (rook_from, rook_to) = if to < from { (to - 2, to + 1) } else { (to + 1, to - 1) };
                let rook = WHITE_ROOK + side as Piece * BLACK_PAWN;
                self.board[rook_to] = rook;
                self.hash ^= zobrist::PIECE_KEYS[rook as usize][MAILBOX_TO_STANDARD[rook_to]];
                self.board[rook_from] = EMPTY;
                self.hash ^= zobrist::PIECE_KEYS[rook as usize][MAILBOX_TO_STANDARD[rook_from]];
                castle_transit = rook_to;
            }
            MoveKind::Promotion => {
                let promoted = m.promotion();
                self.board[to] = promoted;
                self.hash ^= zobrist::PIECE_KEYS[promoted as usize][MAILBOX_TO_STANDARD[to]];
            }
        }

        self.board[from] = EMPTY;
        self.hash ^= zobrist::PIECE_KEYS[piece as usize][MAILBOX_TO_STANDARD[from]];

        if m.is_capture() {
            self.hash ^= zobrist::PIECE_KEYS[captured as usize][MAILBOX_TO_STANDARD[to]];
        }

        if piece_kind(piece) == WHITE_KING as usize {
            self.king_positions[side] = to;
        }

        // Legality: the mover's king must not be left in check. Castling
        // additionally requires the king's origin and transit squares to be
        // safe (the destination was just checked via the king itself).
        if self.is_attacked(self.king_positions[side]) {
            return false;
        }
        if castle_transit != 0 && (self.is_attacked(castle_transit) || self.is_attacked(from)) {
            return false;
        }

        // A double pawn push opens an en passant opportunity; everything
        // else closes it.
        if piece_kind(piece) == WHITE_PAWN as usize && (to as isize - from as isize).abs() == 20 {
            if self.ep_square != 0 {
                self.hash ^= zobrist::EN_PASSANT_KEYS[MAILBOX_TO_STANDARD[self.ep_square]];
            }
            self.ep_square = if side == WHITE { to + 10 } else { to - 10 };
            self.hash ^= zobrist::EN_PASSANT_KEYS[MAILBOX_TO_STANDARD[self.ep_square]];
        } else if self.ep_square != 0 {
            self.hash ^= zobrist::EN_PASSANT_KEYS[MAILBOX_TO_STANDARD[self.ep_square]];
            self.ep_square = 0;
        }

        // Castling rights: hash the old bits out, clear, hash the new in.
        self.hash ^= zobrist::CASTLING_KEYS[self.castling.bits() as usize];
        if piece == WHITE_KING {
            self.castling
                .remove(CastleRights::WHITE_SHORT | CastleRights::WHITE_LONG);
        } else if piece == BLACK_KING {
            self.castling
                .remove(CastleRights::BLACK_SHORT | CastleRights::BLACK_LONG);
        }
        if from == H1 || to == H1 {
            self.castling.remove(CastleRights::WHITE_SHORT);
        }
        if from == A1 || to == A1 {
            self.castling.remove(CastleRights::WHITE_LONG);
        }
        if from == H8 || to == H8 {
            self.castling.remove(CastleRights::BLACK_SHORT);
        }
        if from == A8 || to == A8 {
            self.castling.remove(CastleRights::BLACK_LONG);
        }
        self.hash ^= zobrist::CASTLING_KEYS[self.castling.bits() as usize];

        self.hash ^= zobrist::SIDE_KEY;
        true
    }

    /// Reverts a move made by [`Position::make_move`], legal or not, using
    /// the caller-saved snapshot. The hash is restored wholesale rather than
    /// recomputed.
    pub fn undo_move(&mut self, m: Move, saved: &UndoState) {
        self.hash = saved.hash;

        let from = m.from();
        let to = m.to();
        let piece = m.piece();
        let side = self.side;

        match m.kind() {
            MoveKind::EnPassant => {
                let captured_square = if side == WHITE { to + 10 } else { to - 10 };
                self.board[captured_square] =
                    if side == WHITE { BLACK_PAWN } else { WHITE_PAWN };
            }
            MoveKind::Castle => {
                let rook = WHITE_ROOK + side as Piece * BLACK_PAWN;
                if to < from {
                    self.board[to - 2] = rook;
                    self.board[from - 1] = EMPTY;
                } else {
                    self.board[to + 1] = rook;
                    self.board[from + 1] = EMPTY;
                }
            }
            MoveKind::Normal | MoveKind::Promotion => {}
        }

        self.board[to] = m.captured();
        self.board[from] = piece;

        self.ep_square = saved.ep_square;
        self.castling = saved.castling;

        if piece_kind(piece) == WHITE_KING as usize {
            self.king_positions[side] = from;
        }
    }

    /// Gives the turn away without moving: flips the side (and its hash
    /// key) and clears the en passant square. Used by null-move pruning.
    pub fn make_null_move(&mut self) {
        self.side ^= 1;
        self.hash ^= zobrist::SIDE_KEY;
        if self.ep_square != 0 {
            self.hash ^= zobrist::EN_PASSANT_KEYS[MAILBOX_TO_STANDARD[self.ep_square]];
            self.ep_square = 0;
        }
    }

    /// Reverts [`Position::make_null_move`].
    pub fn undo_null_move(&mut self, saved: &UndoState) {
        self.side ^= 1;
        self.ep_square = saved.ep_square;
        self.hash = saved.hash;
    }

    /// Computes the Zobrist hash from scratch. Only used when a position is
    /// created; afterwards the hash is maintained incrementally, and the two
    /// must agree bit-for-bit.
    #[must_use]
    pub fn compute_hash(&self) -> zobrist::Key {
        let mut key = 0;

        for standard in 0..64 {
            let piece = self.board[STANDARD_TO_MAILBOX[standard]];
            if piece < EMPTY {
                key ^= zobrist::PIECE_KEYS[piece as usize][standard];
            }
        }

        if self.ep_square != 0 {
            key ^= zobrist::EN_PASSANT_KEYS[MAILBOX_TO_STANDARD[self.ep_square]];
        }

        key ^= zobrist::CASTLING_KEYS[self.castling.bits() as usize];

        if self.side == BLACK {
            key ^= zobrist::SIDE_KEY;
        }

        key
    }
}

impl fmt::Display for Position {
    /// Renders the position in FEN. The halfmove clock and fullmove counter
    /// are not tracked and always print as `0 1`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in 0..8 {
            let mut empty_squares = 0;
            for file in 0..8 {
                let piece = self.board[STANDARD_TO_MAILBOX[rank * 8 + file]];
                if piece == EMPTY {
                    empty_squares += 1;
                    continue;
                }
                if empty_squares != 0 {
                    write!(f, "{empty_squares}")?;
                    empty_squares = 0;
                }
                f.write_char(piece_symbol(piece))?;
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != 7 {
                f.write_char('/')?;
            }
        }
        write!(f, " {} ", if self.side == WHITE { 'w' } else { 'b' })?;
        write!(f, "{} ", self.castling)?;
        match self.ep_square {
            0 => write!(f, "- ")?,
            ep => write!(f, "{} ", standard_square_name(MAILBOX_TO_STANDARD[ep]))?,
        }
        write!(f, "0 1")
    }
}

impl fmt::Debug for Position {
    /// Dumps the board in a human-readable format: `.` for an empty square,
    /// the FEN symbol for a piece.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Board:")?;
        for rank in 0..8 {
            for file in 0..8 {
                let piece = self.board[STANDARD_TO_MAILBOX[rank * 8 + file]];
                match piece {
                    EMPTY => f.write_char('.')?,
                    _ => f.write_char(piece_symbol(piece))?,
                }
                if file != 7 {
                    f.write_char(' ')?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "Side to move: {}", if self.side == WHITE { "white" } else { "black" })?;
        writeln!(f, "Castling rights: {}", self.castling)?;
        writeln!(f, "En passant: {:?}", self.ep_square)?;
        writeln!(f, "FEN: {self}")
    }
}

/// Counts gathered by [`perft_detailed`]. The secondary tallies catch move
/// generator bugs a plain node count can miss.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PerftCounts {
    #[allow(missing_docs)]
    pub nodes: u64,
    /// Captures, including en passant.
    pub captures: u64,
    #[allow(missing_docs)]
    pub en_passants: u64,
    #[allow(missing_docs)]
    pub castles: u64,
    #[allow(missing_docs)]
    pub promotions: u64,
    /// Moves that give check.
    pub checks: u64,
}

/// [Perft] walks the tree of legal moves to the given depth and counts the
/// leaves: the only function of move generation and make/undo that can be
/// checked against published reference values.
///
/// [Perft]: https://www.chessprogramming.org/Perft
#[must_use]
pub fn perft(position: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let saved = position.undo_state();
    let mut nodes = 0;
    for m in position.generate_moves() {
        if position.make_move(m) {
            position.flip_side();
            nodes += perft(position, depth - 1);
            position.flip_side();
        }
        position.undo_move(m, &saved);
    }
    nodes
}

/// Perft with secondary counts. Moves are classified at the last ply, checks
/// by probing the opponent's king after the move is made.
#[must_use]
pub fn perft_detailed(position: &mut Position, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    let saved = position.undo_state();
    for m in position.generate_moves() {
        if position.make_move(m) {
            position.flip_side();
            if depth == 1 {
                if m.is_capture() {
                    counts.captures += 1;
                } else if m.kind() == MoveKind::EnPassant {
                    counts.captures += 1;
                    counts.en_passants += 1;
                }
                match m.kind() {
                    MoveKind::Promotion => counts.promotions += 1,
                    MoveKind::Castle => counts.castles += 1,
                    _ => {}
                }
                if position.in_check() {
                    counts.checks += 1;
                }
            }
            let children = perft_detailed(position, depth - 1);
            counts.nodes += children.nodes;
            counts.captures += children.captures;
            counts.en_passants += children.en_passants;
            counts.castles += children.castles;
            counts.promotions += children.promotions;
            counts.checks += children.checks;
            position.flip_side();
        }
        position.undo_move(m, &saved);
    }
    counts
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_position() {
        let position = Position::starting();
        assert_eq!(position.to_string(), STARTING_FEN);
        assert_eq!(position.side(), WHITE);
        assert_eq!(position.castling(), CastleRights::all());
        assert_eq!(position.ep_square(), 0);
        assert_eq!(position.king_square(WHITE), 95);
        assert_eq!(position.king_square(BLACK), 25);
        assert_eq!(position.hash(), position.compute_hash());
        assert!(!position.in_check());
    }

    #[test]
    fn fen_roundtrip() {
        for fen in [
            "rnbqk1nr/p3bppp/1p2p3/2ppP3/3P4/P7/1PP1NPPP/R1BQKBNR w KQkq c6 0 1",
            "2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 1",
            "r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 1",
            "8/8/8/8/2P5/3k4/8/KB6 b - c3 0 1",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().to_string(), fen);
        }
    }

    #[test]
    fn malformed_fen_rejected() {
        // Missing fields.
        assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        // Garbage placement.
        assert!(Position::from_fen("3k2p1N/82/8/8/7B/6K1/3R4/8 b - - 0 1").is_err());
        // Two white kings.
        assert!(Position::from_fen("3k4/8/8/8/8/8/8/2KK4 w - - 0 1").is_err());
        // No black king.
        assert!(Position::from_fen("8/8/8/8/8/8/8/3K4 w - - 0 1").is_err());
        // Pawn on the eighth rank.
        assert!(Position::from_fen("3kP3/8/8/8/8/8/8/3K4 w - - 0 1").is_err());
        // Unicode garbage must not crash the parser.
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 b 88 🔠 🔠").is_err());
    }

    #[test]
    fn null_move_roundtrip() {
        let mut position =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1")
                .unwrap();
        let original = position.clone();
        let saved = position.undo_state();
        position.make_null_move();
        assert_eq!(position.side(), BLACK);
        assert_eq!(position.ep_square(), 0);
        assert_eq!(position.hash(), position.compute_hash());
        position.undo_null_move(&saved);
        assert!(position == original);
    }

    #[test]
    fn attack_detection() {
        // Black to move: white attacks the queried squares.
        let position = Position::from_fen("4k3/8/8/8/8/8/3P4/R3K2N b - - 0 1").unwrap();
        // Rook on a1 controls the a file and the first rank.
        assert!(position.is_attacked(STANDARD_TO_MAILBOX[8])); // a7
        assert!(position.is_attacked(92)); // b1
        // Pawn on d2 attacks c3 and e3.
        assert!(position.is_attacked(73)); // c3
        assert!(position.is_attacked(75)); // e3
        // It does not attack d3.
        assert!(!position.is_attacked(74));
        // Knight on h1 attacks g3.
        assert!(position.is_attacked(77));
        // King on e1 attacks d1.
        assert!(position.is_attacked(94));
        // Nothing attacks h5.
        assert!(!position.is_attacked(58));
    }
}
