//! Packed move representation and UCI move conversion.
//!
//! A move is a single `u32` so that move lists stay small and comparisons
//! against killer and transposition-table moves are one instruction:
//!
//! ```text
//!  0000 0000 0000 0000 0000 0000 0111 1111    from square        0x7f
//!  0000 0000 0000 0000 0011 1111 1000 0000    to square          0x3f80
//!  0000 0000 0000 0011 1100 0000 0000 0000    moving piece       0x3c000
//!  0000 0000 0011 1100 0000 0000 0000 0000    captured piece     0x3c0000
//!  0000 0001 1100 0000 0000 0000 0000 0000    move kind          0x1c00000
//!  0001 1110 0000 0000 0000 0000 0000 0000    promotion piece    0x1e000000
//!  0010 0000 0000 0000 0000 0000 0000 0000    is capture         0x20000000
//! ```
//!
//! Squares are stored in mailbox coordinates (0..120 fits in 7 bits).

use std::fmt;

use arrayvec::ArrayVec;

use crate::chess::core::{
    self, Piece, Square, BLACK_PAWN, EMPTY, MAILBOX_TO_STANDARD, STANDARD_TO_MAILBOX, WHITE_KING,
    WHITE_PAWN,
};
use crate::chess::position::Position;

/// Pseudo-legal move lists never exceed 218 entries, so a fixed-capacity
/// vector avoids heap traffic in the search.
pub type MoveList = ArrayVec<Move, 256>;

/// How the move mutates the board beyond the plain from/to transfer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MoveKind {
    /// Quiet move or plain capture.
    Normal = 0,
    /// Pawn capture onto the en passant square.
    EnPassant = 1,
    /// King's two-square jump; the rook is relocated by make/undo.
    Castle = 2,
    /// Pawn reaching the last rank; the promotion piece replaces it.
    Promotion = 3,
}

/// A chess move packed into 28 bits of a `u32`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Move(u32);

/// The all-zero sentinel, distinguishable from every legal move (no legal
/// move has from-square 0, a border cell).
pub const NO_MOVE: Move = Move(0);

impl Move {
    /// Packs all move fields into the integer representation.
    #[must_use]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Piece,
        kind: MoveKind,
        promotion: Piece,
        is_capture: bool,
    ) -> Self {
        Self(
            from as u32
                | (to as u32) << 7
                | (piece as u32) << 14
                | (captured as u32) << 18
                | (kind as u32) << 22
                | (promotion as u32) << 25
                | (is_capture as u32) << 29,
        )
    }

    /// Source square in mailbox coordinates.
    #[must_use]
    pub const fn from(self) -> Square {
        (self.0 & 0x7f) as Square
    }

    /// Destination square in mailbox coordinates.
    #[must_use]
    pub const fn to(self) -> Square {
        ((self.0 & 0x3f80) >> 7) as Square
    }

    /// The piece being moved.
    #[must_use]
    pub const fn piece(self) -> Piece {
        ((self.0 & 0x3c000) >> 14) as Piece
    }

    /// The piece standing on the destination square, or [`EMPTY`].
    #[must_use]
    pub const fn captured(self) -> Piece {
        ((self.0 & 0x3c0000) >> 18) as Piece
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        match (self.0 & 0x1c00000) >> 22 {
            0 => MoveKind::Normal,
            1 => MoveKind::EnPassant,
            2 => MoveKind::Castle,
            _ => MoveKind::Promotion,
        }
    }

    /// Promotion piece code; only meaningful for [`MoveKind::Promotion`].
    #[must_use]
    pub const fn promotion(self) -> Piece {
        ((self.0 & 0x1e000000) >> 25) as Piece
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.0 & 0x20000000 != 0
    }

    /// Reconstructs a packed move from UCI text (`e2e4`, `e7e8q`) against
    /// the position it is to be played in. The move kind is inferred: a pawn
    /// reaching the last rank promotes, a king jumping two files castles, a
    /// pawn stepping diagonally onto the en passant square captures en
    /// passant.
    ///
    /// The input is expected to come from the engine itself or a sane GUI; a
    /// square that does not hold a piece of any kind is rejected, deeper
    /// legality is not checked here.
    pub fn from_uci(position: &Position, uci: &str) -> anyhow::Result<Self> {
        if !uci.is_ascii() || (uci.len() != 4 && uci.len() != 5) {
            anyhow::bail!("move must be 4 or 5 ASCII characters, got '{uci}'");
        }
        let from = STANDARD_TO_MAILBOX[core::standard_square_from_name(&uci[0..2])?];
        let to = STANDARD_TO_MAILBOX[core::standard_square_from_name(&uci[2..4])?];

        let piece = position.at(from);
        if piece >= EMPTY {
            anyhow::bail!("no piece on {} to move", &uci[0..2]);
        }
        let captured = position.at(to);
        let is_capture = captured < EMPTY;

        let mut kind = MoveKind::Normal;
        let mut promotion: Piece = 0;
        if let Some(symbol) = uci.chars().nth(4) {
            kind = MoveKind::Promotion;
            promotion = match symbol {
                'q' => 4,
                'r' => 3,
                'b' => 2,
                'n' => 1,
                _ => anyhow::bail!("unknown promotion piece '{symbol}' in '{uci}'"),
            } + position.side() as Piece * BLACK_PAWN;
        } else if core::piece_kind(piece) == WHITE_PAWN as usize
            && to == position.ep_square()
            && captured == EMPTY
        {
            kind = MoveKind::EnPassant;
        } else if core::piece_kind(piece) == WHITE_KING as usize
            && (to as isize - from as isize).abs() == 2
        {
            kind = MoveKind::Castle;
        }

        Ok(Self::new(from, to, piece, captured, kind, promotion, is_capture))
    }
}

impl fmt::Display for Move {
    /// Renders the move in pure UCI coordinate notation.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}",
            core::standard_square_name(MAILBOX_TO_STANDARD[self.from()]),
            core::standard_square_name(MAILBOX_TO_STANDARD[self.to()])
        )?;
        if matches!(self.kind(), MoveKind::Promotion) {
            let symbol = match core::piece_kind(self.promotion()) {
                4 => 'q',
                3 => 'r',
                2 => 'b',
                _ => 'n',
            };
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
