//! Board primitives shared by the whole crate: piece codes, the mailbox
//! layout and the per-piece movement increment tables.
//!
//! The board is a [10x12 mailbox]: 64 real squares embedded in a 120-cell
//! array whose border cells hold a `PADDING` sentinel, so a ray walk needs a
//! single comparison per step instead of explicit bounds checks. Ranks grow
//! downward in the array: mailbox cell 21 is a8 and cell 98 is h1.
//!
//! [10x12 mailbox]: https://www.chessprogramming.org/10x12_Board

/// Piece code. 0..=5 are white pawn..king, 6..=11 are black pawn..king;
/// [`EMPTY`] and [`PADDING`] fill the rest of the mailbox.
pub type Piece = u8;

/// Mailbox cell index in `0..120`.
pub type Square = usize;

#[allow(missing_docs)]
pub const WHITE_PAWN: Piece = 0;
#[allow(missing_docs)]
pub const WHITE_KNIGHT: Piece = 1;
#[allow(missing_docs)]
pub const WHITE_BISHOP: Piece = 2;
#[allow(missing_docs)]
pub const WHITE_ROOK: Piece = 3;
#[allow(missing_docs)]
pub const WHITE_QUEEN: Piece = 4;
#[allow(missing_docs)]
pub const WHITE_KING: Piece = 5;
#[allow(missing_docs)]
pub const BLACK_PAWN: Piece = 6;
#[allow(missing_docs)]
pub const BLACK_KNIGHT: Piece = 7;
#[allow(missing_docs)]
pub const BLACK_BISHOP: Piece = 8;
#[allow(missing_docs)]
pub const BLACK_ROOK: Piece = 9;
#[allow(missing_docs)]
pub const BLACK_QUEEN: Piece = 10;
#[allow(missing_docs)]
pub const BLACK_KING: Piece = 11;
/// An empty playable square.
pub const EMPTY: Piece = 12;
/// A border sentinel cell. Never changes after board setup.
pub const PADDING: Piece = 13;

/// White is side 0, black is side 1.
pub const WHITE: usize = 0;
#[allow(missing_docs)]
pub const BLACK: usize = 1;

/// Side that owns the piece: 0 for white, 1 for black. Only meaningful for
/// real piece codes.
#[must_use]
pub const fn piece_side(piece: Piece) -> usize {
    (piece >= BLACK_PAWN) as usize
}

/// Color-independent kind index in `0..6` (pawn..king).
#[must_use]
pub const fn piece_kind(piece: Piece) -> usize {
    (piece % BLACK_PAWN) as usize
}

/// FEN symbol of a piece: uppercase for white, lowercase for black.
#[must_use]
pub const fn piece_symbol(piece: Piece) -> char {
    const SYMBOLS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];
    SYMBOLS[piece as usize]
}

// Corner and castling squares in mailbox coordinates.
#[allow(missing_docs)]
pub const A8: Square = 21;
#[allow(missing_docs)]
pub const C8: Square = 23;
#[allow(missing_docs)]
pub const E8: Square = 25;
#[allow(missing_docs)]
pub const G8: Square = 27;
#[allow(missing_docs)]
pub const H8: Square = 28;
#[allow(missing_docs)]
pub const A1: Square = 91;
#[allow(missing_docs)]
pub const C1: Square = 93;
#[allow(missing_docs)]
pub const E1: Square = 95;
#[allow(missing_docs)]
pub const G1: Square = 97;
#[allow(missing_docs)]
pub const H1: Square = 98;

/// Maps standard square indices (0 = a8, 63 = h1) to mailbox cells.
#[rustfmt::skip]
pub const STANDARD_TO_MAILBOX: [Square; 64] = [
    21, 22, 23, 24, 25, 26, 27, 28,
    31, 32, 33, 34, 35, 36, 37, 38,
    41, 42, 43, 44, 45, 46, 47, 48,
    51, 52, 53, 54, 55, 56, 57, 58,
    61, 62, 63, 64, 65, 66, 67, 68,
    71, 72, 73, 74, 75, 76, 77, 78,
    81, 82, 83, 84, 85, 86, 87, 88,
    91, 92, 93, 94, 95, 96, 97, 98,
];

/// Maps mailbox cells back to standard squares. Border cells map to the
/// sentinel value 99 and must never be looked up.
#[rustfmt::skip]
pub const MAILBOX_TO_STANDARD: [usize; 120] = [
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99,  0,  1,  2,  3,  4,  5,  6,  7, 99,
    99,  8,  9, 10, 11, 12, 13, 14, 15, 99,
    99, 16, 17, 18, 19, 20, 21, 22, 23, 99,
    99, 24, 25, 26, 27, 28, 29, 30, 31, 99,
    99, 32, 33, 34, 35, 36, 37, 38, 39, 99,
    99, 40, 41, 42, 43, 44, 45, 46, 47, 99,
    99, 48, 49, 50, 51, 52, 53, 54, 55, 99,
    99, 56, 57, 58, 59, 60, 61, 62, 63, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
];

/// Movement increments per piece kind for white. A zero terminates the list
/// for pieces with fewer than eight directions. Pawn rows contain the push
/// and double-push increments and are special-cased by the generator.
#[rustfmt::skip]
pub const WHITE_INCREMENTS: [[isize; 8]; 6] = [
    [-11,  -9, -10, -20,   0,   0,   0,   0],  // pawn
    [-21, -19,  -8,  12,  21,  19,   8, -12],  // knight
    [-11,  11,   9,  -9,   0,   0,   0,   0],  // bishop
    [-10,   1,  10,  -1,   0,   0,   0,   0],  // rook
    [-11,  11,   9,  -9, -10,   1,  10,  -1],  // queen
    [-11, -10,  -9,   1,  11,  10,   9,  -1],  // king
];

/// Movement increments per piece kind for black.
#[rustfmt::skip]
pub const BLACK_INCREMENTS: [[isize; 8]; 6] = [
    [ 11,   9,  10,  20,   0,   0,   0,   0],
    [-21, -19,  -8,  12,  21,  19,   8, -12],
    [-11,  11,   9,  -9,   0,   0,   0,   0],
    [-10,   1,  10,  -1,   0,   0,   0,   0],
    [-11,  11,   9,  -9, -10,   1,  10,  -1],
    [-11, -10,  -9,   1,  11,  10,   9,  -1],
];

/// Attack increments per piece kind for white: identical to the movement
/// increments except that pawns only attack diagonally.
#[rustfmt::skip]
pub const WHITE_ATK_INCREMENTS: [[isize; 8]; 6] = [
    [-11,  -9,   0,   0,   0,   0,   0,   0],
    [-21, -19,  -8,  12,  21,  19,   8, -12],
    [-11,  11,   9,  -9,   0,   0,   0,   0],
    [-10,   1,  10,  -1,   0,   0,   0,   0],
    [-11,  11,   9,  -9, -10,   1,  10,  -1],
    [-11, -10,  -9,   1,  11,  10,   9,  -1],
];

/// Attack increments per piece kind for black.
#[rustfmt::skip]
pub const BLACK_ATK_INCREMENTS: [[isize; 8]; 6] = [
    [ 11,   9,   0,   0,   0,   0,   0,   0],
    [-21, -19,  -8,  12,  21,  19,   8, -12],
    [-11,  11,   9,  -9,   0,   0,   0,   0],
    [-10,   1,  10,  -1,   0,   0,   0,   0],
    [-11,  11,   9,  -9, -10,   1,  10,  -1],
    [-11, -10,  -9,   1,  11,  10,   9,  -1],
];

/// Diagonal ray increments, used to classify slider hits during attack
/// detection.
pub const DIAGONAL_INCREMENTS: [isize; 4] = [-11, 11, 9, -9];
/// Orthogonal ray increments.
pub const STRAIGHT_INCREMENTS: [isize; 4] = [-10, 1, 10, -1];

/// Renders a standard square index as the two-character UCI square name.
#[must_use]
pub fn standard_square_name(standard: usize) -> String {
    let file = (b'a' + (standard % 8) as u8) as char;
    let rank = (b'0' + (8 - standard / 8) as u8) as char;
    format!("{file}{rank}")
}

/// Parses a two-character UCI square name into a standard square index.
pub fn standard_square_from_name(name: &str) -> anyhow::Result<usize> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        anyhow::bail!("square name must be two characters, got '{name}'");
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        anyhow::bail!("square name out of range: '{name}'");
    }
    Ok((8 - (rank - b'0') as usize) * 8 + (file - b'a') as usize)
}
