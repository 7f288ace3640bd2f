//! [Zobrist hashing] key tables.
//!
//! The keys are pseudo-random numbers generated by `build.rs` from a fixed
//! seed and compiled straight into the binary. They must be combined the
//! same way by the incremental updates in make/undo and by
//! [`crate::chess::position::Position::compute_hash`]: the two are asserted
//! to agree in the test suite.
//!
//! [Zobrist hashing]: https://www.chessprogramming.org/Zobrist_Hashing

/// Zobrist key is a 64-bit integer.
pub type Key = u64;

/// One key per (piece code, standard square).
pub(crate) const PIECE_KEYS: [[Key; 64]; 12] =
    include!(concat!(env!("OUT_DIR"), "/piece_zobrist_keys"));

/// One key per standard square the en passant square can occupy.
pub(crate) const EN_PASSANT_KEYS: [Key; 64] =
    include!(concat!(env!("OUT_DIR"), "/en_passant_zobrist_keys"));

/// One key per combination of the four castling-ability bits.
pub(crate) const CASTLING_KEYS: [Key; 16] =
    include!(concat!(env!("OUT_DIR"), "/castling_zobrist_keys"));

/// Hashed in when black is to move.
pub(crate) const SIDE_KEY: Key = include!(concat!(env!("OUT_DIR"), "/side_zobrist_key"));

#[cfg(test)]
mod tests {
    use super::*;

    // The build script seeds its RNG, so the tables are stable and can never
    // degenerate into zeros.
    #[test]
    fn keys_are_nonzero() {
        assert!(PIECE_KEYS.iter().flatten().all(|&key| key != 0));
        assert!(EN_PASSANT_KEYS.iter().all(|&key| key != 0));
        assert_ne!(SIDE_KEY, 0);
    }
}
