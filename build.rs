//! Generates the Zobrist key tables and version/build information at build
//! time. The tables are written to `OUT_DIR` and included by
//! `src/chess/zobrist.rs`, so hashing costs nothing at engine startup.
//!
//! The RNG is seeded with a fixed value: the keys must be identical across
//! builds, otherwise transposition tables serialized by one binary would be
//! garbage to another.

use rand::{Rng, SeedableRng};

const ZOBRIST_SEED: u64 = 0x5EED_0F_5A61_77A5;

fn generate_file(filename: &str, contents: &str) {
    let out_dir = std::env::var_os("OUT_DIR").unwrap();
    let dest_path = std::path::Path::new(&out_dir).join(filename);
    std::fs::write(dest_path, contents).unwrap();
}

fn generate_zobrist_keys() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(ZOBRIST_SEED);

    // One key per (piece, standard square).
    let piece_keys: [[u64; 64]; 12] =
        std::array::from_fn(|_| std::array::from_fn(|_| rng.r#gen()));
    generate_file("piece_zobrist_keys", &format!("{piece_keys:?}"));

    // One key per standard square the en passant square can occupy.
    let en_passant_keys: [u64; 64] = std::array::from_fn(|_| rng.r#gen());
    generate_file("en_passant_zobrist_keys", &format!("{en_passant_keys:?}"));

    // One key per castling-rights bit combination.
    let castling_keys: [u64; 16] = std::array::from_fn(|_| rng.r#gen());
    generate_file("castling_zobrist_keys", &format!("{castling_keys:?}"));

    let side_key: u64 = rng.r#gen();
    generate_file("side_zobrist_key", &format!("{side_key:?}"));
}

fn generate_build_info() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap();
    generate_file("version", &version);
    generate_file(
        "build_info",
        &format!(
            "{} {}",
            std::env::var("PROFILE").unwrap(),
            std::env::var("TARGET").unwrap()
        ),
    );
}

fn main() -> shadow_rs::SdResult<()> {
    generate_zobrist_keys();
    generate_build_info();
    shadow_rs::new()
}
