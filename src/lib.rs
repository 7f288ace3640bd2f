//! UCI chess engine built on a classic [10x12 mailbox] board with
//! incremental [Zobrist hashing], a principal-variation [negamax] search and
//! a hand-tuned tapered evaluation.
//!
//! [10x12 mailbox]: https://www.chessprogramming.org/10x12_Board
//! [Zobrist hashing]: https://www.chessprogramming.org/Zobrist_Hashing
//! [negamax]: https://www.chessprogramming.org/Negamax

// Lint levels live in the `[lints.*]` tables of Cargo.toml so they apply to
// every target of the package.

pub mod chess;
pub mod engine;
pub mod evaluation;
pub mod search;

/// Full version of the engine. Produced by `build.rs`.
pub const VERSION: &str = include_str!(concat!(env!("OUT_DIR"), "/version"));
/// Build type and target. Produced by `build.rs`.
pub const BUILD_INFO: &str = include_str!(concat!(env!("OUT_DIR"), "/build_info"));

/// Prints engine name and version, the first thing the binary does.
pub fn print_engine_info() {
    println!("{} {}", env!("CARGO_PKG_NAME"), VERSION);
}

/// Prints the build profile and target triple.
pub fn print_binary_info() {
    println!("Build: {BUILD_INFO}");
}
