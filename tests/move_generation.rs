//! Perft: the move generator and make/undo checked against published node
//! counts, including the secondary tallies, plus a cross-check against
//! shakmaty as an independent implementation.

use pretty_assertions::assert_eq;
use sagitta::chess::position::{perft, perft_detailed, PerftCounts, Position};
use shakmaty::{fen::Fen, CastlingMode, Chess};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

#[test]
fn perft_starting_position() {
    let mut position = Position::starting();
    assert_eq!(perft(&mut position, 1), 20);
    assert_eq!(perft(&mut position, 2), 400);
    assert_eq!(perft(&mut position, 3), 8_902);
    assert_eq!(perft(&mut position, 4), 197_281);
}

#[test]
fn perft_starting_position_deep() {
    let mut position = Position::starting();
    assert_eq!(perft(&mut position, 5), 4_865_609);
}

#[test]
fn perft_kiwipete() {
    let mut position = Position::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut position, 1), 48);
    assert_eq!(perft(&mut position, 2), 2_039);
    assert_eq!(perft(&mut position, 3), 97_862);
}

#[test]
fn perft_kiwipete_deep() {
    let mut position = Position::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut position, 4), 4_085_603);
}

#[test]
fn perft_position_3() {
    let mut position = Position::from_fen(POSITION_3).unwrap();
    assert_eq!(perft(&mut position, 4), 43_238);
    assert_eq!(perft(&mut position, 5), 674_624);
}

#[test]
fn detailed_counts_starting_position() {
    let mut position = Position::starting();
    assert_eq!(
        perft_detailed(&mut position, 3),
        PerftCounts {
            nodes: 8_902,
            captures: 34,
            en_passants: 0,
            castles: 0,
            promotions: 0,
            checks: 12,
        }
    );
    assert_eq!(
        perft_detailed(&mut position, 4),
        PerftCounts {
            nodes: 197_281,
            captures: 1_576,
            en_passants: 0,
            castles: 0,
            promotions: 0,
            checks: 469,
        }
    );
}

#[test]
fn detailed_counts_kiwipete() {
    let mut position = Position::from_fen(KIWIPETE).unwrap();
    assert_eq!(
        perft_detailed(&mut position, 1),
        PerftCounts {
            nodes: 48,
            captures: 8,
            en_passants: 0,
            castles: 2,
            promotions: 0,
            checks: 0,
        }
    );
    assert_eq!(
        perft_detailed(&mut position, 2),
        PerftCounts {
            nodes: 2_039,
            captures: 351,
            en_passants: 1,
            castles: 91,
            promotions: 0,
            checks: 3,
        }
    );
    assert_eq!(
        perft_detailed(&mut position, 3),
        PerftCounts {
            nodes: 97_862,
            captures: 17_102,
            en_passants: 45,
            castles: 3_162,
            promotions: 0,
            checks: 993,
        }
    );
}

#[test]
fn detailed_counts_position_3() {
    let mut position = Position::from_fen(POSITION_3).unwrap();
    assert_eq!(
        perft_detailed(&mut position, 3),
        PerftCounts {
            nodes: 2_812,
            captures: 209,
            en_passants: 2,
            castles: 0,
            promotions: 0,
            checks: 267,
        }
    );
    assert_eq!(
        perft_detailed(&mut position, 4),
        PerftCounts {
            nodes: 43_238,
            captures: 3_348,
            en_passants: 123,
            castles: 0,
            promotions: 0,
            checks: 1_680,
        }
    );
}

// Shakmaty is a mature, independently developed move generator: agreeing
// with it on arbitrary middlegame positions rules out shared blind spots
// with the published tables above.
#[test]
fn perft_matches_shakmaty() {
    for fen in [
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1",
    ] {
        let mut position = Position::from_fen(fen).unwrap();
        let setup: Fen = fen.parse().unwrap();
        let reference: Chess = setup.into_position(CastlingMode::Standard).unwrap();
        for depth in 1..=3 {
            assert_eq!(
                perft(&mut position, depth),
                shakmaty::perft(&reference, u32::from(depth)),
                "divergence from shakmaty at depth {depth} in {fen}"
            );
        }
    }
}
