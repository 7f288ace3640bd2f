//! End-to-end UCI scenarios against the compiled binary.

use std::time::Duration;

use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::{contains, is_match};

const BINARY_NAME: &str = "sagitta";

fn engine() -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("binary should be built");
    let _ = cmd.timeout(Duration::from_secs(120));
    cmd
}

#[test]
fn uci_handshake() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("uci\nquit\n")
            .assert()
            .success()
            .stdout(
                contains("id name")
                    .and(contains("id author"))
                    .and(contains("uciok")),
            ),
    );
}

#[test]
fn isready_responds() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("isready\nquit\n")
            .assert()
            .success()
            .stdout(contains("readyok")),
    );
}

#[test]
fn bestmove_from_starting_position() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("position startpos\ngo depth 4\nquit\n")
            .assert()
            .success()
            .stdout(
                contains("info depth")
                    .and(is_match(r"bestmove [a-h][1-8][a-h][1-8]").unwrap()),
            ),
    );
}

#[test]
fn winning_pawn_endgame_scores_positive() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\ngo depth 8\nquit\n")
            .assert()
            .success()
            .stdout(
                // `\d` right after the space rejects a minus sign.
                is_match(r"score cp \d+")
                    .unwrap()
                    .and(is_match(r"bestmove [a-h][1-8][a-h][1-8]").unwrap()),
            ),
    );
}

#[test]
fn movetime_produces_a_reply() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("position startpos moves e2e4 e7e5\ngo movetime 100\nquit\n")
            .assert()
            .success()
            .stdout(is_match(r"bestmove [a-h][1-8][a-h][1-8]").unwrap()),
    );
}

#[test]
fn stop_interrupts_a_deep_search() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("position startpos\ngo depth 30\nstop\nquit\n")
            .assert()
            .success()
            .stdout(contains("bestmove")),
    );
}

#[test]
fn ucinewgame_resets_quietly() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("ucinewgame\nisready\nposition startpos\ngo depth 2\nquit\n")
            .assert()
            .success()
            .stdout(contains("readyok").and(contains("bestmove"))),
    );
}

#[test]
fn unknown_commands_are_ignored() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin("banana\nuci\nquit\n")
            .assert()
            .success()
            .stdout(contains("info string Unsupported command").and(contains("uciok"))),
    );
}

#[test]
fn replayed_moves_lead_to_legal_reply() {
    let mut cmd = engine();
    drop(
        cmd.write_stdin(
            "position startpos moves e2e4 e7e5 g1f3 b8c6 f1c4 g8f6\ngo depth 4\nquit\n",
        )
        .assert()
        .success()
        .stdout(is_match(r"bestmove [a-h][1-8][a-h][1-8]").unwrap()),
    );
}
