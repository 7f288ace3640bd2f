//! Search soundness: mates, stalemates, repetition handling and the
//! transposition table agreeing with the published move.

use pretty_assertions::assert_eq;
use sagitta::chess::moves::{Move, NO_MOVE};
use sagitta::chess::position::Position;
use sagitta::search::{iterative_search, SearchState, MATE_SCORE};

fn search(fen: &str, depth: u8) -> (Move, i32) {
    let mut state = SearchState::new();
    let mut position = Position::from_fen(fen).unwrap();
    state.max_depth = depth;
    state.max_time = 60_000;
    iterative_search(&mut state, &mut position, false)
}

#[test]
fn finds_mate_in_one() {
    let (best_move, score) = search("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1", 5);
    assert_eq!(best_move.to_string(), "a1a8");
    assert!(score >= MATE_SCORE, "mate must be reported, got {score}");
}

#[test]
fn finds_back_rank_mate_for_black() {
    let (best_move, score) = search("r6k/8/8/8/8/8/5PPP/6K1 b - - 0 1", 5);
    assert_eq!(best_move.to_string(), "a8a1");
    assert!(score >= MATE_SCORE);
}

#[test]
fn stalemate_returns_no_move_and_draw_score() {
    let (best_move, score) = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3);
    assert_eq!(best_move, NO_MOVE);
    assert_eq!(score, 0);
}

#[test]
fn checkmated_root_returns_no_move() {
    // Back-rank mate already delivered; black has no move.
    let (best_move, _score) = search("R5k1/5ppp/8/8/8/8/8/7K b - - 0 1", 3);
    assert_eq!(best_move, NO_MOVE);
}

#[test]
fn king_and_pawn_endgame_is_winning() {
    let (best_move, score) = search("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", 8);
    assert_ne!(best_move, NO_MOVE);
    assert!(score > 0, "KP vs K must evaluate as winning, got {score}");
}

#[test]
fn repeated_positions_score_as_draw() {
    // Replay the knight shuffle twice, the way the UCI driver replays a
    // `position startpos moves ...` command: the position after 1.Nc3 has
    // now occurred twice in the game history.
    let mut state = SearchState::new();
    let mut position = Position::starting();
    for uci in [
        "b1c3", "b8c6", "c3b1", "c6b8", "b1c3", "b8c6", "c3b1", "c6b8",
    ] {
        let m = Move::from_uci(&position, uci).unwrap();
        assert!(position.make_move(m));
        position.flip_side();
        state.push_repetition(position.hash());
    }
    state.max_depth = 4;
    state.max_time = 60_000;
    let (best_move, score) = iterative_search(&mut state, &mut position, false);
    assert_ne!(best_move, NO_MOVE);
    // 1.Nc3 would recreate a position already seen and is scored as a
    // draw inside the search, so a move with a real score wins the root.
    assert_ne!(best_move.to_string(), "b1c3");
    assert!(score > 0 && score < MATE_SCORE, "got {score}");
}

#[test]
fn table_remembers_the_published_move() {
    let mut state = SearchState::new();
    let mut position = Position::starting();
    state.max_depth = 5;
    state.max_time = 60_000;
    let (best_move, _score) = iterative_search(&mut state, &mut position, false);
    assert_ne!(best_move, NO_MOVE);
    // Probing the root key returns the move the search just published.
    assert_eq!(state.table_move(position.hash()), best_move);
}

#[test]
fn deeper_search_still_agrees_with_the_table() {
    let mut state = SearchState::new();
    let mut position =
        Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 0 1")
            .unwrap();
    for depth in [3, 5] {
        state.max_depth = depth;
        state.max_time = 60_000;
        let (best_move, _score) = iterative_search(&mut state, &mut position, false);
        assert_ne!(best_move, NO_MOVE);
        assert_eq!(state.table_move(position.hash()), best_move);
    }
}
