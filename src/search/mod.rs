//! Iterative-deepening [negamax] search with [alpha-beta pruning],
//! [quiescence], a transposition table and the usual selectivity stack:
//! principal-variation search, null-move pruning, late-move reductions,
//! reverse futility pruning and aspiration windows.
//!
//! The search is a plain recursive routine owned by a single thread. The
//! only external signal is the shared `stopped` flag, polled every 1024
//! nodes and observed after every child return: once it is set, every frame
//! unwinds returning 0 and the driver publishes the last fully completed
//! depth's principal variation.
//!
//! [negamax]: https://www.chessprogramming.org/Negamax
//! [alpha-beta pruning]: https://www.chessprogramming.org/Alpha-Beta
//! [quiescence]: https://www.chessprogramming.org/Quiescence_Search

pub mod ordering;
pub mod transposition;

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Instant;

use itertools::Itertools;

use crate::chess::core::{piece_kind, MAILBOX_TO_STANDARD};
use crate::chess::moves::{Move, MoveKind, NO_MOVE};
use crate::chess::position::Position;
use crate::chess::zobrist::Key;
use crate::evaluation::tables::PIECE_VALUES_MID;
use crate::evaluation::{evaluate, Score};
use transposition::{Flag, Probe, TranspositionTable};

/// Hard ceiling on the search depth and the principal-variation tables.
pub const MAX_PLY: usize = 64;

/// Larger than any reachable score.
pub const INF: Score = 1_000_000;
/// Checkmate scores start beyond this bound: a mate found at remaining
/// depth `d` is scored `MATE_SCORE + d`, so faster mates compare higher.
pub const MATE_SCORE: Score = 100_000;

/// Half-width of the aspiration window around the previous iteration's
/// score.
const ASPIRATION_WINDOW: Score = 50;
/// Moves searched at full depth before late-move reductions kick in.
const FULL_DEPTH_MOVES: usize = 2;
/// Minimum depth for late-move reductions.
const REDUCTION_LIMIT: i32 = 3;
/// Reverse futility applies at or below this depth.
const FUTILITY_MIN_DEPTH: i32 = 2;
const FUTILITY_MARGIN_PER_DEPTH: Score = 150;
/// Quiescence is depth-limited only as a safety net.
const MAX_QSEARCH_DEPTH: i32 = 1000;

/// Ring capacity for the repetition history: game moves plus search plies.
const REPETITION_TABLE_SIZE: usize = 1024;

/// Everything the search mutates: counters, heuristic tables, the
/// transposition table and the repetition history. Owned by exactly one
/// thread at a time; the engine moves it into the search worker and takes
/// it back on join.
pub struct SearchState {
    /// Depth cap for iterative deepening.
    pub max_depth: u8,
    /// Depth the search always finishes before the clock may stop it.
    pub min_depth: u8,
    /// Soft time budget for this search, in milliseconds.
    pub max_time: u64,
    start_time: Instant,
    node_count: u64,
    current_search_depth: u8,
    /// Distance from the root, in plies.
    pub(crate) ply: usize,
    pv_table: Box<[[Move; MAX_PLY]; MAX_PLY]>,
    pv_length: [usize; MAX_PLY + 1],
    /// Quiet moves that caused a beta cutoff, two slots per ply.
    pub(crate) killer_moves: [[Move; MAX_PLY]; 2],
    /// Cutoff counts per (piece, destination square).
    pub(crate) history_moves: [[u32; 64]; 12],
    table: TranspositionTable,
    repetition_table: Box<[Key; REPETITION_TABLE_SIZE]>,
    repetition_index: usize,
    stopped: Arc<AtomicBool>,
}

impl SearchState {
    /// Allocates the search state, including the transposition table. Done
    /// once at engine start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: MAX_PLY as u8,
            min_depth: 2,
            max_time: 10_000,
            start_time: Instant::now(),
            node_count: 0,
            current_search_depth: 0,
            ply: 0,
            pv_table: Box::new([[NO_MOVE; MAX_PLY]; MAX_PLY]),
            pv_length: [0; MAX_PLY + 1],
            killer_moves: [[NO_MOVE; MAX_PLY]; 2],
            history_moves: [[0; 64]; 12],
            table: TranspositionTable::new(),
            repetition_table: Box::new([0; REPETITION_TABLE_SIZE]),
            repetition_index: 0,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Per-search reset: counters, principal variation, killers and
    /// history. The transposition and repetition tables survive between
    /// searches of the same game. The stop flag is deliberately left
    /// untouched: the driver clears it before handing the state to the
    /// search thread, so a `stop` arriving in between is never lost.
    pub fn reset(&mut self) {
        self.node_count = 0;
        self.current_search_depth = 0;
        self.ply = 0;
        self.pv_table = Box::new([[NO_MOVE; MAX_PLY]; MAX_PLY]);
        self.pv_length = [0; MAX_PLY + 1];
        self.killer_moves = [[NO_MOVE; MAX_PLY]; 2];
        self.history_moves = [[0; 64]; 12];
    }

    /// Full reset for `ucinewgame`: additionally clears the transposition
    /// table and the repetition history.
    pub fn new_game(&mut self) {
        self.reset();
        self.table.clear();
        self.repetition_table = Box::new([0; REPETITION_TABLE_SIZE]);
        self.repetition_index = 0;
    }

    /// Handle the UCI driver uses to cancel a running search.
    #[must_use]
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stopped)
    }

    /// Re-arms the stop flag before a new search starts.
    pub fn clear_stop(&self) {
        self.stopped.store(false, AtomicOrdering::Relaxed);
    }

    /// Requests the search to unwind at the next poll.
    pub fn stop(&self) {
        self.stopped.store(true, AtomicOrdering::Relaxed);
    }

    fn stopped(&self) -> bool {
        self.stopped.load(AtomicOrdering::Relaxed)
    }

    /// Number of nodes visited by the last search.
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.node_count
    }

    /// Truncates the repetition history; called before replaying the game
    /// moves of a `position` command.
    pub fn reset_repetitions(&mut self) {
        self.repetition_index = 0;
    }

    /// Appends a position hash to the repetition ring after a move is made,
    /// both for game moves and for search plies.
    pub fn push_repetition(&mut self, key: Key) {
        self.repetition_index += 1;
        self.repetition_table[self.repetition_index % REPETITION_TABLE_SIZE] = key;
    }

    fn pop_repetition(&mut self) {
        self.repetition_index -= 1;
    }

    /// Scans backwards through positions with the same side to move (step
    /// 2) and reports the first recurrence. Treating the first repetition
    /// after the root as a draw is the usual engine convention.
    fn detect_repetition(&self, key: Key) -> bool {
        let mut index = self.repetition_index as isize - 2;
        while index >= 0 {
            if self.repetition_table[index as usize % REPETITION_TABLE_SIZE] == key {
                return true;
            }
            index -= 2;
        }
        false
    }

    /// Read access for tests and the UCI driver: the stored best move for a
    /// position, if the table still holds that position.
    #[must_use]
    pub fn table_move(&self, key: Key) -> Move {
        self.table.stored_move(key)
    }

    /// Polls the wall clock; sets the stop flag once the budget is spent
    /// and the minimum depth has been reached.
    fn update_deadline(&self) {
        let elapsed = self.start_time.elapsed().as_millis() as u64;
        if elapsed >= self.max_time && self.current_search_depth >= self.min_depth {
            self.stop();
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a score for a UCI `info` line: centipawns, or a mate distance in
/// full moves once the score enters the mate range.
fn format_score(score: Score, depth: u8) -> String {
    if score.abs() >= MATE_SCORE {
        let plies = (i32::from(depth) - (score.abs() - MATE_SCORE) + 1).max(1);
        let moves = (plies + 1) / 2;
        if score > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

/// Iterative deepening driver: searches depth 1, 2, 3, ... with an
/// aspiration window around the previous score, publishes an `info` line
/// per completed depth and stops on the depth cap, the clock, a found mate
/// or when the next iteration is predicted to blow the budget.
///
/// Returns the best move of the last fully completed depth together with
/// its score. The caller prints `bestmove`.
pub fn iterative_search(
    state: &mut SearchState,
    position: &mut Position,
    print_info: bool,
) -> (Move, Score) {
    state.start_time = Instant::now();
    state.reset();

    let mut alpha = -INF;
    let mut beta = INF;
    let mut running_depth: u8 = 1;

    let mut best_pv: Vec<Move> = Vec::new();
    let mut best_score: Score = 0;

    // Estimated effective branching factor, used to predict whether the
    // next iteration can finish in time.
    let mut average_branching = 1.0_f64;
    let mut previous_nodes: u64 = 1;
    // Iterations that were not answered immediately by the table.
    let mut full_searches: u32 = 0;

    while running_depth <= state.max_depth {
        state.current_search_depth = running_depth;

        let returned = negamax(state, position, alpha, beta, i32::from(running_depth), false);

        // Fell out of the aspiration window: re-search the same depth with
        // the full window. No score outside the window is ever published.
        if returned <= alpha || returned >= beta {
            alpha = -INF;
            beta = INF;
            continue;
        }
        alpha = returned - ASPIRATION_WINDOW;
        beta = returned + ASPIRATION_WINDOW;

        let stopped = state.stopped();
        let pv = &state.pv_table[0][..state.pv_length[0]];
        if !stopped {
            if !pv.is_empty() {
                best_pv = pv.to_vec();
            }
            best_score = returned;
        }

        let elapsed = state.start_time.elapsed().as_secs_f64();
        // An interrupted iteration does not count as completed.
        let completed_depth = if stopped { running_depth - 1 } else { running_depth };
        if print_info {
            println!(
                "info depth {} score {} time {} nodes {} nps {} pv {}",
                completed_depth,
                format_score(best_score, completed_depth),
                (elapsed * 1000.0) as u64,
                state.node_count,
                (state.node_count as f64 / elapsed.max(0.0001)) as u64,
                best_pv.iter().join(" ")
            );
        }

        if stopped || best_score >= MATE_SCORE {
            break;
        }

        // Skip the prediction when the iteration came straight out of the
        // transposition table.
        if state.node_count != u64::from(running_depth) && running_depth > 1 {
            if full_searches >= 1 {
                average_branching *= f64::from(full_searches);
                average_branching += state.node_count as f64 / previous_nodes as f64 * 3.0;
                average_branching /= f64::from(full_searches + 3);

                let uncertainty = (f64::from(running_depth) / (f64::from(running_depth) + 3.0)
                    + f64::from(full_searches) / (f64::from(full_searches) + 2.0))
                    / 2.0;
                if average_branching * uncertainty * elapsed * 1000.0 > state.max_time as f64 {
                    break;
                }
            }
            full_searches += 1;
        }
        previous_nodes = state.node_count.max(1);
        running_depth += 1;
    }

    let best_move = best_pv.first().copied().unwrap_or(NO_MOVE);
    (best_move, best_score)
}

/// Recursive alpha-beta search in the negamax formulation.
///
/// `allow_null` gates null-move pruning so two null moves are never played
/// in a row; the root call also disables it.
fn negamax(
    state: &mut SearchState,
    position: &mut Position,
    mut alpha: Score,
    beta: Score,
    mut depth: i32,
    allow_null: bool,
) -> Score {
    state.pv_length[state.ply] = state.ply;

    // A single recurrence after the root is scored as a draw. The root
    // itself is exempt so a best move still comes out.
    if state.ply > 0 && state.detect_repetition(position.hash()) {
        return 0;
    }

    // The heuristic tables stop at MAX_PLY; check extensions could push a
    // pathological line past them.
    if state.ply >= MAX_PLY - 1 {
        return evaluate(position);
    }

    if depth <= 0 {
        return qsearch(state, position, alpha, beta, MAX_QSEARCH_DEPTH);
    }

    state.node_count += 1;
    if state.node_count & 1023 == 0 {
        state.update_deadline();
    }
    if state.stopped() {
        return 0;
    }

    let pv_node = alpha != beta - 1;
    let in_check = position.in_check();
    // Check extension: don't let the horizon cut tactics short.
    if in_check {
        depth += 1;
    }

    let mut tt_move = NO_MOVE;
    match state.table.probe(position.hash(), alpha, beta, depth) {
        Probe::Score(score) => {
            if state.ply == 0 {
                // Even on a root table hit the driver needs a move to play.
                let stored = state.table.stored_move(position.hash());
                if stored != NO_MOVE {
                    state.pv_table[0][0] = stored;
                    state.pv_length[0] = 1;
                }
            }
            return score;
        }
        Probe::HashMove(m) => tt_move = m,
        Probe::Miss => {}
    }

    let mut flag = Flag::Alpha;
    let saved = position.undo_state();

    // Reverse futility pruning: a shallow node whose static evaluation
    // clears beta by a depth-scaled margin is not worth searching.
    if depth <= FUTILITY_MIN_DEPTH && !in_check && !pv_node {
        let evaluation = evaluate(position);
        if evaluation - FUTILITY_MARGIN_PER_DEPTH * depth >= beta {
            return evaluation;
        }
    }

    // Null-move pruning: give the opponent a free move; if their best reply
    // still fails high against beta, the position is good enough to prune.
    if depth >= 3 && allow_null && !in_check && !pv_node {
        // Adaptive reduction: 2 at depth 3, one more every 5 plies.
        let reduction = (depth + 2) / 5 + 1;
        position.make_null_move();
        state.ply += 1;
        let score = -negamax(state, position, -beta, -beta + 1, depth - 1 - reduction, false);
        state.ply -= 1;
        position.undo_null_move(&saved);
        if score >= beta {
            return beta;
        }
    }

    let mut moves = position.generate_moves();
    let mut scores: Vec<Score> = moves
        .iter()
        .map(|&m| ordering::score_move(state, m, tt_move))
        .collect();

    let mut legal_moves: usize = 0;
    let mut best_move = NO_MOVE;
    let mut best_score = -INF;

    for index in 0..moves.len() {
        ordering::sort_next_move(&mut moves, &mut scores, index);
        let m = moves[index];
        if index == 0 {
            best_move = m;
        }

        if !position.make_move(m) {
            position.undo_move(m, &saved);
            continue;
        }
        position.flip_side();
        state.ply += 1;
        state.push_repetition(position.hash());

        let is_killer = m == state.killer_moves[0][state.ply - 1]
            || m == state.killer_moves[1][state.ply - 1];

        // Late-move reductions: quiet moves sorted late are unlikely to be
        // best, so they are searched shallower first.
        let mut reduction: i32 = 0;
        if legal_moves >= FULL_DEPTH_MOVES
            && (!pv_node || legal_moves >= FULL_DEPTH_MOVES + 2)
            && depth >= REDUCTION_LIMIT
            && !in_check
            && m.kind() == MoveKind::Normal
            && !m.is_capture()
        {
            let mut amount =
                (depth as f64).sqrt() * 0.5 + (legal_moves as f64).sqrt() * 0.55 - 0.3;
            if pv_node {
                amount -= 1.0;
            }
            if is_killer {
                amount -= 1.0;
            }
            amount -= f64::from(
                state.history_moves[m.piece() as usize][MAILBOX_TO_STANDARD[m.to()]],
            ) / 20_000.0;
            // Never reduce straight into quiescence.
            reduction = (amount as i32).clamp(1, depth - 2);
        }

        // Principal-variation search: the first legal move gets the full
        // window, later moves a zero-width probe at the (possibly reduced)
        // depth.
        let mut score = if legal_moves == 0 {
            -negamax(state, position, -beta, -alpha, depth - reduction - 1, true)
        } else {
            -negamax(state, position, -alpha - 1, -alpha, depth - reduction - 1, true)
        };
        // A reduced move that beats alpha earns a zero-window verification
        // at full depth, and a full-window re-search if it still holds.
        if score > alpha && reduction > 0 && legal_moves != 0 {
            score = -negamax(state, position, -alpha - 1, -alpha, depth - 1, true);
        }
        if score > alpha && reduction > 0 {
            score = -negamax(state, position, -beta, -alpha, depth - 1, true);
        }

        state.ply -= 1;
        state.pop_repetition();
        position.flip_side();
        position.undo_move(m, &saved);

        // Scores are garbage after a timeout: never let them into the
        // table or the principal variation.
        if state.stopped() {
            return 0;
        }

        if score > best_score {
            best_score = score;

            // Prepend this move to the child's principal variation.
            let ply = state.ply;
            state.pv_table[ply][ply] = m;
            for next in ply + 1..state.pv_length[ply + 1] {
                let continuation = state.pv_table[ply + 1][next];
                state.pv_table[ply][next] = continuation;
            }
            state.pv_length[ply] = state.pv_length[ply + 1];

            if score > alpha {
                alpha = score;
                best_move = m;
                flag = Flag::Exact;

                if !m.is_capture() {
                    state.history_moves[m.piece() as usize][MAILBOX_TO_STANDARD[m.to()]] +=
                        (depth * depth) as u32;
                }

                // Fail high: remember the refutation and cut.
                if score >= beta {
                    if !m.is_capture() {
                        state.killer_moves[1][state.ply] = state.killer_moves[0][state.ply];
                        state.killer_moves[0][state.ply] = m;
                    }
                    state
                        .table
                        .record(position.hash(), best_score, Flag::Beta, best_move, depth);
                    return best_score;
                }
            }
        }

        legal_moves += 1;
    }

    // No legal moves: checkmate scored by distance so nearer mates win,
    // stalemate is a draw.
    if legal_moves == 0 {
        return if in_check { -MATE_SCORE - depth } else { 0 };
    }

    state
        .table
        .record(position.hash(), best_score, flag, best_move, depth);
    best_score
}

/// [Quiescence search]: extends the search past depth 0 through captures
/// only, so the evaluation is never taken in the middle of a capture
/// sequence.
///
/// [Quiescence search]: https://www.chessprogramming.org/Quiescence_Search
fn qsearch(
    state: &mut SearchState,
    position: &mut Position,
    mut alpha: Score,
    beta: Score,
    depth: i32,
) -> Score {
    if state.node_count & 1023 == 0 {
        state.update_deadline();
    }
    if state.stopped() {
        return 0;
    }
    state.node_count += 1;

    let mut tt_move = NO_MOVE;
    match state.table.probe_quiescence(position.hash(), alpha, beta) {
        Probe::Score(score) => return score,
        Probe::HashMove(m) => tt_move = m,
        Probe::Miss => {}
    }

    // Stand pat: the side to move can always decline the captures.
    let static_eval = evaluate(position);
    if static_eval >= beta {
        return static_eval;
    }
    if depth == 0 {
        return static_eval;
    }
    alpha = alpha.max(static_eval);

    let mut flag = Flag::Alpha;
    let saved = position.undo_state();

    let mut moves = position.generate_captures();
    let mut scores: Vec<Score> = moves
        .iter()
        .map(|&m| ordering::score_capture(m, tt_move))
        .collect();

    let mut best_score = static_eval;
    let mut best_move = NO_MOVE;

    for index in 0..moves.len() {
        ordering::sort_next_move(&mut moves, &mut scores, index);
        let m = moves[index];

        // Delta pruning: if even winning the captured piece plus a margin
        // cannot lift the score to alpha, skip the capture.
        if static_eval + PIECE_VALUES_MID[piece_kind(m.captured())] + 220 < alpha {
            continue;
        }

        if !position.make_move(m) {
            position.undo_move(m, &saved);
            continue;
        }
        position.flip_side();
        let score = -qsearch(state, position, -beta, -alpha, depth - 1);
        position.flip_side();
        position.undo_move(m, &saved);

        if state.stopped() {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = m;
            if score > alpha {
                alpha = score;
                flag = Flag::Exact;
                if score >= beta {
                    state
                        .table
                        .record_quiescence(position.hash(), best_score, Flag::Beta, best_move);
                    return best_score;
                }
            }
        }
    }

    state
        .table
        .record_quiescence(position.hash(), best_score, flag, best_move);
    best_score
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn repetition_detection_steps_by_two() {
        let mut state = SearchState::new();
        // Same-side positions land on indices of the same parity.
        state.push_repetition(100);
        state.push_repetition(200);
        state.push_repetition(300);
        state.push_repetition(400);
        state.ply = 1;

        // 200 sits two plies back from the current index parity.
        assert!(state.detect_repetition(200));
        assert!(!state.detect_repetition(300));
        assert!(!state.detect_repetition(999));
    }

    #[test]
    fn mate_score_formatting() {
        // Mate in one found at depth 4: the mated node sat at depth 4.
        assert_eq!(format_score(MATE_SCORE + 4, 4), "mate 1");
        assert_eq!(format_score(-(MATE_SCORE + 4), 4), "mate -1");
        assert_eq!(format_score(240, 7), "cp 240");
    }

    #[test]
    fn shallow_search_finds_a_move() {
        let mut state = SearchState::new();
        let mut position = Position::starting();
        state.max_depth = 3;
        state.max_time = 60_000;
        let (best_move, score) = iterative_search(&mut state, &mut position, false);
        assert_ne!(best_move, NO_MOVE);
        assert!(score.abs() < MATE_SCORE);
        // The search must leave the position untouched.
        assert_eq!(position.to_string(), Position::starting().to_string());
    }
}
