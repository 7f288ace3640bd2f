//! Direct-mapped [transposition table].
//!
//! One fixed-size buffer allocated at engine start, indexed by
//! `key % MAX_HASH_SIZE`. There is exactly one reader/writer (the search
//! thread that owns the [`crate::search::SearchState`]), so entries need no
//! synchronization or torn-read defenses.
//!
//! [transposition table]: https://www.chessprogramming.org/Transposition_Table

use crate::chess::moves::{Move, NO_MOVE};
use crate::chess::zobrist::Key;
use crate::evaluation::Score;
use crate::search::MATE_SCORE;

/// Number of entries; roughly 85 MB of entry storage.
pub const MAX_HASH_SIZE: usize = 0x3640E2;

/// Bound kind of a stored score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Flag {
    /// The score is exact: it was inside the (alpha, beta) window.
    Exact,
    /// Upper bound: the node failed low.
    Alpha,
    /// Lower bound: the node failed high.
    Beta,
}

#[derive(Copy, Clone)]
struct Entry {
    key: Key,
    score: Score,
    flag: Flag,
    best_move: Move,
    depth: i8,
}

const EMPTY_ENTRY: Entry = Entry {
    key: 0,
    score: 0,
    flag: Flag::Exact,
    best_move: NO_MOVE,
    depth: 0,
};

/// What a probe yielded for the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Probe {
    /// A stored score usable at this depth and window: return it directly.
    Score(Score),
    /// The entry cannot cut off, but its move should be sorted first.
    HashMove(Move),
    /// No information for this position.
    Miss,
}

/// Fixed-size cache of search results keyed by position hash.
pub struct TranspositionTable {
    entries: Vec<Entry>,
}

impl TranspositionTable {
    /// Allocates the table once; reused across searches until `ucinewgame`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![EMPTY_ENTRY; MAX_HASH_SIZE],
        }
    }

    /// Erases every entry.
    pub fn clear(&mut self) {
        self.entries.fill(EMPTY_ENTRY);
    }

    fn index(key: Key) -> usize {
        (key % MAX_HASH_SIZE as Key) as usize
    }

    /// Main-search probe. An entry stored at sufficient depth cuts off
    /// fail-soft: an exact score is returned as is, bounds only when they
    /// fall outside the window. Shallower entries still contribute their
    /// best move for ordering.
    #[must_use]
    pub fn probe(&self, key: Key, alpha: Score, beta: Score, depth: i32) -> Probe {
        let entry = &self.entries[Self::index(key)];
        if entry.key != key {
            return Probe::Miss;
        }
        if i32::from(entry.depth) >= depth {
            match entry.flag {
                Flag::Exact => return Probe::Score(entry.score),
                Flag::Alpha if entry.score <= alpha => return Probe::Score(entry.score),
                Flag::Beta if entry.score >= beta => return Probe::Score(entry.score),
                _ => {}
            }
        }
        if entry.best_move != NO_MOVE {
            return Probe::HashMove(entry.best_move);
        }
        Probe::Miss
    }

    /// The stored best move for the position, or [`NO_MOVE`]. Used to seed
    /// the principal variation on a root table hit.
    #[must_use]
    pub fn stored_move(&self, key: Key) -> Move {
        let entry = &self.entries[Self::index(key)];
        if entry.key == key {
            entry.best_move
        } else {
            NO_MOVE
        }
    }

    /// Stores a main-search result. The slot is overwritten when it is
    /// empty, holds a shallower search, or the new result is exact. Mate
    /// scores are never stored: their value depends on the distance from
    /// the root and would poison unrelated probes.
    pub fn record(&mut self, key: Key, score: Score, flag: Flag, best_move: Move, depth: i32) {
        if score.abs() >= MATE_SCORE {
            return;
        }
        let entry = &mut self.entries[Self::index(key)];
        if entry.key == 0 || i32::from(entry.depth) <= depth || flag == Flag::Exact {
            *entry = Entry {
                key,
                score,
                flag,
                best_move,
                depth: depth as i8,
            };
        }
    }

    /// Quiescence probe: the same acceptance rules without a depth
    /// requirement (quiescence entries are recorded at depth -1, below any
    /// main-search request).
    #[must_use]
    pub fn probe_quiescence(&self, key: Key, alpha: Score, beta: Score) -> Probe {
        self.probe(key, alpha, beta, -1)
    }

    /// Stores a quiescence result only into an empty slot so that these
    /// shallow entries never evict main-search ones.
    pub fn record_quiescence(&mut self, key: Key, score: Score, flag: Flag, best_move: Move) {
        if score.abs() >= MATE_SCORE {
            return;
        }
        let entry = &mut self.entries[Self::index(key)];
        if entry.key == 0 {
            *entry = Entry {
                key,
                score,
                flag,
                best_move,
                depth: -1,
            };
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::moves::MoveKind;

    fn test_move() -> Move {
        Move::new(85, 65, 0, 12, MoveKind::Normal, 0, false)
    }

    #[test]
    fn probe_respects_depth_and_flags() {
        let mut table = TranspositionTable::new();
        let key = 0xDEAD_BEEF;
        table.record(key, 42, Flag::Exact, test_move(), 5);

        // Deep enough: exact score comes back.
        assert_eq!(table.probe(key, -100, 100, 5), Probe::Score(42));
        assert_eq!(table.probe(key, -100, 100, 3), Probe::HashMove(test_move()));
        // Different key: miss.
        assert_eq!(table.probe(key + 1, -100, 100, 3), Probe::Miss);
    }

    #[test]
    fn bound_flags_cut_fail_soft() {
        let mut table = TranspositionTable::new();
        let key = 17;
        table.record(key, 10, Flag::Beta, test_move(), 4);
        // A lower bound of 10 only cuts when beta <= 10.
        assert_eq!(table.probe(key, -100, 5, 4), Probe::Score(10));
        assert_eq!(table.probe(key, -100, 100, 4), Probe::HashMove(test_move()));
    }

    #[test]
    fn mate_scores_are_not_stored() {
        let mut table = TranspositionTable::new();
        let key = 99;
        table.record(key, MATE_SCORE + 3, Flag::Exact, test_move(), 9);
        assert_eq!(table.probe(key, -crate::search::INF, crate::search::INF, 0), Probe::Miss);
    }

    #[test]
    fn quiescence_entries_do_not_evict() {
        let mut table = TranspositionTable::new();
        let key = 7;
        table.record(key, 30, Flag::Exact, test_move(), 6);
        table.record_quiescence(key, -5, Flag::Alpha, NO_MOVE);
        // The main entry survives.
        assert_eq!(table.probe(key, -100, 100, 6), Probe::Score(30));
    }
}
