//! The engine puts all pieces together: it owns the position and the search
//! state and implements the [Universal Chess Interface] (UCI) for
//! communication with the client (a tournament runner or GUI).
//!
//! [`Engine::uci_loop`] is the "main loop" of the engine: it reads commands
//! from the input stream and executes them. Searches run on a worker thread
//! that owns the [`SearchState`] for their duration, so the loop keeps
//! reading stdin and `stop` takes effect mid-search through the shared stop
//! flag.
//!
//! [Universal Chess Interface]: https://www.chessprogramming.org/UCI

mod time_manager;
mod uci;

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::chess::core::WHITE;
use crate::chess::moves::{Move, NO_MOVE};
use crate::chess::position::Position;
use crate::search::{self, SearchState, MAX_PLY};
use uci::Command;

/// Stand-in budget when no clock constrains the search: a day is as good as
/// infinite, `stop` and the depth cap end the search long before.
const NO_DEADLINE_MS: u64 = 86_400_000;

/// Connects the UCI stream to the position and the search.
pub struct Engine {
    /// The next search starts from this position.
    position: Position,
    /// Present while no search runs; moved into the worker for the
    /// duration of a search.
    search: Option<SearchState>,
    worker: Option<JoinHandle<SearchState>>,
    stop: Arc<AtomicBool>,
    /// The last move replayed by a `position` command; the time manager
    /// spends extra effort after captures.
    last_move: Move,
    /// Whether the running search was started with `go infinite`. Such a
    /// search only ends on `stop`, so `quit` has to abort it instead of
    /// waiting.
    infinite_search: bool,
}

impl Engine {
    /// Creates the engine with the starting position and a fresh search
    /// state (this allocates the transposition table).
    #[must_use]
    pub fn new() -> Self {
        let search = SearchState::new();
        let stop = search.stop_signal();
        Self {
            position: Position::starting(),
            search: Some(search),
            worker: None,
            stop,
            last_move: NO_MOVE,
            infinite_search: false,
        }
    }

    /// Continuously reads the input stream and executes UCI commands until
    /// `quit` or EOF.
    ///
    /// The implementation does not aim to be exhaustive: the goal is to
    /// work with UCI-compliant GUIs and tournament runners, which send
    /// well-formed commands. Anything unrecognized is answered with an
    /// `info string` and skipped, never fatal.
    pub fn uci_loop(&mut self, input: &mut impl BufRead) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            match input.read_line(&mut line) {
                // EOF reached.
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => anyhow::bail!("error reading from input: {e}"),
            }

            match Command::parse(&line) {
                Command::Uci => handshake(),
                // The search worker keeps running; the engine itself is
                // always responsive.
                Command::IsReady => println!("readyok"),
                Command::NewGame => self.new_game(),
                Command::SetPosition { fen, moves } => self.set_position(fen.as_deref(), &moves),
                Command::Go {
                    depth,
                    wtime,
                    btime,
                    winc,
                    binc,
                    movetime,
                    movestogo,
                    infinite,
                } => self.go(depth, wtime, btime, winc, binc, movetime, movestogo, infinite),
                Command::Stop => self.stop_search(),
                Command::Quit => {
                    self.finish_search();
                    break;
                }
                Command::Unknown(command) => {
                    if !command.is_empty() {
                        println!("info string Unsupported command: {command}");
                    }
                }
            }
        }
        self.finish_search();
        Ok(())
    }

    /// Flags the running search to unwind and waits for the worker to hand
    /// the search state back. `bestmove` is printed by the worker itself.
    fn stop_search(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.join_worker();
    }

    /// Lets a bounded search run to completion (so its `bestmove` is the
    /// real answer); an infinite one is aborted since it would never end.
    fn finish_search(&mut self) {
        if self.infinite_search {
            self.stop.store(true, Ordering::Relaxed);
        }
        self.join_worker();
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            let search = worker.join().expect("search thread panicked");
            self.search = Some(search);
        }
    }

    /// Resets the engine for a new game: starting position, cleared
    /// transposition table and repetition history.
    fn new_game(&mut self) {
        self.stop_search();
        self.position = Position::starting();
        if let Some(search) = self.search.as_mut() {
            search.new_game();
        }
        self.last_move = NO_MOVE;
    }

    /// Installs the position the next search starts from and replays the
    /// given moves, appending each resulting hash to the repetition
    /// history.
    fn set_position(&mut self, fen: Option<&str>, moves: &[String]) {
        self.stop_search();
        match fen {
            Some(fen) => match Position::from_fen(fen) {
                Ok(position) => self.position = position,
                Err(e) => {
                    // Reject the FEN, keep the previous position.
                    println!("info string Invalid position: {e:#}");
                    return;
                }
            },
            None => self.position = Position::starting(),
        }

        let search = self
            .search
            .as_mut()
            .expect("search state is present while no worker runs");
        search.reset_repetitions();
        for uci_move in moves {
            let m = match Move::from_uci(&self.position, uci_move) {
                Ok(m) => m,
                Err(e) => {
                    println!("info string Unparsable move {uci_move}: {e:#}");
                    break;
                }
            };
            let saved = self.position.undo_state();
            if !self.position.make_move(m) {
                self.position.undo_move(m, &saved);
                println!("info string Illegal move: {uci_move}");
                break;
            }
            self.position.flip_side();
            search.push_repetition(self.position.hash());
            self.last_move = m;
        }
    }

    /// Configures the depth and time budgets and launches the search on the
    /// worker thread. The worker prints `info` lines and the final
    /// `bestmove`, then returns the search state.
    #[allow(clippy::too_many_arguments)]
    fn go(
        &mut self,
        depth: Option<u8>,
        wtime: Option<u64>,
        btime: Option<u64>,
        winc: Option<u64>,
        binc: Option<u64>,
        movetime: Option<u64>,
        movestogo: Option<u64>,
        infinite: bool,
    ) {
        self.stop_search();
        let mut search = self
            .search
            .take()
            .expect("search state is present while no worker runs");

        let (remaining, increment) = if self.position.side() == WHITE {
            (wtime, winc)
        } else {
            (btime, binc)
        };
        let budget = if infinite {
            None
        } else {
            time_manager::allocate(
                &self.position,
                self.last_move,
                remaining,
                increment,
                movetime,
                movestogo,
            )
        };
        search.max_time = budget.unwrap_or(NO_DEADLINE_MS);
        search.max_depth = depth.unwrap_or(MAX_PLY as u8).min(MAX_PLY as u8);
        self.infinite_search = infinite;

        // Re-arm the flag only now: a `stop` that lands after the spawn is
        // seen by the worker, one that landed before was consumed above.
        search.clear_stop();

        let mut position = self.position.clone();
        self.worker = Some(std::thread::spawn(move || {
            let (best_move, _score) = search::iterative_search(&mut search, &mut position, true);
            if best_move == NO_MOVE {
                // No legal move at the root (mate or stalemate).
                println!("bestmove 0000");
            } else {
                println!("bestmove {best_move}");
            }
            search
        }));
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Responds to the `uci` handshake by identifying the engine.
fn handshake() {
    println!("id name {} {}", env!("CARGO_PKG_NAME"), crate::VERSION);
    println!("id author {}", env!("CARGO_PKG_AUTHORS"));
    println!("uciok");
}
