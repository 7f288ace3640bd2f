//! Time allocation for a single search from the `go` clock parameters.
//!
//! The allocation is more generous when an increment guarantees time keeps
//! coming back, and more careful when the remaining time dips below the
//! level the increment can sustain. Being in check or recapturing tends to
//! need extra thought, so the spending rate drops in both cases.

use crate::chess::moves::Move;
use crate::chess::position::Position;

/// Computes the time budget in milliseconds for the next search, or `None`
/// when no clock parameter constrains it (pure `go depth` / `go infinite`).
pub(super) fn allocate(
    position: &Position,
    last_move: Move,
    remaining: Option<u64>,
    increment: Option<u64>,
    movetime: Option<u64>,
    movestogo: Option<u64>,
) -> Option<u64> {
    // Base spending rate: roughly a twentieth of the remaining time per
    // move, slowed down in sharp positions.
    let mut rate = 20.0;
    if position.in_check() {
        rate -= 3.0;
    }
    if last_move.is_capture() {
        rate -= 1.5;
    }

    let remaining_ms = remaining.unwrap_or(0) as f64;

    let budget = if let Some(movetime) = movetime {
        // A fixed move time is the GUI's business; keep a safety slice for
        // the bestmove round trip.
        movetime as f64 * 0.9
    } else if increment.unwrap_or(0) > 0 {
        let increment_ms = increment.unwrap_or(0) as f64;
        if remaining_ms < increment_ms {
            // The increment alone outlasts the clock: spend freely, the
            // time comes back every move.
            remaining_ms / (rate / 10.0)
        } else {
            // Below `bound` the allocation dips under the increment so the
            // clock climbs back above it.
            let bound = increment_ms * (90_000.0 / increment_ms).sqrt();
            (increment_ms * 0.975 + (remaining_ms - bound) / (rate * 2.0))
                .max(remaining_ms / (rate * 10.0))
        }
    } else if movestogo.is_some_and(|moves| moves > 0) {
        let moves = movestogo.unwrap_or(1) as f64;
        let amount = remaining_ms * 0.8 / moves * (20.0 / rate);
        if amount > remaining_ms * 0.8 {
            remaining_ms * 0.85
        } else {
            amount
        }
    } else if remaining.is_some() {
        // Sudden death without increment.
        remaining_ms / (rate + 5.0)
    } else {
        return None;
    };

    Some(budget.max(1.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::moves::NO_MOVE;

    #[test]
    fn movetime_reserves_a_margin() {
        let position = Position::starting();
        let budget =
            allocate(&position, NO_MOVE, None, None, Some(1000), None).unwrap();
        assert_eq!(budget, 900);
    }

    #[test]
    fn movestogo_divides_remaining_time() {
        let position = Position::starting();
        let budget =
            allocate(&position, NO_MOVE, Some(60_000), None, None, Some(40)).unwrap();
        // 60000 * 0.8 / 40.
        assert_eq!(budget, 1200);
        // Never spend more than a large fraction of the clock.
        let budget = allocate(&position, NO_MOVE, Some(1000), None, None, Some(1)).unwrap();
        assert!(budget <= 850);
    }

    #[test]
    fn sudden_death_spends_a_fraction() {
        let position = Position::starting();
        let budget = allocate(&position, NO_MOVE, Some(25_000), None, None, None).unwrap();
        assert_eq!(budget, 1000);
    }

    #[test]
    fn increment_games_spend_more_when_clock_is_short() {
        let position = Position::starting();
        // Remaining below the increment: spend a large share.
        let short = allocate(&position, NO_MOVE, Some(900), Some(1000), None, None).unwrap();
        assert_eq!(short, 450);
        // Healthy clock: at least the increment is close to fully used.
        let healthy =
            allocate(&position, NO_MOVE, Some(300_000), Some(2000), None, None).unwrap();
        assert!(healthy >= 1950);
    }

    #[test]
    fn no_constraints_means_no_budget() {
        let position = Position::starting();
        assert_eq!(allocate(&position, NO_MOVE, None, None, None, None), None);
    }
}
