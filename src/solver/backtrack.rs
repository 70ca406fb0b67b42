use rand::seq::SliceRandom;
use rand::Rng;
use std::num::NonZeroU8;

use super::board_state::BoardState;

/// A point-in-time copy of the solving state, taken immediately before a
/// speculative assignment, together with the cell and value that were tried.
pub struct Snapshot {
    state: BoardState,
    cell: usize,
    value: NonZeroU8,
}

/// The stack of branching points taken so far.
///
/// Each entry captures the state right before a guess, with the guessed value
/// already removed from the guessed cell's candidates. Restoring an entry
/// therefore resumes the search on the remaining alternatives and can never
/// re-try the value that just failed. When an entry is restored and the
/// guessed cell has no alternatives left, that branch is exhausted too and
/// the next entry down is restored instead.
pub struct SnapshotStack {
    stack: Vec<Snapshot>,
}

impl SnapshotStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Picks a speculative assignment, saves the current state and applies
    /// the assignment. The guessed cell is one of the empty cells with the
    /// fewest candidates; the tie between equally small cells and the choice
    /// of value are both decided by `rng`.
    pub fn commit_guess<R: Rng>(&mut self, state: &mut BoardState, rng: &mut R) {
        let (cell, value) = choose_guess(state, rng);
        state.candidates.remove(cell, value);
        self.stack.push(Snapshot {
            state: state.clone(),
            cell,
            value,
        });
        log::debug!(
            "guess {} at cell {} (depth {})",
            value.get(),
            cell,
            self.stack.len()
        );
        state.fill(cell, value);
    }

    /// Rolls back to the most recent branching point that still has an
    /// alternative to try. Returns false if the stack is exhausted, which
    /// means no assignment of the remaining cells can work.
    pub fn revert(&mut self, state: &mut BoardState) -> bool {
        while let Some(snapshot) = self.stack.pop() {
            let Snapshot {
                state: saved,
                cell,
                value,
            } = snapshot;
            *state = saved;
            state.candidates.remove(cell, value);
            if state.candidates.count(cell) > 0 {
                log::debug!(
                    "reverted guess {} at cell {} (depth {})",
                    value.get(),
                    cell,
                    self.stack.len()
                );
                return true;
            }
            log::debug!("branch at cell {cell} exhausted, cascading");
        }
        false
    }
}

/// Selects the cell and value to try next. The cell is drawn from the empty
/// cells with the minimal number of candidates; guessing where the fewest
/// alternatives exist keeps the search tree narrow.
fn choose_guess<R: Rng>(state: &BoardState, rng: &mut R) -> (usize, NonZeroU8) {
    let num_cells = state.board.side() * state.board.side();
    let mut fewest = usize::MAX;
    let mut tied: Vec<usize> = Vec::new();
    for cell in 0..num_cells {
        if state.board.get_index(cell).is_some() {
            continue;
        }
        let count = state.candidates.count(cell);
        // A stalled state has neither contradictions nor pending fills
        debug_assert!(count >= 2);
        if count < fewest {
            fewest = count;
            tied.clear();
        }
        if count == fewest {
            tied.push(cell);
        }
    }
    let cell = *tied.choose(rng).unwrap();
    let values: Vec<NonZeroU8> = state.candidates.iter_cell(cell).collect();
    let value = *values.choose(rng).unwrap();
    (cell, value)
}
