use rand::rngs::StdRng;
use rand::SeedableRng;

use super::backtrack::SnapshotStack;
use super::board_state::BoardState;
use super::propagate::{self, PassOutcome};
use super::{naked_subsets, SolveError, SolverConfig};
use crate::board::Board;

/// Drives a single solve to completion.
///
/// Each iteration of the outer loop runs one full propagation pass. A pass
/// that hits a cell with no candidates rolls back the most recent guess; a
/// pass that changes nothing escalates, first to the naked-subset eliminator
/// and, if that is also stuck, to a new guess. The loop ends when no empty
/// cells remain or the iteration budget runs out.
pub struct Solver {
    state: BoardState,
    snapshots: SnapshotStack,
    rng: StdRng,
    step_budget: u32,
}

impl Solver {
    pub fn new(board: Board, config: &SolverConfig) -> Result<Self, SolveError> {
        let state = BoardState::new(board)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            state,
            snapshots: SnapshotStack::new(),
            rng,
            step_budget: config.step_budget,
        })
    }

    pub fn run(mut self) -> Result<Board, SolveError> {
        let mut steps = 0;
        loop {
            if self.state.num_empty() == 0 {
                debug_assert!(self.state.board().is_filled());
                debug_assert!(!self.state.board().has_conflicts());
                log::debug!(
                    "solved after {steps} passes with {} open branches",
                    self.snapshots.depth()
                );
                return Ok(self.state.into_board());
            }
            if steps >= self.step_budget {
                return Err(SolveError::StepBudgetExceeded(self.step_budget));
            }
            steps += 1;

            match propagate::run_pass(&mut self.state) {
                PassOutcome::Progress => {}
                PassOutcome::Contradiction { cell } => {
                    log::trace!("cell {cell} has no candidates left, rolling back");
                    if !self.snapshots.revert(&mut self.state) {
                        return Err(SolveError::Unsatisfiable);
                    }
                }
                PassOutcome::NoChange => {
                    if !naked_subsets::eliminate_all(&mut self.state) {
                        self.snapshots.commit_guess(&mut self.state, &mut self.rng);
                    }
                }
            }
        }
    }

    #[cfg(test)]
    pub fn guess_depth(&self) -> usize {
        self.snapshots.depth()
    }

    #[cfg(test)]
    pub fn step(&mut self) -> PassOutcome {
        propagate::run_pass(&mut self.state)
    }

    #[cfg(test)]
    pub fn state(&self) -> &BoardState {
        &self.state
    }
}
