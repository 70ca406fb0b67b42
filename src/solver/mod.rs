use thiserror::Error;

use crate::board::Board;

mod backtrack;
mod board_state;
mod candidates;
mod groups;
mod naked_subsets;
mod propagate;
#[allow(clippy::module_inception)]
mod solver;

use solver::Solver;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// Two identical givens share a row, column or box. Detected before any
    /// solving work happens.
    #[error("invalid puzzle: {value} appears more than once in {group}")]
    InvalidPuzzle { value: u8, group: String },

    /// Every branch of the search ended in a cell with no candidates left.
    /// The puzzle has no valid completion.
    #[error("sudoku has no solution")]
    Unsatisfiable,

    /// The solver gave up after the configured number of iterations without
    /// finding either a solution or a proof that none exists.
    #[error("no solution found within {0} solver iterations")]
    StepBudgetExceeded(u32),
}

/// Tuning knobs for a solve. The defaults match typical interactive use;
/// `seed` makes a run reproducible.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Upper bound on outer solver iterations. Each iteration is one full
    /// propagation pass, possibly followed by subset elimination or a guess.
    pub step_budget: u32,
    /// Seed for the random source behind guess selection. `None` draws a
    /// fresh seed, so repeated runs may find differently-ordered guesses
    /// (and, on puzzles with several completions, different solutions).
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step_budget: 5000,
            seed: None,
        }
    }
}

/// Solves `board` with the default configuration, returning the completed
/// board or the reason there is none.
pub fn solve(board: Board) -> Result<Board, SolveError> {
    solve_with(board, &SolverConfig::default())
}

pub fn solve_with(board: Board, config: &SolverConfig) -> Result<Board, SolveError> {
    Solver::new(board, config)?.run()
}

#[cfg(test)]
mod tests {
    use super::propagate::PassOutcome;
    use super::*;

    fn seeded(seed: u64) -> SolverConfig {
        SolverConfig {
            step_budget: 100_000,
            seed: Some(seed),
        }
    }

    const EASY: &str = "
        53_ _7_ ___
        6__ 195 ___
        _98 ___ _6_

        8__ _6_ __3
        4__ 8_3 __1
        7__ _2_ __6

        _6_ ___ 28_
        ___ 419 __5
        ___ _8_ _79
    ";

    const EASY_SOLUTION: &str = "
        534 678 912
        672 195 348
        198 342 567

        859 761 423
        426 853 791
        713 924 856

        961 537 284
        287 419 635
        345 286 179
    ";

    // Blanked cells are spread so that every one of them is alone in its
    // row; plain elimination refills each in a single pass.
    const SINGLES_ONLY: &str = "
        _34 678 912
        672 _95 348
        198 342 _67

        8_9 761 423
        426 8_3 791
        713 924 8_6

        96_ 537 284
        287 41_ 635
        345 286 17_
    ";

    const HARD: &str = "
        8__ ___ ___
        __3 6__ ___
        _7_ _9_ 2__

        _5_ __7 ___
        ___ _45 7__
        ___ 1__ _3_

        __1 ___ _68
        __8 5__ _1_
        _9_ ___ 4__
    ";

    fn parse(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn solves_an_easy_puzzle_to_its_unique_solution() {
        let solution = solve_with(parse(EASY), &seeded(1)).unwrap();
        assert_eq!(parse(EASY_SOLUTION), solution);
        assert!(solution.is_filled());
        assert!(!solution.has_conflicts());
    }

    #[test]
    fn solves_a_hard_puzzle_to_a_valid_grid() {
        let puzzle = parse(HARD);
        let solution = solve_with(puzzle.clone(), &seeded(2)).unwrap();
        assert!(solution.is_filled());
        assert!(!solution.has_conflicts());
        // Givens survive
        for row in 0..9 {
            for col in 0..9 {
                if let Some(given) = puzzle.get(row, col) {
                    assert_eq!(Some(given), solution.get(row, col));
                }
            }
        }
    }

    #[test]
    fn solves_a_four_by_four_puzzle() {
        let solution = solve_with(parse("_2 34 34 _2 21 4_ 4_ 21"), &seeded(3)).unwrap();
        assert_eq!(parse("1234 3412 2143 4321"), solution);
    }

    #[test]
    fn solved_input_passes_through() {
        let board = parse(EASY_SOLUTION);
        assert_eq!(Ok(parse(EASY_SOLUTION)), solve(board));
    }

    #[test]
    fn unsatisfiable_puzzle_is_detected() {
        // (0, 8) can only be a 9, but its column already has one
        let board = parse(
            "
            123 456 78_
            ___ ___ ___
            ___ ___ ___

            ___ ___ ___
            ___ ___ ___
            ___ ___ __9

            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
        ",
        );
        assert_eq!(Err(SolveError::Unsatisfiable), solve(board));
    }

    #[test]
    fn duplicate_given_fails_before_solving() {
        let board = parse(
            "
            5__ ___ ___
            _5_ ___ ___
            ___ ___ ___

            ___ ___ ___
            ___ ___ ___
            ___ ___ ___

            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
        ",
        );
        assert_eq!(
            Err(SolveError::InvalidPuzzle {
                value: 5,
                group: "box 1".to_string()
            }),
            solve(board)
        );
    }

    #[test]
    fn step_budget_is_reported_when_exhausted() {
        let config = SolverConfig {
            step_budget: 1,
            seed: Some(0),
        };
        assert_eq!(
            Err(SolveError::StepBudgetExceeded(1)),
            solve_with(parse(HARD), &config)
        );
    }

    #[test]
    fn empty_grid_terminates_within_budget() {
        let board = Board::empty(9).unwrap();
        match solve_with(board, &seeded(4)) {
            Ok(solution) => {
                assert!(solution.is_filled());
                assert!(!solution.has_conflicts());
            }
            Err(SolveError::StepBudgetExceeded(_)) => {}
            Err(error) => panic!("unexpected error: {error}"),
        }
    }

    #[test]
    fn identical_seeds_give_identical_solutions() {
        let first = solve_with(Board::empty(9).unwrap(), &seeded(11)).unwrap();
        let second = solve_with(Board::empty(9).unwrap(), &seeded(11)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn propagation_alone_solves_without_guessing() {
        let mut solver = Solver::new(parse(SINGLES_ONLY), &seeded(5)).unwrap();
        let mut passes = 0;
        while solver.state().num_empty() > 0 {
            assert_eq!(PassOutcome::Progress, solver.step());
            assert_eq!(0, solver.guess_depth());
            passes += 1;
            assert!(passes < 100);
        }
        assert_eq!(0, solver.guess_depth());
    }
}
