mod board;
mod solver;

pub use board::{Board, BoardError};
pub use solver::{solve, solve_with, SolveError, SolverConfig};
