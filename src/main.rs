use std::env;
use std::error::Error;
use std::fs;
use std::io::Read;

use sudoku_engine::{solve, Board};

/// Reads a puzzle from the file given as the first argument, or from stdin
/// when no argument is given, and prints the completed grid.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let text = match env::args().nth(1) {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let board: Board = text.parse()?;
    let solution = solve(board)?;
    println!("{solution}");
    Ok(())
}
