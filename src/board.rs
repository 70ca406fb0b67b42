use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;

use thiserror::Error;

/// A [Board] is a square sudoku board of side length `side`, where `side`
/// must be a perfect square. `order = sqrt(side)` is the edge length of the
/// boxes, so a classic board has `side == 9` and `order == 3`.
/// Each cell contains a value in `0..=side` where 0 means the cell is empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    side: usize,
    order: usize,
    // Cells are ordered by rows, first left-to-right, then top-to-bottom.
    cells: Vec<u8>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no cells")]
    Empty,

    #[error("board must be square, but row {row} has {len} cells on a board with {rows} rows")]
    NotSquare { row: usize, len: usize, rows: usize },

    #[error("board side must be a perfect square, got {side}")]
    SideNotPerfectSquare { side: usize },

    #[error("boards larger than 225x225 are not supported, got side {side}")]
    SideTooLarge { side: usize },

    #[error("cell ({row}, {col}) holds {value}, which is outside 0..={side}")]
    ValueOutOfRange {
        row: usize,
        col: usize,
        value: u8,
        side: usize,
    },

    #[error("unexpected character {character:?} in board text")]
    UnexpectedCharacter { character: char },

    #[error("board text has {count} cells, which is not the square of a perfect square")]
    BadCellCount { count: usize },
}

fn integer_sqrt(n: usize) -> Option<usize> {
    let mut root = 0;
    while root * root < n {
        root += 1;
    }
    (root * root == n).then_some(root)
}

impl Board {
    /// Creates an all-empty board of the given side length.
    pub fn empty(side: usize) -> Result<Self, BoardError> {
        let order = Self::order_for_side(side)?;
        Ok(Board {
            side,
            order,
            cells: vec![0; side * side],
        })
    }

    /// Creates a board from a row-major 2D array of cell values, 0 meaning
    /// empty. The input is copied; the caller keeps ownership of its grid.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        let side = rows.len();
        let order = Self::order_for_side(side)?;
        let mut cells = Vec::with_capacity(side * side);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != side {
                return Err(BoardError::NotSquare {
                    row,
                    len: values.len(),
                    rows: side,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if usize::from(value) > side {
                    return Err(BoardError::ValueOutOfRange {
                        row,
                        col,
                        value,
                        side,
                    });
                }
                cells.push(value);
            }
        }
        Ok(Board { side, order, cells })
    }

    fn order_for_side(side: usize) -> Result<usize, BoardError> {
        if side == 0 {
            return Err(BoardError::Empty);
        }
        if side > 225 {
            return Err(BoardError::SideTooLarge { side });
        }
        integer_sqrt(side).ok_or(BoardError::SideNotPerfectSquare { side })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<NonZeroU8> {
        self.get_index(row * self.side + col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<NonZeroU8>) {
        self.set_index(row * self.side + col, value);
    }

    #[inline]
    pub(crate) fn get_index(&self, cell: usize) -> Option<NonZeroU8> {
        NonZeroU8::new(self.cells[cell])
    }

    pub(crate) fn set_index(&mut self, cell: usize, value: Option<NonZeroU8>) {
        let raw = value.map_or(0, NonZeroU8::get);
        assert!(usize::from(raw) <= self.side);
        self.cells[cell] = raw;
    }

    /// Copies the board out into a row-major 2D array, 0 meaning empty.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.side)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    pub fn num_empty(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    pub fn is_filled(&self) -> bool {
        self.num_empty() == 0
    }

    pub(crate) fn row_cells(&self, row: usize) -> impl Iterator<Item = usize> {
        let side = self.side;
        (0..side).map(move |col| row * side + col)
    }

    pub(crate) fn col_cells(&self, col: usize) -> impl Iterator<Item = usize> {
        let side = self.side;
        (0..side).map(move |row| row * side + col)
    }

    pub(crate) fn box_cells(&self, box_index: usize) -> impl Iterator<Item = usize> {
        let side = self.side;
        let order = self.order;
        let base_row = (box_index / order) * order;
        let base_col = (box_index % order) * order;
        (0..side).map(move |i| (base_row + i / order) * side + base_col + i % order)
    }

    /// Returns true if any row, column or box contains the same nonzero value
    /// more than once.
    pub fn has_conflicts(&self) -> bool {
        let mut seen = vec![false; self.side + 1];
        for group in 0..self.side {
            for cells in [
                self.row_cells(group).collect::<Vec<_>>(),
                self.col_cells(group).collect(),
                self.box_cells(group).collect(),
            ] {
                seen.fill(false);
                for cell in cells {
                    let value = usize::from(self.cells[cell]);
                    if value != 0 {
                        if seen[value] {
                            return true;
                        }
                        seen[value] = true;
                    }
                }
            }
        }
        false
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses a board from text with one character per cell: `1`-`9` for
    /// givens, `_`, `.` or `0` for empty cells. Whitespace is ignored, so
    /// cells can be laid out in a grid with gaps between boxes.
    fn from_str(text: &str) -> Result<Self, BoardError> {
        let mut values = Vec::new();
        for character in text.chars() {
            if character.is_whitespace() {
                continue;
            }
            let value = match character {
                '_' | '.' | '0' => 0,
                '1'..='9' => character as u8 - b'0',
                _ => return Err(BoardError::UnexpectedCharacter { character }),
            };
            values.push(value);
        }
        let count = values.len();
        let side = integer_sqrt(count).ok_or(BoardError::BadCellCount { count })?;
        let order = Self::order_for_side(side).map_err(|_| BoardError::BadCellCount { count })?;
        for (cell, &value) in values.iter().enumerate() {
            if usize::from(value) > side {
                return Err(BoardError::ValueOutOfRange {
                    row: cell / side,
                    col: cell % side,
                    value,
                    side,
                });
            }
        }
        Ok(Board {
            side,
            order,
            cells: values,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.side.to_string().len();
        let line = "-".repeat((width + 2) * self.side - self.order + 1);
        writeln!(f, "{line}")?;
        for row in 0..self.side {
            write!(f, "|")?;
            for col in 0..self.side {
                let value = self.cells[row * self.side + col];
                if value == 0 {
                    write!(f, "{:>width$}", "")?;
                } else {
                    write!(f, "{value:>width$}")?;
                }
                if (col + 1) % self.order == 0 {
                    write!(f, "|")?;
                } else {
                    write!(f, "  ")?;
                }
            }
            writeln!(f)?;
            if (row + 1) % self.order == 0 {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
