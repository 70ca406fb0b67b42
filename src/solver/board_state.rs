use std::num::NonZeroU8;

use super::candidates::Candidates;
use super::groups::Groups;
use super::SolveError;
use crate::board::Board;

/// The complete mutable state of one solve: the board, the per-cell
/// candidate sets and the per-group bookkeeping.
///
/// Invariant:
/// * `groups` mirrors `board`: a value is marked used in a group exactly when
///   some cell of that group holds it, and the empty-cell lists contain
///   exactly the cells the board reports as empty.
/// * `candidates` never contradicts `board`, i.e. if it says a value is
///   possible then placing it does not conflict with a value already on the
///   board at the last point propagation reached a fixed point. It may be
///   more restrictive than that, both from deeper deductions and from values
///   removed after a failed guess.
///
/// A clone is a structurally independent copy: mutating the original can
/// never reach into state captured by a snapshot.
#[derive(Clone)]
pub struct BoardState {
    pub(super) board: Board,
    pub(super) candidates: Candidates,
    pub(super) groups: Groups,
    num_empty: usize,
}

impl BoardState {
    /// Builds the solving state for `board`. For every given, the value is
    /// registered in its row, column and box; a value already present in one
    /// of those groups means two identical givens share a group and the
    /// puzzle is rejected. For every empty cell, the initial candidates are
    /// everything not yet used by its three groups.
    pub fn new(board: Board) -> Result<Self, SolveError> {
        let side = board.side();
        let num_cells = side * side;
        let mut groups = Groups::new(side, board.order());
        let mut candidates = Candidates::new_all_possible(side);
        let mut num_empty = 0;

        for cell in 0..num_cells {
            let Some(value) = board.get_index(cell) else {
                continue;
            };
            for group in groups.groups_of(cell) {
                if !groups.mark_used(group, value) {
                    return Err(SolveError::InvalidPuzzle {
                        value: value.get(),
                        group: groups.name(group),
                    });
                }
            }
            candidates.clear_cell(cell);
        }

        for cell in 0..num_cells {
            if board.get_index(cell).is_some() {
                continue;
            }
            num_empty += 1;
            let [row, col, box_group] = groups.groups_of(cell);
            groups.push_empty(row, cell);
            groups.push_empty(col, cell);
            groups.push_empty(box_group, cell);
            for raw in 1..=side as u8 {
                let value = NonZeroU8::new(raw).unwrap();
                if groups.is_used(row, value)
                    || groups.is_used(col, value)
                    || groups.is_used(box_group, value)
                {
                    candidates.remove(cell, value);
                }
            }
        }

        Ok(Self {
            board,
            candidates,
            groups,
            num_empty,
        })
    }

    /// Assigns `value` to the empty cell `cell` and updates all bookkeeping:
    /// the three used sets, the three empty-cell lists and the cell's
    /// candidate bits. This is the only way a value gets onto the board
    /// during solving.
    pub fn fill(&mut self, cell: usize, value: NonZeroU8) {
        debug_assert!(self.board.get_index(cell).is_none());
        self.board.set_index(cell, Some(value));
        for group in self.groups.groups_of(cell) {
            let was_fresh = self.groups.mark_used(group, value);
            debug_assert!(was_fresh);
            self.groups.remove_empty(group, cell);
        }
        self.candidates.clear_cell(cell);
        self.num_empty -= 1;
    }

    pub fn num_empty(&self) -> usize {
        self.num_empty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }
}
