use bitvec::prelude::*;
use std::num::NonZeroU8;

/// Bookkeeping for the `3 * side` groups of a board: first all rows, then all
/// columns, then all boxes. Each group tracks which values are already placed
/// in it and which of its cells are still empty, in cell-index order.
#[derive(Clone)]
pub struct Groups {
    side: usize,
    order: usize,
    used: BitVec,
    empty_cells: Vec<Vec<usize>>,
}

impl Groups {
    pub fn new(side: usize, order: usize) -> Self {
        debug_assert_eq!(order * order, side);
        Self {
            side,
            order,
            used: bitvec![0; 3 * side * side],
            empty_cells: vec![Vec::new(); 3 * side],
        }
    }

    pub fn num_groups(&self) -> usize {
        3 * self.side
    }

    /// The ids of the row, column and box containing `cell`, in that order.
    pub fn groups_of(&self, cell: usize) -> [usize; 3] {
        let row = cell / self.side;
        let col = cell % self.side;
        [
            row,
            self.side + col,
            2 * self.side + (row / self.order) * self.order + col / self.order,
        ]
    }

    #[inline]
    fn used_index(&self, group: usize, value: NonZeroU8) -> usize {
        debug_assert!(usize::from(value.get()) <= self.side);
        group * self.side + usize::from(value.get()) - 1
    }

    pub fn is_used(&self, group: usize, value: NonZeroU8) -> bool {
        self.used[self.used_index(group, value)]
    }

    /// Records `value` as placed in `group`. Returns false if the group
    /// already contained the value, which means the board is malformed or
    /// the caller is about to create a conflict.
    pub fn mark_used(&mut self, group: usize, value: NonZeroU8) -> bool {
        let index = self.used_index(group, value);
        if self.used[index] {
            return false;
        }
        self.used.set(index, true);
        true
    }

    pub fn empty_cells(&self, group: usize) -> &[usize] {
        &self.empty_cells[group]
    }

    pub fn push_empty(&mut self, group: usize, cell: usize) {
        self.empty_cells[group].push(cell);
    }

    pub fn remove_empty(&mut self, group: usize, cell: usize) {
        let list = &mut self.empty_cells[group];
        let position = list.iter().position(|&c| c == cell);
        debug_assert!(position.is_some());
        if let Some(position) = position {
            list.remove(position);
        }
    }

    pub fn name(&self, group: usize) -> String {
        if group < self.side {
            format!("row {}", group + 1)
        } else if group < 2 * self.side {
            format!("column {}", group - self.side + 1)
        } else {
            format!("box {}", group - 2 * self.side + 1)
        }
    }
}
