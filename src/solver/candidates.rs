use bitvec::prelude::*;
use std::num::NonZeroU8;

/// Stores one bit per (cell, value) pair. If the bit is set, the value is
/// still considered placeable in that cell. A filled cell keeps all of its
/// bits cleared.
#[derive(Clone)]
pub struct Candidates {
    side: usize,
    bits: BitVec,
}

impl Candidates {
    pub fn new_all_possible(side: usize) -> Self {
        Self {
            side,
            bits: bitvec![1; side * side * side],
        }
    }

    #[inline]
    fn cell_start(&self, cell: usize) -> usize {
        cell * self.side
    }

    #[inline]
    fn index(&self, cell: usize, value: NonZeroU8) -> usize {
        debug_assert!(usize::from(value.get()) <= self.side);
        self.cell_start(cell) + usize::from(value.get()) - 1
    }

    pub fn contains(&self, cell: usize, value: NonZeroU8) -> bool {
        self.bits[self.index(cell, value)]
    }

    /// Clears the bit for `value` in `cell`. Returns whether it was set.
    pub fn remove(&mut self, cell: usize, value: NonZeroU8) -> bool {
        let index = self.index(cell, value);
        let was_set = self.bits[index];
        self.bits.set(index, false);
        was_set
    }

    pub fn clear_cell(&mut self, cell: usize) {
        let start = self.cell_start(cell);
        self.bits[start..start + self.side].fill(false);
    }

    pub fn count(&self, cell: usize) -> usize {
        self.cell_slice(cell).count_ones()
    }

    pub fn cell_slice(&self, cell: usize) -> &BitSlice {
        let start = self.cell_start(cell);
        &self.bits[start..start + self.side]
    }

    pub fn iter_cell(&self, cell: usize) -> impl Iterator<Item = NonZeroU8> + '_ {
        self.cell_slice(cell)
            .iter_ones()
            .map(|i| NonZeroU8::new((i + 1) as u8).unwrap())
    }

    /// Returns the only remaining candidate of `cell`, or `None` if the cell
    /// has zero or more than one candidate left.
    pub fn sole(&self, cell: usize) -> Option<NonZeroU8> {
        let mut values = self.iter_cell(cell);
        let first = values.next()?;
        values.next().is_none().then_some(first)
    }
}
