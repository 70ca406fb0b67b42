use bitvec::prelude::*;
use itertools::Itertools;
use std::num::NonZeroU8;

use super::board_state::BoardState;

/// Strips candidates using naked subsets: `k` empty cells of one group whose
/// combined candidates are exactly `k` values claim those values for
/// themselves, so every other empty cell of the group can drop them.
///
/// All groups are scanned repeatedly until a full round changes nothing,
/// since one elimination can expose a subset elsewhere. Returns whether any
/// candidate was removed. Cells reduced to one candidate (or to none) are
/// left for the next propagation pass to pick up.
pub fn eliminate_all(state: &mut BoardState) -> bool {
    let mut changed_any = false;
    loop {
        let mut changed_round = false;
        for group in 0..state.groups.num_groups() {
            if eliminate_group(state, group) {
                changed_round = true;
            }
        }
        if !changed_round {
            break;
        }
        changed_any = true;
    }
    changed_any
}

/// Scans one group to a fixed point. After a subset is found and stripped,
/// the scan continues on the remaining cells of the group: removing the
/// subset's cells from consideration can reveal a further subset among the
/// rest.
fn eliminate_group(state: &mut BoardState, group: usize) -> bool {
    let mut cells: Vec<usize> = state.groups.empty_cells(group).to_vec();
    let mut changed = false;
    while cells.len() >= 3 {
        let Some((members, union)) = find_subset(state, &cells) else {
            break;
        };
        for &cell in &cells {
            if members.contains(&cell) {
                continue;
            }
            for index in union.iter_ones() {
                let value = NonZeroU8::new((index + 1) as u8).unwrap();
                if state.candidates.remove(cell, value) {
                    changed = true;
                }
            }
        }
        log::trace!(
            "naked subset of size {} in group {}: cells {:?}",
            members.len(),
            group,
            members
        );
        cells.retain(|cell| !members.contains(cell));
    }
    changed
}

/// Searches `cells` for the smallest naked subset. Subset sizes run from 2 up
/// to twice the box size, which keeps the number of combinations tractable on
/// large boards. Only cells with at most `k` candidates can be part of a
/// size-`k` subset, and at least one cell must be left outside the subset for
/// the find to be useful.
fn find_subset(state: &BoardState, cells: &[usize]) -> Option<(Vec<usize>, BitVec)> {
    let side = state.board.side();
    let max_size = (state.board.order() * 2).min(cells.len() - 1);
    let mut union = bitvec![0; side];
    for size in 2..=max_size {
        let eligible: Vec<usize> = cells
            .iter()
            .copied()
            .filter(|&cell| (1..=size).contains(&state.candidates.count(cell)))
            .collect();
        if eligible.len() < size {
            continue;
        }
        for combination in eligible.iter().copied().combinations(size) {
            union.fill(false);
            for &cell in &combination {
                for index in state.candidates.cell_slice(cell).iter_ones() {
                    union.set(index, true);
                }
            }
            if union.count_ones() == size {
                return Some((combination, union.clone()));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::solver::propagate::{self, PassOutcome};

    fn value(raw: u8) -> NonZeroU8 {
        NonZeroU8::new(raw).unwrap()
    }

    fn empty_state() -> BoardState {
        BoardState::new(Board::empty(9).unwrap()).unwrap()
    }

    fn restrict(state: &mut BoardState, cell: usize, keep: &[u8]) {
        for raw in 1..=9 {
            if !keep.contains(&raw) {
                state.candidates.remove(cell, value(raw));
            }
        }
    }

    #[test]
    fn naked_pair_strips_row() {
        let mut state = empty_state();
        restrict(&mut state, 0, &[3, 7]);
        restrict(&mut state, 1, &[3, 7]);

        assert!(eliminate_group(&mut state, 0));

        for cell in 2..9 {
            assert!(!state.candidates.contains(cell, value(3)));
            assert!(!state.candidates.contains(cell, value(7)));
            assert_eq!(7, state.candidates.count(cell));
        }
        // The pair itself keeps its candidates
        assert_eq!(2, state.candidates.count(0));
        assert_eq!(2, state.candidates.count(1));
    }

    #[test]
    fn stripping_can_reveal_a_second_subset() {
        let mut state = empty_state();
        // {3,7} pair plus a cell that collapses to {1,2} once 3 and 7 leave,
        // pairing with another {1,2} cell in the same row scan
        restrict(&mut state, 0, &[3, 7]);
        restrict(&mut state, 1, &[3, 7]);
        restrict(&mut state, 2, &[1, 2, 3, 7]);
        restrict(&mut state, 3, &[1, 2]);

        assert!(eliminate_group(&mut state, 0));

        // After both subsets are applied, the rest of the row keeps neither
        // {3,7} nor {1,2}
        for cell in 4..9 {
            for raw in [1, 2, 3, 7] {
                assert!(!state.candidates.contains(cell, value(raw)));
            }
            assert_eq!(5, state.candidates.count(cell));
        }
    }

    #[test]
    fn no_subset_means_no_change() {
        let mut state = empty_state();
        assert!(!eliminate_all(&mut state));
    }

    #[test]
    fn second_run_is_a_fixed_point() {
        let mut state = empty_state();
        restrict(&mut state, 0, &[3, 7]);
        restrict(&mut state, 1, &[3, 7]);

        assert!(eliminate_all(&mut state));
        assert!(!eliminate_all(&mut state));
    }

    #[test]
    fn stripped_singleton_is_filled_by_the_next_pass() {
        let mut state = empty_state();
        restrict(&mut state, 0, &[3, 7]);
        restrict(&mut state, 1, &[3, 7]);
        restrict(&mut state, 2, &[3, 7, 9]);

        assert!(eliminate_group(&mut state, 0));
        assert_eq!(Some(value(9)), state.candidates.sole(2));

        assert_eq!(PassOutcome::Progress, propagate::run_pass(&mut state));
        assert_eq!(NonZeroU8::new(9), state.board().get(0, 2));
    }
}
