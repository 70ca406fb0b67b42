use std::num::NonZeroU8;

use super::board_state::BoardState;

#[derive(Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// At least one candidate was removed or one cell was filled.
    Progress,
    /// A full pass over the board changed nothing.
    NoChange,
    /// `cell` has no candidates left under the current assignment.
    Contradiction { cell: usize },
}

/// Runs one full propagation pass, visiting the empty cells left-to-right,
/// top-to-bottom. Per cell: candidates are reduced by the values already used
/// in its row, column and box; a cell left with a single candidate is filled
/// on the spot; a cell left with none stops the pass. Cells the basic
/// elimination cannot reduce are checked for a hidden single.
pub fn run_pass(state: &mut BoardState) -> PassOutcome {
    let num_cells = state.board.side() * state.board.side();
    let mut changed = false;

    for cell in 0..num_cells {
        if state.board.get_index(cell).is_some() {
            continue;
        }
        let eliminated = eliminate(state, cell);
        changed |= eliminated;
        match state.candidates.count(cell) {
            0 => return PassOutcome::Contradiction { cell },
            1 => {
                let value = state.candidates.sole(cell).unwrap();
                state.fill(cell, value);
                changed = true;
            }
            _ if !eliminated => {
                if let Some(value) = hidden_single(state, cell) {
                    state.fill(cell, value);
                    changed = true;
                }
            }
            _ => {}
        }
    }

    if changed {
        PassOutcome::Progress
    } else {
        PassOutcome::NoChange
    }
}

/// Removes from `cell`'s candidates every value already placed in its row,
/// column or box. Safe in all cases: a used value can never go here.
fn eliminate(state: &mut BoardState, cell: usize) -> bool {
    let [row, col, box_group] = state.groups.groups_of(cell);
    let side = state.board.side() as u8;
    let mut changed = false;
    for raw in 1..=side {
        let value = NonZeroU8::new(raw).unwrap();
        if !state.candidates.contains(cell, value) {
            continue;
        }
        if state.groups.is_used(row, value)
            || state.groups.is_used(col, value)
            || state.groups.is_used(box_group, value)
        {
            state.candidates.remove(cell, value);
            changed = true;
        }
    }
    changed
}

/// Looks for a candidate of `cell` that no other empty cell in one of its
/// groups can hold: such a value has nowhere else to go and is forced. The
/// row is checked first, then the column, then the box; the first group where
/// exactly one candidate is unavailable elsewhere decides. A group where zero
/// or several candidates are unavailable elsewhere decides nothing.
fn hidden_single(state: &BoardState, cell: usize) -> Option<NonZeroU8> {
    for group in state.groups.groups_of(cell) {
        let mut forced = None;
        let mut unique = true;
        for value in state.candidates.iter_cell(cell) {
            let elsewhere = state
                .groups
                .empty_cells(group)
                .iter()
                .any(|&other| other != cell && state.candidates.contains(other, value));
            if !elsewhere {
                if forced.is_some() {
                    unique = false;
                    break;
                }
                forced = Some(value);
            }
        }
        if unique {
            if let Some(value) = forced {
                return Some(value);
            }
        }
    }
    None
}
