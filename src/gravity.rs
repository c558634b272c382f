use std::collections::BTreeSet;

use crate::coordinate::Coordinate;
use crate::error::EngineError;
use crate::grid::TetrisGrid;

/// One tile moving down by a single row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TileShift {
    pub from: Coordinate,
    pub to: Coordinate,
}

/// Closes the holes left at `vacated` by dropping the stack resting on
/// each hole by one row.
///
/// Holes are processed top-down so that a vertical run of holes collapses
/// fully. Each pass only moves the contiguous run of tiles directly above
/// its hole; it stops at the first empty cell.
pub fn shift_down(
    grid: &mut TetrisGrid,
    vacated: &BTreeSet<Coordinate>,
) -> Result<Vec<TileShift>, EngineError> {
    let mut shifts = Vec::new();

    for hole in vacated {
        let mut cursor = hole.previous_row();
        while let Some(from) = cursor {
            let to = from.next_row();
            if !grid.move_tile(from, to)? {
                break;
            }
            shifts.push(TileShift { from, to });
            cursor = from.previous_row();
        }
    }

    Ok(shifts)
}
