//! Builders for boards and engines in tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::EngineConfig;
use crate::coordinate::Coordinate;
use crate::engine::TetrisEngine;
use crate::grid::TetrisGrid;
use crate::observer::EventRecorder;
use crate::words::SequenceWordSource;

/// Marks an empty cell in [`grid_from_rows`].
pub const EMPTY: char = '.';

/// Builds a grid from one string per row, one character per cell.
pub fn grid_from_rows(rows: &[&str]) -> TetrisGrid {
    let columns = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let mut grid = TetrisGrid::new(rows.len(), columns);
    fill_from_rows(&mut grid, rows);
    grid
}

/// Writes the non-empty cells of `rows` into an existing grid.
pub fn fill_from_rows(grid: &mut TetrisGrid, rows: &[&str]) {
    for (row, line) in rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch != EMPTY {
                grid.add(Coordinate::new(row, col), ch.to_string())
                    .expect("test grid cell is free and on the board");
            }
        }
    }
}

/// Renders the grid back into the [`grid_from_rows`] format.
pub fn grid_to_rows(grid: &TetrisGrid) -> Vec<String> {
    (0..grid.rows())
        .map(|row| {
            (0..grid.columns())
                .map(|col| match grid.get(Coordinate::new(row, col)) {
                    Some(text) => text.to_string(),
                    None => EMPTY.to_string(),
                })
                .collect()
        })
        .collect()
}

pub fn small_config(rows: usize, columns: usize, phrases: &[&str]) -> EngineConfig {
    EngineConfig {
        rows,
        columns,
        total_time_ms: 10_000,
        tick_interval_ms: 1_000,
        phrases: phrases.iter().map(|phrase| phrase.to_string()).collect(),
        ..EngineConfig::default()
    }
}

/// An engine fed `words` in order, with a recorder attached.
pub fn recorded_engine(
    config: EngineConfig,
    words: &[&str],
) -> (TetrisEngine, Rc<RefCell<EventRecorder>>) {
    let recorder = Rc::new(RefCell::new(EventRecorder::new()));
    let source = Box::new(SequenceWordSource::new(words.iter().copied()));
    let engine = TetrisEngine::with_word_source(config, source)
        .expect("test config is valid")
        .with_seed(7)
        .with_observer(&recorder);
    (engine, recorder)
}
