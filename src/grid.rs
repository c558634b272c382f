use std::collections::{BTreeSet, HashMap};

use crate::coordinate::Coordinate;
use crate::error::EngineError;

/// Sparse board storage: only occupied cells are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TetrisGrid {
    rows: usize,
    columns: usize,
    tiles: HashMap<Coordinate, String>,
}

impl TetrisGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            tiles: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        at.is_within(self.rows, self.columns)
    }

    /// Places a tile. Occupied cells are never overwritten.
    pub fn add(&mut self, at: Coordinate, text: impl Into<String>) -> Result<(), EngineError> {
        if !self.contains(at) {
            return Err(EngineError::CoordinateOutOfBounds(at));
        }
        if self.tiles.contains_key(&at) {
            return Err(EngineError::CoordinateOccupied(at));
        }
        self.tiles.insert(at, text.into());
        Ok(())
    }

    pub fn remove(&mut self, at: Coordinate) -> Option<String> {
        self.tiles.remove(&at)
    }

    pub fn remove_all(&mut self, coordinates: &BTreeSet<Coordinate>) {
        for at in coordinates {
            self.tiles.remove(at);
        }
    }

    pub fn get(&self, at: Coordinate) -> Option<&str> {
        self.tiles.get(&at).map(String::as_str)
    }

    pub fn has_tile(&self, at: Coordinate) -> bool {
        self.tiles.contains_key(&at)
    }

    /// Moves the tile at `from` into the empty cell `to`.
    /// Returns `Ok(false)` when there is nothing at `from`.
    pub fn move_tile(&mut self, from: Coordinate, to: Coordinate) -> Result<bool, EngineError> {
        if !self.tiles.contains_key(&from) {
            return Ok(false);
        }
        if !self.contains(to) {
            return Err(EngineError::CoordinateOutOfBounds(to));
        }
        if self.tiles.contains_key(&to) {
            return Err(EngineError::CoordinateOccupied(to));
        }
        if let Some(text) = self.tiles.remove(&from) {
            self.tiles.insert(to, text);
        }
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Occupied cells in row-major order.
    pub fn tiles(&self) -> Vec<(Coordinate, &str)> {
        let mut tiles: Vec<_> = self
            .tiles
            .iter()
            .map(|(at, text)| (*at, text.as_str()))
            .collect();
        tiles.sort_by_key(|(at, _)| *at);
        tiles
    }
}
