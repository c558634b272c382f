//! Phrase detection along rows and columns of the board.
//!
//! A phrase matches when the texts of consecutive occupied cells, read
//! left-to-right or top-to-bottom, concatenate to exactly that phrase.
//! Empty cells break a line, so a phrase never spans a gap.

use std::collections::BTreeSet;

use crate::coordinate::Coordinate;
use crate::grid::TetrisGrid;

/// Stands in for empty cells when a line is rendered as text.
pub const BLANK: char = ' ';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Line {
    Row(usize),
    Column(usize),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseMatch {
    pub phrase: String,
    pub line: Line,
    pub coordinates: BTreeSet<Coordinate>,
}

#[derive(Clone, Debug)]
pub struct PhraseMatcher {
    phrases: Vec<String>,
}

impl PhraseMatcher {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(Into::into)
                .filter(|phrase: &String| !phrase.is_empty())
                .collect(),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Finds the first phrase on the board. Every row is scanned top to
    /// bottom before any column is considered; within a line, dictionary
    /// order wins over position.
    pub fn find_match(&self, grid: &TetrisGrid) -> Option<PhraseMatch> {
        let rows = (0..grid.rows()).map(Line::Row);
        let columns = (0..grid.columns()).map(Line::Column);

        rows.chain(columns).find_map(|line| {
            let cells = line_cells(grid, line);
            let texts: Vec<Option<&str>> = cells.iter().map(|at| grid.get(*at)).collect();

            self.phrases.iter().find_map(|phrase| {
                (0..texts.len()).find_map(|start| {
                    let end = match_at(&texts, start, phrase)?;
                    Some(PhraseMatch {
                        phrase: phrase.clone(),
                        line,
                        coordinates: cells[start..end].iter().copied().collect(),
                    })
                })
            })
        })
    }
}

/// The cells of a line in reading order.
pub fn line_cells(grid: &TetrisGrid, line: Line) -> Vec<Coordinate> {
    match line {
        Line::Row(row) => (0..grid.columns()).map(|col| Coordinate::new(row, col)).collect(),
        Line::Column(col) => (0..grid.rows()).map(|row| Coordinate::new(row, col)).collect(),
    }
}

/// The line's text with [`BLANK`] in place of empty cells.
pub fn line_text(grid: &TetrisGrid, line: Line) -> String {
    line_cells(grid, line)
        .into_iter()
        .map(|at| match grid.get(at) {
            Some(text) => text.to_string(),
            None => BLANK.to_string(),
        })
        .collect()
}

/// Returns the exclusive end cell index when whole tiles starting at
/// `start` spell out `phrase`.
fn match_at(texts: &[Option<&str>], start: usize, phrase: &str) -> Option<usize> {
    let mut rest = phrase;
    let mut end = start;
    while !rest.is_empty() {
        // An empty label spells nothing, so it breaks the line like a gap.
        let text = (*texts.get(end)?).filter(|text| !text.is_empty())?;
        rest = rest.strip_prefix(text)?;
        end += 1;
    }
    Some(end)
}
