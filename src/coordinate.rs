use std::fmt;

/// A cell position on the board. Row 0 is the top row; rows grow downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell directly below this one.
    pub fn next_row(&self) -> Self {
        Self {
            row: self.row + 1,
            col: self.col,
        }
    }

    /// The cell directly above this one, if any.
    pub fn previous_row(&self) -> Option<Self> {
        self.row.checked_sub(1).map(|row| Self { row, col: self.col })
    }

    pub fn is_within(&self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.col < columns
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
