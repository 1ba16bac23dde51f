use serde::{Deserialize, Serialize};

/// A cell of the grid.
///
/// Rows grow downwards and columns grow to the right. The grid is unbounded,
/// the first card always lands on [`Position::ORIGIN`].
///
/// The derived ordering is row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn left_of(self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    pub fn right_of(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    pub fn above(self) -> Self {
        Self::new(self.row - 1, self.col)
    }

    pub fn below(self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    /// Whether all four neighbors of this position exist.
    ///
    /// Cards may only be placed at such positions, so lines can always be
    /// scanned one step past their ends.
    pub fn has_all_neighbors(self) -> bool {
        self.row > i32::MIN && self.row < i32::MAX && self.col > i32::MIN && self.col < i32::MAX
    }

    /// The four orthogonally adjacent positions.
    pub fn neighbors(self) -> [Position; 4] {
        [self.above(), self.left_of(), self.right_of(), self.below()]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The direction a [`Line`](crate::Line) runs in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn crossing(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The neighbor of `position` towards the start of a line on this axis.
    pub fn previous(self, position: Position) -> Position {
        match self {
            Axis::Horizontal => position.left_of(),
            Axis::Vertical => position.above(),
        }
    }

    /// The neighbor of `position` towards the end of a line on this axis.
    pub fn next(self, position: Position) -> Position {
        match self {
            Axis::Horizontal => position.right_of(),
            Axis::Vertical => position.below(),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}
