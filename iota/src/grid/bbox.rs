use std::ops::RangeInclusive;

use crate::Position;

/// A 2D area represented by a min + max coordinate pair.
///
/// The two coordinates form an _inclusive_ 2D range, i.e. unlike in a
/// half-open range, it's possible for a position with `row == row_max`
/// to be contained in the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub row_min: i32,
    pub col_min: i32,
    pub row_max: i32,
    pub col_max: i32,
}

impl BoundingBox {
    pub fn contains(&self, position: Position) -> bool {
        position.row >= self.row_min
            && position.col >= self.col_min
            && position.row <= self.row_max
            && position.col <= self.col_max
    }

    pub fn singleton(position: Position) -> Self {
        Self {
            row_min: position.row,
            col_min: position.col,
            row_max: position.row,
            col_max: position.col,
        }
    }

    /// Expands the bounding box to cover `position`.
    pub fn update(&mut self, position: Position) {
        self.row_min = self.row_min.min(position.row);
        self.row_max = self.row_max.max(position.row);
        self.col_min = self.col_min.min(position.col);
        self.col_max = self.col_max.max(position.col);
    }

    pub fn rows(&self) -> RangeInclusive<i32> {
        self.row_min..=self.row_max
    }

    pub fn cols(&self) -> RangeInclusive<i32> {
        self.col_min..=self.col_max
    }

    /// The number of columns.
    pub fn width(&self) -> usize {
        (self.col_max - self.col_min + 1) as usize
    }

    /// The number of rows.
    pub fn height(&self) -> usize {
        (self.row_max - self.row_min + 1) as usize
    }
}
