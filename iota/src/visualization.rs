use crate::{Grid, Position};

/// Draws the cards on the grid as text, with row numbers on the left and
/// the first column number on top. Empty cells are blank.
pub fn visualize_grid(grid: &Grid) -> String {
    let Some(bbox) = grid.bbox() else {
        return String::from("(empty grid)");
    };

    // Draw the top of the box
    let mut result = format!("     {}\n    ╭", bbox.col_min);
    result += &"────".repeat(bbox.width());
    result += "╮\n";

    for row in bbox.rows() {
        result += &format!("{:>3} │", row);
        for col in bbox.cols() {
            match grid.get(Position::new(row, col)) {
                Some(card) => result += &format!("{:<4}", card),
                None => result += "    ",
            }
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    result += &"────".repeat(bbox.width());
    result += "╯";
    result
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_grid(self))
    }
}
