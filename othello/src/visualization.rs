use std::fmt;

use crate::Board;

const ROW_LABEL_WIDTH: usize = 3;
const CELL_WIDTH: usize = 8;

/// Draws the board as a text grid with 1-based row and column labels.
pub fn visualize_board(board: &Board) -> String {
    let size = board.size();
    let rule = format!(
        "{}{}",
        " ".repeat(ROW_LABEL_WIDTH + 2),
        "―".repeat(size * CELL_WIDTH + 1)
    );

    // Column labels
    let mut result = " ".repeat(ROW_LABEL_WIDTH + 3);
    for col in 1..=size {
        result += &format!("{:^width$}", col, width = CELL_WIDTH);
    }
    result += "\n";
    result += &rule;

    for (row_idx, row) in board.rows().enumerate() {
        result += &format!(
            "\n{:<width$}: |",
            row_idx + 1,
            width = ROW_LABEL_WIDTH
        );
        for cell in row {
            match cell {
                Some(color) => result += &format!(" {:<6}|", color.name()),
                None => result += "       |",
            }
        }
        result += "\n";
        result += &rule;
    }
    result
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&visualize_board(self))
    }
}
