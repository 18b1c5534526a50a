mod direction;
mod error;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use direction::*;
pub use error::*;

/// One of the two players, and the color of their discs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    /// The other color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Dark => "Dark",
            Color::Light => "Light",
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The content of a single square. `None` means the square is empty.
pub type Cell = Option<Color>;

/// A square on the board, as 0-based (row, column) coordinates.
///
/// Coordinates are signed so that positions off the board can be expressed
/// while scanning outward from a square; such positions are simply never legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent square in the given direction. May be off the board.
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A square Othello board of even side length.
///
/// The side length is fixed at construction. Serialized as a list of rows,
/// each cell being `null`, `"Dark"` or `"Light"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Board {
    size: usize,
    // Row-major, i.e. indexed by [row * size + col].
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board with the four starting discs in the center.
    ///
    /// The center 2x2 block has Light on its main diagonal and Dark on its
    /// anti-diagonal.
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        let mut board = Self::empty(size)?;
        let upper = (size / 2) as i32;
        let lower = upper - 1;
        for (row, col, color) in [
            (lower, lower, Color::Light),
            (lower, upper, Color::Dark),
            (upper, lower, Color::Dark),
            (upper, upper, Color::Light),
        ] {
            let idx = board.index(Move::new(row, col));
            board.cells[idx] = Some(color);
        }
        Ok(board)
    }

    /// Creates a board without any discs on it.
    pub fn empty(size: usize) -> Result<Self, InvalidSize> {
        if size == 0 {
            return Err(InvalidSize::Zero);
        }
        if size % 2 != 0 {
            return Err(InvalidSize::Odd { size });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// A board where every square holds the same color.
    pub fn filled(size: usize, color: Color) -> Result<Self, InvalidSize> {
        let mut board = Self::empty(size)?;
        board.cells.fill(Some(color));
        Ok(board)
    }

    /// The side length.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, mv: Move) -> bool {
        let size = self.size as i32;
        (0..size).contains(&mv.row) && (0..size).contains(&mv.col)
    }

    /// Returns the content of a square.
    pub fn get(&self, mv: Move) -> Result<Cell, OutOfBounds> {
        self.checked_index(mv).map(|idx| self.cells[idx])
    }

    /// Overwrites a single square, without applying any game rules.
    pub fn set(&mut self, mv: Move, cell: Cell) -> Result<(), OutOfBounds> {
        let idx = self.checked_index(mv)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Content of a square, or `None` for squares that are empty or off the board.
    pub(crate) fn at(&self, mv: Move) -> Cell {
        self.get(mv).ok().flatten()
    }

    /// Iterates over all squares in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Move, Cell)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            let mv = Move::new((idx / size) as i32, (idx % size) as i32);
            (mv, cell)
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    fn checked_index(&self, mv: Move) -> Result<usize, OutOfBounds> {
        if self.contains(mv) {
            Ok(self.index(mv))
        } else {
            Err(OutOfBounds {
                row: mv.row,
                col: mv.col,
                size: self.size,
            })
        }
    }

    // Callers must make sure the move is on the board.
    pub(crate) fn index(&self, mv: Move) -> usize {
        debug_assert!(self.contains(mv));
        mv.row as usize * self.size + mv.col as usize
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = InvalidBoard;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        let mut board = Self::empty(size)?;
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(InvalidBoard::RaggedRow {
                    row: row_idx,
                    len: row.len(),
                    size,
                });
            }
            board.cells[row_idx * size..(row_idx + 1) * size].copy_from_slice(&row);
        }
        Ok(board)
    }
}

impl Board {
    /// Builds a board from one string per row, `'D'` for Dark, `'L'` for Light
    /// and any other character for an empty square.
    ///
    /// ```
    /// # use othello::{Board, Color, Move};
    /// let board = Board::from_rows(&["DL", ".."]).unwrap();
    /// assert_eq!(board.get(Move::new(0, 1)), Ok(Some(Color::Light)));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, InvalidBoard> {
        let rows: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'D' => Some(Color::Dark),
                        'L' => Some(Color::Light),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        Self::try_from(rows)
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        board.rows().map(<[Cell]>::to_vec).collect()
    }
}
