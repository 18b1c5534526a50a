use super::Move;

/// The error type for [`Board::new()`](crate::Board::new).
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidSize {
    Zero,
    Odd { size: usize },
}

impl std::error::Error for InvalidSize {}

impl std::fmt::Display for InvalidSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSize::Zero => write!(f, "Othello board size must be greater than 0."),
            InvalidSize::Odd { .. } => write!(f, "Othello board size must be even."),
        }
    }
}

/// The error type for building a board out of rows of cells.
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidBoard {
    Size(InvalidSize),
    RaggedRow { row: usize, len: usize, size: usize },
}

impl From<InvalidSize> for InvalidBoard {
    fn from(err: InvalidSize) -> Self {
        InvalidBoard::Size(err)
    }
}

impl std::error::Error for InvalidBoard {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidBoard::Size(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidBoard::Size(err) => write!(f, "Invalid board: {}", err),
            InvalidBoard::RaggedRow { row, len, size } => write!(
                f,
                "Invalid board: row {} has {} cells, but the board has {} rows",
                row, len, size
            ),
        }
    }
}

/// A coordinate outside of the board was used to access a square.
#[derive(Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    pub row: i32,
    pub col: i32,
    pub size: usize,
}

impl std::error::Error for OutOfBounds {}

impl std::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Coordinates ({}, {}) are outside of the {}x{} board",
            self.row, self.col, self.size, self.size
        )
    }
}

/// The error type for [`Board::apply_move()`](crate::Board::apply_move).
///
/// The board is never modified when this is returned.
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OutOfBounds { mv: Move },
    Occupied { mv: Move },
    NoCapture { mv: Move },
}

impl IllegalMove {
    pub fn mv(&self) -> Move {
        match *self {
            IllegalMove::OutOfBounds { mv }
            | IllegalMove::Occupied { mv }
            | IllegalMove::NoCapture { mv } => mv,
        }
    }
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfBounds { mv } => {
                write!(f, "Move is not legal: {} is outside of the board", mv)
            }
            IllegalMove::Occupied { mv } => {
                write!(f, "Move is not legal: {} is already taken", mv)
            }
            IllegalMove::NoCapture { mv } => {
                write!(f, "Move is not legal: {} does not capture any discs", mv)
            }
        }
    }
}
