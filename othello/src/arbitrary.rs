use quickcheck::{Arbitrary, Gen};

use crate::{Board, Color, Move};

/// A position reached by playing random legal moves from the start.
#[derive(Clone, Debug)]
pub struct PlayedBoard {
    pub board: Board,
    /// The color whose turn it is.
    pub to_move: Color,
}

impl Arbitrary for PlayedBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = *g.choose(&[4, 6, 8, 10]).unwrap();
        let mut board = Board::new(size).unwrap();
        let mut to_move = Color::Dark;
        let num_moves = usize::arbitrary(g) % (size * size);
        for _ in 0..num_moves {
            let mut moves = board.legal_moves(to_move);
            if moves.is_empty() {
                to_move = !to_move;
                moves = board.legal_moves(to_move);
                if moves.is_empty() {
                    break;
                }
            }
            let mv = *g.choose(&moves).unwrap();
            board.apply_move(mv, to_move).unwrap();
            to_move = !to_move;
        }
        if bool::arbitrary(g) {
            to_move = !to_move;
        }
        PlayedBoard { board, to_move }
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Color::Dark, Color::Light]).unwrap()
    }
}

/// A move to try out on a board, which may or may not be legal,
/// and may even be off the board.
#[derive(Clone, Debug)]
pub struct AttemptedMove {
    pub board: Board,
    pub mv: Move,
    pub color: Color,
}

impl Arbitrary for AttemptedMove {
    fn arbitrary(g: &mut Gen) -> Self {
        let PlayedBoard { board, .. } = PlayedBoard::arbitrary(g);
        let range = board.size() as i32 + 4;
        let row = (u8::arbitrary(g) as i32 % range) - 2;
        let col = (u8::arbitrary(g) as i32 % range) - 2;
        AttemptedMove {
            board,
            mv: Move::new(row, col),
            color: Color::arbitrary(g),
        }
    }
}
