use crate::{Board, Color, Direction, IllegalMove, Move};

/// The effects that playing a move would have on a board.
///
/// Obtained from [`Board::calculate()`]; nothing is changed until
/// [`Self::execute()`] is called.
#[derive(Clone, Debug)]
pub struct MoveCalculation<'a> {
    /// Ties the flips to the board they were computed for.
    board: &'a Board,
    placement: Placement,
}

/// A move that has been played, together with the discs it flipped.
///
/// Passing it to [`Board::undo()`] restores the board as it was before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    mv: Move,
    color: Color,
    flipped: Vec<Move>,
}

impl Placement {
    pub fn mv(&self) -> Move {
        self.mv
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Every captured square, grouped by direction, each group ordered
    /// outward from the placed disc.
    pub fn flipped(&self) -> &[Move] {
        &self.flipped
    }
}

impl<'a> MoveCalculation<'a> {
    pub fn flipped(&self) -> &[Move] {
        &self.placement.flipped
    }

    /// Returns a new board with the move played.
    pub fn execute(self) -> Board {
        let mut board = self.board.clone();
        board.write(&self.placement);
        board
    }

    pub fn into_placement(self) -> Placement {
        self.placement
    }
}

impl Board {
    /// Whether `color` may place a disc on `mv`.
    ///
    /// Squares off the board are never legal.
    pub fn is_legal(&self, mv: Move, color: Color) -> bool {
        self.contains(mv)
            && self.at(mv).is_none()
            && Direction::ALL
                .iter()
                .any(|&direction| self.capture_run(mv, color, direction) > 0)
    }

    /// The number of opponent discs that a disc of `color` on `mv` would
    /// capture in one direction.
    ///
    /// The run must consist of at least one opponent disc and end on a disc
    /// of `color`. Running into an empty square or off the board captures nothing.
    fn capture_run(&self, mv: Move, color: Color, direction: Direction) -> usize {
        let opponent = !color;
        let mut run = 0;
        let mut cursor = mv.step(direction);
        while self.at(cursor) == Some(opponent) {
            run += 1;
            cursor = cursor.step(direction);
        }
        if run > 0 && self.at(cursor) == Some(color) {
            run
        } else {
            0
        }
    }

    /// Calculate playing a move and return the discs it would flip.
    ///
    /// All eight directions are scanned independently, and every capturing run
    /// is flipped, not just the first one found.
    pub fn calculate(&self, mv: Move, color: Color) -> Result<MoveCalculation<'_>, IllegalMove> {
        if !self.contains(mv) {
            return Err(IllegalMove::OutOfBounds { mv });
        }
        if self.at(mv).is_some() {
            return Err(IllegalMove::Occupied { mv });
        }

        let mut flipped = Vec::new();
        for direction in Direction::ALL {
            let run = self.capture_run(mv, color, direction);
            let mut cursor = mv;
            for _ in 0..run {
                cursor = cursor.step(direction);
                flipped.push(cursor);
            }
        }
        if flipped.is_empty() {
            return Err(IllegalMove::NoCapture { mv });
        }

        Ok(MoveCalculation {
            board: self,
            placement: Placement { mv, color, flipped },
        })
    }

    /// Plays a move, flipping every captured disc.
    ///
    /// On error, the board is left as it was.
    pub fn apply_move(&mut self, mv: Move, color: Color) -> Result<Placement, IllegalMove> {
        let placement = self.calculate(mv, color)?.into_placement();
        self.write(&placement);
        Ok(placement)
    }

    /// Takes back a move previously returned by [`Self::apply_move()`].
    ///
    /// Must be called on the board the move was applied to, with no other
    /// moves in between that haven't been undone. A [`Placement`] is only ever
    /// obtained by playing a move, never built by hand.
    pub fn undo(&mut self, placement: &Placement) {
        let opponent = Some(!placement.color);
        let mv_idx = self.index(placement.mv);
        self.cells_mut()[mv_idx] = None;
        for &square in &placement.flipped {
            let idx = self.index(square);
            self.cells_mut()[idx] = opponent;
        }
    }

    /// Every legal move for `color`, in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.iter()
            .filter(|&(mv, cell)| cell.is_none() && self.is_legal(mv, color))
            .map(|(mv, _)| mv)
            .collect()
    }

    /// Whether `color` has at least one legal move.
    pub fn can_move(&self, color: Color) -> bool {
        self.iter()
            .any(|(mv, cell)| cell.is_none() && self.is_legal(mv, color))
    }

    fn write(&mut self, placement: &Placement) {
        let color = Some(placement.color);
        for &square in std::iter::once(&placement.mv).chain(&placement.flipped) {
            let idx = self.index(square);
            self.cells_mut()[idx] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{AttemptedMove, PlayedBoard};
    use crate::Cell;

    const D: Cell = Some(Color::Dark);
    const L: Cell = Some(Color::Light);

    /// A standard starting board with some squares overwritten.
    fn board_with(assignments: &[(i32, i32, Cell)]) -> Board {
        let mut board = Board::new(8).unwrap();
        for &(row, col, cell) in assignments {
            board.set(Move::new(row, col), cell).unwrap();
        }
        board
    }

    fn moves(coords: &[(i32, i32)]) -> Vec<Move> {
        coords.iter().copied().map(Move::from).collect()
    }

    quickcheck! {
        fn illegal_moves_leave_the_board_untouched(input: AttemptedMove) -> bool {
            let AttemptedMove { board, mv, color } = input;
            let mut played = board.clone();
            match played.apply_move(mv, color) {
                Ok(_) => board.is_legal(mv, color),
                Err(_) => !board.is_legal(mv, color) && played == board,
            }
        }

        fn undo_restores_the_board(input: PlayedBoard) -> bool {
            let PlayedBoard { board, to_move } = input;
            board.legal_moves(to_move).into_iter().all(|mv| {
                let mut scratch = board.clone();
                let placement = scratch.apply_move(mv, to_move).unwrap();
                scratch.undo(&placement);
                scratch == board
            })
        }

        fn legal_moves_agree_with_is_legal(input: PlayedBoard) -> bool {
            let PlayedBoard { board, to_move } = input;
            let listed = board.legal_moves(to_move);
            let checked: Vec<Move> = board
                .iter()
                .map(|(mv, _)| mv)
                .filter(|&mv| board.is_legal(mv, to_move))
                .collect();
            listed == checked && board.can_move(to_move) == !listed.is_empty()
        }

        fn flips_only_opponent_discs(input: PlayedBoard) -> bool {
            let PlayedBoard { board, to_move } = input;
            board.legal_moves(to_move).into_iter().all(|mv| {
                let calculation = board.calculate(mv, to_move).unwrap();
                let flipped = calculation.flipped().to_vec();
                let after = calculation.execute();
                flipped.iter().all(|&sq| board.at(sq) == Some(!to_move))
                    && flipped.iter().all(|&sq| after.at(sq) == Some(to_move))
                    && after.at(mv) == Some(to_move)
                    && after.iter().filter(|(_, c)| c.is_some()).count()
                        == board.iter().filter(|(_, c)| c.is_some()).count() + 1
            })
        }
    }

    #[test]
    fn legal_starting_moves() {
        let board = Board::new(8).unwrap();
        assert_eq!(
            board.legal_moves(Color::Dark),
            moves(&[(2, 3), (3, 2), (4, 5), (5, 4)])
        );
        assert_eq!(
            board.legal_moves(Color::Light),
            moves(&[(2, 4), (3, 5), (4, 2), (5, 3)])
        );
        assert!(board.is_legal(Move::new(2, 3), Color::Dark));
        assert!(!board.is_legal(Move::new(2, 4), Color::Dark));
        assert!(board.is_legal(Move::new(2, 4), Color::Light));
        assert!(!board.is_legal(Move::new(4, 5), Color::Light));
    }

    #[test]
    fn occupied_and_off_board_squares_are_not_legal() {
        let board = Board::new(8).unwrap();
        assert!(!board.is_legal(Move::new(3, 3), Color::Dark));
        for mv in moves(&[(-1, -1), (-1, 3), (8, 0), (0, 8), (100, 100)]) {
            assert!(!board.is_legal(mv, Color::Dark));
            assert!(!board.is_legal(mv, Color::Light));
        }
    }

    #[test]
    fn starting_moves_flip_one_disc() {
        let mut board = Board::new(8).unwrap();
        board.apply_move(Move::new(5, 4), Color::Dark).unwrap();
        assert_eq!(board, board_with(&[(4, 4, D), (5, 4, D)]));

        let mut board = Board::new(8).unwrap();
        board.apply_move(Move::new(3, 5), Color::Light).unwrap();
        assert_eq!(board, board_with(&[(3, 4, L), (3, 5, L)]));
    }

    #[test]
    fn move_sequence_reaches_known_position() {
        let mut board = Board::new(8).unwrap();
        for (row, col, color) in [
            (2, 3, Color::Dark),
            (2, 4, Color::Light),
            (3, 5, Color::Dark),
            (4, 2, Color::Light),
            (3, 2, Color::Dark),
            (2, 2, Color::Light),
        ] {
            board.apply_move(Move::new(row, col), color).unwrap();
        }
        let expected = board_with(&[
            (2, 2, L),
            (2, 3, L),
            (2, 4, L),
            (3, 2, L),
            (3, 3, L),
            (3, 4, D),
            (3, 5, D),
            (4, 2, L),
            (4, 3, L),
            (4, 4, L),
        ]);
        assert_eq!(board, expected);
    }

    #[test]
    fn first_dark_move_flips_the_center() {
        let mut board = Board::new(8).unwrap();
        let placement = board.apply_move(Move::new(2, 3), Color::Dark).unwrap();
        assert_eq!(placement.mv(), Move::new(2, 3));
        assert_eq!(placement.color(), Color::Dark);
        assert_eq!(placement.flipped(), moves(&[(3, 3)]));
        for square in moves(&[(2, 3), (3, 3), (3, 4), (4, 3)]) {
            assert_eq!(board.at(square), D);
        }
        assert_eq!(board.at(Move::new(4, 4)), L);
    }

    #[test]
    fn placements_come_only_from_the_board() {
        let start = Board::new(8).unwrap();
        let mut board = start.clone();
        let placement = board.apply_move(Move::new(2, 3), Color::Dark).unwrap();
        let reply = board.apply_move(Move::new(2, 2), Color::Light).unwrap();
        assert_eq!(reply.flipped(), moves(&[(3, 3)]));

        let mut copy = board.clone();
        copy.undo(&reply);
        copy.undo(&placement);
        assert_eq!(copy, start);

        let calculated = start.calculate(Move::new(2, 3), Color::Dark).unwrap();
        assert_eq!(calculated.into_placement(), placement);
    }

    #[test]
    fn flips_every_capturing_direction() {
        // Dark at (4, 4) captures north, west and north-west at the same time.
        let mut board = Board::empty(8).unwrap();
        for (row, col, cell) in [
            (1, 4, D),
            (2, 4, L),
            (3, 4, L),
            (4, 1, D),
            (4, 2, L),
            (4, 3, L),
            (2, 2, D),
            (3, 3, L),
            // Not capturing: the run east ends on an empty square.
            (4, 5, L),
            (4, 6, L),
        ] {
            board.set(Move::new(row, col), cell).unwrap();
        }
        let placement = board.apply_move(Move::new(4, 4), Color::Dark).unwrap();
        let mut flipped = placement.flipped().to_vec();
        flipped.sort();
        assert_eq!(flipped, moves(&[(2, 4), (3, 3), (3, 4), (4, 2), (4, 3)]));
        assert_eq!(board.at(Move::new(4, 5)), L);
        assert_eq!(board.at(Move::new(4, 6)), L);
    }

    #[test]
    fn run_into_the_edge_captures_nothing() {
        let mut board = Board::empty(4).unwrap();
        board.set(Move::new(0, 1), L).unwrap();
        board.set(Move::new(0, 2), L).unwrap();
        board.set(Move::new(0, 3), L).unwrap();
        assert!(!board.is_legal(Move::new(0, 0), Color::Dark));
        assert_eq!(
            board.apply_move(Move::new(0, 0), Color::Dark),
            Err(IllegalMove::NoCapture {
                mv: Move::new(0, 0)
            })
        );
    }

    #[test]
    fn illegal_moves_report_a_reason() {
        let mut board = Board::new(8).unwrap();
        let before = board.clone();
        assert_eq!(
            board.apply_move(Move::new(-1, -1), Color::Dark),
            Err(IllegalMove::OutOfBounds {
                mv: Move::new(-1, -1)
            })
        );
        assert_eq!(
            board.apply_move(Move::new(3, 3), Color::Dark),
            Err(IllegalMove::Occupied {
                mv: Move::new(3, 3)
            })
        );
        assert_eq!(
            board.apply_move(Move::new(1, 1), Color::Dark),
            Err(IllegalMove::NoCapture {
                mv: Move::new(1, 1)
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn full_board_has_no_moves() {
        let board = Board::filled(8, Color::Dark).unwrap();
        assert!(!board.can_move(Color::Dark));
        assert!(!board.can_move(Color::Light));
        assert!(board.legal_moves(Color::Light).is_empty());
    }
}
