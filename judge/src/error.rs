use othello::{Color, Move, TurnError};

/// A move sent by a bot that the referee did not accept.
#[derive(Debug)]
pub struct IllegalMove {
    pub color: Color,
    pub mv: Move,
    pub err: TurnError,
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tried to play {}, which was rejected",
            self.color, self.mv
        )
    }
}
