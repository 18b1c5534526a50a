pub use agent::*;
pub use board::*;
pub use game_state::*;
pub use outcome::*;
pub use protocol_types::*;
pub use visualization::*;

mod agent;
#[cfg(test)]
mod arbitrary;
mod board;
mod game_state;
mod outcome;
mod protocol_types;
mod rules;
mod visualization;
