pub mod game;

pub use game::prelude::*;
use std::error::Error;
use std::fmt::Display;

pub mod prelude {
    pub use crate::game::prelude::*;
}

/// Errors surfaced to the presentation layer when the engine is driven out of
/// turn. The engine itself has no fallible I/O; a near-exhausted shoe
/// reshuffles eagerly before drawing and is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    NoRoundInProgress,
    RoundInProgress,
}

impl Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::NoRoundInProgress => {
                write!(f, "no round in progress, call start_round first")
            }
            GameError::RoundInProgress => write!(f, "a round is already in progress"),
        }
    }
}

impl Error for GameError {}
