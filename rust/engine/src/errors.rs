use thiserror::Error;

use crate::player::Action;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requested move is not in the seat's legal set. The caller should
    /// ask again; engine state is unchanged.
    #[error("Action {action:?} is not legal for seat {seat} (legal: {legal:?})")]
    InvalidAction {
        seat: usize,
        action: Action,
        legal: Vec<Action>,
    },
    /// An internal invariant broke. The hand must not continue.
    #[error("Illegal engine state: {0}")]
    IllegalState(String),
    #[error("It's not seat {actual}'s turn (expected seat {expected:?})")]
    NotPlayersTurn {
        expected: Option<usize>,
        actual: usize,
    },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("At least two players with chips are required")]
    NotEnoughPlayers,
    #[error("Deck exhausted: requested {requested}, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Hand evaluation needs 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),
    #[error("Cannot parse card '{0}'")]
    CardParse(String),
    #[error("Expected {expected} deciders, got {actual}")]
    DeciderCount { expected: usize, actual: usize },
}

impl GameError {
    /// Fatal errors mean the table can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::IllegalState(_))
    }
}
