//! Error types for dictionary queries, move validation, and game operations.
//!
//! All rejections are synchronous and non-retryable; the message is meant
//! to be shown to the caller as-is.

use thiserror::Error;
use uuid::Uuid;

use crate::game::Coord;

/// Errors from dictionary construction and the word-lookup boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// Words handed to the DAWG builder were not sorted ascending.
    #[error("words must be inserted in lexicographical order ({word:?} after {previous:?})")]
    OutOfOrder { previous: String, word: String },
    /// Empty word or letter input where one is required.
    #[error("word must be provided")]
    EmptyInput,
    /// Input contained a character outside `a`-`z`.
    #[error("value must contain only letters")]
    NonAlphabetic,
    /// Anagram input contained a character outside `a`-`z` and `?`.
    #[error("letters must be alphabetic or ?")]
    InvalidAnagramLetters,
    /// Anagram input exceeded the configured letter cap.
    #[error("too many letters for anagram search ({count} > {max})")]
    TooManyLetters { count: usize, max: usize },
}

/// Reasons a proposed move is rejected. No board, rack, or score state
/// changes when any of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("placement list cannot be empty")]
    NoPlacements,
    #[error("placement out of bounds at ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },
    #[error("invalid placement letter: {0:?}")]
    InvalidLetter(char),
    #[error("duplicate placement at ({}, {})", .0.row, .0.col)]
    DuplicatePlacement(Coord),
    #[error("cannot place tile over existing tile at ({}, {})", .0.row, .0.col)]
    CellOccupied(Coord),
    #[error("tiles must align in a straight line")]
    NotALine,
    #[error("gaps are not allowed in the word")]
    GapInWord,
    #[error("first move must cover the center")]
    MustCoverCenter,
    #[error("move must connect to existing tiles")]
    NotConnected,
    #[error("word not found in dictionary: {0}")]
    WordNotFound(String),
    #[error("invalid cross word: {0}")]
    InvalidCrossWord(String),
}

/// Errors from session and game-state operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game not found: {0}")]
    GameNotFound(Uuid),
    #[error("unknown player id: {0}")]
    UnknownPlayer(Uuid),
    #[error("it is not the player's turn")]
    NotYourTurn,
    #[error("game is not active")]
    NotActive,
    #[error("player timed out")]
    TimedOut,
    #[error("no tiles selected for exchange")]
    EmptyExchange,
    #[error("not enough tiles left in the bag to exchange")]
    NotEnoughTilesInBag,
    #[error("player rack missing letter: {0}")]
    RackMissingLetter(char),
    #[error("player does not have a blank tile")]
    NoBlankTile,
    #[error(transparent)]
    InvalidMove(#[from] MoveError),
}
