//! Two-player word-game engine: a DAWG-backed dictionary with prefix and
//! anagram search, Scrabble-style move validation and scoring, and a
//! thread-safe session engine with lobby matchmaking and lazy turn clocks.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod session;

pub use config::EngineConfig;
pub use dictionary::loader::load_dawg;
pub use dictionary::queries::WordQueries;
pub use dictionary::{Dawg, WordDictionary};
pub use error::{DictionaryError, GameError, MoveError};
pub use game::validation::{MoveOutcome, MoveValidator, Placement};
pub use session::clock::{GameClock, ManualClock, SystemClock};
pub use session::notify::{ChannelNotifier, GameNotifier, NullNotifier};
pub use session::snapshot::{GameSnapshot, PlayerSnapshot};
pub use session::{JoinResult, MoveResult, SessionEngine};
