// Library interface for hangman
// This allows integration tests to access internal modules

pub mod logging;

pub mod art;
pub mod cli;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod tui;
pub mod word_source;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{
    Accepted, GameOutcome, GuessResult, GuessingEngine, InvalidReason, MAX_TRIES, SecretWord,
};
pub use error::WordSourceError;
pub use game_state::{GameInterface, Input, SessionConfig, SessionSummary, SourceChoice, game_loop};
pub use word_source::{RandomWordApi, StandardWordSource, WordSource};
pub use wordbank::{choose_word, choose_word_from_file, load_words_from_file, load_words_from_str};
