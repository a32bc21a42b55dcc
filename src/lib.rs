// Library interface for hintword
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod error;
pub mod game_state;
pub mod hint;
pub mod logging;
pub mod timer;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use config::GameConfig;
pub use error::GameError;
pub use game_state::{Game, GameSummary, Phase, RoundState, UserAction, game_loop};
pub use hint::{Hint, Variant, pick_hint, valid_words_for};
pub use wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
