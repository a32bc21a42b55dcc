use crate::hint::Variant;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up or starting a game.
///
/// Wrong guesses and expired countdowns are ordinary state transitions and
/// never show up here.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("failed to load word list from '{}': {source}", .path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("word list is empty")]
    EmptyWordList,
    #[error("no word in the list is long enough for a {variant} hint")]
    NoEligibleWords { variant: Variant },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_error_names_path() {
        let err = GameError::WordList {
            path: PathBuf::from("/missing/words.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("/missing/words.txt"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_no_eligible_words_names_variant() {
        let err = GameError::NoEligibleWords {
            variant: Variant::Mixed,
        };
        assert_eq!(
            err.to_string(),
            "no word in the list is long enough for a mixed hint"
        );
    }
}
