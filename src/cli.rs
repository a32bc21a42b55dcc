use crate::config::GameConfig;
use crate::error::GameError;
use crate::game_state::{GameInterface, Notice, Phase, RoundState, UserAction};
use crate::hint::Variant;
use crate::logging::{LogTarget, default_log_path};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// Type a word containing the hint before the countdown runs out
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Hint length and timer rules
    #[arg(short = 'v', long, value_enum, default_value_t = Variant::Mixed)]
    pub variant: Variant,

    /// Shortest round countdown in seconds (overrides the variant)
    #[arg(long)]
    pub min_seconds: Option<u32>,

    /// Longest round countdown in seconds (overrides the variant)
    #[arg(long)]
    pub max_seconds: Option<u32>,

    /// Seed for reproducible hints and countdowns
    #[arg(long)]
    pub seed: Option<u64>,

    /// Line-based play on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    pub plain: bool,

    /// Log file for the full-screen UI (defaults to the user cache dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// # Errors
    ///
    /// `InvalidConfig` for out-of-range countdown bounds.
    pub fn game_config(&self) -> Result<GameConfig, GameError> {
        GameConfig::new(self.variant).with_bounds(self.min_seconds, self.max_seconds)
    }

    /// Stderr in plain mode; a file otherwise, or `None` when no file
    /// location is known.
    #[must_use]
    pub fn log_target(&self) -> Option<LogTarget> {
        if self.plain {
            return Some(LogTarget::Stderr);
        }
        self.log_file
            .clone()
            .or_else(default_log_path)
            .map(LogTarget::File)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum LineInput {
    Guess(String),
    Empty,
    NewGame,
    Exit,
}

pub fn read_line_input<R: BufRead>(reader: &mut R) -> LineInput {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return LineInput::Exit,
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to read input: {e}");
            return LineInput::Exit;
        }
    }
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "" => LineInput::Empty,
        "/exit" | "/quit" => LineInput::Exit,
        "/new" => LineInput::NewGame,
        _ => LineInput::Guess(input.to_string()),
    }
}

fn hearts(lives: u8) -> String {
    "♥".repeat(usize::from(lives))
}

pub fn display_state(state: &RoundState) {
    match state.phase {
        Phase::AwaitingWords => println!("Loading words..."),
        Phase::Playing => {
            println!(
                "\nTime left: {}s  Lives: {}  Solved: {}",
                state.seconds_remaining,
                hearts(state.lives),
                state.solved
            );
            println!("Hint: {}", state.hint_text().to_uppercase());
            println!("Enter a word containing the hint ('/exit' to quit):");
        }
        Phase::GameOver => {
            println!("\nGame Over! Type '/new' to play again or '/exit' to quit.");
        }
    }
}

pub fn display_notice(notice: &Notice) {
    match notice {
        Notice::Correct { word } => println!("Correct. '{word}' fits."),
        Notice::Wrong { guess } if guess.trim().is_empty() => println!("Wrong guess! Try again."),
        Notice::Wrong { guess } => println!("Wrong guess! '{}' doesn't fit. Try again.", guess.trim()),
        Notice::TimeUp { lives, answer } => {
            println!("Time's up! '{answer}' would have worked. Lives left: {lives}");
        }
        Notice::TooLate => println!("Too late! That round already ended."),
        Notice::NotPlaying => println!("Game over! Type '/new' to play again."),
        Notice::GameOver { answer, solved } => {
            println!("Time's up! '{answer}' would have worked.");
            println!("Game Over! You solved {solved} hints.");
        }
        Notice::NewGame { word_count } => {
            println!("New game started. Loaded {word_count} words.");
        }
        Notice::Error(message) => eprintln!("Error: {message}"),
    }
}

/// Line-based implementation of `GameInterface` over any `BufRead`.
///
/// Reading blocks, so the countdown is caught up after each line: a guess
/// typed after its round expired is reported as too late.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, state: &RoundState) {
        display_state(state);
    }

    fn poll_action(&mut self, _timeout: Duration) -> Option<UserAction> {
        match read_line_input(&mut self.reader) {
            LineInput::Guess(text) => Some(UserAction::Guess(text)),
            LineInput::NewGame => Some(UserAction::NewGame),
            LineInput::Exit => Some(UserAction::Exit),
            LineInput::Empty => None,
        }
    }

    fn notify(&mut self, notice: &Notice) {
        display_notice(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hintword"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.variant, Variant::Mixed);
        assert!(!cli.plain);
        assert_eq!(cli.seed, None);
        let config = cli.game_config().unwrap();
        assert_eq!((config.min_seconds, config.max_seconds), (7, 15));
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::try_parse_from([
            "hintword",
            "-i",
            "words.txt",
            "--variant",
            "classic",
            "--min-seconds",
            "5",
            "--max-seconds",
            "9",
            "--seed",
            "42",
            "--plain",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some("words.txt".to_string()));
        assert_eq!(cli.variant, Variant::Classic);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.plain);
        let config = cli.game_config().unwrap();
        assert_eq!(config.variant, Variant::Classic);
        assert_eq!((config.min_seconds, config.max_seconds), (5, 9));
        assert_eq!(cli.log_target(), Some(LogTarget::Stderr));
    }

    #[test]
    fn test_parse_cli_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["hintword", "--variant", "hard"]).is_err());
    }

    #[test]
    fn test_bad_bounds_fail_config() {
        let cli = Cli::try_parse_from(["hintword", "--min-seconds", "30"]).unwrap();
        assert!(matches!(cli.game_config(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_explicit_log_file() {
        let cli = Cli::try_parse_from(["hintword", "--log-file", "/tmp/h.log"]).unwrap();
        assert_eq!(
            cli.log_target(),
            Some(LogTarget::File(PathBuf::from("/tmp/h.log")))
        );
    }

    #[test]
    fn test_read_line_guess_keeps_case() {
        let mut reader = Cursor::new("  Apple \n");
        match read_line_input(&mut reader) {
            LineInput::Guess(word) => assert_eq!(word, "Apple"),
            _ => panic!("Expected Guess"),
        }
    }

    #[test]
    fn test_read_line_commands() {
        let mut reader = Cursor::new("/new\n/EXIT\n/quit\n\n");
        assert!(matches!(read_line_input(&mut reader), LineInput::NewGame));
        assert!(matches!(read_line_input(&mut reader), LineInput::Exit));
        assert!(matches!(read_line_input(&mut reader), LineInput::Exit));
        assert!(matches!(read_line_input(&mut reader), LineInput::Empty));
    }

    #[test]
    fn test_read_line_eof_exits() {
        let mut reader = Cursor::new("");
        assert!(matches!(read_line_input(&mut reader), LineInput::Exit));
    }

    #[test]
    fn test_cli_interface_maps_lines_to_actions() {
        let mut interface = CliInterface::new(Cursor::new("maple\n\n/new\n"));
        let timeout = Duration::from_millis(100);
        assert_eq!(
            interface.poll_action(timeout),
            Some(UserAction::Guess("maple".to_string()))
        );
        assert_eq!(interface.poll_action(timeout), None);
        assert_eq!(interface.poll_action(timeout), Some(UserAction::NewGame));
        assert_eq!(interface.poll_action(timeout), Some(UserAction::Exit));
    }

    #[test]
    fn test_hearts() {
        assert_eq!(hearts(3), "♥♥♥");
        assert_eq!(hearts(0), "");
    }
}
