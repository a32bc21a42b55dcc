//! Round/timer/lives state machine and the loop that drives it.
//!
//! # State Machine
//! - `AwaitingWords` → `Playing` once the word list is in (`Game::start`)
//! - `Playing` → `Playing` on a correct guess or an expired countdown with
//!   lives to spare (a new round starts synchronously)
//! - `Playing` → `GameOver` when the last life is lost
//!
//! `GameOver` is terminal for that game; `Game::new_game` builds a fresh one.

use crate::config::{GameConfig, INITIAL_SECONDS, STARTING_LIVES};
use crate::error::GameError;
use crate::hint::{Hint, pick_hint};
use crate::timer::Ticker;
use crate::wordbank::normalize;
use rand::Rng;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingWords,
    Playing,
    GameOver,
}

/// Everything an interface needs to draw the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub lives: u8,
    pub seconds_remaining: u32,
    pub guess: String,
    pub phase: Phase,
    pub hint: Option<Hint>,
    /// Rounds started in this game, including the current one.
    pub round: u32,
    pub solved: u32,
}

impl RoundState {
    fn initial() -> Self {
        Self {
            lives: STARTING_LIVES,
            seconds_remaining: INITIAL_SECONDS,
            guess: String::new(),
            phase: Phase::AwaitingWords,
            hint: None,
            round: 0,
            solved: 0,
        }
    }

    #[must_use]
    pub fn hint_text(&self) -> &str {
        self.hint.as_ref().map_or("", |h| h.text.as_str())
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Ignored,
    Counting { seconds_remaining: u32 },
    /// Countdown expired, a life was lost and a new round began.
    LifeLost { lives: u8, answer: String },
    GameOver { answer: String, solved: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Ignored,
    Correct { word: String },
    Wrong { guess: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    /// Append a character to the guess being typed.
    Type(char),
    /// Remove the last character of the guess being typed.
    Erase,
    /// Submit the guess being typed.
    Submit,
    /// Replace the guess with a whole line and submit it.
    Guess(String),
    NewGame,
    Exit,
}

/// Transient messages for the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Correct { word: String },
    Wrong { guess: String },
    TimeUp { lives: u8, answer: String },
    /// A typed line arrived after its round had already expired.
    TooLate,
    /// A guess arrived after the game ended.
    NotPlaying,
    GameOver { answer: String, solved: u32 },
    NewGame { word_count: usize },
    Error(String),
}

/// Presentation seam: the TUI and the line-based CLI both implement this.
pub trait GameInterface {
    fn render(&mut self, state: &RoundState);
    /// Wait up to `timeout` for the next user action.
    fn poll_action(&mut self, timeout: Duration) -> Option<UserAction>;
    fn notify(&mut self, notice: &Notice);
}

/// How the last game ended when `game_loop` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub solved: u32,
    pub rounds: u32,
    pub lives: u8,
    pub game_over: bool,
}

pub struct Game<R> {
    words: Vec<String>,
    config: GameConfig,
    rng: R,
    state: RoundState,
    ticker: Ticker,
    /// Typing stops here; nothing longer than the longest word can match.
    max_guess_chars: usize,
}

impl<R: Rng> Game<R> {
    /// Words are normalised the same way the word bank loaders do it
    /// (trimmed, lowercased, blanks dropped).
    pub fn new(words: Vec<String>, config: GameConfig, rng: R) -> Self {
        let words: Vec<String> = words.iter().filter_map(|w| normalize(w)).collect();
        let max_guess_chars = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        let ticker = Ticker::new(config.tick);
        Self {
            words,
            config,
            rng,
            state: RoundState::initial(),
            ticker,
            max_guess_chars,
        }
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Fire the first round once the word list is available.
    ///
    /// # Errors
    ///
    /// `EmptyWordList` or `NoEligibleWords`; the game then stays in
    /// `AwaitingWords`.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state.phase != Phase::AwaitingWords {
            return Ok(());
        }
        if self.words.is_empty() {
            log::error!("Cannot start: word list is empty");
            return Err(GameError::EmptyWordList);
        }
        self.next_round()?;
        self.state.phase = Phase::Playing;
        log::info!(
            "Game started with {} words ({} variant)",
            self.words.len(),
            self.config.variant
        );
        Ok(())
    }

    /// Start a new round: fresh countdown, fresh hint, empty guess.
    ///
    /// # Errors
    ///
    /// Propagates hint generation failures.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        let hint = pick_hint(&self.words, self.config.variant, &mut self.rng)?;
        self.state.seconds_remaining = self
            .rng
            .random_range(self.config.min_seconds..=self.config.max_seconds);
        self.state.hint = Some(hint);
        self.state.guess.clear();
        self.state.round += 1;
        log::info!(
            "Round {}: hint '{}', {}s",
            self.state.round,
            self.state.hint_text(),
            self.state.seconds_remaining
        );
        Ok(())
    }

    /// One second of countdown.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != Phase::Playing || self.state.lives == 0 {
            return TickOutcome::Ignored;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.seconds_remaining > 0 {
            return TickOutcome::Counting {
                seconds_remaining: self.state.seconds_remaining,
            };
        }

        let answer = self.current_answer();
        self.state.lives -= 1;
        log::info!(
            "Time up on round {}, {} lives left",
            self.state.round,
            self.state.lives
        );
        if self.state.lives == 0 {
            self.finish();
            return TickOutcome::GameOver {
                answer,
                solved: self.state.solved,
            };
        }

        match self.next_round() {
            Ok(()) => TickOutcome::LifeLost {
                lives: self.state.lives,
                answer,
            },
            Err(e) => {
                log::error!("Failed to start next round: {e}");
                self.finish();
                TickOutcome::GameOver {
                    answer,
                    solved: self.state.solved,
                }
            }
        }
    }

    /// Check the current guess against the round's valid words.
    pub fn submit_guess(&mut self) -> GuessOutcome {
        if self.state.phase != Phase::Playing {
            return GuessOutcome::Ignored;
        }

        let guess = std::mem::take(&mut self.state.guess);
        let correct = self
            .state
            .hint
            .as_ref()
            .is_some_and(|hint| hint.accepts(&guess));
        if !correct {
            log::info!("Wrong guess '{guess}' for hint '{}'", self.state.hint_text());
            return GuessOutcome::Wrong { guess };
        }

        let word = guess.trim().to_lowercase();
        self.state.solved += 1;
        log::info!("Correct guess '{word}' on round {}", self.state.round);
        // New countdown, so the pending tick is rescheduled from now.
        self.ticker.cancel();
        if let Err(e) = self.next_round() {
            log::error!("Failed to start next round: {e}");
            self.finish();
        }
        GuessOutcome::Correct { word }
    }

    pub fn set_guess(&mut self, text: &str) {
        if self.state.phase == Phase::Playing {
            self.state.guess = text.to_string();
        }
    }

    pub fn push_guess_char(&mut self, c: char) {
        if self.state.phase == Phase::Playing
            && self.state.guess.chars().count() < self.max_guess_chars
        {
            self.state.guess.push(c);
        }
    }

    pub fn pop_guess_char(&mut self) {
        if self.state.phase == Phase::Playing {
            self.state.guess.pop();
        }
    }

    /// Replace a finished game with a fresh one over the same word list.
    /// Returns `Ok(false)` while a game is still running.
    ///
    /// # Errors
    ///
    /// Propagates `start` failures.
    pub fn new_game(&mut self) -> Result<bool, GameError> {
        if self.state.phase != Phase::GameOver {
            return Ok(false);
        }
        self.state = RoundState::initial();
        self.ticker.cancel();
        self.start()?;
        Ok(true)
    }

    /// Apply every tick that fell due by `now`, arming the timer if this is
    /// the first call since it was cancelled.
    pub fn advance_clock(&mut self, now: Instant) -> Vec<TickOutcome> {
        if self.state.phase != Phase::Playing {
            self.ticker.cancel();
            return Vec::new();
        }
        self.ticker.ensure_armed(now);
        let due = self.ticker.take_due(now);

        let mut outcomes = Vec::new();
        for _ in 0..due {
            let outcome = self.tick();
            let over = matches!(outcome, TickOutcome::GameOver { .. });
            outcomes.push(outcome);
            if over {
                break;
            }
        }
        outcomes
    }

    /// How long an interface may block before the next tick is due.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        if self.state.phase != Phase::Playing {
            return None;
        }
        Some(
            self.ticker
                .time_until(now)
                .unwrap_or_else(|| self.ticker.period()),
        )
    }

    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            solved: self.state.solved,
            rounds: self.state.round,
            lives: self.state.lives,
            game_over: self.state.is_over(),
        }
    }

    fn current_answer(&self) -> String {
        self.state
            .hint
            .as_ref()
            .map(|h| h.source.clone())
            .unwrap_or_default()
    }

    fn finish(&mut self) {
        self.state.phase = Phase::GameOver;
        self.state.seconds_remaining = 0;
        self.state.guess.clear();
        self.ticker.cancel();
        log::info!(
            "Game over after {} rounds, {} solved",
            self.state.round,
            self.state.solved
        );
    }
}

fn report_ticks<R: Rng, I: GameInterface + ?Sized>(
    game: &mut Game<R>,
    interface: &mut I,
    now: Instant,
) {
    for outcome in game.advance_clock(now) {
        match outcome {
            TickOutcome::LifeLost { lives, answer } => {
                interface.notify(&Notice::TimeUp { lives, answer });
            }
            TickOutcome::GameOver { answer, solved } => {
                interface.notify(&Notice::GameOver { answer, solved });
            }
            TickOutcome::Counting { .. } | TickOutcome::Ignored => {}
        }
    }
}

fn report_guess<R: Rng, I: GameInterface + ?Sized>(game: &mut Game<R>, interface: &mut I) {
    match game.submit_guess() {
        GuessOutcome::Correct { word } => interface.notify(&Notice::Correct { word }),
        GuessOutcome::Wrong { guess } => interface.notify(&Notice::Wrong { guess }),
        GuessOutcome::Ignored => {}
    }
}

/// Drive a started game until the player exits.
///
/// Each pass renders, waits for input no longer than the next tick, applies
/// whatever ticks fell due, then applies the action.
pub fn game_loop<R: Rng, I: GameInterface + ?Sized>(
    game: &mut Game<R>,
    interface: &mut I,
) -> GameSummary {
    loop {
        report_ticks(game, interface, Instant::now());
        interface.render(game.state());

        let timeout = game
            .time_until_tick(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        let round_at_prompt = game.state().round;
        let Some(action) = interface.poll_action(timeout) else {
            continue;
        };
        report_ticks(game, interface, Instant::now());

        match action {
            UserAction::Exit => {
                log::info!("Player exited");
                break;
            }
            UserAction::NewGame => match game.new_game() {
                Ok(true) => interface.notify(&Notice::NewGame {
                    word_count: game.words().len(),
                }),
                Ok(false) => {}
                Err(e) => {
                    log::error!("Failed to start a new game: {e}");
                    interface.notify(&Notice::Error(e.to_string()));
                }
            },
            UserAction::Type(c) => game.push_guess_char(c),
            UserAction::Erase => game.pop_guess_char(),
            UserAction::Submit => report_guess(game, interface),
            UserAction::Guess(text) => {
                if game.state().round == round_at_prompt {
                    game.set_guess(&text);
                    report_guess(game, interface);
                } else if !game.state().is_over() {
                    interface.notify(&Notice::TooLate);
                }
                if game.state().is_over() {
                    interface.notify(&Notice::NotPlaying);
                }
            }
        }
    }
    game.summary()
}
