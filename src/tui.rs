//! TUI (Terminal User Interface) module for hintword
//!
//! This module provides the full-screen interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders `RoundState`, turns key presses into
//!   `UserAction`s and shows notices as short-lived toasts
//!
//! Input handling depends on the phase of the last rendered state:
//! - `Playing`: letters type, BACKSPACE erases, ENTER submits
//! - `GameOver`: N starts a new game
//! - ESC (or Ctrl-C) quits from anywhere

use crate::game_state::{GameInterface, Notice, Phase, RoundState, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_millis(1800);
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const LOW_TIME_SECONDS: u32 = 3;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const HINT_STYLE: Style = Style::new()
    .fg(Color::Green)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);
const HEART_STYLE: Style = Style::new().fg(Color::Red);

#[derive(Debug)]
struct Toast {
    text: String,
    style: Style,
    expires: Instant,
}

impl Toast {
    fn from_notice(notice: &Notice, now: Instant) -> Self {
        let (text, style) = match notice {
            Notice::Correct { word } => (format!("Correct. '{word}' fits."), SUCCESS_STYLE),
            Notice::Wrong { .. } => ("Wrong guess! Try again.".to_string(), ERROR_STYLE),
            Notice::TimeUp { answer, .. } => (
                format!("Time's up! '{answer}' would have worked."),
                INFO_STYLE,
            ),
            Notice::TooLate => ("Too late! That round already ended.".to_string(), INFO_STYLE),
            Notice::NotPlaying => ("Game over! Press N to play again.".to_string(), INFO_STYLE),
            Notice::GameOver { answer, .. } => (
                format!("Time's up! '{answer}' would have worked."),
                ERROR_STYLE,
            ),
            Notice::NewGame { word_count } => (
                format!("New game started. Loaded {word_count} words."),
                HEADER_STYLE,
            ),
            Notice::Error(message) => (format!("Error: {message}"), ERROR_STYLE),
        };
        Self {
            text,
            style,
            expires: now + TOAST_DURATION,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        now < self.expires
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: &'a RoundState,
    toast: Option<&'a Toast>,
    error_message: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and notice display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    phase: Phase,
    toast: Option<Toast>,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            phase: Phase::AwaitingWords,
            toast: None,
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, state: &RoundState) -> Result<(), io::Error> {
        let now = Instant::now();
        if self.toast.as_ref().is_some_and(|t| !t.is_live(now)) {
            self.toast = None;
        }
        let ctx = RenderContext {
            state,
            toast: self.toast.as_ref(),
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Time and lives
                Constraint::Length(5), // Hint
                Constraint::Length(3), // Guess
                Constraint::Min(3),    // Messages
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_status(f, chunks[1], ctx.state);
        Self::render_hint(f, chunks[2], ctx.state);
        Self::render_guess(f, chunks[3], ctx.state);
        Self::render_messages(f, chunks[4], ctx);
        Self::render_instructions(f, chunks[5], ctx.state.phase);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORD GUESSING GAME")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_status(f: &mut Frame, area: Rect, state: &RoundState) {
        let time_style = if state.seconds_remaining <= LOW_TIME_SECONDS {
            ERROR_STYLE.add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![
            Span::raw(" Time left: "),
            Span::styled(format!("{:>2}", state.seconds_remaining), time_style),
            Span::raw("    Lives: "),
        ];
        for _ in 0..state.lives {
            spans.push(Span::styled("♥ ", HEART_STYLE));
        }
        spans.push(Span::raw(format!("   Solved: {}", state.solved)));

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_hint(f: &mut Frame, area: Rect, state: &RoundState) {
        let line = match state.phase {
            Phase::AwaitingWords => Line::from("Loading words..."),
            Phase::Playing => Line::from(vec![
                Span::raw("Hint: "),
                Span::styled(format!(" {} ", state.hint_text().to_uppercase()), HINT_STYLE),
            ]),
            Phase::GameOver => Line::from(Span::styled(
                "Game Over!",
                ERROR_STYLE.add_modifier(Modifier::BOLD),
            )),
        };
        let paragraph = Paragraph::new(vec![Line::from(""), line])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(format!("Round {}", state.round)));
        f.render_widget(paragraph, area);
    }

    fn render_guess(f: &mut Frame, area: Rect, state: &RoundState) {
        let line = if state.phase == Phase::Playing {
            if state.guess.is_empty() {
                Line::from(Span::styled(
                    "Type your guess here...",
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Line::from(vec![Span::raw(state.guess.as_str()), Span::raw("_")])
            }
        } else {
            Line::from("")
        };
        let paragraph =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Guess"));
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(toast) = ctx.toast {
            lines.push(Line::from(Span::styled(toast.text.as_str(), toast.style)));
        }

        if ctx.state.is_over() {
            lines.push(Line::from(Span::styled(
                format!("You solved {} hints.", ctx.state.solved),
                INFO_STYLE,
            )));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, phase: Phase) {
        let text = match phase {
            Phase::AwaitingWords => "ESC: Quit",
            Phase::Playing => "Type a word containing the hint | ENTER: Submit | ESC: Quit",
            Phase::GameOver => "N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, timeout: Duration) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                Ok(self.handle_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        // Raw mode swallows SIGINT, so honour Ctrl-C here.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UserAction::Exit);
        }
        if key.code == KeyCode::Esc {
            info_log!("handle_key() - ESC pressed, returning Exit");
            return Some(UserAction::Exit);
        }

        match self.phase {
            Phase::Playing => self.handle_guess_input(key),
            Phase::GameOver => Self::handle_game_over_input(key),
            Phase::AwaitingWords => None,
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        match key.code {
            KeyCode::Char(c) => {
                // Replacement and control characters show up from escape sequences
                // when alt-tabbing
                if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                    debug_log!("handle_guess_input() - Ignoring invalid character: {:?}", c);
                    return None;
                }
                if Self::has_modifier_keys(&key) {
                    debug_log!(
                        "handle_guess_input() - Ignoring character with modifier: {:?}",
                        key.modifiers
                    );
                    return None;
                }
                if is_word_char(c) {
                    Some(UserAction::Type(c))
                } else {
                    self.error_message = format!("'{c}' cannot appear in a word");
                    None
                }
            }
            KeyCode::Backspace => Some(UserAction::Erase),
            KeyCode::Enter => Some(UserAction::Submit),
            _ => None,
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }
}

/// Anything printable can appear in a list word (digits, spaces, `mp3`).
fn is_word_char(c: char) -> bool {
    !c.is_control() && c != '\u{FFFD}'
}

impl GameInterface for TuiInterface {
    fn render(&mut self, state: &RoundState) {
        self.phase = state.phase;
        if let Err(e) = self.draw(state) {
            debug_log!("Draw error: {}", e);
        }
    }

    fn poll_action(&mut self, timeout: Duration) -> Option<UserAction> {
        match self.handle_input(timeout) {
            Ok(action) => action,
            Err(e) => {
                log::error!("Error handling input, exiting: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn notify(&mut self, notice: &Notice) {
        info_log!("notify() - {:?}", notice);
        self.toast = Some(Toast::from_notice(notice, Instant::now()));
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('É'));
        assert!(is_word_char('-'));
        assert!(is_word_char('\''));
        assert!(is_word_char('3'));
        assert!(is_word_char(' '));
        assert!(!is_word_char('\u{7}'));
        assert!(!is_word_char('\u{FFFD}'));
    }

    #[test]
    fn test_toast_expires() {
        let now = Instant::now();
        let toast = Toast::from_notice(&Notice::TooLate, now);
        assert!(toast.is_live(now));
        assert!(!toast.is_live(now + TOAST_DURATION));
    }

    #[test]
    fn test_toast_text_for_outcomes() {
        let now = Instant::now();
        let correct = Toast::from_notice(
            &Notice::Correct {
                word: "maple".to_string(),
            },
            now,
        );
        assert_eq!(correct.text, "Correct. 'maple' fits.");
        assert_eq!(correct.style, SUCCESS_STYLE);

        let wrong = Toast::from_notice(
            &Notice::Wrong {
                guess: "banana".to_string(),
            },
            now,
        );
        assert_eq!(wrong.text, "Wrong guess! Try again.");
        assert_eq!(wrong.style, ERROR_STYLE);
    }

    #[test]
    fn test_game_over_keys() {
        let new_game = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(
            TuiInterface::handle_game_over_input(new_game),
            Some(UserAction::NewGame)
        );
        let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(TuiInterface::handle_game_over_input(other), None);
    }
}
