//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the round and implements `GameInterface`
//! - `LineEditor`: turns key presses into submitted prompt answers
//!
//! # State Machine
//! Prompts follow the session loop:
//! - `ChoosingSource` → (`EnteringPath` → `EnteringIndex`) → `Guessing`
//!   → `ConfirmingReplay`
//! - Esc in any state closes the session

use crate::art::Artwork;
use crate::engine::{GameOutcome, GuessResult, InvalidReason};
use crate::error::WordSourceError;
use crate::game_state::{
    GameInterface, Input, RoundReport, SessionSummary, SourceChoice, parse_index,
    parse_play_again,
};
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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::path::PathBuf;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const MAX_INPUT_LEN: usize = 256;
const GALLOWS_WIDTH: u16 = 20;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    ChoosingSource,
    EnteringPath,
    EnteringIndex,
    Guessing,
    ConfirmingReplay,
    /// Session over - summary stored in interface.message
    Exiting,
}

impl TuiState {
    fn prompt(self) -> &'static str {
        match self {
            Self::ChoosingSource => "Data source (file or api)",
            Self::EnteringPath => "Word list path",
            Self::EnteringIndex => "Word index",
            Self::Guessing => "Guess a letter",
            Self::ConfirmingReplay => "Play again? (yes or no)",
            Self::Exiting => "Goodbye",
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            Self::Guessing => "Type one letter and press ENTER | ESC: Quit",
            Self::Exiting => "Exiting...",
            _ => "ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineEvent {
    Pending,
    Submitted(String),
    Cancelled,
}

/// Single-line text entry for prompts.
#[derive(Debug, Default)]
struct LineEditor {
    buffer: String,
}

impl LineEditor {
    fn handle_key(&mut self, key: KeyEvent) -> LineEvent {
        match key.code {
            KeyCode::Esc => LineEvent::Cancelled,
            KeyCode::Enter => LineEvent::Submitted(std::mem::take(&mut self.buffer)),
            KeyCode::Backspace => {
                self.buffer.pop();
                LineEvent::Pending
            }
            KeyCode::Char(c) => {
                // Ignore characters with Alt or Control (Shift is ok for uppercase)
                if key.modifiers.contains(KeyModifiers::ALT)
                    || key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    debug_log!(
                        "LineEditor - Ignoring character with modifier: {:?}",
                        key.modifiers
                    );
                } else if self.buffer.chars().count() < MAX_INPUT_LEN {
                    self.buffer.push(c);
                }
                LineEvent::Pending
            }
            _ => LineEvent::Pending,
        }
    }

    fn text(&self) -> &str {
        &self.buffer
    }
}

/// Returns true for characters that come from escape sequences when alt-tabbing.
fn is_garbage_char(c: char) -> bool {
    c == '\u{FFFD}' || ((c as u32) < ASCII_CONTROL_CHAR_THRESHOLD && c != '\t')
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    frame: &'a str,
    reveal: &'a str,
    guessed: &'a str,
    attempts: u8,
    max_tries: u8,
    state: TuiState,
    input: &'a str,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and round state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    editor: LineEditor,
    state: TuiState,
    frame: &'static str,
    reveal: String,
    /// Accepted letters in the order they were guessed
    guessed: Vec<char>,
    attempts: u8,
    max_tries: u8,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            editor: LineEditor::default(),
            state: TuiState::ChoosingSource,
            frame: Artwork::CLASSIC.frame(0),
            reveal: String::new(),
            guessed: Vec::new(),
            attempts: 0,
            max_tries: 0,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
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

    fn draw(&mut self) -> Result<(), io::Error> {
        let guessed = self
            .guessed
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let ctx = RenderContext {
            frame: self.frame,
            reveal: &self.reveal,
            guessed: &guessed,
            attempts: self.attempts,
            max_tries: self.max_tries,
            state: self.state,
            input: self.editor.text(),
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(9),    // Gallows and word
                Constraint::Length(4), // Messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Prompt
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_messages(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_prompt(f, chunks[4], ctx.state, ctx.input);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(10)])
            .split(area);

        let gallows = Paragraph::new(ctx.frame)
            .block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(gallows, columns[0]);

        let guessed = if ctx.guessed.is_empty() {
            "none yet"
        } else {
            ctx.guessed
        };
        let lines = vec![
            Line::from(Span::styled(ctx.reveal.to_string(), WORD_STYLE)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Guessed: ", INFO_STYLE),
                Span::raw(guessed.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Misses: ", INFO_STYLE),
                Span::raw(format!("{}/{}", ctx.attempts, ctx.max_tries)),
            ]),
        ];
        let word = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(word, columns[1]);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            let style = if message.starts_with("WIN") {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(Span::styled(message.to_string(), style)));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(Span::styled(error_message.to_string(), ERROR_STYLE)));
        }
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Messages"));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let paragraph = Paragraph::new(status)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_prompt(f: &mut Frame, area: Rect, state: TuiState, input: &str) {
        let line = Line::from(vec![
            Span::styled(format!("{}: ", state.prompt()), INFO_STYLE),
            Span::raw(input.to_string()),
            Span::styled("_", Style::new().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        let paragraph =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Input"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let paragraph = Paragraph::new(state.instructions())
            .block(Block::default().borders(Borders::ALL).title("Keys"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<LineEvent, io::Error> {
        // Poll with a timeout to check if events are available
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(LineEvent::Pending);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(LineEvent::Pending);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(LineEvent::Pending);
        }
        if let KeyCode::Char(c) = key.code
            && is_garbage_char(c)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(LineEvent::Pending);
        }

        debug_log!(
            "handle_input() - Key event: code={:?}, modifiers={:?}, state={:?}",
            key.code,
            key.modifiers,
            self.state
        );
        Ok(self.editor.handle_key(key))
    }

    /// Show the prompt for `state` and block until the player submits or quits.
    fn read_line(&mut self, state: TuiState) -> Input<String> {
        self.state = state;
        loop {
            if self.draw().is_err() {
                info_log!("read_line() - Draw failed, closing");
                return Input::Closed;
            }
            match self.handle_input() {
                Ok(LineEvent::Pending) => {}
                Ok(LineEvent::Submitted(text)) => {
                    self.error_message.clear();
                    info_log!("read_line() - {:?} submitted '{}'", state, text);
                    return Input::Value(text.trim().to_string());
                }
                Ok(LineEvent::Cancelled) => {
                    info_log!("read_line() - ESC pressed in {:?}", state);
                    return Input::Closed;
                }
                Err(e) => {
                    debug_log!("read_line() - Input error: {}", e);
                    return Input::Closed;
                }
            }
        }
    }

    fn reject(&mut self, message: &str) {
        self.error_message = message.to_string();
    }
}

impl GameInterface for TuiInterface {
    fn display_opening(&mut self, artwork: &Artwork, max_tries: u8) {
        self.frame = artwork.frame(0);
        self.reveal.clear();
        self.guessed.clear();
        self.attempts = 0;
        self.max_tries = max_tries;
        self.message = format!("Welcome to Hangman! You have {max_tries} attempts in the game.");
        self.status = "Choose where the secret word comes from".to_string();
        self.draw_or_log();
    }

    fn read_source_choice(&mut self) -> Input<SourceChoice> {
        match self.read_line(TuiState::ChoosingSource) {
            Input::Value(text) => match text.parse() {
                Ok(choice) => Input::Value(choice),
                Err(()) => {
                    self.reject("Invalid choice. Please enter 'file' or 'api'.");
                    Input::Invalid
                }
            },
            Input::Invalid => Input::Invalid,
            Input::Closed => Input::Closed,
        }
    }

    fn read_file_path(&mut self) -> Input<PathBuf> {
        match self.read_line(TuiState::EnteringPath) {
            Input::Value(text) if text.is_empty() => {
                self.reject("The path is not valid or doesn't exist. Please try again...");
                Input::Invalid
            }
            Input::Value(text) => Input::Value(PathBuf::from(text)),
            Input::Invalid => Input::Invalid,
            Input::Closed => Input::Closed,
        }
    }

    fn read_index(&mut self) -> Input<i64> {
        match self.read_line(TuiState::EnteringIndex) {
            Input::Value(text) => match parse_index(&text) {
                Some(index) => Input::Value(index),
                None => {
                    self.reject("That was no valid number. Please try again...");
                    Input::Invalid
                }
            },
            Input::Invalid => Input::Invalid,
            Input::Closed => Input::Closed,
        }
    }

    fn display_source_error(&mut self, error: &WordSourceError) {
        self.error_message = error.to_string();
        self.status = match error {
            WordSourceError::SourceUnavailable(_) => "Round cancelled".to_string(),
            _ => "Please try again".to_string(),
        };
        self.draw_or_log();
    }

    fn display_round_start(&mut self, artwork: &Artwork, reveal: &str) {
        self.frame = artwork.frame(0);
        self.reveal = reveal.to_string();
        self.message = "Let's start!".to_string();
        self.error_message.clear();
        self.status = format!("{} letters to find", reveal.split(' ').count());
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Input<String> {
        self.read_line(TuiState::Guessing)
    }

    fn display_guess_result(&mut self, artwork: &Artwork, result: &GuessResult) {
        match result {
            GuessResult::Accepted(accepted) => {
                self.frame = artwork.frame(accepted.attempts);
                self.reveal.clone_from(&accepted.reveal);
                self.attempts = accepted.attempts;
                self.guessed.push(accepted.letter);
                self.message = if accepted.hit {
                    format!("Yes! '{}' is in the word.", accepted.letter)
                } else {
                    format!(":( '{}' is not in the word.", accepted.letter)
                };
                self.error_message.clear();
                self.status = format!(
                    "{} tries left",
                    self.max_tries.saturating_sub(accepted.attempts)
                );
            }
            GuessResult::Invalid { reason, previous } => {
                self.error_message = match reason {
                    InvalidReason::RoundOver => reason.to_string(),
                    _ if previous.is_empty() => format!("X - {reason}"),
                    _ => format!("X - {reason}. Tried: {}", previous.joined()),
                };
            }
        }
        self.draw_or_log();
    }

    fn display_round_over(&mut self, report: &RoundReport) {
        let seconds = report.elapsed.as_secs_f64();
        self.message = match report.outcome {
            GameOutcome::Won => format!("WIN - Time taken to win: {seconds:.2} seconds"),
            GameOutcome::Lost => format!(
                "LOSE - The word was '{}'. Time taken to lose: {seconds:.2} seconds",
                report.secret
            ),
            GameOutcome::InProgress => String::new(),
        };
        self.status = "Round over".to_string();
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> Input<bool> {
        match self.read_line(TuiState::ConfirmingReplay) {
            Input::Value(text) => Input::Value(parse_play_again(&text)),
            Input::Invalid => Input::Invalid,
            Input::Closed => Input::Closed,
        }
    }

    fn display_exit_message(&mut self, summary: &SessionSummary) {
        self.state = TuiState::Exiting;
        self.message = format!(
            "Thanks for playing! Rounds: {}, won: {}, lost: {}.",
            summary.rounds, summary.wins, summary.losses
        );
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
