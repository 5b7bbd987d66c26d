use crate::art::Artwork;
use crate::engine::{GameOutcome, GuessResult, InvalidReason};
use crate::error::WordSourceError;
use crate::game_state::{
    GameInterface, Input, RoundReport, SessionConfig, SessionSummary, SourceChoice, parse_index,
    parse_play_again,
};
use crate::word_source::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Hangman: guess the secret word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Where secret words come from; asked every round when omitted
    #[arg(short, long, value_enum)]
    pub source: Option<SourceChoice>,

    /// Path to a whitespace-separated word list used by the file source
    #[arg(short = 'i', long = "input")]
    pub word_file: Option<PathBuf>,

    /// Endpoint of the random-word service
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Timeout for the random-word request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

impl Cli {
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            source: self.source,
            word_file: self.word_file.clone(),
            ..SessionConfig::default()
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn prompt(text: &str) {
    print!("{text}");
    // A failed flush only delays the prompt text.
    let _ = std::io::stdout().flush();
}

/// Read one line, trimmed. `None` on end of input or a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::warn!("Failed to read from input: {e}");
            None
        }
    }
}

pub fn read_source_choice<R: BufRead>(reader: &mut R) -> Input<SourceChoice> {
    prompt("Choose data source (file or api): ");
    let Some(input) = read_trimmed_line(reader) else {
        return Input::Closed;
    };
    match input.parse() {
        Ok(choice) => Input::Value(choice),
        Err(()) => {
            println!("Invalid choice. Please enter 'file' or 'api'.");
            Input::Invalid
        }
    }
}

pub fn read_file_path<R: BufRead>(reader: &mut R) -> Input<PathBuf> {
    prompt("Enter file path: ");
    match read_trimmed_line(reader) {
        Some(input) if input.is_empty() => {
            println!("The path is not valid or doesn't exist. Please try again...");
            Input::Invalid
        }
        Some(input) => Input::Value(PathBuf::from(input)),
        None => Input::Closed,
    }
}

pub fn read_index<R: BufRead>(reader: &mut R) -> Input<i64> {
    prompt("Enter index: ");
    let Some(input) = read_trimmed_line(reader) else {
        return Input::Closed;
    };
    match parse_index(&input) {
        Some(index) => Input::Value(index),
        None => {
            println!("That was no valid number. Please try again...");
            Input::Invalid
        }
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> Input<String> {
    prompt("Guess a letter: ");
    match read_trimmed_line(reader) {
        Some(input) => Input::Value(input),
        None => Input::Closed,
    }
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> Input<bool> {
    prompt("Do you want to play again (yes or no)? ");
    match read_trimmed_line(reader) {
        Some(input) => Input::Value(parse_play_again(&input)),
        None => Input::Closed,
    }
}

/// Text printed after a guess, without the trailing newline.
#[must_use]
pub fn format_guess_result(artwork: &Artwork, result: &GuessResult) -> String {
    match result {
        GuessResult::Accepted(accepted) if accepted.hit => accepted.reveal.clone(),
        GuessResult::Accepted(accepted) => format!(
            ":(\n{}\n{}",
            artwork.frame(accepted.attempts),
            accepted.reveal
        ),
        GuessResult::Invalid {
            reason: InvalidReason::RoundOver,
            ..
        } => "The round is over.".to_string(),
        GuessResult::Invalid { previous, .. } => previous.to_string(),
    }
}

#[must_use]
pub fn format_round_over(report: &RoundReport) -> String {
    let (banner, verb) = match report.outcome {
        GameOutcome::Won => ("WIN", "win"),
        GameOutcome::Lost => ("LOSE", "lose"),
        GameOutcome::InProgress => ("STOPPED", "stop"),
    };
    let mut text = banner.to_string();
    if report.outcome == GameOutcome::Lost {
        text.push_str(&format!("\nThe word was: {}", report.secret));
    }
    text.push_str(&format!(
        "\nTime taken to {verb}: {:.2} seconds",
        report.elapsed.as_secs_f64()
    ));
    text
}

#[must_use]
pub fn format_summary(summary: &SessionSummary) -> String {
    format!(
        "Thanks for playing! Rounds: {}, won: {}, lost: {}.",
        summary.rounds, summary.wins, summary.losses
    )
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and prints to stdout
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_opening(&mut self, artwork: &Artwork, max_tries: u8) {
        println!("{}\nYou have {max_tries} attempts in the game.", artwork.banner);
    }

    fn read_source_choice(&mut self) -> Input<SourceChoice> {
        read_source_choice(&mut self.reader)
    }

    fn read_file_path(&mut self) -> Input<PathBuf> {
        read_file_path(&mut self.reader)
    }

    fn read_index(&mut self) -> Input<i64> {
        read_index(&mut self.reader)
    }

    fn display_source_error(&mut self, error: &WordSourceError) {
        match error {
            WordSourceError::SourceUnavailable(_) => {
                println!("Could not get a word: {error}. This round is cancelled.");
            }
            _ => println!("{error}. Please try again..."),
        }
    }

    fn display_round_start(&mut self, artwork: &Artwork, reveal: &str) {
        println!("\nLet's start!\n");
        println!("{}", artwork.frame(0));
        println!("{reveal}");
    }

    fn read_guess(&mut self) -> Input<String> {
        read_guess(&mut self.reader)
    }

    fn display_guess_result(&mut self, artwork: &Artwork, result: &GuessResult) {
        println!("{}", format_guess_result(artwork, result));
    }

    fn display_round_over(&mut self, report: &RoundReport) {
        println!("{}", format_round_over(report));
    }

    fn read_play_again(&mut self) -> Input<bool> {
        read_play_again(&mut self.reader)
    }

    fn display_exit_message(&mut self, summary: &SessionSummary) {
        println!("{}", format_summary(summary));
    }
}
