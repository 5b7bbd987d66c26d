use crate::art::Artwork;
use crate::engine::{GameOutcome, GuessResult, GuessingEngine, MAX_TRIES, SecretWord};
use crate::error::WordSourceError;
use crate::info_log;
use crate::word_source::WordSource;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// What a presenter read from the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<T> {
    Value(T),
    /// Unusable input; the presenter already told the player, ask again.
    Invalid,
    /// End of input or an explicit quit.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceChoice {
    File,
    Api,
}

impl FromStr for SourceChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "api" => Ok(Self::Api),
            _ => Err(()),
        }
    }
}

/// Options fixed for the whole session, usually taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Skip the data-source prompt.
    pub source: Option<SourceChoice>,
    /// Skip the file-path prompt while this path keeps working.
    pub word_file: Option<PathBuf>,
    pub artwork: Artwork,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub outcome: GameOutcome,
    pub secret: SecretWord,
    pub attempts: u8,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    /// Rounds ended early because no secret word could be obtained.
    pub aborted: u32,
}

enum RoundResult {
    Finished(RoundReport),
    Aborted,
    Closed,
}

/// Presenter seam. Implementations own all prompting and rendering;
/// [`game_loop`] owns the retry loops and the engine.
pub trait GameInterface {
    fn display_opening(&mut self, artwork: &Artwork, max_tries: u8);
    fn read_source_choice(&mut self) -> Input<SourceChoice>;
    fn read_file_path(&mut self) -> Input<PathBuf>;
    fn read_index(&mut self) -> Input<i64>;
    fn display_source_error(&mut self, error: &WordSourceError);
    fn display_round_start(&mut self, artwork: &Artwork, reveal: &str);
    fn read_guess(&mut self) -> Input<String>;
    fn display_guess_result(&mut self, artwork: &Artwork, result: &GuessResult);
    fn display_round_over(&mut self, report: &RoundReport);
    fn read_play_again(&mut self) -> Input<bool>;
    fn display_exit_message(&mut self, summary: &SessionSummary);
}

/// Any reply starting with `y` or `Y` means yes.
#[must_use]
pub fn parse_play_again(reply: &str) -> bool {
    reply.trim_start().starts_with(['y', 'Y'])
}

#[must_use]
pub fn parse_index(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Play rounds until the player declines a replay or input closes.
pub fn game_loop<I, S>(interface: &mut I, source: &S, config: &SessionConfig) -> SessionSummary
where
    I: GameInterface + ?Sized,
    S: WordSource + ?Sized,
{
    let mut summary = SessionSummary::default();
    let mut word_file = config.word_file.clone();

    loop {
        match play_round(interface, source, config, &mut word_file) {
            RoundResult::Finished(report) => {
                summary.rounds += 1;
                match report.outcome {
                    GameOutcome::Won => summary.wins += 1,
                    GameOutcome::Lost => summary.losses += 1,
                    GameOutcome::InProgress => {}
                }
                info_log!(
                    "Round {} finished: {:?} with {} misses in {:.2?}",
                    summary.rounds,
                    report.outcome,
                    report.attempts,
                    report.elapsed
                );
            }
            RoundResult::Aborted => {
                summary.aborted += 1;
                info_log!("Round aborted: no secret word available");
            }
            RoundResult::Closed => break,
        }

        if !ask_play_again(interface) {
            break;
        }
    }

    info_log!(
        "Session finished: {} rounds, {} won, {} lost, {} aborted",
        summary.rounds,
        summary.wins,
        summary.losses,
        summary.aborted
    );
    interface.display_exit_message(&summary);
    summary
}

fn ask_play_again<I: GameInterface + ?Sized>(interface: &mut I) -> bool {
    loop {
        match interface.read_play_again() {
            Input::Value(again) => return again,
            Input::Invalid => {}
            Input::Closed => return false,
        }
    }
}

fn play_round<I, S>(
    interface: &mut I,
    source: &S,
    config: &SessionConfig,
    word_file: &mut Option<PathBuf>,
) -> RoundResult
where
    I: GameInterface + ?Sized,
    S: WordSource + ?Sized,
{
    let artwork = &config.artwork;
    interface.display_opening(artwork, MAX_TRIES);

    let choice = match config.source {
        Some(choice) => choice,
        None => match read_until_valid(interface, I::read_source_choice) {
            Some(choice) => choice,
            None => return RoundResult::Closed,
        },
    };

    let secret = match choice {
        SourceChoice::File => match secret_from_file(interface, source, word_file) {
            Some(secret) => secret,
            None => return RoundResult::Closed,
        },
        SourceChoice::Api => match source.fetch_random() {
            Ok(secret) => secret,
            Err(e) => {
                interface.display_source_error(&e);
                return RoundResult::Aborted;
            }
        },
    };

    let mut engine = GuessingEngine::new(secret);
    let started = Instant::now();
    interface.display_round_start(artwork, &engine.reveal());

    while !engine.is_over() {
        match interface.read_guess() {
            Input::Value(guess) => {
                let result = engine.submit_guess(&guess);
                interface.display_guess_result(artwork, &result);
            }
            Input::Invalid => {}
            Input::Closed => return RoundResult::Closed,
        }
    }

    let report = RoundReport {
        outcome: engine.outcome(),
        secret: engine.secret().clone(),
        attempts: engine.attempts(),
        elapsed: started.elapsed(),
    };
    interface.display_round_over(&report);
    RoundResult::Finished(report)
}

/// Ask for a path and index until the file yields a word. `None` means
/// input closed. A preselected path is kept for later rounds only while it
/// keeps working.
fn secret_from_file<I, S>(
    interface: &mut I,
    source: &S,
    word_file: &mut Option<PathBuf>,
) -> Option<SecretWord>
where
    I: GameInterface + ?Sized,
    S: WordSource + ?Sized,
{
    loop {
        let (path, preset) = match word_file.take() {
            Some(path) => (path, true),
            None => (read_existing_path(interface)?, false),
        };
        let index = read_until_valid(interface, I::read_index)?;

        match source.fetch_by_index(&path, index) {
            Ok(secret) => {
                if preset {
                    *word_file = Some(path);
                }
                return Some(secret);
            }
            Err(e) => {
                info_log!("Could not use word list: {e}");
                interface.display_source_error(&e);
            }
        }
    }
}

fn read_existing_path<I: GameInterface + ?Sized>(interface: &mut I) -> Option<PathBuf> {
    loop {
        let path = read_until_valid(interface, I::read_file_path)?;
        if path.is_file() {
            return Some(path);
        }
        let error = WordSourceError::not_found(&path, "the path is not valid or doesn't exist");
        interface.display_source_error(&error);
    }
}

fn read_until_valid<I, T>(interface: &mut I, read: fn(&mut I) -> Input<T>) -> Option<T>
where
    I: GameInterface + ?Sized,
{
    loop {
        match read(interface) {
            Input::Value(value) => return Some(value),
            Input::Invalid => {}
            Input::Closed => return None,
        }
    }
}
