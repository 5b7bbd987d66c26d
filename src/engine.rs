use crate::error::WordSourceError;
use std::collections::BTreeSet;
use std::fmt;

/// Wrong guesses allowed before the round is lost.
pub const MAX_TRIES: u8 = 6;

const PLACEHOLDER: char = '_';

/// The word being guessed. Original casing is kept for display; matching
/// is done on the ASCII-lowercased form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretWord {
    text: String,
}

impl SecretWord {
    pub fn new(word: &str) -> Result<Self, WordSourceError> {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            return Err(WordSourceError::EmptyWord);
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters (not bytes). Never zero.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn contains_letter(&self, letter: char) -> bool {
        self.text.chars().any(|c| c.to_ascii_lowercase() == letter)
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Won,
    Lost,
}

/// Why a guess was rejected. Rejections never change engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Empty input or more than one character.
    NotSingleCharacter,
    NotAsciiLetter(char),
    AlreadyGuessed(char),
    RoundOver,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSingleCharacter => f.write_str("enter exactly one letter"),
            Self::NotAsciiLetter(c) => write!(f, "'{c}' is not an English letter"),
            Self::AlreadyGuessed(c) => write!(f, "'{c}' was already guessed"),
            Self::RoundOver => f.write_str("the round is over"),
        }
    }
}

/// Sorted snapshot of the letters guessed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousGuesses(Vec<char>);

impl PreviousGuesses {
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `a -> b -> c`, or an empty string when nothing was guessed.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl fmt::Display for PreviousGuesses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("X")
        } else {
            write!(f, "X\n{}", self.joined())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    /// The guessed letter, lowercased.
    pub letter: char,
    pub hit: bool,
    pub attempts: u8,
    pub reveal: String,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    Accepted(Accepted),
    Invalid {
        reason: InvalidReason,
        previous: PreviousGuesses,
    },
}

/// State machine for one round: a secret word, the letters guessed so far
/// and the count of misses. Performs no I/O.
#[derive(Debug, Clone)]
pub struct GuessingEngine {
    secret: SecretWord,
    guessed: BTreeSet<char>,
    attempts: u8,
}

impl GuessingEngine {
    #[must_use]
    pub fn new(secret: SecretWord) -> Self {
        Self {
            secret,
            guessed: BTreeSet::new(),
            attempts: 0,
        }
    }

    pub fn submit_guess(&mut self, input: &str) -> GuessResult {
        let letter = match self.validate(input) {
            Ok(letter) => letter,
            Err(reason) => {
                return GuessResult::Invalid {
                    reason,
                    previous: self.previous_guesses(),
                };
            }
        };

        self.guessed.insert(letter);
        let hit = self.secret.contains_letter(letter);
        if !hit {
            self.attempts += 1;
        }

        GuessResult::Accepted(Accepted {
            letter,
            hit,
            attempts: self.attempts,
            reveal: self.reveal(),
            outcome: self.outcome(),
        })
    }

    fn validate(&self, input: &str) -> Result<char, InvalidReason> {
        if self.is_over() {
            return Err(InvalidReason::RoundOver);
        }
        let mut chars = input.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(InvalidReason::NotSingleCharacter);
        };
        if !c.is_ascii_alphabetic() {
            return Err(InvalidReason::NotAsciiLetter(c));
        }
        let letter = c.to_ascii_lowercase();
        if self.guessed.contains(&letter) {
            return Err(InvalidReason::AlreadyGuessed(letter));
        }
        Ok(letter)
    }

    /// Space-separated positions: guessed letters in their original case,
    /// `_` elsewhere.
    #[must_use]
    pub fn reveal(&self) -> String {
        let mut out = String::with_capacity(self.secret.as_str().len() * 2);
        for (i, c) in self.secret.as_str().chars().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if self.guessed.contains(&c.to_ascii_lowercase()) {
                out.push(c);
            } else {
                out.push(PLACEHOLDER);
            }
        }
        out
    }

    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        // Won first: a miss can never complete the word.
        let won = self
            .secret
            .as_str()
            .chars()
            .all(|c| self.guessed.contains(&c.to_ascii_lowercase()));
        if won {
            GameOutcome::Won
        } else if self.attempts >= MAX_TRIES {
            GameOutcome::Lost
        } else {
            GameOutcome::InProgress
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome() != GameOutcome::InProgress
    }

    #[must_use]
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    #[must_use]
    pub fn remaining_tries(&self) -> u8 {
        MAX_TRIES.saturating_sub(self.attempts)
    }

    #[must_use]
    pub fn previous_guesses(&self) -> PreviousGuesses {
        PreviousGuesses(self.guessed.iter().copied().collect())
    }

    #[must_use]
    pub fn secret(&self) -> &SecretWord {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(word: &str) -> GuessingEngine {
        GuessingEngine::new(SecretWord::new(word).unwrap())
    }

    fn accepted(result: GuessResult) -> Accepted {
        match result {
            GuessResult::Accepted(a) => a,
            GuessResult::Invalid { reason, .. } => panic!("Expected Accepted, got {reason:?}"),
        }
    }

    fn invalid_reason(result: GuessResult) -> InvalidReason {
        match result {
            GuessResult::Invalid { reason, .. } => reason,
            GuessResult::Accepted(a) => panic!("Expected Invalid, got {a:?}"),
        }
    }

    #[test]
    fn test_secret_word_rejects_empty() {
        assert!(matches!(SecretWord::new(""), Err(WordSourceError::EmptyWord)));
        assert!(matches!(SecretWord::new("  \n"), Err(WordSourceError::EmptyWord)));
    }

    #[test]
    fn test_secret_word_trims_whitespace() {
        let word = SecretWord::new("  Rust\n").unwrap();
        assert_eq!(word.as_str(), "Rust");
        assert_eq!(word.len(), 4);
    }

    #[test]
    fn test_cat_reveals_progressively_and_wins() {
        let mut game = engine("cat");
        assert_eq!(game.reveal(), "_ _ _");

        assert_eq!(accepted(game.submit_guess("c")).reveal, "c _ _");
        assert_eq!(game.outcome(), GameOutcome::InProgress);
        assert_eq!(accepted(game.submit_guess("a")).reveal, "c a _");

        let last = accepted(game.submit_guess("t"));
        assert_eq!(last.reveal, "c a t");
        assert!(last.hit);
        assert_eq!(last.outcome, GameOutcome::Won);
        assert_eq!(game.outcome(), GameOutcome::Won);
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_six_misses_lose() {
        let mut game = engine("dog");
        for (i, letter) in ["x", "y", "z", "w", "v", "u"].iter().enumerate() {
            assert_eq!(game.outcome(), GameOutcome::InProgress);
            let result = accepted(game.submit_guess(letter));
            assert!(!result.hit);
            assert_eq!(usize::from(result.attempts), i + 1);
        }
        assert_eq!(game.outcome(), GameOutcome::Lost);
        assert_eq!(game.attempts(), MAX_TRIES);
        assert_eq!(game.remaining_tries(), 0);
        assert_eq!(game.reveal(), "_ _ _");
    }

    #[test]
    fn test_interspersed_hit_shows_in_lost_reveal() {
        let mut game = engine("dog");
        game.submit_guess("o");
        for letter in ["a", "b", "c", "e", "f", "h"] {
            game.submit_guess(letter);
        }
        assert_eq!(game.outcome(), GameOutcome::Lost);
        assert_eq!(game.reveal(), "_ o _");
    }

    #[test]
    fn test_duplicate_guess_rejected_regardless_of_case() {
        let mut game = engine("dog");
        accepted(game.submit_guess("d"));
        accepted(game.submit_guess("q"));

        assert_eq!(invalid_reason(game.submit_guess("D")), InvalidReason::AlreadyGuessed('d'));
        assert_eq!(invalid_reason(game.submit_guess("Q")), InvalidReason::AlreadyGuessed('q'));
        assert_eq!(invalid_reason(game.submit_guess("q")), InvalidReason::AlreadyGuessed('q'));
        assert_eq!(game.attempts(), 1);
    }

    #[test]
    fn test_invalid_inputs_do_not_mutate() {
        let mut game = engine("dog");
        assert_eq!(invalid_reason(game.submit_guess("")), InvalidReason::NotSingleCharacter);
        assert_eq!(invalid_reason(game.submit_guess("do")), InvalidReason::NotSingleCharacter);
        assert_eq!(invalid_reason(game.submit_guess("1")), InvalidReason::NotAsciiLetter('1'));
        assert_eq!(invalid_reason(game.submit_guess("é")), InvalidReason::NotAsciiLetter('é'));
        assert_eq!(invalid_reason(game.submit_guess(" ")), InvalidReason::NotAsciiLetter(' '));
        assert_eq!(game.attempts(), 0);
        assert!(game.previous_guesses().is_empty());
    }

    #[test]
    fn test_invalid_guess_carries_sorted_previous_letters() {
        let mut game = engine("dog");
        for letter in ["o", "z", "a"] {
            game.submit_guess(letter);
        }
        match game.submit_guess("Z") {
            GuessResult::Invalid { previous, .. } => {
                assert_eq!(previous.letters(), &['a', 'o', 'z']);
                assert_eq!(previous.to_string(), "X\na -> o -> z");
            }
            GuessResult::Accepted(_) => panic!("Expected Invalid"),
        }
    }

    #[test]
    fn test_no_previous_guesses_marker() {
        let mut game = engine("dog");
        match game.submit_guess("12") {
            GuessResult::Invalid { previous, .. } => assert_eq!(previous.to_string(), "X"),
            GuessResult::Accepted(_) => panic!("Expected Invalid"),
        }
    }

    #[test]
    fn test_case_insensitive_matching_preserves_case() {
        let mut game = engine("RuSt");
        assert!(accepted(game.submit_guess("r")).hit);
        assert!(accepted(game.submit_guess("S")).hit);
        assert_eq!(game.reveal(), "R _ S _");
        game.submit_guess("U");
        game.submit_guess("t");
        assert_eq!(game.reveal(), "R u S t");
        assert_eq!(game.outcome(), GameOutcome::Won);
    }

    #[test]
    fn test_repeated_letters_revealed_everywhere() {
        let mut game = engine("banana");
        game.submit_guess("a");
        assert_eq!(game.reveal(), "_ a _ a _ a");
        game.submit_guess("n");
        assert_eq!(game.reveal(), "_ a n a n a");
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut game = engine("hello");
        game.submit_guess("l");
        let first = game.reveal();
        assert_eq!(first, game.reveal());
        assert_eq!(first, game.reveal());
    }

    #[test]
    fn test_guess_after_terminal_state_rejected() {
        let mut game = engine("a");
        assert_eq!(accepted(game.submit_guess("a")).outcome, GameOutcome::Won);
        assert_eq!(invalid_reason(game.submit_guess("b")), InvalidReason::RoundOver);
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.reveal(), "a");
    }

    #[test]
    fn test_win_on_last_remaining_try() {
        let mut game = engine("ab");
        for letter in ["c", "d", "e", "f", "g"] {
            game.submit_guess(letter);
        }
        assert_eq!(game.remaining_tries(), 1);
        game.submit_guess("a");
        let last = accepted(game.submit_guess("b"));
        assert_eq!(last.outcome, GameOutcome::Won);
        assert_eq!(last.attempts, 5);
    }

    #[test]
    fn test_non_letter_characters_stay_hidden() {
        let mut game = engine("x-ray");
        for letter in ["x", "r", "a", "y"] {
            game.submit_guess(letter);
        }
        assert_eq!(game.reveal(), "x _ r a y");
        assert_eq!(game.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_unguessable_word_stalls_after_every_letter() {
        let mut game = engine("abcdefghijklmnopqrstuvwxyz-");
        for letter in 'a'..='z' {
            assert!(accepted(game.submit_guess(&letter.to_string())).hit);
        }
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.outcome(), GameOutcome::InProgress);
        for guess in ["q", "-"] {
            assert!(matches!(
                game.submit_guess(guess),
                GuessResult::Invalid { .. }
            ));
        }
        assert_eq!(game.attempts(), 0);
        assert!(!game.is_over());
    }
}
