use crate::engine::SecretWord;
use crate::debug_log;
use crate::error::WordSourceError;
use std::fs;
use std::io;
use std::path::Path;

/// Split a word list into whitespace-separated tokens.
pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.split_whitespace().map(str::to_string).collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let data = fs::read_to_string(path)?;
    Ok(load_words_from_str(&data))
}

/// Zero-based position for a 1-based `index`, wrapping around `len`.
///
/// Zero and negative indices wrap backwards, so `0` selects the last word.
/// `len` must be non-zero.
#[must_use]
pub fn wrapped_index(index: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let len = i128::try_from(len).unwrap_or(i128::MAX);
    let position = (i128::from(index) - 1).rem_euclid(len);
    usize::try_from(position).unwrap_or_default()
}

#[must_use]
pub fn choose_word(words: &[String], index: i64) -> Option<&str> {
    if words.is_empty() {
        return None;
    }
    words.get(wrapped_index(index, words.len())).map(String::as_str)
}

pub fn choose_word_from_file(path: &Path, index: i64) -> Result<SecretWord, WordSourceError> {
    let words = load_words_from_file(path)
        .map_err(|e| WordSourceError::not_found(path, e.to_string()))?;
    let word = choose_word(&words, index)
        .ok_or_else(|| WordSourceError::not_found(path, "the file contains no words"))?;
    debug_log!(
        "Picked word #{index} of {} from {}",
        words.len(),
        path.display()
    );
    SecretWord::new(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_words_splits_on_any_whitespace() {
        let loaded = load_words_from_str("alpha beta\n\tgamma  \r\ndelta\n");
        assert_eq!(loaded, words(&["alpha", "beta", "gamma", "delta"]));
    }

    #[test]
    fn test_load_words_empty() {
        assert!(load_words_from_str("  \n\n ").is_empty());
    }

    #[test]
    fn test_wrapped_index_in_range() {
        assert_eq!(wrapped_index(1, 3), 0);
        assert_eq!(wrapped_index(3, 3), 2);
    }

    #[test]
    fn test_wrapped_index_wraps_past_end() {
        assert_eq!(wrapped_index(4, 3), 0);
        assert_eq!(wrapped_index(5, 3), 1);
        assert_eq!(wrapped_index(301, 3), 0);
    }

    #[test]
    fn test_wrapped_index_zero_and_negative() {
        assert_eq!(wrapped_index(0, 3), 2);
        assert_eq!(wrapped_index(-1, 3), 1);
        assert_eq!(wrapped_index(i64::MIN, 3), ((i128::from(i64::MIN) - 1).rem_euclid(3)) as usize);
    }

    #[test]
    fn test_choose_word_alpha_beta_gamma() {
        let list = words(&["alpha", "beta", "gamma"]);
        assert_eq!(choose_word(&list, 5), Some("beta"));
        assert_eq!(choose_word(&list, 1), Some("alpha"));
    }

    #[test]
    fn test_choose_word_empty_list() {
        assert_eq!(choose_word(&[], 1), None);
    }

    #[test]
    fn test_choose_word_from_file() {
        let path = std::env::temp_dir().join("hangman_wordbank_choose.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "alpha beta gamma").unwrap();
        }
        let word = choose_word_from_file(&path, 5).unwrap();
        assert_eq!(word.as_str(), "beta");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_choose_word_from_empty_file_is_not_found() {
        let path = std::env::temp_dir().join("hangman_wordbank_empty.txt");
        File::create(&path).unwrap();
        let err = choose_word_from_file(&path, 1).unwrap_err();
        assert!(matches!(err, WordSourceError::NotFound { .. }));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_choose_word_from_missing_file_is_not_found() {
        let path = std::env::temp_dir().join("hangman_wordbank_does_not_exist.txt");
        let _ = std::fs::remove_file(&path);
        let err = choose_word_from_file(&path, 1).unwrap_err();
        assert!(matches!(err, WordSourceError::NotFound { .. }));
    }
}
