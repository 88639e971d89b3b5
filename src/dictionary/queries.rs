//! Input-validating query layer over a dictionary backend.
//!
//! Normalizes case, rejects malformed input, and clamps result limits to
//! the configured maximums before delegating to the backend.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::DictionaryError;

use super::WordDictionary;

/// The word-lookup boundary: existence, prefix, anagram, and score queries
/// with application limits applied.
pub struct WordQueries {
    dictionary: Arc<dyn WordDictionary>,
    max_prefix_results: usize,
    max_anagram_results: usize,
    max_anagram_letters: usize,
}

impl WordQueries {
    pub fn new(dictionary: Arc<dyn WordDictionary>, config: &EngineConfig) -> Self {
        Self {
            dictionary,
            max_prefix_results: config.max_prefix_results,
            max_anagram_results: config.max_anagram_results,
            max_anagram_letters: config.max_anagram_letters,
        }
    }

    /// Whether `word` is a valid dictionary word.
    pub fn exists(&self, word: &str) -> Result<bool, DictionaryError> {
        let normalized = normalize_word(word)?;
        Ok(self.dictionary.contains(&normalized))
    }

    /// Words extending `prefix`, capped at the configured maximum.
    /// `limit` of `None` or 0 means "use the maximum".
    pub fn prefix(
        &self,
        prefix: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>, DictionaryError> {
        let normalized = prefix.to_lowercase();
        validate_letters(&normalized)?;
        let effective = clamp_limit(limit, self.max_prefix_results);
        Ok(self.dictionary.find_by_prefix(&normalized, effective))
    }

    /// Anagrams of the letter multiset (with `?` wildcards), capped at the
    /// configured maximum.
    pub fn anagrams(
        &self,
        letters: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>, DictionaryError> {
        if letters.is_empty() {
            return Err(DictionaryError::EmptyInput);
        }
        let normalized = letters.to_lowercase();
        let count = normalized.chars().count();
        if count > self.max_anagram_letters {
            return Err(DictionaryError::TooManyLetters {
                count,
                max: self.max_anagram_letters,
            });
        }
        for ch in normalized.chars() {
            if ch != '?' && !ch.is_ascii_lowercase() {
                return Err(DictionaryError::InvalidAnagramLetters);
            }
        }
        let effective = clamp_limit(limit, self.max_anagram_results);
        Ok(self.dictionary.find_anagrams(&normalized, effective))
    }

    /// Flat letter-sum score of `word`.
    pub fn score(&self, word: &str) -> Result<u32, DictionaryError> {
        let normalized = normalize_word(word)?;
        Ok(self.dictionary.score(&normalized))
    }
}

fn normalize_word(word: &str) -> Result<String, DictionaryError> {
    if word.is_empty() {
        return Err(DictionaryError::EmptyInput);
    }
    let normalized = word.to_lowercase();
    validate_letters(&normalized)?;
    Ok(normalized)
}

fn validate_letters(value: &str) -> Result<(), DictionaryError> {
    if value.chars().any(|ch| !ch.is_ascii_lowercase()) {
        return Err(DictionaryError::NonAlphabetic);
    }
    Ok(())
}

fn clamp_limit(limit: Option<usize>, max: usize) -> usize {
    match limit {
        Some(n) if n > 0 => n.min(max),
        _ => max,
    }
}
