//! Word-list parsing.
//!
//! Accepts plain text: one word per line, `#` comments and blank lines
//! skipped, anything after the first whitespace ignored. Reading the text
//! from disk or network is the caller's job.

use tracing::info;

use crate::error::DictionaryError;

use super::Dawg;

/// Extract, lowercase, and sort the words in a word-list text.
pub fn parse_word_list(text: &str) -> Vec<String> {
    let mut words: Vec<String> = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .map(|word| word.to_lowercase())
        .collect();
    words.sort();
    words
}

/// Parse a word-list text and build the DAWG from it.
pub fn load_dawg(text: &str) -> Result<Dawg, DictionaryError> {
    let words = parse_word_list(text);
    let count = words.len();
    let dawg = Dawg::from_sorted_words(&words)?;
    info!(words = count, nodes = dawg.node_count(), "loaded dictionary");
    Ok(dawg)
}
