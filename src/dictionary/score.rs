//! Static per-letter Scrabble score table.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Standard Scrabble letter values. The wildcard `?` scores zero.
static LETTER_SCORES: Lazy<HashMap<char, u32>> = Lazy::new(|| {
    HashMap::from([
        ('a', 1),
        ('b', 3),
        ('c', 3),
        ('d', 2),
        ('e', 1),
        ('f', 4),
        ('g', 2),
        ('h', 4),
        ('i', 1),
        ('j', 8),
        ('k', 5),
        ('l', 1),
        ('m', 3),
        ('n', 1),
        ('o', 1),
        ('p', 3),
        ('q', 10),
        ('r', 1),
        ('s', 1),
        ('t', 1),
        ('u', 1),
        ('v', 4),
        ('w', 4),
        ('x', 8),
        ('y', 4),
        ('z', 10),
        ('?', 0),
    ])
});

/// Point value for a single letter, case-insensitive.
/// Unknown characters score zero; callers validate input before scoring.
pub fn letter_value(letter: char) -> u32 {
    LETTER_SCORES
        .get(&letter.to_ascii_lowercase())
        .copied()
        .unwrap_or(0)
}
