//! Game data model: board, tiles, racks, and move validation.

pub mod bag;
pub mod state;
pub mod validation;

use serde::Serialize;

use crate::dictionary::score::letter_value;

/// Board edge length.
pub const BOARD_SIZE: usize = 15;
/// Row and column of the mandatory opening square.
pub const BOARD_CENTER: usize = 7;
/// Maximum tiles on a player's rack.
pub const RACK_CAPACITY: usize = 7;

/// A board cell address, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A single tile: the letter it shows, its point value, and whether it was
/// drawn as a blank. A blank keeps scoring zero even after it is assigned
/// a letter on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    letter: char,
    score: u32,
    blank: bool,
}

impl Tile {
    /// A regular tile for `letter`, or an unassigned blank for `?`.
    pub fn of(letter: char) -> Self {
        let normalized = letter.to_ascii_lowercase();
        let blank = normalized == '?';
        let score = if blank { 0 } else { letter_value(normalized) };
        Self {
            letter: normalized,
            score,
            blank,
        }
    }

    /// A blank tile assigned to represent `letter`.
    pub fn blank_as(letter: char) -> Self {
        Self {
            letter: letter.to_ascii_lowercase(),
            score: 0,
            blank: true,
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }
}

/// Game status; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Active,
    Completed,
}

/// The 15x15 playing grid. Occupied cells are never overwritten; the
/// validator rejects conflicting placements before anything is committed.
#[derive(Debug, Clone)]
pub struct Board {
    grid: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Tile at (row, col), if any. Panics on out-of-range coordinates;
    /// callers bound-check placements before touching the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.grid[row][col]
    }

    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.grid[row][col].is_none()
    }

    pub fn place(&mut self, coord: Coord, tile: Tile) {
        debug_assert!(self.grid[coord.row][coord.col].is_none());
        self.grid[coord.row][coord.col] = Some(tile);
    }

    pub fn has_any_tile(&self) -> bool {
        self.grid
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_some()))
    }

    /// The board as 15 strings, one character per cell, `.` for empty.
    pub fn as_string_rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', |tile| tile.letter()))
                    .collect()
            })
            .collect()
    }
}
