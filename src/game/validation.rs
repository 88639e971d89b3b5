//! Move validation: geometric legality, word extraction, and scoring.
//!
//! Validation is pure: it reads the board and dictionary and either
//! returns the full outcome of the move (score, words formed, tiles to
//! commit) or a specific rejection. Nothing is mutated here.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::dictionary::WordDictionary;
use crate::error::MoveError;

use super::{Board, Coord, Tile, BOARD_CENTER, BOARD_SIZE};

/// One proposed tile placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    /// True when the tile being placed is a blank assigned to `letter`.
    pub blank: bool,
}

impl Placement {
    pub fn new(row: usize, col: usize, letter: char, blank: bool) -> Self {
        Self {
            row,
            col,
            letter,
            blank,
        }
    }
}

/// A validated move: what it scores, every word it forms (main word
/// first), and the exact board mutations to commit.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub score: u32,
    pub words: Vec<String>,
    pub tiles: HashMap<Coord, Tile>,
}

/// Validates candidate moves against a board and the dictionary.
pub struct MoveValidator {
    dictionary: Arc<dyn WordDictionary>,
}

impl MoveValidator {
    pub fn new(dictionary: Arc<dyn WordDictionary>) -> Self {
        Self { dictionary }
    }

    /// Check a candidate move and compute its outcome. Rejections carry
    /// the first failed rule; the board is never touched.
    pub fn validate(
        &self,
        board: &Board,
        placements: &[Placement],
    ) -> Result<MoveOutcome, MoveError> {
        if placements.is_empty() {
            return Err(MoveError::NoPlacements);
        }

        let mut by_coord: HashMap<Coord, Placement> = HashMap::new();
        let mut rows: HashSet<usize> = HashSet::new();
        let mut cols: HashSet<usize> = HashSet::new();
        for placement in placements {
            if placement.row >= BOARD_SIZE || placement.col >= BOARD_SIZE {
                return Err(MoveError::OutOfBounds {
                    row: placement.row,
                    col: placement.col,
                });
            }
            let letter = placement.letter.to_ascii_lowercase();
            if !letter.is_ascii_lowercase() {
                return Err(MoveError::InvalidLetter(placement.letter));
            }
            let coord = Coord::new(placement.row, placement.col);
            if by_coord.contains_key(&coord) {
                return Err(MoveError::DuplicatePlacement(coord));
            }
            if !board.is_empty(coord.row, coord.col) {
                return Err(MoveError::CellOccupied(coord));
            }
            by_coord.insert(
                coord,
                Placement::new(placement.row, placement.col, letter, placement.blank),
            );
            rows.insert(placement.row);
            cols.insert(placement.col);
        }

        let horizontal = match (rows.len(), cols.len()) {
            // A lone tile's orientation is resolved by its neighbors: an
            // existing tile to the left or right makes it a horizontal
            // extension, otherwise the vertical walk covers it.
            (1, 1) => {
                let coord = *by_coord.keys().next().expect("one placement");
                has_horizontal_neighbor(board, coord)
            }
            (1, _) => true,
            (_, 1) => false,
            _ => return Err(MoveError::NotALine),
        };

        let min_row = rows.iter().copied().min().expect("non-empty");
        let max_row = rows.iter().copied().max().expect("non-empty");
        let min_col = cols.iter().copied().min().expect("non-empty");
        let max_col = cols.iter().copied().max().expect("non-empty");

        // Contiguity: every cell of the bounding span is either board
        // tile or new placement.
        if rows.len() == 1 {
            for col in min_col..=max_col {
                let coord = Coord::new(min_row, col);
                if board.is_empty(coord.row, coord.col) && !by_coord.contains_key(&coord) {
                    return Err(MoveError::GapInWord);
                }
            }
        } else {
            for row in min_row..=max_row {
                let coord = Coord::new(row, min_col);
                if board.is_empty(coord.row, coord.col) && !by_coord.contains_key(&coord) {
                    return Err(MoveError::GapInWord);
                }
            }
        }

        if !board.has_any_tile() {
            let center = Coord::new(BOARD_CENTER, BOARD_CENTER);
            if !by_coord.contains_key(&center) {
                return Err(MoveError::MustCoverCenter);
            }
        } else {
            let touches = by_coord
                .keys()
                .any(|&coord| has_adjacent_tile(board, coord));
            if !touches {
                return Err(MoveError::NotConnected);
            }
        }

        // New tiles as a temporary overlay; nothing commits until the
        // session engine applies the returned mutations.
        let overlay: HashMap<Coord, Tile> = by_coord
            .iter()
            .map(|(&coord, placement)| {
                let tile = if placement.blank {
                    Tile::blank_as(placement.letter)
                } else {
                    Tile::of(placement.letter)
                };
                (coord, tile)
            })
            .collect();

        let (score, words) = self.evaluate_words(board, &by_coord, &overlay, horizontal)?;
        Ok(MoveOutcome {
            score,
            words,
            tiles: overlay,
        })
    }

    fn evaluate_words(
        &self,
        board: &Board,
        placements: &HashMap<Coord, Placement>,
        overlay: &HashMap<Coord, Tile>,
        horizontal: bool,
    ) -> Result<(u32, Vec<String>), MoveError> {
        let (delta_row, delta_col) = if horizontal { (0, 1) } else { (1, 0) };

        // Start from the span's lowest coordinate along the move axis,
        // then back up through any adjoining tiles.
        let anchor = if horizontal {
            placements
                .keys()
                .copied()
                .min_by_key(|coord| coord.col)
                .expect("non-empty")
        } else {
            placements
                .keys()
                .copied()
                .min_by_key(|coord| coord.row)
                .expect("non-empty")
        };
        let start = extend(board, overlay, anchor, -delta_row, -delta_col);
        let (main_word, main_tiles) = collect_word(board, overlay, start, delta_row, delta_col);
        if !self.dictionary.contains(&main_word) {
            return Err(MoveError::WordNotFound(main_word));
        }

        let mut total: u32 = main_tiles.iter().map(Tile::score).sum();
        let mut words = vec![main_word];

        // Perpendicular word through each newly placed tile. A lone tile
        // with no orthogonal neighbors forms no cross-word.
        let (cross_row, cross_col) = (delta_col, delta_row);
        let mut origins: Vec<Coord> = placements.keys().copied().collect();
        origins.sort();
        for origin in origins {
            let start = extend(board, overlay, origin, -cross_row, -cross_col);
            let (word, tiles) = collect_word(board, overlay, start, cross_row, cross_col);
            if tiles.len() > 1 {
                if !self.dictionary.contains(&word) {
                    return Err(MoveError::InvalidCrossWord(word));
                }
                total += tiles.iter().map(Tile::score).sum::<u32>();
                words.push(word);
            }
        }
        Ok((total, words))
    }
}

/// Tile visible at (row, col) through the overlay, then the board.
fn tile_at(
    board: &Board,
    overlay: &HashMap<Coord, Tile>,
    row: isize,
    col: isize,
) -> Option<Tile> {
    if row < 0 || col < 0 || row >= BOARD_SIZE as isize || col >= BOARD_SIZE as isize {
        return None;
    }
    let coord = Coord::new(row as usize, col as usize);
    overlay
        .get(&coord)
        .copied()
        .or_else(|| board.get(coord.row, coord.col))
}

/// Walk from `from` along (delta_row, delta_col) while tiles continue,
/// returning the last occupied coordinate.
fn extend(
    board: &Board,
    overlay: &HashMap<Coord, Tile>,
    from: Coord,
    delta_row: isize,
    delta_col: isize,
) -> Coord {
    let mut row = from.row as isize;
    let mut col = from.col as isize;
    while tile_at(board, overlay, row + delta_row, col + delta_col).is_some() {
        row += delta_row;
        col += delta_col;
    }
    Coord::new(row as usize, col as usize)
}

/// Concatenate the run of tiles starting at `start` along the delta.
fn collect_word(
    board: &Board,
    overlay: &HashMap<Coord, Tile>,
    start: Coord,
    delta_row: isize,
    delta_col: isize,
) -> (String, Vec<Tile>) {
    let mut word = String::new();
    let mut tiles = Vec::new();
    let mut row = start.row as isize;
    let mut col = start.col as isize;
    while let Some(tile) = tile_at(board, overlay, row, col) {
        word.push(tile.letter());
        tiles.push(tile);
        row += delta_row;
        col += delta_col;
    }
    (word, tiles)
}

fn has_adjacent_tile(board: &Board, coord: Coord) -> bool {
    let Coord { row, col } = coord;
    (row > 0 && !board.is_empty(row - 1, col))
        || (row < BOARD_SIZE - 1 && !board.is_empty(row + 1, col))
        || (col > 0 && !board.is_empty(row, col - 1))
        || (col < BOARD_SIZE - 1 && !board.is_empty(row, col + 1))
}

fn has_horizontal_neighbor(board: &Board, coord: Coord) -> bool {
    let Coord { row, col } = coord;
    (col > 0 && !board.is_empty(row, col - 1))
        || (col < BOARD_SIZE - 1 && !board.is_empty(row, col + 1))
}
