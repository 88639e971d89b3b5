//! The tile bag: a shuffled pool drawn from the standard distribution.

use rand::prelude::*;

use super::Tile;

/// Standard English Scrabble distribution: 98 letters plus 2 blanks.
const TILE_DISTRIBUTION: [(char, u32); 27] = [
    ('a', 9),
    ('b', 2),
    ('c', 2),
    ('d', 4),
    ('e', 12),
    ('f', 2),
    ('g', 3),
    ('h', 2),
    ('i', 9),
    ('j', 1),
    ('k', 1),
    ('l', 4),
    ('m', 2),
    ('n', 6),
    ('o', 8),
    ('p', 2),
    ('q', 1),
    ('r', 6),
    ('s', 4),
    ('t', 6),
    ('u', 4),
    ('v', 2),
    ('w', 2),
    ('x', 1),
    ('y', 2),
    ('z', 1),
    ('?', 2),
];

/// A shuffled pool of 100 tiles. The bag owns its random source, so
/// shuffle order is a deterministic function of the seed it was built
/// with; two bags seeded identically draw identical sequences.
#[derive(Debug)]
pub struct TileBag {
    tiles: Vec<Tile>,
    rng: StdRng,
}

impl TileBag {
    /// Populate the full distribution and shuffle with `rng`.
    pub fn new(rng: StdRng) -> Self {
        let mut tiles = Vec::with_capacity(100);
        for (letter, count) in TILE_DISTRIBUTION {
            for _ in 0..count {
                tiles.push(Tile::of(letter));
            }
        }
        let mut bag = Self { tiles, rng };
        bag.shuffle();
        bag
    }

    /// Remove up to `count` tiles from the pool; fewer when the bag is
    /// nearly empty.
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let actual = count.min(self.tiles.len());
        let at = self.tiles.len() - actual;
        self.tiles.split_off(at)
    }

    /// Put tiles back and reshuffle the whole pool.
    pub fn return_tiles(&mut self, returned: Vec<Tile>) {
        if returned.is_empty() {
            return;
        }
        self.tiles.extend(returned);
        self.shuffle();
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    fn shuffle(&mut self) {
        self.tiles.shuffle(&mut self.rng);
    }
}
