//! Per-player and per-game mutable state.
//!
//! Everything here is mutated only by the session engine while it holds
//! the owning game's lock.

use std::collections::HashMap;

use uuid::Uuid;

use super::bag::TileBag;
use super::{Board, GameStatus, Tile, RACK_CAPACITY};
use crate::error::GameError;

/// One player's rack, score, and turn-time budget.
#[derive(Debug)]
pub struct PlayerState {
    id: Uuid,
    name: String,
    rack: Vec<Tile>,
    score: u32,
    remaining_time_millis: u64,
}

impl PlayerState {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rack: Vec::with_capacity(RACK_CAPACITY),
            score: 0,
            remaining_time_millis: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, delta: u32) {
        self.score += delta;
    }

    pub fn rack(&self) -> &[Tile] {
        &self.rack
    }

    /// Draw from the bag until the rack holds 7 tiles (fewer if the bag
    /// runs out).
    pub fn refill_rack(&mut self, bag: &mut TileBag) {
        let needed = RACK_CAPACITY.saturating_sub(self.rack.len());
        self.rack.extend(bag.draw(needed));
    }

    /// Remove one tile per pick, all-or-nothing: if any pick cannot be
    /// satisfied the rack is left untouched. A blank pick takes any blank
    /// tile; a letter pick takes a non-blank tile showing that exact letter.
    pub fn remove_tiles(&mut self, picks: &[(char, bool)]) -> Result<Vec<Tile>, GameError> {
        let mut rack = self.rack.clone();
        let mut removed = Vec::with_capacity(picks.len());
        for &(letter, use_blank) in picks {
            let normalized = letter.to_ascii_lowercase();
            let index = if use_blank {
                rack.iter()
                    .position(|tile| tile.is_blank())
                    .ok_or(GameError::NoBlankTile)?
            } else {
                rack.iter()
                    .position(|tile| !tile.is_blank() && tile.letter() == normalized)
                    .ok_or(GameError::RackMissingLetter(normalized))?
            };
            removed.push(rack.remove(index));
        }
        self.rack = rack;
        Ok(removed)
    }

    pub fn remove_tile(&mut self, letter: char, use_blank: bool) -> Result<Tile, GameError> {
        let mut removed = self.remove_tiles(&[(letter, use_blank)])?;
        Ok(removed.remove(0))
    }

    pub fn return_tiles(&mut self, tiles: Vec<Tile>) {
        self.rack.extend(tiles);
    }

    pub fn remaining_time_millis(&self) -> u64 {
        self.remaining_time_millis
    }

    /// Charge elapsed wall-clock time against the budget. Returns true if
    /// the budget is exhausted; the budget clamps at zero.
    pub fn consume_time(&mut self, elapsed_millis: u64) -> bool {
        if elapsed_millis >= self.remaining_time_millis {
            self.remaining_time_millis = 0;
            true
        } else {
            self.remaining_time_millis -= elapsed_millis;
            false
        }
    }

    pub fn reset_clock(&mut self, budget_millis: u64) {
        self.remaining_time_millis = budget_millis;
    }
}

/// The aggregate state of one game: board, both players, the bag, whose
/// turn it is, and the pass/completion bookkeeping.
#[derive(Debug)]
pub struct GameState {
    id: Uuid,
    board: Board,
    players: HashMap<Uuid, PlayerState>,
    turn_order: Vec<Uuid>,
    tile_bag: TileBag,
    current_turn: Uuid,
    last_turn_start: Option<u64>,
    status: GameStatus,
    consecutive_passes: u32,
}

impl GameState {
    /// Turn order is fixed by the order of `players` at creation.
    pub fn new(id: Uuid, players: Vec<PlayerState>, tile_bag: TileBag) -> Self {
        let turn_order: Vec<Uuid> = players.iter().map(PlayerState::id).collect();
        let current_turn = turn_order[0];
        let players = players
            .into_iter()
            .map(|player| (player.id(), player))
            .collect();
        Self {
            id,
            board: Board::new(),
            players,
            turn_order,
            tile_bag,
            current_turn,
            last_turn_start: None,
            status: GameStatus::Active,
            consecutive_passes: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn tile_bag(&self) -> &TileBag {
        &self.tile_bag
    }

    pub fn tile_bag_mut(&mut self) -> &mut TileBag {
        &mut self.tile_bag
    }

    pub fn turn_order(&self) -> &[Uuid] {
        &self.turn_order
    }

    pub fn current_turn(&self) -> Uuid {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn increment_pass(&mut self) {
        self.consecutive_passes += 1;
    }

    pub fn reset_passes(&mut self) {
        self.consecutive_passes = 0;
    }

    pub fn last_turn_start(&self) -> Option<u64> {
        self.last_turn_start
    }

    pub fn mark_turn_start(&mut self, now_millis: u64) {
        self.last_turn_start = Some(now_millis);
    }

    pub fn require_player(&self, player_id: Uuid) -> Result<&PlayerState, GameError> {
        self.players
            .get(&player_id)
            .ok_or(GameError::UnknownPlayer(player_id))
    }

    pub fn require_player_mut(&mut self, player_id: Uuid) -> Result<&mut PlayerState, GameError> {
        self.players
            .get_mut(&player_id)
            .ok_or(GameError::UnknownPlayer(player_id))
    }

    /// Refill a player's rack from this game's bag.
    pub fn refill_rack(&mut self, player_id: Uuid) -> Result<(), GameError> {
        let player = self
            .players
            .get_mut(&player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        player.refill_rack(&mut self.tile_bag);
        Ok(())
    }

    /// Circular advance through the fixed turn order.
    pub fn advance_turn(&mut self) {
        let index = self
            .turn_order
            .iter()
            .position(|&id| id == self.current_turn)
            .unwrap_or(0);
        self.current_turn = self.turn_order[(index + 1) % self.turn_order.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bag() -> TileBag {
        TileBag::new(StdRng::seed_from_u64(7))
    }

    fn player_with(tiles: &[Tile]) -> PlayerState {
        let mut player = PlayerState::new(Uuid::new_v4(), "Alice");
        player.return_tiles(tiles.to_vec());
        player
    }

    fn two_player_game() -> GameState {
        let alice = PlayerState::new(Uuid::new_v4(), "Alice");
        let bob = PlayerState::new(Uuid::new_v4(), "Bob");
        GameState::new(Uuid::new_v4(), vec![alice, bob], bag())
    }

    #[test]
    fn test_refill_rack_to_capacity() {
        let mut player = PlayerState::new(Uuid::new_v4(), "Alice");
        let mut bag = bag();
        player.refill_rack(&mut bag);
        assert_eq!(player.rack().len(), RACK_CAPACITY);
        assert_eq!(bag.remaining(), 93);

        // Refilling a full rack draws nothing.
        player.refill_rack(&mut bag);
        assert_eq!(player.rack().len(), RACK_CAPACITY);
        assert_eq!(bag.remaining(), 93);
    }

    #[test]
    fn test_remove_tile_exact_letter() {
        let mut player = player_with(&[Tile::of('a'), Tile::of('b')]);
        let tile = player.remove_tile('B', false).unwrap();
        assert_eq!(tile.letter(), 'b');
        assert_eq!(player.rack().len(), 1);
    }

    #[test]
    fn test_remove_tile_missing_letter() {
        let mut player = player_with(&[Tile::of('a')]);
        assert_eq!(
            player.remove_tile('z', false),
            Err(GameError::RackMissingLetter('z'))
        );
        assert_eq!(player.rack().len(), 1);
    }

    #[test]
    fn test_remove_blank_ignores_letter() {
        let mut player = player_with(&[Tile::of('a'), Tile::of('?')]);
        let tile = player.remove_tile('x', true).unwrap();
        assert!(tile.is_blank());
        assert_eq!(player.rack().len(), 1);
    }

    #[test]
    fn test_remove_blank_without_blank_fails() {
        let mut player = player_with(&[Tile::of('a')]);
        assert_eq!(player.remove_tile('a', true), Err(GameError::NoBlankTile));
    }

    #[test]
    fn test_blank_not_taken_for_letter_pick() {
        // A blank showing no letter never satisfies an exact-letter pick.
        let mut player = player_with(&[Tile::of('?')]);
        assert_eq!(
            player.remove_tile('e', false),
            Err(GameError::RackMissingLetter('e'))
        );
    }

    #[test]
    fn test_remove_tiles_all_or_nothing() {
        let mut player = player_with(&[Tile::of('a'), Tile::of('b')]);
        let result = player.remove_tiles(&[('a', false), ('z', false)]);
        assert_eq!(result, Err(GameError::RackMissingLetter('z')));
        // The 'a' was not consumed by the failed batch.
        assert_eq!(player.rack().len(), 2);
    }

    #[test]
    fn test_remove_tiles_respects_multiplicity() {
        let mut player = player_with(&[Tile::of('l'), Tile::of('o')]);
        let result = player.remove_tiles(&[('l', false), ('l', false)]);
        assert_eq!(result, Err(GameError::RackMissingLetter('l')));
        assert_eq!(player.rack().len(), 2);
    }

    #[test]
    fn test_consume_time_decrements_then_clamps() {
        let mut player = PlayerState::new(Uuid::new_v4(), "Alice");
        player.reset_clock(1_000);
        assert!(!player.consume_time(400));
        assert_eq!(player.remaining_time_millis(), 600);
        assert!(player.consume_time(600));
        assert_eq!(player.remaining_time_millis(), 0);
        // Already exhausted budgets stay at zero.
        assert!(player.consume_time(1));
        assert_eq!(player.remaining_time_millis(), 0);
    }

    #[test]
    fn test_advance_turn_is_circular() {
        let mut game = two_player_game();
        let first = game.current_turn();
        assert_eq!(first, game.turn_order()[0]);
        game.advance_turn();
        assert_eq!(game.current_turn(), game.turn_order()[1]);
        game.advance_turn();
        assert_eq!(game.current_turn(), first);
    }

    #[test]
    fn test_pass_counter() {
        let mut game = two_player_game();
        assert_eq!(game.consecutive_passes(), 0);
        game.increment_pass();
        game.increment_pass();
        assert_eq!(game.consecutive_passes(), 2);
        game.reset_passes();
        assert_eq!(game.consecutive_passes(), 0);
    }

    #[test]
    fn test_require_player_unknown_id() {
        let game = two_player_game();
        let unknown = Uuid::new_v4();
        assert!(matches!(
            game.require_player(unknown),
            Err(GameError::UnknownPlayer(id)) if id == unknown
        ));
    }
}
