//! Read-only views of a game, safe to hand across the engine boundary.

use serde::Serialize;
use uuid::Uuid;

use crate::game::state::GameState;
use crate::game::GameStatus;

/// One player's public-facing state, rack included. Callers are expected
/// to strip opponents' racks before forwarding to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub player_id: Uuid,
    pub name: String,
    pub score: u32,
    pub rack: Vec<String>,
    pub remaining_time_millis: u64,
}

/// A full picture of one game at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub game_id: Uuid,
    pub board: Vec<String>,
    pub players: Vec<PlayerSnapshot>,
    pub current_player_id: Uuid,
    pub status: GameStatus,
    pub tile_bag_remaining: usize,
}

impl GameSnapshot {
    /// Copy everything observable out of `game`. Players appear in turn
    /// order; an unassigned blank renders as `?`.
    pub fn capture(game: &GameState) -> Self {
        let players = game
            .turn_order()
            .iter()
            .filter_map(|&id| game.require_player(id).ok())
            .map(|player| PlayerSnapshot {
                player_id: player.id(),
                name: player.name().to_string(),
                score: player.score(),
                rack: player
                    .rack()
                    .iter()
                    .map(|tile| tile.letter().to_string())
                    .collect(),
                remaining_time_millis: player.remaining_time_millis(),
            })
            .collect();
        Self {
            game_id: game.id(),
            board: game.board().as_string_rows(),
            players,
            current_player_id: game.current_turn(),
            status: game.status(),
            tile_bag_remaining: game.tile_bag().remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bag::TileBag;
    use crate::game::state::PlayerState;
    use crate::game::{Coord, Tile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> GameState {
        let alice = PlayerState::new(Uuid::new_v4(), "Alice");
        let bob = PlayerState::new(Uuid::new_v4(), "Bob");
        GameState::new(
            Uuid::new_v4(),
            vec![alice, bob],
            TileBag::new(StdRng::seed_from_u64(11)),
        )
    }

    #[test]
    fn test_capture_reflects_state() {
        let mut game = game();
        game.board_mut().place(Coord::new(7, 7), Tile::of('q'));
        game.refill_rack(game.turn_order()[0]).unwrap();

        let snapshot = GameSnapshot::capture(&game);
        assert_eq!(snapshot.game_id, game.id());
        assert_eq!(snapshot.status, GameStatus::Active);
        assert_eq!(snapshot.board.len(), 15);
        assert_eq!(&snapshot.board[7][7..8], "q");
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[0].name, "Alice");
        assert_eq!(snapshot.players[0].rack.len(), 7);
        assert!(snapshot.players[1].rack.is_empty());
        assert_eq!(snapshot.current_player_id, game.turn_order()[0]);
        assert_eq!(snapshot.tile_bag_remaining, 93);
    }

    #[test]
    fn test_blank_tile_renders_as_question_mark() {
        let mut game = game();
        let first = game.turn_order()[0];
        game.require_player_mut(first)
            .unwrap()
            .return_tiles(vec![Tile::of('?')]);

        let snapshot = GameSnapshot::capture(&game);
        assert_eq!(snapshot.players[0].rack, vec!["?"]);
    }

    #[test]
    fn test_snapshot_serializes_status_screaming() {
        let game = game();
        let snapshot = GameSnapshot::capture(&game);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"ACTIVE\""));
    }
}
