//! End-to-end scenarios through the public engine surface.

use std::sync::Arc;

use tilework::game::GameStatus;
use tilework::{
    ChannelNotifier, EngineConfig, GameError, GameSnapshot, ManualClock, Placement, SessionEngine,
    WordDictionary,
};
use uuid::Uuid;

/// Accepts every word; placement tests here exercise geometry, racks,
/// and turn flow rather than dictionary lookups.
struct AnyWord;

impl WordDictionary for AnyWord {
    fn contains(&self, word: &str) -> bool {
        !word.is_empty()
    }
    fn is_prefix(&self, _prefix: &str) -> bool {
        true
    }
    fn find_by_prefix(&self, _prefix: &str, _limit: usize) -> Vec<String> {
        Vec::new()
    }
    fn find_anagrams(&self, _letters: &str, _limit: usize) -> Vec<String> {
        Vec::new()
    }
    fn score(&self, _word: &str) -> u32 {
        0
    }
}

struct Harness {
    engine: SessionEngine,
    receiver: std::sync::mpsc::Receiver<GameSnapshot>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::new(0));
    let (notifier, receiver) = ChannelNotifier::new();
    let engine = SessionEngine::new(
        Arc::new(AnyWord),
        EngineConfig::default(),
        Arc::clone(&clock) as Arc<dyn tilework::GameClock>,
        Arc::new(notifier),
    );
    Harness {
        engine,
        receiver,
        clock,
    }
}

fn pair(h: &Harness) -> (Uuid, Uuid, Uuid) {
    let first = h.engine.join_lobby("Alice");
    assert!(first.waiting);
    let second = h.engine.join_lobby("Bob");
    let game_id = second.game_id.expect("second join creates the game");
    // Creation publishes the opening snapshot.
    let opening = h.receiver.try_recv().expect("creation notification");
    assert_eq!(opening.game_id, game_id);
    (first.player_id, second.player_id, game_id)
}

fn rack_of(h: &Harness, game_id: Uuid, player_id: Uuid) -> Vec<String> {
    let snapshot = h.engine.get_game(game_id).unwrap();
    snapshot
        .players
        .iter()
        .find(|p| p.player_id == player_id)
        .expect("player in game")
        .rack
        .clone()
}

/// Two placements out of the player's actual rack, across the center.
/// A blank on the rack is assigned the letter `z`.
fn opening_placements(rack: &[String]) -> Vec<Placement> {
    rack.iter()
        .take(2)
        .enumerate()
        .map(|(i, tile)| {
            let shown = tile.chars().next().expect("non-empty tile");
            if shown == '?' {
                Placement::new(7, 7 + i, 'z', true)
            } else {
                Placement::new(7, 7 + i, shown, false)
            }
        })
        .collect()
}

#[test]
fn lobby_pairs_two_entrants_and_third_waits() {
    let h = harness();
    let (alice, bob, game_id) = pair(&h);
    assert_ne!(alice, bob);

    let snapshot = h.engine.get_game(game_id).unwrap();
    assert_eq!(snapshot.players.len(), 2);
    assert_eq!(snapshot.current_player_id, alice);
    assert_eq!(snapshot.tile_bag_remaining, 86);

    let third = h.engine.join_lobby("Carol");
    assert!(third.waiting);
    assert!(third.snapshot.is_none());
}

#[test]
fn played_move_commits_scores_and_advances_turn() {
    let h = harness();
    let (alice, bob, game_id) = pair(&h);
    let rack = rack_of(&h, game_id, alice);
    let placements = opening_placements(&rack);

    let result = h.engine.play_move(game_id, alice, &placements).unwrap();
    assert_eq!(result.words_formed.len(), 1);
    assert_eq!(result.snapshot.current_player_id, bob);

    // Rack refilled to 7, two more tiles gone from the bag.
    let alice_snap = result
        .snapshot
        .players
        .iter()
        .find(|p| p.player_id == alice)
        .unwrap();
    assert_eq!(alice_snap.rack.len(), 7);
    assert_eq!(alice_snap.score, result.score_earned);
    assert_eq!(result.snapshot.tile_bag_remaining, 84);

    // The tiles are on the board.
    let row: Vec<char> = result.snapshot.board[7].chars().collect();
    assert_ne!(row[7], '.');
    assert_ne!(row[8], '.');

    // Move notification follows the creation one consumed in pair().
    let notified = h.receiver.try_recv().expect("move notification");
    assert_eq!(notified, result.snapshot);
}

#[test]
fn rejected_move_leaves_state_untouched() {
    let h = harness();
    let (alice, _, game_id) = pair(&h);
    let before = h.engine.get_game(game_id).unwrap();

    // Skip the center square: geometric rejection before any mutation.
    let rack = rack_of(&h, game_id, alice);
    let shown = rack[0].chars().next().unwrap();
    let placement = if shown == '?' {
        Placement::new(0, 0, 'z', true)
    } else {
        Placement::new(0, 0, shown, false)
    };
    let err = h.engine.play_move(game_id, alice, &[placement]).unwrap_err();
    assert!(matches!(err, GameError::InvalidMove(_)));

    let after = h.engine.get_game(game_id).unwrap();
    assert_eq!(after.board, before.board);
    assert_eq!(after.current_player_id, alice);
    assert_eq!(after.tile_bag_remaining, before.tile_bag_remaining);
}

#[test]
fn rack_shortfall_rejects_before_board_commit() {
    let h = harness();
    let (alice, _, game_id) = pair(&h);
    let rack = rack_of(&h, game_id, alice);
    let absent = ('a'..='z')
        .find(|c| !rack.contains(&c.to_string()))
        .expect("seven tiles cannot cover the alphabet");

    // Geometrically fine, but the caller does not hold the tile.
    let placements = vec![
        Placement::new(7, 7, absent, false),
    ];
    // Lone opening tile forms a one-letter word, accepted by AnyWord.
    let err = h.engine.play_move(game_id, alice, &placements).unwrap_err();
    assert_eq!(err, GameError::RackMissingLetter(absent));

    let snapshot = h.engine.get_game(game_id).unwrap();
    assert_eq!(snapshot.board[7], ".".repeat(15));
    assert_eq!(snapshot.current_player_id, alice);
}

#[test]
fn four_passes_complete_and_freeze_the_game() {
    let h = harness();
    let (alice, bob, game_id) = pair(&h);
    h.engine.pass(game_id, alice).unwrap();
    h.engine.pass(game_id, bob).unwrap();
    h.engine.pass(game_id, alice).unwrap();
    let last = h.engine.pass(game_id, bob).unwrap();
    assert_eq!(last.status, GameStatus::Completed);

    assert_eq!(
        h.engine.pass(game_id, alice).unwrap_err(),
        GameError::NotActive
    );
    let rack = rack_of(&h, game_id, alice);
    assert_eq!(
        h.engine
            .play_move(game_id, alice, &opening_placements(&rack))
            .unwrap_err(),
        GameError::NotActive
    );
}

#[test]
fn expired_clock_completes_on_next_query() {
    let h = harness();
    let (alice, bob, game_id) = pair(&h);
    let budget = EngineConfig::default().initial_time_millis;

    h.clock.advance(budget + 5);
    let snapshot = h.engine.get_game(game_id).unwrap();
    assert_eq!(snapshot.status, GameStatus::Completed);

    let alice_snap = snapshot.players.iter().find(|p| p.player_id == alice).unwrap();
    let bob_snap = snapshot.players.iter().find(|p| p.player_id == bob).unwrap();
    assert_eq!(alice_snap.remaining_time_millis, 0);
    assert_eq!(bob_snap.remaining_time_millis, budget);

    // The lazy completion was published to observers.
    let notified = h.receiver.try_recv().expect("timeout notification");
    assert_eq!(notified, snapshot);

    // And mutation now fails as non-active (the clock already resolved).
    assert_eq!(
        h.engine.pass(game_id, bob).unwrap_err(),
        GameError::NotActive
    );
}
