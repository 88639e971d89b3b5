//! The session engine: lobby matchmaking, per-game locking, the lazy
//! turn clock, and the three mutating operations.
//!
//! Locking order is fixed: the lobby lock and the games registry are
//! never held while a game's own mutex is being acquired by another
//! path, and notifications go out while the game lock is still held so
//! observers see snapshots in mutation order.

pub mod clock;
pub mod notify;
pub mod snapshot;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::dictionary::WordDictionary;
use crate::error::GameError;
use crate::game::bag::TileBag;
use crate::game::state::{GameState, PlayerState};
use crate::game::validation::{MoveValidator, Placement};
use crate::game::GameStatus;

use self::clock::GameClock;
use self::notify::GameNotifier;
use self::snapshot::GameSnapshot;

/// Four consecutive passes (two full rounds) end the game.
const PASS_LIMIT: u32 = 4;

/// Outcome of a lobby join: either the caller is now waiting, or a game
/// was created and its opening snapshot is included.
#[derive(Debug, Clone)]
pub struct JoinResult {
    pub player_id: Uuid,
    pub waiting: bool,
    pub game_id: Option<Uuid>,
    pub snapshot: Option<GameSnapshot>,
}

/// Outcome of a committed move.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub snapshot: GameSnapshot,
    pub score_earned: u32,
    pub words_formed: Vec<String>,
}

struct WaitingPlayer {
    id: Uuid,
    name: String,
}

/// One live game behind its own mutex. Everything that reads or writes
/// the contained state goes through this lock.
struct GameSession {
    game: Mutex<GameState>,
}

/// Owns every live game plus the lobby, and serializes access per game.
pub struct SessionEngine {
    validator: MoveValidator,
    config: EngineConfig,
    clock: Arc<dyn GameClock>,
    notifier: Arc<dyn GameNotifier>,
    rng: Mutex<StdRng>,
    lobby: Mutex<Option<WaitingPlayer>>,
    games: RwLock<HashMap<Uuid, Arc<GameSession>>>,
    player_games: RwLock<HashMap<Uuid, Uuid>>,
}

impl SessionEngine {
    pub fn new(
        dictionary: Arc<dyn WordDictionary>,
        config: EngineConfig,
        clock: Arc<dyn GameClock>,
        notifier: Arc<dyn GameNotifier>,
    ) -> Self {
        let rng = StdRng::seed_from_u64(config.random_seed);
        Self {
            validator: MoveValidator::new(dictionary),
            config,
            clock,
            notifier,
            rng: Mutex::new(rng),
            lobby: Mutex::new(None),
            games: RwLock::new(HashMap::new()),
            player_games: RwLock::new(HashMap::new()),
        }
    }

    /// Join the single-slot lobby. The first caller waits; the second is
    /// paired with them into a fresh game. The lobby lock is held across
    /// the whole pairing so exactly one transaction wins the slot.
    pub fn join_lobby(&self, name: &str) -> JoinResult {
        let player_id = Uuid::new_v4();
        let mut lobby = self.lobby.lock().expect("poisoned lobby lock");
        match lobby.take() {
            None => {
                debug!(%player_id, name, "player waiting in lobby");
                *lobby = Some(WaitingPlayer {
                    id: player_id,
                    name: name.to_string(),
                });
                JoinResult {
                    player_id,
                    waiting: true,
                    game_id: None,
                    snapshot: None,
                }
            }
            Some(waiting) => {
                let snapshot = self.create_game(waiting, player_id, name);
                JoinResult {
                    player_id,
                    waiting: false,
                    game_id: Some(snapshot.game_id),
                    snapshot: Some(snapshot),
                }
            }
        }
    }

    /// Current snapshot of a game. Reading reconciles the turn clock, so
    /// a silently expired game completes here; the query still succeeds.
    pub fn get_game(&self, game_id: Uuid) -> Result<GameSnapshot, GameError> {
        let session = self.session(game_id)?;
        let mut game = session.game.lock().expect("poisoned game lock");
        let expired = self.reconcile_clock(&mut game);
        let snapshot = GameSnapshot::capture(&game);
        if expired {
            self.notifier.notify_game(&snapshot);
        }
        Ok(snapshot)
    }

    /// Snapshot of the game a player is in, if any.
    pub fn game_for_player(&self, player_id: Uuid) -> Result<GameSnapshot, GameError> {
        let game_id = {
            let player_games = self.player_games.read().expect("poisoned player map");
            player_games
                .get(&player_id)
                .copied()
                .ok_or(GameError::UnknownPlayer(player_id))?
        };
        self.get_game(game_id)
    }

    /// Validate and commit a move. Rejections of any kind leave board,
    /// rack, and score untouched.
    pub fn play_move(
        &self,
        game_id: Uuid,
        player_id: Uuid,
        placements: &[Placement],
    ) -> Result<MoveResult, GameError> {
        let session = self.session(game_id)?;
        let mut game = session.game.lock().expect("poisoned game lock");
        self.check_mutable(&mut game, player_id)?;

        let outcome = self.validator.validate(game.board(), placements)?;
        let picks: Vec<(char, bool)> = placements
            .iter()
            .map(|placement| (placement.letter, placement.blank))
            .collect();
        game.require_player_mut(player_id)?.remove_tiles(&picks)?;

        // Past this point the move is committed in full.
        for (&coord, &tile) in &outcome.tiles {
            game.board_mut().place(coord, tile);
        }
        game.require_player_mut(player_id)?.add_score(outcome.score);
        game.reset_passes();
        game.refill_rack(player_id)?;

        let rack_empty = game.require_player(player_id)?.rack().is_empty();
        if rack_empty && game.tile_bag().remaining() == 0 {
            game.set_status(GameStatus::Completed);
            info!(game_id = %game.id(), %player_id, "game completed, bag and rack empty");
        }
        self.finish_turn(&mut game);

        info!(
            game_id = %game.id(),
            %player_id,
            score = outcome.score,
            words = ?outcome.words,
            "move played"
        );
        let snapshot = GameSnapshot::capture(&game);
        self.notifier.notify_game(&snapshot);
        Ok(MoveResult {
            snapshot,
            score_earned: outcome.score,
            words_formed: outcome.words,
        })
    }

    /// Swap rack tiles for fresh ones from the bag. Resets the pass
    /// counter but scores nothing.
    pub fn exchange_tiles(
        &self,
        game_id: Uuid,
        player_id: Uuid,
        letters: &[char],
    ) -> Result<GameSnapshot, GameError> {
        let session = self.session(game_id)?;
        let mut game = session.game.lock().expect("poisoned game lock");
        self.check_mutable(&mut game, player_id)?;

        if letters.is_empty() {
            return Err(GameError::EmptyExchange);
        }
        if letters.len() > game.tile_bag().remaining() {
            return Err(GameError::NotEnoughTilesInBag);
        }
        let picks: Vec<(char, bool)> = letters
            .iter()
            .map(|&letter| (letter, letter == '?'))
            .collect();
        let removed = game.require_player_mut(player_id)?.remove_tiles(&picks)?;
        game.tile_bag_mut().return_tiles(removed);
        game.refill_rack(player_id)?;
        game.reset_passes();
        self.finish_turn(&mut game);

        debug!(game_id = %game.id(), %player_id, count = letters.len(), "tiles exchanged");
        let snapshot = GameSnapshot::capture(&game);
        self.notifier.notify_game(&snapshot);
        Ok(snapshot)
    }

    /// Forfeit the turn. The fourth consecutive pass completes the game.
    pub fn pass(&self, game_id: Uuid, player_id: Uuid) -> Result<GameSnapshot, GameError> {
        let session = self.session(game_id)?;
        let mut game = session.game.lock().expect("poisoned game lock");
        self.check_mutable(&mut game, player_id)?;

        game.increment_pass();
        if game.consecutive_passes() >= PASS_LIMIT {
            game.set_status(GameStatus::Completed);
            info!(game_id = %game.id(), "game completed after four consecutive passes");
        }
        self.finish_turn(&mut game);

        debug!(game_id = %game.id(), %player_id, passes = game.consecutive_passes(), "turn passed");
        let snapshot = GameSnapshot::capture(&game);
        self.notifier.notify_game(&snapshot);
        Ok(snapshot)
    }

    fn create_game(&self, waiting: WaitingPlayer, joiner_id: Uuid, joiner_name: &str) -> GameSnapshot {
        // Each game gets its own rng stream, derived from the engine seed
        // so whole sessions replay deterministically.
        let bag_seed = self.rng.lock().expect("poisoned rng lock").random::<u64>();
        let bag = TileBag::new(StdRng::seed_from_u64(bag_seed));

        let mut first = PlayerState::new(waiting.id, waiting.name);
        let mut second = PlayerState::new(joiner_id, joiner_name);
        first.reset_clock(self.config.initial_time_millis);
        second.reset_clock(self.config.initial_time_millis);

        let game_id = Uuid::new_v4();
        let mut game = GameState::new(game_id, vec![first, second], bag);
        for &id in &[waiting.id, joiner_id] {
            game.refill_rack(id).expect("player registered at creation");
        }
        game.mark_turn_start(self.clock.now_millis());

        info!(
            %game_id,
            first_player = %waiting.id,
            second_player = %joiner_id,
            "game started"
        );
        let snapshot = GameSnapshot::capture(&game);
        {
            let mut games = self.games.write().expect("poisoned games lock");
            games.insert(
                game_id,
                Arc::new(GameSession {
                    game: Mutex::new(game),
                }),
            );
        }
        {
            let mut player_games = self.player_games.write().expect("poisoned player map");
            player_games.insert(waiting.id, game_id);
            player_games.insert(joiner_id, game_id);
        }
        self.notifier.notify_game(&snapshot);
        snapshot
    }

    fn session(&self, game_id: Uuid) -> Result<Arc<GameSession>, GameError> {
        let games = self.games.read().expect("poisoned games lock");
        games
            .get(&game_id)
            .cloned()
            .ok_or(GameError::GameNotFound(game_id))
    }

    /// Shared preamble for the mutating operations: known player, clock
    /// reconciled, game active, caller on turn.
    fn check_mutable(&self, game: &mut GameState, player_id: Uuid) -> Result<(), GameError> {
        game.require_player(player_id)?;
        if self.reconcile_clock(game) {
            let snapshot = GameSnapshot::capture(game);
            self.notifier.notify_game(&snapshot);
            return Err(GameError::TimedOut);
        }
        if game.status() != GameStatus::Active {
            return Err(GameError::NotActive);
        }
        if game.current_turn() != player_id {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Charge wall-clock time since the current turn began against the
    /// current player's budget. Returns true when this access exhausted
    /// the budget and completed the game.
    fn reconcile_clock(&self, game: &mut GameState) -> bool {
        if game.status() != GameStatus::Active {
            return false;
        }
        let Some(started) = game.last_turn_start() else {
            return false;
        };
        let now = self.clock.now_millis();
        let elapsed = now.saturating_sub(started);
        let current = game.current_turn();
        let expired = game
            .require_player_mut(current)
            .expect("current player exists")
            .consume_time(elapsed);
        game.mark_turn_start(now);
        if expired {
            game.set_status(GameStatus::Completed);
            info!(game_id = %game.id(), player_id = %current, "turn clock expired");
        }
        expired
    }

    /// Hand the turn to the next player and restart their clock.
    fn finish_turn(&self, game: &mut GameState) {
        if game.status() == GameStatus::Active {
            game.advance_turn();
        }
        game.mark_turn_start(self.clock.now_millis());
    }
}
