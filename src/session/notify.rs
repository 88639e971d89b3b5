//! Outbound notification seam: every observable game change is pushed
//! through a [`GameNotifier`] so transports stay out of the engine.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

use tracing::warn;

use super::snapshot::GameSnapshot;

/// Receives a fresh snapshot after every state change, including changes
/// surfaced lazily by reads (a turn clock expiring, for example).
pub trait GameNotifier: Send + Sync {
    fn notify_game(&self, snapshot: &GameSnapshot);
}

/// Discards notifications.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl GameNotifier for NullNotifier {
    fn notify_game(&self, _snapshot: &GameSnapshot) {}
}

/// Forwards snapshots over an mpsc channel. Dropped receivers are logged
/// and otherwise ignored; notification failures never fail the move that
/// triggered them.
pub struct ChannelNotifier {
    sender: Mutex<Sender<GameSnapshot>>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, Receiver<GameSnapshot>) {
        let (sender, receiver) = channel();
        (
            Self {
                sender: Mutex::new(sender),
            },
            receiver,
        )
    }
}

impl GameNotifier for ChannelNotifier {
    fn notify_game(&self, snapshot: &GameSnapshot) {
        let sender = self.sender.lock().expect("poisoned notifier lock");
        if sender.send(snapshot.clone()).is_err() {
            warn!(game_id = %snapshot.game_id, "notification receiver dropped");
        }
    }
}
