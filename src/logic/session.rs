//! Session lifecycle against the persistence gateway: start, resume, stop.

use crate::models::{DartGame, GameError, Player};
use crate::storage::GameStore;

/// Build a fresh match from the given roster and persist it immediately.
pub fn start_game(
    players: Vec<Player>,
    start_timestamp: i64,
    store: &mut dyn GameStore,
) -> Result<DartGame, GameError> {
    let game = DartGame::new(players, start_timestamp)?;
    store.save(&game.encode());
    Ok(game)
}

/// Load the persisted match, if any.
///
/// `Ok(None)` means the slot is empty. A blob that fails to decode is
/// discarded, never partially recovered: the slot is cleared, the store's
/// last-error flag is set for the presentation layer, and the decode error is
/// returned so the caller can fall back to the setup flow.
pub fn resume_game(store: &mut dyn GameStore) -> Result<Option<DartGame>, GameError> {
    let blob = match store.load() {
        Some(blob) => blob,
        None => return Ok(None),
    };
    match DartGame::decode(&blob) {
        Ok(game) => Ok(Some(game)),
        Err(err) => {
            log::warn!("Discarding unreadable saved game: {}", err);
            store.clear();
            store.set_last_error("Invalid game state");
            Err(err)
        }
    }
}

/// End the session: drop the persisted match.
pub fn stop_game(store: &mut dyn GameStore) {
    store.clear();
}
