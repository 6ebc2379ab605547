//! Data structures for the dart match: players, game state, phases.

mod game;
mod player;

pub use game::{DartGame, GameError, GamePhase, ThrowResult};
pub use player::{Player, PlayerId};
