//! 501 double-out dart match core: state machine, textual encoding, checkout advisor.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{advise_checkout, resume_game, start_game, stop_game, Ring, MAX_CHECKOUT};
pub use models::{DartGame, GameError, GamePhase, Player, PlayerId, ThrowResult};
pub use storage::{GameStore, InMemoryGameStore};
