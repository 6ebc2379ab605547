//! DartGame: the match aggregate - turn rotation, scoring, win detection,
//! and the match-level textual encoding.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::models::player::{Player, PlayerId};
use crate::storage::GameStore;

/// Errors for match construction, commands, and decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameError {
    /// Structurally impossible state: empty roster or out-of-range turn pointer.
    InvalidMatchState,
    /// Persisted text does not match the `DartGame(...)` grammar.
    InvalidEncoding,
    /// Player record does not match the `Player(...)` grammar.
    MalformedPlayerRecord,
    /// Player name is empty or contains a reserved delimiter character.
    InvalidPlayerName,
    /// Command issued after a player already reached the winning score.
    GameEnded,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidMatchState => write!(f, "Invalid game state"),
            GameError::InvalidEncoding => write!(f, "Invalid encoded game"),
            GameError::MalformedPlayerRecord => write!(f, "Invalid encoded player"),
            GameError::InvalidPlayerName => {
                write!(f, "Player name is empty or contains a reserved character")
            }
            GameError::GameEnded => write!(f, "The game has already ended"),
        }
    }
}

impl std::error::Error for GameError {}

/// Explicit phase of the match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Rounds are still being played.
    InProgress { round: u32, index: usize },
    /// A player reached the winning score.
    Ended { winner_id: PlayerId },
}

/// Outcome of submitting one turn's points for the current player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowResult {
    /// Points were applied; carries the player's new total.
    Applied(u32),
    /// The turn would overshoot the maximum; the whole delta was dropped.
    Busted,
}

/// Full match state: roster, start time, round counter, and turn pointer.
///
/// Players are kept in ascending-id order and the turn pointer indexes into
/// that canonical order. Every mutating command re-serializes the whole state
/// into the injected [`GameStore`] before returning, so an external read after
/// any operation observes a consistent snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DartGame {
    players: Vec<Player>,
    /// Epoch milliseconds.
    start_timestamp: i64,
    current_round: u32,
    current_player_index: usize,
}

impl DartGame {
    /// Score a player must reach exactly to win the match.
    pub const MAX_SCORE: u32 = 501;
    /// Upper bound for the points one three-dart turn can add.
    pub const MAX_SCORE_PER_TURN: u32 = 180;

    /// Create a match at round 0 with the lowest-id player up first.
    pub fn new(players: Vec<Player>, start_timestamp: i64) -> Result<Self, GameError> {
        Self::with_state(players, start_timestamp, 0, 0)
    }

    /// Create a match with an explicit round and turn pointer (used by decode).
    /// The roster must be non-empty and the pointer in bounds.
    pub fn with_state(
        mut players: Vec<Player>,
        start_timestamp: i64,
        current_round: u32,
        current_player_index: usize,
    ) -> Result<Self, GameError> {
        if players.is_empty() || current_player_index >= players.len() {
            return Err(GameError::InvalidMatchState);
        }
        players.sort_by_key(|p| p.id);
        Ok(Self {
            players,
            start_timestamp,
            current_round,
            current_player_index,
        })
    }

    /// Current phase: still in progress, or ended with a winner.
    pub fn phase(&self) -> GamePhase {
        match self.winner() {
            Some(winner) => GamePhase::Ended {
                winner_id: winner.id,
            },
            None => GamePhase::InProgress {
                round: self.current_round,
                index: self.current_player_index,
            },
        }
    }

    /// True when a player has reached the winning score exactly.
    pub fn is_game_ended(&self) -> bool {
        self.winner().is_some()
    }

    /// The player who reached the winning score, if any.
    pub fn winner(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.points == Self::MAX_SCORE)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Whether the given player is the one whose turn it is.
    pub fn is_current_player(&self, player: &Player) -> bool {
        self.current_player().id == player.id
    }

    /// Snapshot of the roster in ascending-id order.
    pub fn players(&self) -> Vec<Player> {
        self.players.clone()
    }

    /// Snapshot of the roster sorted by descending score (ranking display).
    pub fn players_by_score(&self) -> Vec<Player> {
        let mut players = self.players.clone();
        players.sort_by(|a, b| b.points.cmp(&a.points));
        players
    }

    /// Snapshot of the roster rotated so the current player comes first
    /// (turn-order display).
    pub fn players_from_current(&self) -> Vec<Player> {
        let mut players = self.players.clone();
        players.rotate_left(self.current_player_index);
        players
    }

    pub fn players_len(&self) -> usize {
        self.players.len()
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn start_timestamp(&self) -> i64 {
        self.start_timestamp
    }

    /// Start of the match as a local `HH:MM` clock string.
    pub fn start_time(&self) -> String {
        Local
            .timestamp_millis_opt(self.start_timestamp)
            .single()
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }

    /// Apply one turn's points to the current player.
    ///
    /// Enforces the bust rule: a delta that would push the total past
    /// [`Self::MAX_SCORE`] is dropped entirely, not even partially applied.
    /// Persists the new state when points were applied.
    pub fn apply_points(
        &mut self,
        delta: u32,
        store: &mut dyn GameStore,
    ) -> Result<ThrowResult, GameError> {
        if self.is_game_ended() {
            return Err(GameError::GameEnded);
        }
        match self.current_player().points.checked_add(delta) {
            Some(total) if total <= Self::MAX_SCORE => {
                self.players[self.current_player_index].add_points(delta);
                store.save(&self.encode());
                Ok(ThrowResult::Applied(total))
            }
            _ => Ok(ThrowResult::Busted),
        }
    }

    /// Move the turn to the next player; wrapping back to the first player
    /// starts a new round. Persists, then returns the new current player.
    pub fn advance_turn(&mut self, store: &mut dyn GameStore) -> Result<&Player, GameError> {
        if self.is_game_ended() {
            return Err(GameError::GameEnded);
        }
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        if self.current_player_index == 0 {
            self.current_round += 1;
        }
        store.save(&self.encode());
        Ok(self.current_player())
    }

    /// Start over with the same roster: zero every score, reset the round and
    /// turn pointer, and give every player a fresh id. Persists.
    pub fn restart(&mut self, store: &mut dyn GameStore) {
        self.current_round = 0;
        self.current_player_index = 0;
        for player in &mut self.players {
            player.set_points(0);
            player.regenerate_id();
        }
        self.players.sort_by_key(|p| p.id);
        store.save(&self.encode());
    }

    /// Render the canonical textual form:
    /// `DartGame(d:<start>,r:<round>,pi:<index>,p:[<player>,<player>,...])`.
    pub fn encode(&self) -> String {
        let players = self
            .players
            .iter()
            .map(Player::encode)
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "DartGame(d:{},r:{},pi:{},p:[{}])",
            self.start_timestamp, self.current_round, self.current_player_index, players
        )
    }

    /// Parse the canonical textual form produced by [`Self::encode`].
    ///
    /// Players are re-sorted by id regardless of the encoded order. Text that
    /// does not match the grammar never yields a partially built game.
    pub fn decode(text: &str) -> Result<Self, GameError> {
        let body = text
            .strip_prefix("DartGame(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or(GameError::InvalidEncoding)?;
        let rest = body.strip_prefix("d:").ok_or(GameError::InvalidEncoding)?;
        let (start, rest) = rest.split_once(",r:").ok_or(GameError::InvalidEncoding)?;
        let (round, rest) = rest.split_once(",pi:").ok_or(GameError::InvalidEncoding)?;
        let (index, players) = rest.split_once(",p:").ok_or(GameError::InvalidEncoding)?;
        let players = players
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(GameError::InvalidEncoding)?;

        let start_timestamp: i64 = start.parse().map_err(|_| GameError::InvalidEncoding)?;
        let current_round: u32 = round.parse().map_err(|_| GameError::InvalidEncoding)?;
        let current_player_index: usize = index.parse().map_err(|_| GameError::InvalidEncoding)?;

        // Player records are comma-joined, so splitting on `),` strips the
        // closing paren from every record but the last.
        let players = players
            .split("),")
            .map(|record| {
                if record.ends_with(')') {
                    Player::decode(record)
                } else {
                    Player::decode(&format!("{record})"))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::with_state(players, start_timestamp, current_round, current_player_index)
    }
}
