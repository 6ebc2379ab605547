//! Player data structure and its textual encoding.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::game::{DartGame, GameError};

/// Unique identifier for a player within one match (small random integer).
pub type PlayerId = u32;

/// Characters that collide with the encoding's delimiters; rejected in names.
const RESERVED_NAME_CHARS: [char; 4] = ['(', ')', ',', ':'];

/// Exclusive upper bound for randomly drawn player ids.
const ID_RANGE: PlayerId = 1_000_000;

/// A player in the match: identity plus running score.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Accumulated score toward the 501 match maximum.
    pub points: u32,
}

impl Player {
    /// Create a player with the given id and zero points.
    ///
    /// The name must be non-empty after trimming and must not contain any of
    /// the encoding's reserved characters `(`, `)`, `,`, `:`.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Result<Self, GameError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || name.contains(&RESERVED_NAME_CHARS[..]) {
            return Err(GameError::InvalidPlayerName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            points: 0,
        })
    }

    /// Create a player with a freshly drawn random id (setup flow).
    pub fn with_random_id(name: impl Into<String>) -> Result<Self, GameError> {
        Self::new(random_id(), name)
    }

    /// Add points unconditionally and return the new total.
    /// Bust checking against the match maximum is the game's job, not the player's.
    pub fn add_points(&mut self, delta: u32) -> u32 {
        self.points += delta;
        self.points
    }

    /// Absolute overwrite of the score (used by restart).
    pub fn set_points(&mut self, points: u32) {
        self.points = points;
    }

    /// Points left to the match maximum.
    pub fn remaining(&self) -> u32 {
        DartGame::MAX_SCORE.saturating_sub(self.points)
    }

    /// Draw a new random id, always different from the current one.
    /// Invalidating the old id is intentional; it marks a fresh match.
    pub fn regenerate_id(&mut self) {
        let mut id = random_id();
        while id == self.id {
            id = random_id();
        }
        self.id = id;
    }

    /// Render the canonical textual form: `Player(i:<id>,n:<name>,p:<points>)`.
    pub fn encode(&self) -> String {
        format!("Player(i:{},n:{},p:{})", self.id, self.name, self.points)
    }

    /// Parse the canonical textual form produced by [`Player::encode`].
    pub fn decode(text: &str) -> Result<Self, GameError> {
        let body = text
            .strip_prefix("Player(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or(GameError::MalformedPlayerRecord)?;
        let rest = body
            .strip_prefix("i:")
            .ok_or(GameError::MalformedPlayerRecord)?;
        let (id, rest) = rest
            .split_once(",n:")
            .ok_or(GameError::MalformedPlayerRecord)?;
        // A stored name is taken as-is; the points marker is the last `,p:`
        // so a permissive name cannot swallow it.
        let (name, points) = rest
            .rsplit_once(",p:")
            .ok_or(GameError::MalformedPlayerRecord)?;
        let id: PlayerId = id.parse().map_err(|_| GameError::MalformedPlayerRecord)?;
        let points: u32 = points.parse().map_err(|_| GameError::MalformedPlayerRecord)?;
        Ok(Self {
            id,
            name: name.to_string(),
            points,
        })
    }
}

fn random_id() -> PlayerId {
    rand::thread_rng().gen_range(0..ID_RANGE)
}
