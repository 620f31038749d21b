//! Persisted snapshot: the flat record written to localStorage.
//!
//! ```text
//! {
//!   "places":        [{ "name": "Delhi", "points": 1, "player": 1 }, ...],
//!   "scores":        { "player1": 1, "player2": 0 },
//!   "currentPlayer": 2,
//!   "gameState":     "playing",
//!   "lastLetter":    "i"
//! }
//! ```
//!
//! There is no version field. Decoding is lenient about missing fields
//! (they take their defaults) but any type mismatch is a corrupt snapshot.

use serde::{Deserialize, Serialize};

use crate::game::entry::{Entry, GameStatus, PlayerId, Scores};
use crate::game::error::SnapshotError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub places: Vec<Entry>,
    pub scores: Scores,
    pub current_player: PlayerId,
    pub game_state: GameStatus,
    /// Empty before the first entry.
    pub last_letter: String,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
