//! Value types shared by the session, the snapshot and the board renderer.

use serde::{Deserialize, Serialize};

/// Which of the two players an entry or score belongs to.
/// Serialized as the bare number (`1` or `2`) to match the snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerId {
    #[default]
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// The player whose turn comes next.
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerId::One => "Player 1",
            PlayerId::Two => "Player 2",
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(format!("player id must be 1 or 2, got {}", other)),
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        id.number()
    }
}

/// One accepted place name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Trimmed, case preserved as typed.
    pub name: String,
    pub points: u32,
    /// Contributing player; absent in single-player games.
    #[serde(default, rename = "player", skip_serializing_if = "Option::is_none")]
    pub contributed_by: Option<PlayerId>,
}

/// Per-player totals, keyed the way the snapshot stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    #[serde(default)]
    pub player1: u32,
    #[serde(default)]
    pub player2: u32,
}

impl Scores {
    pub fn get(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.player1,
            PlayerId::Two => self.player2,
        }
    }

    pub fn award(&mut self, player: PlayerId, points: u32) {
        let slot = match player {
            PlayerId::One => &mut self.player1,
            PlayerId::Two => &mut self.player2,
        };
        *slot = slot.saturating_add(points);
    }
}

/// Round phase. Stored as `"waiting"`, `"playing"` or `"finished"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Waiting,
    Playing,
    Finished,
}

/// How a finished round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerId),
    Draw,
    Solo { entries: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_toggles() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
    }

    #[test]
    fn player_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PlayerId::Two).unwrap(), "2");
        let id: PlayerId = serde_json::from_str("1").unwrap();
        assert_eq!(id, PlayerId::One);
        assert!(serde_json::from_str::<PlayerId>("3").is_err());
    }

    #[test]
    fn scores_award_to_the_right_player() {
        let mut scores = Scores::default();
        scores.award(PlayerId::Two, 1);
        scores.award(PlayerId::Two, 1);
        assert_eq!(scores.get(PlayerId::One), 0);
        assert_eq!(scores.get(PlayerId::Two), 2);
    }

    #[test]
    fn entry_uses_player_field_name() {
        let entry = Entry {
            name: "Delhi".to_string(),
            points: 1,
            contributed_by: Some(PlayerId::One),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"Delhi","points":1,"player":1}"#);

        let solo = Entry {
            contributed_by: None,
            ..entry
        };
        assert!(!serde_json::to_string(&solo).unwrap().contains("player"));
    }

    #[test]
    fn status_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&GameStatus::Waiting).unwrap(), r#""waiting""#);
        let s: GameStatus = serde_json::from_str(r#""finished""#).unwrap();
        assert_eq!(s, GameStatus::Finished);
    }
}
