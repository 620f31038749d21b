//! Game configuration: player count, storage key, scoring and move budget.
//!
//! Accepted either as JSON (`{"playerCount":1}`) or as an HTMX form body
//! (`players=1&points=2&max_entries=20`). Missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::game::error::ConfigError;
use crate::routes::util::{get_param, parse_form_body};

/// localStorage key the snapshot is written under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "atlas_game_state";

/// Single-player list mode or two-player scored mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerCount {
    Solo,
    #[default]
    Duel,
}

impl PlayerCount {
    pub fn is_duel(self) -> bool {
        matches!(self, PlayerCount::Duel)
    }
}

impl TryFrom<u8> for PlayerCount {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerCount::Solo),
            2 => Ok(PlayerCount::Duel),
            other => Err(ConfigError::PlayerCount(other)),
        }
    }
}

impl From<PlayerCount> for u8 {
    fn from(count: PlayerCount) -> Self {
        match count {
            PlayerCount::Solo => 1,
            PlayerCount::Duel => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub player_count: PlayerCount,
    pub storage_key: String,
    pub points_per_entry: u32,
    /// Round ends automatically once this many places were accepted.
    pub max_entries: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: PlayerCount::Duel,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            points_per_entry: 1,
            max_entries: None,
        }
    }
}

impl GameConfig {
    pub fn solo() -> Self {
        Self {
            player_count: PlayerCount::Solo,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from form fields, starting from `base` for anything omitted.
    pub fn from_form(body: &str, base: &GameConfig) -> Result<Self, ConfigError> {
        let params = parse_form_body(body);
        let mut config = base.clone();

        if let Some(players) = get_param(&params, "players") {
            let n: u8 = players
                .trim()
                .parse()
                .map_err(|_| ConfigError::PlayerCount(0))?;
            config.player_count = PlayerCount::try_from(n)?;
        }
        if let Some(points) = get_param(&params, "points") {
            config.points_per_entry = parse_positive("points", points)? as u32;
        }
        if let Some(max) = get_param(&params, "max_entries") {
            config.max_entries = if max.trim().is_empty() {
                None
            } else {
                Some(parse_positive("max_entries", max)?)
            };
        }
        if let Some(key) = get_param(&params, "storage_key") {
            config.storage_key = key.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.points_per_entry == 0 {
            return Err(ConfigError::NotPositive {
                field: "pointsPerEntry",
                value: "0".to_string(),
            });
        }
        if self.max_entries == Some(0) {
            return Err(ConfigError::NotPositive {
                field: "maxEntries",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_positive(field: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 && n <= u32::MAX as usize => Ok(n),
        _ => Err(ConfigError::NotPositive {
            field,
            value: raw.to_string(),
        }),
    }
}
