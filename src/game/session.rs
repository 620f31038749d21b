//! Game session: the Atlas rules.
//!
//! Each accepted place must start with the last letter of the previous one
//! and may not repeat (case-insensitively) anything played this round. In a
//! two-player game the turn alternates and each accepted place scores for
//! the player who named it.
//!
//! The session owns its [`SnapshotStore`]. A full snapshot is written after
//! every accepted place and after `finish`; `reset` deletes it.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::game::config::GameConfig;
use crate::game::entry::{Entry, GameStatus, Outcome, PlayerId, Scores};
use crate::game::error::{SnapshotError, ValidationError};
use crate::game::snapshot::Snapshot;
use crate::game::store::SnapshotStore;

#[derive(Debug, Clone)]
pub struct GameSession<S: SnapshotStore> {
    config: GameConfig,
    store: S,
    entries: Vec<Entry>,
    /// Case-folded names of `entries`. Only `restore` and `accept` touch it.
    used: HashSet<String>,
    last_letter: Option<char>,
    current_player: PlayerId,
    scores: Scores,
    status: GameStatus,
}

impl<S: SnapshotStore> GameSession<S> {
    /// Fresh session. Does not read the store.
    pub fn new(config: GameConfig, store: S) -> Self {
        Self {
            config,
            store,
            entries: Vec::new(),
            used: HashSet::new(),
            last_letter: None,
            current_player: PlayerId::One,
            scores: Scores::default(),
            status: GameStatus::Waiting,
        }
    }

    /// Resume from the store's snapshot. A missing snapshot gives a fresh
    /// session; a corrupt one is logged and also gives a fresh session.
    pub fn load(config: GameConfig, store: S) -> Self {
        let mut session = Self::new(config, store);
        match session.read_snapshot() {
            Ok(Some(snapshot)) => {
                session.restore(snapshot);
                session.settle_budget();
                debug!(
                    key = %session.config.storage_key,
                    entries = session.entries.len(),
                    "restored atlas session"
                );
            }
            Ok(None) => {}
            Err(e) => {
                warn!(key = %session.config.storage_key, error = %e, "discarding atlas snapshot");
            }
        }
        session
    }

    /// Read and decode the stored snapshot, if any.
    pub fn read_snapshot(&self) -> Result<Option<Snapshot>, SnapshotError> {
        match self.store.get(&self.config.storage_key) {
            Some(json) => Snapshot::from_json(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Replace all state with `snapshot`, verbatim, rebuilding the name index.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.used = snapshot
            .places
            .iter()
            .map(|entry| entry.name.to_lowercase())
            .collect();
        self.entries = snapshot.places;
        self.last_letter = snapshot.last_letter.chars().next().map(fold);
        self.current_player = snapshot.current_player;
        self.scores = snapshot.scores;
        self.status = snapshot.game_state;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            places: self.entries.clone(),
            scores: self.scores,
            current_player: self.current_player,
            game_state: self.status,
            last_letter: self.last_letter.map(String::from).unwrap_or_default(),
        }
    }

    /// Validate `raw` and, if it continues the chain, record it.
    ///
    /// On error nothing changes and nothing is persisted; the same player
    /// keeps the turn.
    pub fn submit(&mut self, raw: &str) -> Result<Entry, ValidationError> {
        if self.status == GameStatus::Finished || self.budget_spent() {
            return Err(ValidationError::GameFinished);
        }

        let candidate = raw.trim();
        let (first, last) = match (candidate.chars().next(), candidate.chars().last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ValidationError::EmptyInput),
        };

        let folded = candidate.to_lowercase();
        if self.used.contains(&folded) {
            debug!(place = candidate, "duplicate place rejected");
            return Err(ValidationError::DuplicateEntry {
                name: candidate.to_string(),
            });
        }

        if let Some(expected) = self.last_letter {
            if fold(first) != expected {
                debug!(place = candidate, %expected, "place breaks the chain");
                return Err(ValidationError::ChainMismatch { expected });
            }
        }

        Ok(self.accept(candidate, folded, fold(last)))
    }

    fn accept(&mut self, name: &str, folded: String, last: char) -> Entry {
        let duel = self.config.player_count.is_duel();
        let points = self.config.points_per_entry;
        let entry = Entry {
            name: name.to_string(),
            points,
            contributed_by: duel.then_some(self.current_player),
        };

        self.entries.push(entry.clone());
        self.used.insert(folded);
        self.last_letter = Some(last);

        if duel {
            self.scores.award(self.current_player, points);
            self.current_player = self.current_player.other();
        }

        self.status = GameStatus::Playing;
        self.settle_budget();

        debug!(place = %entry.name, %last, "place accepted");
        self.persist();
        entry
    }

    /// Whether the configured move budget is used up.
    fn budget_spent(&self) -> bool {
        self.config
            .max_entries
            .is_some_and(|max| self.entries.len() >= max)
    }

    /// Mark the round finished once the move budget is used up. A restored
    /// round can already be over budget when the limit was lowered.
    fn settle_budget(&mut self) {
        if self.status != GameStatus::Finished && self.budget_spent() {
            self.status = GameStatus::Finished;
            info!(entries = self.entries.len(), "move budget reached, round over");
        }
    }

    /// Clear the round and delete the stored snapshot. Idempotent.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.used.clear();
        self.last_letter = None;
        self.current_player = PlayerId::One;
        self.scores = Scores::default();
        self.status = GameStatus::Waiting;
        self.store.delete(&self.config.storage_key);
        info!("atlas session reset");
    }

    /// End the round now. Calling it again returns the same outcome.
    pub fn finish(&mut self) -> Outcome {
        if self.status != GameStatus::Finished {
            self.status = GameStatus::Finished;
            self.persist();
            info!(entries = self.entries.len(), "round finished");
        }
        self.decide()
    }

    /// `Some` once the round is finished.
    pub fn outcome(&self) -> Option<Outcome> {
        (self.status == GameStatus::Finished).then(|| self.decide())
    }

    fn decide(&self) -> Outcome {
        if !self.config.player_count.is_duel() {
            return Outcome::Solo {
                entries: self.entries.len(),
            };
        }
        let one = self.scores.get(PlayerId::One);
        let two = self.scores.get(PlayerId::Two);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerId::One),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerId::Two),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    fn persist(&mut self) {
        match self.snapshot().to_json() {
            Ok(json) => self.store.put(&self.config.storage_key, json),
            Err(e) => warn!(error = %e, "failed to encode atlas snapshot"),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Whether `name` (compared case-insensitively, after trimming) was played.
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(&name.trim().to_lowercase())
    }

    /// Letter the next place must start with, if any.
    pub fn last_letter(&self) -> Option<char> {
        self.last_letter
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
