//! Worker-global Atlas state.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the WASM module alive, so the session persists
//! across `handle_request` calls until the page is closed; the page's
//! localStorage carries it across reloads.

use std::cell::RefCell;

use crate::game::config::GameConfig;
use crate::game::session::GameSession;
use crate::game::store::BridgeStore;

/// The session as held by the worker.
pub type WorkerSession = GameSession<BridgeStore>;

/// Everything the board needs: the session plus the current error banner.
#[derive(Debug, Clone)]
pub struct AtlasState {
    pub session: WorkerSession,
    /// Last rejection message. Cleared by the next accepted place or a reset.
    pub banner: Option<String>,
}

impl Default for AtlasState {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}

impl AtlasState {
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            session: GameSession::new(config, BridgeStore::new()),
            banner: None,
        }
    }
}

thread_local! {
    static STATE: RefCell<AtlasState> = RefCell::new(AtlasState::default());
}

/// Execute a closure with read access to the Atlas state.
pub fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&AtlasState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the Atlas state.
pub fn with_state_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AtlasState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the entire Atlas state.
pub fn replace_state(new_state: AtlasState) {
    STATE.with(|s| {
        *s.borrow_mut() = new_state;
    });
}

/// Back to a fresh two-player session with an empty store.
#[cfg(test)]
pub fn reset_state() {
    replace_state(AtlasState::default());
}

/// Export the session snapshot as JSON.
pub fn export_state_json() -> String {
    with_state(|state| {
        state
            .session
            .snapshot()
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entry::PlayerId;

    #[test]
    fn default_state_is_empty_duel() {
        reset_state();
        with_state(|s| {
            assert!(s.session.entries().is_empty());
            assert!(s.session.config().player_count.is_duel());
            assert!(s.banner.is_none());
        });
    }

    #[test]
    fn mutations_persist_between_calls() {
        reset_state();
        with_state_mut(|s| s.session.submit("Delhi").map(|_| ())).unwrap();
        with_state(|s| {
            assert_eq!(s.session.entries().len(), 1);
            assert_eq!(s.session.current_player(), PlayerId::Two);
        });
        reset_state();
    }

    #[test]
    fn export_contains_places() {
        reset_state();
        with_state_mut(|s| s.session.submit("Oslo").map(|_| ())).unwrap();
        let json = export_state_json();
        assert!(json.contains("Oslo"));
        assert!(json.contains("currentPlayer"));
        reset_state();
    }
}
