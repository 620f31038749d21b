//! `/api/atlas/*` routes: play, reset, finish, persistence and config.
//!
//! Every mutating handler returns the re-rendered board followed by a
//! `<script>` that applies the queued snapshot writes to localStorage.

use tracing::{debug, info, warn};

use crate::game::board::render_board;
use crate::game::config::GameConfig;
use crate::game::session::GameSession;
use crate::game::state::{export_state_json, with_state, with_state_mut, AtlasState};
use crate::game::store::SnapshotStore;
use crate::routes::util::{escape_html, get_param, parse_form_body, render_storage_script};

// ── GET /api/atlas/board ───────────────────────────────────────────

/// Handle GET /api/atlas/board
pub fn handle_board_get(_query: &str) -> String {
    with_state(render_board)
}

// ── POST /api/atlas/submit ─────────────────────────────────────────

/// Handle POST /api/atlas/submit
/// Body: place={name}
/// A rejected place sets the error banner; an accepted one clears it.
pub fn handle_submit_post(body: &str) -> String {
    let params = parse_form_body(body);
    let place = get_param(&params, "place").unwrap_or("");

    with_state_mut(|state| {
        match state.session.submit(place) {
            Ok(entry) => {
                debug!(place = %entry.name, "submit accepted");
                state.banner = None;
            }
            Err(e) => {
                debug!(error = %e, "submit rejected");
                state.banner = Some(e.to_string());
            }
        }
        respond(state)
    })
}

// ── POST /api/atlas/reset ──────────────────────────────────────────

/// Handle POST /api/atlas/reset
pub fn handle_reset_post(_body: &str) -> String {
    with_state_mut(|state| {
        state.session.reset();
        state.banner = None;
        respond(state)
    })
}

// ── POST /api/atlas/finish ─────────────────────────────────────────

/// Handle POST /api/atlas/finish
/// Ends the round and renders the outcome.
pub fn handle_finish_post(_body: &str) -> String {
    with_state_mut(|state| {
        state.session.finish();
        state.banner = None;
        respond(state)
    })
}

// ── GET /api/atlas/state ───────────────────────────────────────────

/// Handle GET /api/atlas/state
/// Returns the snapshot JSON, exactly as it would be persisted.
pub fn handle_state_get(_query: &str) -> String {
    export_state_json()
}

// ── POST /api/atlas/restore ────────────────────────────────────────

/// Handle POST /api/atlas/restore
/// Body: state={json} or the raw snapshot JSON.
/// Called on page load with whatever localStorage holds under the storage
/// key. A corrupt snapshot is discarded and the session starts fresh.
pub fn handle_restore_post(body: &str) -> String {
    let trimmed = body.trim();
    let raw = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        let params = parse_form_body(trimmed);
        match get_param(&params, "state") {
            Some(s) => s.to_string(),
            None => trimmed.to_string(),
        }
    };

    with_state_mut(|state| {
        let config = state.session.config().clone();
        let mut store = std::mem::take(state.session.store_mut());
        if raw.is_empty() {
            store.delete(&config.storage_key);
            store.drain();
        } else {
            store.seed(&config.storage_key, raw);
        }

        let session = GameSession::load(config, store);
        let verdict = match session.read_snapshot() {
            Ok(_) => "ok".to_string(),
            Err(e) => format!("error: {}", e),
        };
        state.session = session;
        state.banner = None;
        verdict
    })
}

// ── POST /api/atlas/config ─────────────────────────────────────────

/// Handle POST /api/atlas/config
/// Body: JSON config (`{"playerCount":1}`) or form fields
/// `players`, `points`, `max_entries`, `storage_key`.
/// The session is reloaded from the store under the new config.
pub fn handle_config_post(body: &str) -> String {
    let current = with_state(|state| state.session.config().clone());
    let trimmed = body.trim();
    let parsed = if trimmed.starts_with('{') {
        GameConfig::from_json(trimmed)
    } else {
        GameConfig::from_form(trimmed, &current)
    };

    let config = match parsed {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "rejected atlas config");
            return format!(
                r#"<span class="text-red-700">Invalid config: {}</span>"#,
                escape_html(&e.to_string())
            );
        }
    };

    info!(
        players = u8::from(config.player_count),
        key = %config.storage_key,
        "atlas config changed"
    );
    with_state_mut(|state| {
        let store = std::mem::take(state.session.store_mut());
        *state = AtlasState {
            session: GameSession::load(config, store),
            banner: None,
        };
        respond(state)
    })
}

/// Board plus the localStorage script for anything the session queued.
fn respond(state: &mut AtlasState) -> String {
    let ops = state.session.store_mut().drain();
    let mut html = render_board(state);
    html.push_str(&render_storage_script(&ops));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entry::{GameStatus, PlayerId};
    use crate::game::state::reset_state;

    #[test]
    fn submit_accepts_and_persists() {
        reset_state();
        let html = handle_submit_post("place=Delhi");
        assert!(html.contains("1. Delhi"));
        assert!(html.contains("localStorage.setItem(\"atlas_game_state\""));
        assert!(!html.contains("role=\"alert\""));
        reset_state();
    }

    #[test]
    fn submit_rejection_sets_banner_without_persisting() {
        reset_state();
        handle_submit_post("place=Delhi");
        let html = handle_submit_post("place=Paris");
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Place name must start with &#39;i&#39;"));
        assert!(!html.contains("localStorage"));
        with_state(|s| assert_eq!(s.session.current_player(), PlayerId::Two));
        reset_state();
    }

    #[test]
    fn banner_cleared_by_next_success() {
        reset_state();
        handle_submit_post("place=");
        with_state(|s| assert_eq!(s.banner.as_deref(), Some("Please enter a place name")));
        handle_submit_post("place=Oslo");
        with_state(|s| assert!(s.banner.is_none()));
        reset_state();
    }

    #[test]
    fn submit_decodes_form_encoding() {
        reset_state();
        handle_submit_post("place=New+Delhi");
        handle_submit_post("place=Ilam");
        with_state(|s| {
            assert_eq!(s.session.entries()[0].name, "New Delhi");
            assert!(s.session.is_used("ilam"));
        });
        reset_state();
    }

    #[test]
    fn reset_removes_snapshot() {
        reset_state();
        handle_submit_post("place=Delhi");
        let html = handle_reset_post("");
        assert!(html.contains("Places Used (0)"));
        assert!(html.contains("localStorage.removeItem(\"atlas_game_state\")"));
        reset_state();
    }

    #[test]
    fn finish_shows_outcome() {
        reset_state();
        handle_submit_post("place=Delhi");
        let html = handle_finish_post("");
        assert!(html.contains("Player 1 wins!"));
        with_state(|s| assert_eq!(s.session.status(), GameStatus::Finished));
        let html = handle_submit_post("place=Indore");
        assert!(html.contains("The game is over"));
        reset_state();
    }

    #[test]
    fn state_get_returns_snapshot_json() {
        reset_state();
        handle_submit_post("place=Delhi");
        let json = handle_state_get("");
        assert!(json.contains(r#""places":[{"name":"Delhi","points":1,"player":1}]"#));
        assert!(json.contains(r#""lastLetter":"i""#));
        reset_state();
    }

    #[test]
    fn restore_roundtrip_resumes_game() {
        reset_state();
        handle_submit_post("place=Delhi");
        handle_submit_post("place=Indore");
        let json = handle_state_get("");

        reset_state();
        assert_eq!(handle_restore_post(&json), "ok");
        with_state(|s| {
            assert_eq!(s.session.entries().len(), 2);
            assert_eq!(s.session.current_player(), PlayerId::One);
            assert_eq!(s.session.last_letter(), Some('e'));
            assert!(s.session.store().pending().is_empty());
        });
        let html = handle_submit_post("place=Delhi");
        assert!(html.contains("This place has already been used!"));
        reset_state();
    }

    #[test]
    fn restore_keeps_names_with_form_characters() {
        reset_state();
        handle_submit_post("place=Iowa%26state%3D1");
        handle_submit_post("place=1000+Islands");
        let json = handle_state_get("");

        reset_state();
        assert_eq!(handle_restore_post(&json), "ok");
        with_state(|s| {
            assert_eq!(s.session.entries().len(), 2);
            assert_eq!(s.session.entries()[0].name, "Iowa&state=1");
        });
        reset_state();
    }

    #[test]
    fn restore_accepts_form_encoded_state() {
        reset_state();
        assert_eq!(
            handle_restore_post("state=%7B%22places%22%3A%5B%7B%22name%22%3A%22Lima%22%2C%22points%22%3A1%7D%5D%7D"),
            "ok"
        );
        with_state(|s| assert!(s.session.is_used("lima")));
        reset_state();
    }

    #[test]
    fn restore_corrupt_snapshot_starts_fresh() {
        reset_state();
        handle_submit_post("place=Delhi");
        let verdict = handle_restore_post("{broken");
        assert!(verdict.starts_with("error: corrupt atlas snapshot"));
        with_state(|s| {
            assert!(s.session.entries().is_empty());
            assert_eq!(s.session.status(), GameStatus::Waiting);
        });
        reset_state();
    }

    #[test]
    fn restore_empty_body_starts_fresh() {
        reset_state();
        handle_submit_post("place=Delhi");
        assert_eq!(handle_restore_post(""), "ok");
        with_state(|s| assert!(s.session.entries().is_empty()));
        reset_state();
    }

    #[test]
    fn config_switches_to_solo() {
        reset_state();
        let html = handle_config_post("players=1");
        assert!(!html.contains("data-player"));
        handle_submit_post("place=Delhi");
        with_state(|s| {
            assert_eq!(s.session.entries()[0].contributed_by, None);
            assert_eq!(s.session.scores().get(PlayerId::One), 0);
        });
        reset_state();
    }

    #[test]
    fn config_json_keeps_saved_game() {
        reset_state();
        handle_submit_post("place=Delhi");
        handle_config_post(r#"{"playerCount":2,"maxEntries":2}"#);
        with_state(|s| {
            assert_eq!(s.session.entries().len(), 1);
            assert_eq!(s.session.config().max_entries, Some(2));
        });
        handle_submit_post("place=Indore");
        with_state(|s| assert_eq!(s.session.status(), GameStatus::Finished));
        reset_state();
    }

    #[test]
    fn config_budget_below_played_entries_ends_round() {
        reset_state();
        handle_submit_post("place=Delhi");
        handle_submit_post("place=Indore");
        handle_submit_post("place=Everest");
        handle_config_post(r#"{"maxEntries":2}"#);
        with_state(|s| assert_eq!(s.session.status(), GameStatus::Finished));

        let html = handle_submit_post("place=Tokyo");
        assert!(html.contains("The game is over"));
        with_state(|s| assert_eq!(s.session.entries().len(), 3));
        reset_state();
    }

    #[test]
    fn config_rejects_bad_input() {
        reset_state();
        let html = handle_config_post("players=5");
        assert!(html.contains("Invalid config"));
        with_state(|s| assert!(s.session.config().player_count.is_duel()));
        reset_state();
    }
}
