//! Atlas in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Uses `matchit` for URL routing.
//!
//! Atlas is a place-name chain game: each place must start with the last
//! letter of the previous one and none may repeat. One or two players;
//! with two, turns alternate and each accepted place scores a point.
//! The session is mirrored to localStorage so a reload resumes the game.

use wasm_bindgen::prelude::*;

pub mod game;
pub mod routes;

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method`: HTTP method (e.g., "GET", "POST")
/// * `path`: URL path (e.g., "/api/atlas/submit")
/// * `query`: Query string, may be empty
/// * `body`: Request body (e.g., POST form data). Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM, or JSON
/// for `/api/atlas/state`.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/atlas/board", "board").ok();
    router.insert("/api/atlas/submit", "submit").ok();
    router.insert("/api/atlas/reset", "reset").ok();
    router.insert("/api/atlas/finish", "finish").ok();
    router.insert("/api/atlas/state", "state").ok();
    router.insert("/api/atlas/restore", "restore").ok();
    router.insert("/api/atlas/config", "config").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("board", "GET") => routes::atlas::handle_board_get(query),
            ("state", "GET") => routes::atlas::handle_state_get(query),

            ("submit", "POST") => routes::atlas::handle_submit_post(body),
            ("reset", "POST") => routes::atlas::handle_reset_post(body),
            ("finish", "POST") => routes::atlas::handle_finish_post(body),
            ("restore", "POST") => routes::atlas::handle_restore_post(body),
            ("config", "POST") => routes::atlas::handle_config_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-700">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-700">405 — method not allowed</span>"#.to_string()
}
