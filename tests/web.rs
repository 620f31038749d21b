//! Browser smoke tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use atlas_server::handle_request;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn board_renders_in_browser() {
    let html = handle_request("GET", "/api/atlas/board", "", "");
    assert!(html.contains("Atlas Game"));
}

#[wasm_bindgen_test]
fn submit_queues_local_storage_write() {
    handle_request("POST", "/api/atlas/reset", "", "");
    let html = handle_request("POST", "/api/atlas/submit", "", "place=Z%C3%BCrich");
    assert!(html.contains("1. Zürich"));
    assert!(html.contains("localStorage.setItem"));
}
