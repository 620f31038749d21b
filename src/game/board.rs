//! Board rendering: the HTML fragment HTMX swaps into `#atlas-board`.
//!
//! Layout, top to bottom: score cards (two-player only, current player
//! highlighted), input row with Submit / Reset / End Game, error banner,
//! outcome panel once finished, and the numbered list of places used.

use crate::game::entry::{Entry, GameStatus, Outcome, PlayerId};
use crate::game::state::AtlasState;
use crate::routes::util::escape_html;

/// Render the whole board from the current state.
pub fn render_board(state: &AtlasState) -> String {
    let session = &state.session;
    let duel = session.config().player_count.is_duel();
    let mut html = String::with_capacity(4096);

    html.push_str(r#"<div class="w-full max-w-3xl mx-auto p-4 space-y-6">"#);
    html.push_str(r#"<h2 class="text-2xl font-bold text-center">Atlas Game</h2>"#);

    if duel {
        html.push_str(r#"<div class="grid grid-cols-2 gap-4">"#);
        let scores = session.scores();
        for player in PlayerId::ALL {
            let highlight = session.status() != GameStatus::Finished
                && session.current_player() == player;
            html.push_str(&render_score_card(player, scores.get(player), highlight));
        }
        html.push_str(r#"</div>"#);
    }

    html.push_str(&render_input_row(state));

    if let Some(ref message) = state.banner {
        html.push_str(&format!(
            r#"<div role="alert" class="p-3 rounded border border-red-400 bg-red-100 text-red-800 text-sm">{}</div>"#,
            escape_html(message)
        ));
    }

    if let Some(outcome) = session.outcome() {
        html.push_str(&render_outcome(outcome));
    }

    html.push_str(&render_places(session.entries()));
    html.push_str(r#"</div>"#);
    html
}

fn render_score_card(player: PlayerId, score: u32, is_current_turn: bool) -> String {
    let bg = if is_current_turn { "bg-blue-100" } else { "bg-gray-100" };
    format!(
        r#"<div class="p-4 rounded-lg {}" data-player="{}"><h3 class="font-semibold">{}</h3><div class="flex items-center gap-2"><span aria-hidden="true">&#x1F3C6;</span><span class="text-xl">{}</span></div></div>"#,
        bg,
        player.number(),
        player.label(),
        score
    )
}

/// Placeholder text for the input, naming the player and required letter.
pub fn input_prompt(state: &AtlasState) -> String {
    let session = &state.session;
    let ask = match session.last_letter() {
        Some(letter) => format!("Enter a place starting with '{}'", letter),
        None => "Enter a place name".to_string(),
    };
    if session.config().player_count.is_duel() {
        format!("{}: {}", session.current_player().label(), ask)
    } else {
        ask
    }
}

fn render_input_row(state: &AtlasState) -> String {
    let finished = state.session.status() == GameStatus::Finished;
    let disabled = if finished { " disabled" } else { "" };
    let submit = "htmx.ajax('POST', '/api/atlas/submit', {values: {place: document.getElementById('atlasInput').value}, target: '#atlas-board', swap: 'innerHTML'})";

    let mut html = String::with_capacity(1024);
    html.push_str(r#"<div class="flex space-x-2">"#);
    html.push_str(&format!(
        r#"<input type="text" id="atlasInput" name="place" autocomplete="off" placeholder="{}" class="flex-1 border rounded px-2 py-1" onkeydown="if (event.key === 'Enter') {{ {} }}"{}>"#,
        escape_html(&input_prompt(state)),
        submit,
        disabled
    ));
    html.push_str(&format!(
        r#"<button class="bg-slate-900 text-white rounded px-4 py-1" onclick="{}"{}>Submit</button>"#,
        submit, disabled
    ));
    html.push_str(
        r#"<button class="border rounded px-4 py-1" onclick="htmx.ajax('POST', '/api/atlas/reset', {target: '#atlas-board', swap: 'innerHTML'})">Reset</button>"#,
    );
    if !finished {
        html.push_str(
            r#"<button class="border rounded px-4 py-1" onclick="htmx.ajax('POST', '/api/atlas/finish', {target: '#atlas-board', swap: 'innerHTML'})">End Game</button>"#,
        );
    }
    html.push_str(r#"</div>"#);
    html
}

fn render_outcome(outcome: Outcome) -> String {
    let text = match outcome {
        Outcome::Winner(player) => format!("{} wins!", player.label()),
        Outcome::Draw => "It's a draw!".to_string(),
        Outcome::Solo { entries } => format!("Round over: {} places named.", entries),
    };
    format!(
        r#"<div class="p-3 rounded bg-emerald-100 text-emerald-800 font-bold text-center">{}</div>"#,
        escape_html(&text)
    )
}

fn render_places(entries: &[Entry]) -> String {
    let mut html = String::with_capacity(256 + entries.len() * 128);
    html.push_str(r#"<div class="mt-4">"#);
    html.push_str(&format!(
        r#"<h3 class="text-lg font-semibold mb-2">Places Used ({})</h3>"#,
        entries.len()
    ));
    html.push_str(r#"<ol class="grid grid-cols-2 md:grid-cols-3 gap-2">"#);
    for (i, entry) in entries.iter().enumerate() {
        html.push_str(&format!(
            r#"<li class="p-2 bg-gray-100 rounded flex justify-between"><span>{}. {}</span><span class="text-sm text-gray-500">+{}</span></li>"#,
            i + 1,
            escape_html(&capitalize(&entry.name)),
            entry.points
        ));
    }
    html.push_str(r#"</ol></div>"#);
    html
}

/// Upper-case the first character, leave the rest as typed.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
