// src/app/renderer.rs
//! ボードを HTML にして画面に並べる係。
//!
//! HTML 文字列を作る部分 (`board_html` など) はブラウザなしでテストできるように、
//! DOM に書き込む部分とは分けてあるよ。

use itertools::Itertools;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::components::{DraggableItem, DropZone};
use crate::games::{Completion, GameBoard, GameKind};

/// `<` や `"` をエスケープ (ラベルはゲームのデータだけど、念のため)
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn item_html(item: &DraggableItem) -> String {
    let emoji = item
        .emoji
        .as_deref()
        .map(|emoji| format!(r#"<span class="animal-emoji">{}</span>"#, escape_html(emoji)))
        .unwrap_or_default();
    format!(
        r#"<div class="animal-card draggable" data-item-id="{}" data-type="{}">{}<span class="animal-name">{}</span></div>"#,
        item.id.0,
        escape_html(&item.item_type),
        emoji,
        escape_html(&item.label),
    )
}

pub fn zone_html(zone: &DropZone) -> String {
    format!(
        r#"<div class="drop-zone" data-zone-id="{}" data-accepts="{}"><h3>{}</h3><div class="dropped-items"></div></div>"#,
        zone.id.0,
        escape_html(zone.accepted.as_str()),
        escape_html(&zone.title),
    )
}

/// ボード 1 枚分の HTML
pub fn board_html(board: &GameBoard, kind: Option<GameKind>) -> String {
    let kind_class = kind.map_or("free", GameKind::as_str);
    let prompt = board
        .prompt
        .as_deref()
        .map(|prompt| format!(r#"<div class="game-prompt speech-bubble">{}</div>"#, escape_html(prompt)))
        .unwrap_or_default();
    // クイズだけは「もう一回聞く」ボタンを付ける
    let play_button = if kind == Some(GameKind::Sounds) {
        r#"<button class="big-play-button" data-action="play-sound"><span class="play-icon">▶️</span><span>Play Sound</span></button>"#
    } else {
        ""
    };
    let hint_button = if kind == Some(GameKind::Puzzle) {
        r#"<button class="hint-button" data-action="hint">💡 Hint</button>"#
    } else {
        ""
    };

    format!(
        concat!(
            r#"<div class="game-container {kind}-game-container" data-game="{kind}">"#,
            r#"<h2 class="game-title">{title}</h2>{prompt}{play}"#,
            r#"<div class="drop-zones">{zones}</div>"#,
            r#"<div class="animals-pool">{items}</div>"#,
            r#"{hint}<div class="game-feedback"></div><div class="game-progress"></div>"#,
            r#"</div>"#,
        ),
        kind = kind_class,
        title = escape_html(&board.title),
        prompt = prompt,
        play = play_button,
        zones = board.zones.iter().map(zone_html).join(""),
        items = board.items.iter().map(item_html).join(""),
        hint = hint_button,
    )
}

/// クリア画面の HTML
pub fn completion_html(completion: &Completion, kind: Option<GameKind>) -> String {
    let again = kind
        .map(|kind| {
            format!(
                r#"<button class="play-again-btn" data-action="play-again" data-game="{}">🎮 Play Again</button>"#,
                kind.as_str()
            )
        })
        .unwrap_or_default();
    format!(
        r#"<div class="game-completion"><h1>{}</h1><p>{}</p><div class="star-rating">{}</div>{}</div>"#,
        escape_html(&completion.headline),
        escape_html(&completion.detail),
        "⭐".repeat(completion.stars as usize),
        again,
    )
}

// --- DOM に書き込む ---

pub fn render_board(root: &Element, board: &GameBoard, kind: Option<GameKind>) {
    root.set_inner_html(&board_html(board, kind));
}

pub fn render_completion(root: &Element, completion: &Completion, kind: Option<GameKind>) -> Result<(), JsValue> {
    let container = root.query_selector(".game-container")?.unwrap_or_else(|| root.clone());
    container.insert_adjacent_html("beforeend", &completion_html(completion, kind))
}

/// 「せいかい！」みたいな一言を出す。`mood` は correct / incorrect
pub fn render_feedback(root: &Element, text: &str, mood: &str) {
    if let Ok(Some(element)) = root.query_selector(".game-feedback") {
        element.set_text_content(Some(text));
        element.set_class_name(&format!("game-feedback {}", mood));
    }
}

pub fn render_progress(root: &Element, label: &str) {
    if let Ok(Some(element)) = root.query_selector(".game-progress") {
        element.set_text_content(Some(label));
    }
}
