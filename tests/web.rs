//! ブラウザの中で動かすスモークテスト (`wasm-pack test --headless --firefox`)

#![cfg(target_arch = "wasm32")]

use animal_sounds_game::GameApp;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

/// テストごとにまっさらな `#game-area` を用意する
fn fresh_game_area() -> Document {
    let document = web_sys::window().and_then(|window| window.document()).expect("document");
    if let Some(old) = document.get_element_by_id("game-area") {
        old.remove();
    }
    let area = document.create_element("div").expect("create div");
    area.set_id("game-area");
    document.body().expect("body").append_child(&area).expect("append game area");
    document
}

fn query(document: &Document, selector: &str) -> Element {
    document
        .query_selector(selector)
        .expect("valid selector")
        .unwrap_or_else(|| panic!("no element for {}", selector))
}

fn count(document: &Document, selector: &str) -> u32 {
    document.query_selector_all(selector).expect("valid selector").length()
}

fn center(element: &Element) -> (i32, i32) {
    let rect = element.get_bounding_client_rect();
    ((rect.left() + rect.width() / 2.0) as i32, (rect.top() + rect.height() / 2.0) as i32)
}

/// 本物のマウスイベントを投げる (document のリスナーまで bubble する)
fn mouse(kind: &str, target: &EventTarget, (x, y): (i32, i32)) {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(x);
    init.set_client_y(y);
    let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).expect("mouse event");
    target.dispatch_event(&event).expect("dispatch");
}

fn start_habitat(document: &Document) -> (GameApp, Element, Element) {
    let app = GameApp::new(None).expect("GameApp::new");
    app.start_game("habitat").expect("start habitat");
    let card = query(document, r#"#game-area .draggable[data-type="savanna"]"#);
    let zone = query(document, r#"#game-area .drop-zone[data-accepts="savanna"]"#);
    (app, card, zone)
}

#[wasm_bindgen_test]
fn dragging_a_card_home_moves_it_into_the_zone() {
    let document = fresh_game_area();
    let (app, card, zone) = start_habitat(&document);

    mouse("mousedown", &card, center(&card));
    assert_eq!(count(&document, ".drag-clone"), 1);
    assert!(card.class_list().contains("dragging"));

    mouse("mousemove", &document, center(&zone));
    assert!(zone.class_list().contains("drag-over"));

    mouse("mouseup", &document, center(&zone));
    assert_eq!(count(&document, ".drag-clone"), 0, "クローンが残っちゃダメ");
    assert_eq!(count(&document, "#game-area .dragging"), 0);
    assert_eq!(count(&document, "#game-area .drag-over"), 0);
    let dropped = query(&document, r#"#game-area .drop-zone[data-accepts="savanna"] .dropped-items"#);
    assert!(dropped.contains(Some(card.as_ref())));
    assert!(card.class_list().contains("dropped-item"));
    assert_eq!(app.score(), 10);
    app.dispose().expect("dispose");
}

#[wasm_bindgen_test]
fn dropping_on_empty_space_shakes_the_card() {
    let document = fresh_game_area();
    let (app, card, _zone) = start_habitat(&document);

    mouse("mousedown", &card, center(&card));
    mouse("mouseup", &document, (-50, -50));

    assert_eq!(count(&document, ".drag-clone"), 0);
    assert!(!card.class_list().contains("dragging"));
    assert!(card.class_list().contains("shake-animation"));
    assert!(query(&document, "#game-area .animals-pool").contains(Some(card.as_ref())));
    assert_eq!(app.score(), 0);
    app.dispose().expect("dispose");
}

#[wasm_bindgen_test]
fn zones_are_found_where_they_are_now() {
    let document = fresh_game_area();
    let (app, card, zone) = start_habitat(&document);

    mouse("mousedown", &card, center(&card));
    // ドラッグの途中でゾーンが動いた (スクロールと同じこと)
    let zones = query(&document, "#game-area .drop-zones").dyn_into::<HtmlElement>().expect("html element");
    zones.style().set_property("margin-top", "600px").expect("set margin");
    mouse("mouseup", &document, center(&zone));

    assert_eq!(app.score(), 10);
    assert!(zone.contains(Some(card.as_ref())));
    app.dispose().expect("dispose");
}

#[wasm_bindgen_test]
fn habitat_board_is_rendered() {
    let document = fresh_game_area();
    let app = GameApp::new(None).expect("GameApp::new");
    app.start_game("habitat").expect("start habitat");

    let cards = document.query_selector_all("#game-area .draggable").expect("query cards");
    let zones = document.query_selector_all("#game-area .drop-zone").expect("query zones");
    assert_eq!(cards.length(), 23);
    assert_eq!(zones.length(), 4);
    assert_eq!(app.score(), 0);
    app.dispose().expect("dispose");
}

#[wasm_bindgen_test]
fn state_json_reports_the_quiz() {
    fresh_game_area();
    let app = GameApp::new(Some(r#"{"quiz_rounds": 3}"#.to_string())).expect("GameApp::new");
    app.start_game("sounds").expect("start quiz");

    let json = app.get_state_json().expect("state").as_string().expect("json string");
    let state: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(state["game"], "sounds");
    assert_eq!(state["pool"].as_array().map(Vec::len), Some(4));
    assert_eq!(state["progress"], "Round: 1/3 | Score: 0");
    app.dispose().expect("dispose");
}

#[wasm_bindgen_test]
fn unknown_game_and_bad_config_are_errors() {
    fresh_game_area();
    assert!(GameApp::new(Some("{ nope".to_string())).is_err());

    let app = GameApp::new(None).expect("GameApp::new");
    assert!(app.start_game("chess").is_err());
    assert!(!app.toggle_sound());
    assert!(!app.is_sound_enabled());
    app.dispose().expect("dispose");
}
