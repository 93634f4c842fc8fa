// src/app/browser_event_manager.rs
//! Attaches the mouse / touch / click listeners to the document and detaches them again.
//!
//! リスナーは document に 1 回だけ付ける (イベント委譲)。ボードを描き直しても付け直さなくていいよ。

use std::sync::{Arc, Mutex};

use log::{debug, error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Element, Event, MouseEvent, TouchEvent};

use crate::components::{ItemId, Position};
use crate::error::GameError;
use crate::games::GameKind;
use super::game_flow::{self, AppContext};

/// 付けたリスナーのクロージャ (外す時と、捨てられないように持っておくため)
pub(crate) type ListenerList = Arc<Mutex<Vec<(&'static str, Closure<dyn FnMut(Event)>)>>>;

/// 今ドラッグに使っている指の identifier
type ActiveTouch = Arc<Mutex<Option<i32>>>;

// --- イベントから情報を取り出すヘルパー ---

fn mouse_point(event: &Event) -> Option<Position> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Position::new(mouse.client_x() as f32, mouse.client_y() as f32))
}

/// 指のリストから、ドラッグ中の指 (`identifier`) を選ぶ。
/// まだドラッグしていない時 (`None`) は最初の指。ドラッグ中の指がいなければ `None`。
pub(crate) fn pick_touch(
    touches: impl IntoIterator<Item = (i32, Position)>,
    identifier: Option<i32>,
) -> Option<(i32, Position)> {
    touches
        .into_iter()
        .find(|(id, _)| identifier.map_or(true, |active| *id == active))
}

/// changed_touches の中から、指定した指 (なければ最初の指) を探す
fn touch_point(event: &Event, identifier: Option<i32>) -> Option<(i32, Position)> {
    let touches = event.dyn_ref::<TouchEvent>()?.changed_touches();
    let points = (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|touch| (touch.identifier(), Position::new(touch.client_x() as f32, touch.client_y() as f32)));
    pick_touch(points, identifier)
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// 押された場所にある `.draggable` のアイテム id
fn draggable_item(event: &Event) -> Option<ItemId> {
    let draggable = target_element(event)?.closest(".draggable").ok().flatten()?;
    draggable.get_attribute("data-item-id")?.parse::<usize>().ok().map(ItemId)
}

// --- ドラッグの 3 段階 ---

fn begin(ctx: &AppContext, event: &Event, point: Position) -> bool {
    let Some(item) = draggable_item(event) else {
        return false;
    };
    let result = match ctx.lock() {
        Ok(mut session) => session.begin_drag(item, point),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            event.prevent_default();
            true
        }
        Err(GameError::RoundOver) => {
            debug!("Ignoring drag of {:?}: waiting for the next round", item);
            false
        }
        Err(e) => {
            warn!("Drag start rejected for {:?}: {}", item, e);
            false
        }
    }
}

fn update(ctx: &AppContext, event: &Event, point: Position) {
    if let Ok(mut session) = ctx.lock() {
        if session.controller().is_dragging() {
            event.prevent_default();
            session.update_drag(point);
        }
    }
}

fn end(ctx: &AppContext, point: Position) {
    let outcome = match ctx.lock() {
        Ok(mut session) => session.end_drag(point),
        Err(_) => return,
    };
    // ロックを外してから画面と音の処理
    if outcome.is_some() {
        game_flow::handle_session_events(ctx);
    }
}

fn cancel(ctx: &AppContext) {
    if let Ok(mut session) = ctx.lock() {
        session.cancel_drag();
    }
}

/// `data-action` の付いたボタンが押された
fn on_click(ctx: &AppContext, event: &Event) {
    let Some(button) = target_element(event).and_then(|target| target.closest("[data-action]").ok().flatten()) else {
        return;
    };
    let result = match button.get_attribute("data-action").as_deref() {
        Some("play-sound") => game_flow::play_featured_sound(ctx),
        Some("hint") => game_flow::show_hint(ctx),
        Some("play-again") => button
            .get_attribute("data-game")
            .unwrap_or_default()
            .parse::<GameKind>()
            .and_then(|kind| game_flow::start_game(ctx, kind)),
        Some(other) => {
            debug!("Unknown action: {}", other);
            Ok(())
        }
        None => Ok(()),
    };
    if let Err(e) = result {
        error!("Action failed: {}", e);
    }
}

fn add_listener<F>(
    document: &Document,
    listeners: &ListenerList,
    name: &'static str,
    passive: bool,
    handler: F,
) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        name,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    listeners
        .lock()
        .map_err(|e| JsValue::from_str(&format!("Failed to lock listener list: {}", e)))?
        .push((name, closure));
    Ok(())
}

/// マウス / タッチ / クリックのリスナーを全部付ける
pub(crate) fn attach_listeners(document: &Document, ctx: &AppContext, listeners: &ListenerList) -> Result<(), JsValue> {
    let active_touch: ActiveTouch = Arc::new(Mutex::new(None));

    // --- マウス ---
    {
        let ctx = ctx.clone();
        add_listener(document, listeners, "mousedown", false, move |event: Event| {
            if let Some(point) = mouse_point(&event) {
                begin(&ctx, &event, point);
            }
        })?;
    }
    {
        let ctx = ctx.clone();
        add_listener(document, listeners, "mousemove", true, move |event: Event| {
            if let Some(point) = mouse_point(&event) {
                update(&ctx, &event, point);
            }
        })?;
    }
    {
        let ctx = ctx.clone();
        add_listener(document, listeners, "mouseup", true, move |event: Event| {
            if let Some(point) = mouse_point(&event) {
                end(&ctx, point);
            }
        })?;
    }

    // --- タッチ (ドラッグを始めた指だけを追いかける) ---
    {
        let ctx = ctx.clone();
        let active_touch = Arc::clone(&active_touch);
        add_listener(document, listeners, "touchstart", false, move |event: Event| {
            let Some((identifier, point)) = touch_point(&event, None) else {
                return;
            };
            if begin(&ctx, &event, point) {
                if let Ok(mut active) = active_touch.lock() {
                    *active = Some(identifier);
                }
            }
        })?;
    }
    {
        let ctx = ctx.clone();
        let active_touch = Arc::clone(&active_touch);
        add_listener(document, listeners, "touchmove", false, move |event: Event| {
            let Some(identifier) = active_touch.lock().ok().and_then(|active| *active) else {
                return;
            };
            if let Some((_, point)) = touch_point(&event, Some(identifier)) {
                update(&ctx, &event, point);
            }
        })?;
    }
    {
        let ctx = ctx.clone();
        let active_touch = Arc::clone(&active_touch);
        add_listener(document, listeners, "touchend", true, move |event: Event| {
            let Ok(mut active) = active_touch.lock() else {
                return;
            };
            let Some(identifier) = *active else {
                return;
            };
            // 別の指が離れただけなら無視
            if let Some((_, point)) = touch_point(&event, Some(identifier)) {
                *active = None;
                drop(active);
                end(&ctx, point);
            }
        })?;
    }
    {
        let ctx = ctx.clone();
        let active_touch = Arc::clone(&active_touch);
        add_listener(document, listeners, "touchcancel", true, move |_event: Event| {
            if let Ok(mut active) = active_touch.lock() {
                *active = None;
            }
            cancel(&ctx);
        })?;
    }

    // --- ボタン ---
    {
        let ctx = ctx.clone();
        add_listener(document, listeners, "click", true, move |event: Event| on_click(&ctx, &event))?;
    }

    info!("Attached {} document listeners", listeners.lock().map(|list| list.len()).unwrap_or(0));
    Ok(())
}

/// 付けたリスナーを全部外す
pub(crate) fn detach_listeners(document: &Document, listeners: &ListenerList) -> Result<(), JsValue> {
    let mut list = listeners
        .lock()
        .map_err(|e| JsValue::from_str(&format!("Failed to lock listener list: {}", e)))?;
    for (name, closure) in list.drain(..) {
        document.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    }
    info!("Detached document listeners");
    Ok(())
}
