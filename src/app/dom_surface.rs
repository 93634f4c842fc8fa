// src/app/dom_surface.rs
//! `DragSurface` の DOM 版。クラスの付け外しと、浮かせたクローンの移動をするよ。

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::components::{DraggableItem, DropZone, ItemId, Position, Rect, Size, ZoneId};
use crate::config::gameplay::DRAG_Z_INDEX;
use crate::drag::DragSurface;
use crate::logic::hit_test::find_zone_at;

// 画面のクラス名
pub const DRAGGABLE_CLASS: &str = "draggable";
pub const DRAG_CLONE_CLASS: &str = "drag-clone";
pub const DRAGGING_CLASS: &str = "dragging";
pub const DRAG_OVER_CLASS: &str = "drag-over";
pub const DROP_SUCCESS_CLASS: &str = "drop-success";
pub const DROPPED_ITEM_CLASS: &str = "dropped-item";
pub const SHAKE_CLASS: &str = "shake-animation";

/// 大きさが測れなかった時のアイテムの大きさ
const FALLBACK_ITEM_SIZE: Size = Size { width: 80.0, height: 80.0 };

pub fn item_selector(id: ItemId) -> String {
    format!("[data-item-id=\"{}\"]", id.0)
}

pub fn zone_selector(id: ZoneId) -> String {
    format!(".drop-zone[data-zone-id=\"{}\"]", id.0)
}

/// クラスを付けたり外したり。失敗してもログだけ (見た目だけの話なので)
pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let result = if on {
        element.class_list().add_1(class)
    } else {
        element.class_list().remove_1(class)
    };
    if let Err(e) = result {
        warn!("Failed to toggle class {} : {:?}", class, e);
    }
}

/// `class` を付けて、`duration_ms` 後に外す
pub(crate) fn flash_class(element: &Element, class: &str, duration_ms: u32) {
    set_class(element, class, true);
    let element = element.clone();
    let class = class.to_string();
    Timeout::new(duration_ms, move || set_class(&element, &class, false)).forget();
}

pub struct DomSurface {
    document: Document,
    success_flash_ms: u32,
    feedback_ms: u32,
    /// 最後に測ったゾーンの矩形
    zone_rects: Vec<(ZoneId, Rect)>,
}

impl DomSurface {
    pub fn new(document: Document, success_flash_ms: u32, feedback_ms: u32) -> Self {
        Self { document, success_flash_ms, feedback_ms, zone_rects: Vec::new() }
    }

    fn item_element(&self, id: ItemId) -> Option<Element> {
        self.document.query_selector(&item_selector(id)).ok().flatten()
    }

    fn zone_element(&self, id: ZoneId) -> Option<Element> {
        self.document.query_selector(&zone_selector(id)).ok().flatten()
    }

    /// 画面上の全部のゾーンの位置を測り直す
    fn measure_zones(&mut self) {
        self.zone_rects.clear();
        let Ok(nodes) = self.document.query_selector_all(".drop-zone[data-zone-id]") else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(element) = nodes.get(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(id) = element.get_attribute("data-zone-id").and_then(|id| id.parse::<usize>().ok()) else {
                continue;
            };
            let rect = element.get_bounding_client_rect();
            self.zone_rects.push((
                ZoneId(id),
                Rect::new(rect.left() as f32, rect.top() as f32, rect.width() as f32, rect.height() as f32),
            ));
        }
        debug!("DomSurface: measured {} drop zones", self.zone_rects.len());
    }

    fn place(element: &HtmlElement, top_left: Position) {
        let style = element.style();
        let _ = style.set_property("left", &format!("{}px", top_left.x));
        let _ = style.set_property("top", &format!("{}px", top_left.y));
    }

    fn build_clone(&self, item: &DraggableItem, top_left: Position) -> Option<HtmlElement> {
        let original = self.item_element(item.id)?;
        let clone = original.clone_node_with_deep(true).ok()?.dyn_into::<HtmlElement>().ok()?;
        // クローンが item のセレクタに引っかからないように印を消す
        let _ = clone.remove_attribute("data-item-id");
        set_class(&clone, DRAGGING_CLASS, false);
        set_class(&clone, DRAG_CLONE_CLASS, true);

        let rect = original.get_bounding_client_rect();
        let style = clone.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("z-index", &DRAG_Z_INDEX.to_string());
        let _ = style.set_property("width", &format!("{}px", rect.width()));
        let _ = style.set_property("height", &format!("{}px", rect.height()));
        Self::place(&clone, top_left);

        let body = self.document.body()?;
        body.append_child(&clone).ok()?;
        Some(clone)
    }
}

impl DragSurface for DomSurface {
    /// 作れなかった時は `None` のまま。ドラッグ自体は続けられる
    type CloneHandle = Option<HtmlElement>;

    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn item_size(&self, item: &DraggableItem) -> Size {
        match self.item_element(item.id) {
            Some(element) => {
                let rect = element.get_bounding_client_rect();
                Size::new(rect.width() as f32, rect.height() as f32)
            }
            None => FALLBACK_ITEM_SIZE,
        }
    }

    fn create_clone(&mut self, item: &DraggableItem, top_left: Position) -> Option<HtmlElement> {
        let clone = self.build_clone(item, top_left);
        if clone.is_none() {
            warn!("DomSurface: could not create a drag clone for {}", item.label);
        }
        clone
    }

    fn move_clone(&mut self, clone: &Option<HtmlElement>, top_left: Position) {
        if let Some(clone) = clone {
            Self::place(clone, top_left);
        }
    }

    fn remove_clone(&mut self, clone: Option<HtmlElement>) {
        if let Some(clone) = clone {
            clone.remove();
        }
    }

    fn set_dragging(&mut self, item: &DraggableItem, dragging: bool) {
        if let Some(element) = self.item_element(item.id) {
            set_class(&element, DRAGGING_CLASS, dragging);
        }
    }

    fn set_zone_highlight(&mut self, zone: &DropZone, highlighted: bool) {
        if let Some(element) = self.zone_element(zone.id) {
            set_class(&element, DRAG_OVER_CLASS, highlighted);
        }
    }

    /// 呼ばれるのは間引き後の move と drop の時だけなので、毎回測り直す
    /// (ドラッグ中にスクロールされても、今の位置で当たり判定できる)
    fn zone_at(&mut self, point: Position) -> Option<ZoneId> {
        self.measure_zones();
        find_zone_at(&self.zone_rects, point)
    }

    /// アイテムをプールからゾーンの中へ引っ越しさせる
    fn attach_item(&mut self, item: &DraggableItem, zone: &DropZone) {
        let (Some(element), Some(zone_element)) = (self.item_element(item.id), self.zone_element(zone.id)) else {
            warn!("DomSurface: cannot attach {} to {}", item.label, zone.title);
            return;
        };
        set_class(&element, DRAGGABLE_CLASS, false);
        set_class(&element, DROPPED_ITEM_CLASS, true);
        let target = zone_element
            .query_selector(".dropped-items")
            .ok()
            .flatten()
            .unwrap_or(zone_element);
        if let Err(e) = target.append_child(&element) {
            warn!("DomSurface: failed to move {} into {}: {:?}", item.label, zone.title, e);
        }
    }

    fn flash_success(&mut self, zone: &DropZone) {
        if let Some(element) = self.zone_element(zone.id) {
            flash_class(&element, DROP_SUCCESS_CLASS, self.success_flash_ms);
        }
    }

    fn shake(&mut self, item: &DraggableItem) {
        if let Some(element) = self.item_element(item.id) {
            flash_class(&element, SHAKE_CLASS, self.feedback_ms);
        }
    }
}
