// src/drag/controller.rs
//! Handles the drag gesture (start, update, end) and decides whether a drop succeeded.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use thiserror::Error;

use crate::components::{DragGesture, DraggableItem, DropZone, ItemId, Position, ZoneId};
use crate::logic::{is_valid_drop, Throttle};
use super::surface::DragSurface;

/// ドロップの結果を受け取る係 (成功 / 失敗のコールバック)。
/// ゲーム側 (`session::GameSession`) がこれを実装して、スコアや進行を動かすよ。
pub trait DropListener {
    fn on_success(&mut self, item: &DraggableItem, zone: &DropZone);
    fn on_failure(&mut self, item: &DraggableItem);
}

/// `end_drag` の結果。失敗はエラーじゃなくて、ふつうに起こる結果の一つ！
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// ゾーンに置けた 🎉
    Placed { item: ItemId, zone: ZoneId },
    /// 置けなかった。`zone` は違うゾーンに落とした時だけ `Some`、何もない所なら `None`。
    Missed { item: ItemId, zone: Option<ZoneId> },
}

/// コントローラーの約束事 (不変条件) を破りそうな呼び出しを断る時のエラー。
/// どれも「何もしないで戻る」だけなので、呼び出し側は warn ログを出して続行すればOK。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("a drag gesture is already active for item {0:?}")]
    GestureActive(ItemId),
    #[error("unknown item {0:?}")]
    UnknownItem(ItemId),
    #[error("item {0:?} is already placed in zone {1:?}")]
    AlreadyPlaced(ItemId, ZoneId),
}

/// ドラッグ＆ドロップの状態機械だよ！ Idle → Dragging → Idle をぐるぐる回る。
///
/// - `begin_drag` だけが Idle → Dragging
/// - `end_drag` (と後片付け用の `cancel_drag`) だけが Dragging → Idle
/// - `update_drag` は Dragging のまま。Idle の時は何もしない
///
/// 今のボード (アイテムとゾーン) もここで持ってるよ。
pub struct DragDropController<S: DragSurface> {
    surface: S,
    items: BTreeMap<ItemId, DraggableItem>,
    zones: Vec<DropZone>,
    /// どのアイテムがどのゾーンに置かれたか
    placed: BTreeMap<ItemId, ZoneId>,
    gesture: Option<DragGesture<S::CloneHandle>>,
    highlight_throttle: Throttle,
}

impl<S: DragSurface> DragDropController<S> {
    pub fn new(surface: S, highlight_throttle_ms: f64) -> Self {
        Self {
            surface,
            items: BTreeMap::new(),
            zones: Vec::new(),
            placed: BTreeMap::new(),
            gesture: None,
            highlight_throttle: Throttle::new(highlight_throttle_ms),
        }
    }

    // --- ボード ---

    /// アイテムとゾーンを丸ごと入れ替える。
    /// ドラッグ中だったらそのジェスチャーは先に片付ける (コールバックは呼ばない)。
    pub fn load_board(&mut self, items: Vec<DraggableItem>, zones: Vec<DropZone>) {
        self.cancel_drag();
        info!("DragDropController: loading board with {} items and {} zones", items.len(), zones.len());
        self.items = items.into_iter().map(|item| (item.id, item)).collect();
        self.placed = zones
            .iter()
            .flat_map(|zone| zone.dropped_items.iter().map(move |item| (*item, zone.id)))
            .collect();
        self.zones = zones;
    }

    pub fn item(&self, id: ItemId) -> Option<&DraggableItem> {
        self.items.get(&id)
    }

    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&DropZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// まだどこにも置かれていないアイテム (プールに残っているもの)
    pub fn pool(&self) -> impl Iterator<Item = &DraggableItem> + '_ {
        self.items.values().filter(move |item| !self.placed.contains_key(&item.id))
    }

    pub fn placed_zone(&self, id: ItemId) -> Option<ZoneId> {
        self.placed.get(&id).copied()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // --- ジェスチャー ---

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn dragged_item(&self) -> Option<ItemId> {
        self.gesture.as_ref().map(|gesture| gesture.item)
    }

    pub fn highlighted_zone(&self) -> Option<ZoneId> {
        self.gesture.as_ref().and_then(|gesture| gesture.highlighted_zone)
    }

    /// アイテムの `==` ルールそのもの。副作用なし！
    pub fn is_valid_drop(item: &DraggableItem, zone: &DropZone) -> bool {
        is_valid_drop(item, zone)
    }

    /// ドラッグ開始！
    ///
    /// もう別のジェスチャーが動いている時 (マルチタッチの 2 本目の指とか) は上書きしないで断るよ。
    /// 上書きするとクローンが画面に置き去りになっちゃうからね。
    pub fn begin_drag(&mut self, item_id: ItemId, pointer: Position) -> Result<(), DragError> {
        if let Some(active) = &self.gesture {
            return Err(DragError::GestureActive(active.item));
        }
        let item = self.items.get(&item_id).ok_or(DragError::UnknownItem(item_id))?;
        if let Some(zone) = self.placed.get(&item_id) {
            return Err(DragError::AlreadyPlaced(item_id, *zone));
        }

        let clone_size = self.surface.item_size(item);
        let clone = self.surface.create_clone(item, pointer.centered_on(clone_size));
        self.surface.set_dragging(item, true);
        self.highlight_throttle.reset();

        debug!("begin_drag: item {:?} ({}) at ({}, {})", item_id, item.label, pointer.x, pointer.y);
        self.gesture = Some(DragGesture {
            item: item_id,
            pointer,
            clone,
            clone_size,
            highlighted_zone: None,
        });
        Ok(())
    }

    /// ポインターが動いた時の処理。Idle なら何もしない。
    ///
    /// クローンは毎回追いかけさせるけど、ゾーンの探し直しは間引き付き。
    /// ハイライトするのは「ポインターの下にあって、しかも置けるゾーン」1 個だけ！
    pub fn update_drag(&mut self, pointer: Position) {
        let (clone_size, item_id) = match self.gesture.as_mut() {
            Some(gesture) => {
                gesture.pointer = pointer;
                (gesture.clone_size, gesture.item)
            }
            None => return,
        };

        if let Some(gesture) = self.gesture.as_ref() {
            self.surface.move_clone(&gesture.clone, pointer.centered_on(clone_size));
        }

        let now = self.surface.now_ms();
        if !self.highlight_throttle.ready(now) {
            return;
        }

        let eligible = self.surface.zone_at(pointer).filter(|zone_id| {
            match (self.items.get(&item_id), self.zone(*zone_id)) {
                (Some(item), Some(zone)) => is_valid_drop(item, zone),
                _ => false,
            }
        });
        self.set_highlight(eligible);
    }

    /// ドラッグ終了！ (ポインターが離された)
    ///
    /// 成功でも失敗でも、最後にはクローンを消して、ドラッグ中の印を外して、ジェスチャーを捨てる。
    /// ジェスチャーがない時は何もしないで `None`。
    pub fn end_drag(&mut self, pointer: Position, listener: &mut dyn DropListener) -> Option<DropOutcome> {
        // 最初に取り出しておけば、途中で何があっても Idle に戻れる
        let gesture = self.gesture.take()?;
        self.clear_highlights();
        self.highlight_throttle.reset();

        let item = match self.items.get(&gesture.item) {
            Some(item) => item.clone(),
            None => {
                warn!("end_drag: dragged item {:?} vanished from the board", gesture.item);
                self.surface.remove_clone(gesture.clone);
                return Some(DropOutcome::Missed { item: gesture.item, zone: None });
            }
        };

        let target = self.surface.zone_at(pointer);
        let valid_zone = target.and_then(|zone_id| self.zones.iter().position(|zone| zone.id == zone_id && is_valid_drop(&item, zone)));

        let outcome = match valid_zone {
            Some(index) => {
                let zone = &mut self.zones[index];
                zone.dropped_items.push(item.id);
                let zone = zone.clone();
                self.placed.insert(item.id, zone.id);

                info!("Drop succeeded: {} -> {}", item.label, zone.title);
                self.surface.attach_item(&item, &zone);
                self.surface.flash_success(&zone);
                listener.on_success(&item, &zone);
                DropOutcome::Placed { item: item.id, zone: zone.id }
            }
            None => {
                info!("Drop failed: {} (target {:?})", item.label, target);
                self.surface.shake(&item);
                listener.on_failure(&item);
                DropOutcome::Missed { item: item.id, zone: target }
            }
        };

        // 後片付け (どっちの結果でも必ずやる)
        self.surface.remove_clone(gesture.clone);
        self.surface.set_dragging(&item, false);
        Some(outcome)
    }

    /// 結果を出さずにジェスチャーを捨てる (画面を切り替える時など)。
    pub fn cancel_drag(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        debug!("cancel_drag: item {:?}", gesture.item);
        self.clear_highlights();
        self.highlight_throttle.reset();
        self.surface.remove_clone(gesture.clone);
        if let Some(item) = self.items.get(&gesture.item) {
            self.surface.set_dragging(item, false);
        }
    }

    // --- ハイライトのヘルパー ---

    fn set_highlight(&mut self, next: Option<ZoneId>) {
        let current = self.highlighted_zone();
        if current == next {
            return;
        }
        if let Some(previous) = current {
            self.toggle_zone_highlight(previous, false);
        }
        if let Some(zone_id) = next {
            self.toggle_zone_highlight(zone_id, true);
        }
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.highlighted_zone = next;
        }
    }

    fn toggle_zone_highlight(&mut self, zone_id: ZoneId, highlighted: bool) {
        if let Some(zone) = self.zones.iter_mut().find(|zone| zone.id == zone_id) {
            zone.highlighted = highlighted;
            self.surface.set_zone_highlight(zone, highlighted);
        }
    }

    /// 全部のゾーンからハイライトを外す
    fn clear_highlights(&mut self) {
        for zone in self.zones.iter_mut().filter(|zone| zone.highlighted) {
            zone.highlighted = false;
            self.surface.set_zone_highlight(zone, false);
        }
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.highlighted_zone = None;
        }
    }
}
