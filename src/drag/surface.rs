// src/drag/surface.rs
//! ドラッグ＆ドロップの「見た目」を担当する描画面のトレイト。

use crate::components::{DraggableItem, DropZone, Position, Size, ZoneId};

/// コントローラーが画面に対してやりたいことを全部ここに並べておくよ。
///
/// コントローラーはこのトレイト越しにしか画面を触らないので、
/// ブラウザ (DOM) でもテスト用の偽物でも同じロジックが動く！
/// DOM 版の実装は `app::dom_surface::DomSurface`。
pub trait DragSurface {
    /// 浮かせたクローンを指すハンドル
    type CloneHandle;

    /// 今の時刻 (ミリ秒)。ハイライト再計算の間引きに使う。
    fn now_ms(&self) -> f64;

    /// アイテムが描画されている大きさ
    fn item_size(&self, item: &DraggableItem) -> Size;

    /// アイテムのクローンを `top_left` に作って浮かせる
    fn create_clone(&mut self, item: &DraggableItem, top_left: Position) -> Self::CloneHandle;

    fn move_clone(&mut self, clone: &Self::CloneHandle, top_left: Position);

    fn remove_clone(&mut self, clone: Self::CloneHandle);

    /// 元のアイテムに「ドラッグ中」の印を付けたり外したりする
    fn set_dragging(&mut self, item: &DraggableItem, dragging: bool);

    /// ゾーンの「ここに置けるよ」ハイライトを付けたり外したりする
    fn set_zone_highlight(&mut self, zone: &DropZone, highlighted: bool);

    /// `point` の下にあるゾーンを探す (なければ `None`)
    fn zone_at(&mut self, point: Position) -> Option<ZoneId>;

    /// 置けたアイテムをゾーンの中に表示する
    fn attach_item(&mut self, item: &DraggableItem, zone: &DropZone);

    /// 成功した時のゾーンの演出
    fn flash_success(&mut self, zone: &DropZone);

    /// 失敗した時のアイテムのブルブル演出
    fn shake(&mut self, item: &DraggableItem);
}
