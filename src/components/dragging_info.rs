// src/components/dragging_info.rs

use super::drop_zone::ZoneId;
use super::item::ItemId;
use super::position::{Position, Size};

/// いまドラッグ中のジェスチャーの情報だよ！🖱️➡️🐘
///
/// pointer-down で作られて、pointer-move で更新されて、pointer-up で (結果に関係なく) 捨てられる。
/// コントローラーが同時に持てるのは 1 個だけ！
///
/// `C` は画面に浮かせているクローンのハンドル。DOM なら `HtmlElement`、テストならただの番号。
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture<C> {
    /// つまんでいるアイテム
    pub item: ItemId,
    /// ポインターの今の座標
    pub pointer: Position,
    /// 浮かせているクローン
    pub clone: C,
    /// クローンの大きさ (ポインターを真ん中に合わせるのに使う)
    pub clone_size: Size,
    /// 今ハイライトしているゾーン (あっても 1 個だけ)
    pub highlighted_zone: Option<ZoneId>,
}
