// src/logic/drop_rules.rs
//! アイテムをゾーンに置いていいかどうかのルール。副作用ゼロの純粋関数だけ置くよ！

use crate::components::{DraggableItem, DropZone};

/// `item` を `zone` に置いていいか？
///
/// ゾーンの受付タイプが `"any"` か、アイテムのタイプとぴったり同じなら OK！
/// 大文字小文字もちゃんと区別するよ (`"Ocean"` と `"ocean"` は別物)。
pub fn is_valid_drop(item: &DraggableItem, zone: &DropZone) -> bool {
    zone.accepted.accepts(&item.item_type)
}
