// src/components/item.rs

use serde::{Serialize, Deserialize};

/// ドラッグできるアイテムの ID だよ。usize をラップしただけのタプル構造体！
/// DOM 側では `data-item-id` 属性にこの数字が入るよ。
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ItemId(pub usize);

/// プレイヤーがつまんで動かせるアイテム (動物カード、エサ、パズルのピース…) 🐾
///
/// - `item_type`: どのドロップゾーンに置けるかを決めるタグ (`"savanna"` とか `"carnivore"` とか)
/// - `label`: 画面に出す名前。発音させる時にもこれを使う！
/// - `emoji`: 見た目用の絵文字 (なくてもOK)
///
/// ジェスチャーの間は変更されないよ。持ち主はアイテムを描画したゲーム画面。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggableItem {
    pub id: ItemId,
    pub item_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl DraggableItem {
    pub fn new(id: ItemId, item_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id, item_type: item_type.into(), label: label.into(), emoji: None }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}
