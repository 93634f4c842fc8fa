// src/components/drop_zone.rs

use std::fmt;
use serde::{Serialize, Deserialize};

use super::item::ItemId;

/// どんなタイプでも受け付けるワイルドカードの文字列。
pub const ANY_TYPE: &str = "any";

/// ドロップゾーンの ID。`data-zone-id` 属性に入る数字だよ。
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ZoneId(pub usize);

/// ゾーンが受け付けるアイテムのタイプ。
///
/// HTML の `data-accepts` と同じで、文字列 `"any"` はワイルドカード扱い！
/// serde でも文字列として出し入れするよ (`"any"` <-> `Any`)。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AcceptedType {
    /// 何でも OK 🙆
    Any,
    /// このタグのアイテムだけ OK
    Only(String),
}

impl AcceptedType {
    pub fn only(tag: impl Into<String>) -> Self {
        AcceptedType::from(tag.into())
    }

    /// `item_type` のアイテムを受け付けるか？
    pub fn accepts(&self, item_type: &str) -> bool {
        match self {
            AcceptedType::Any => true,
            AcceptedType::Only(tag) => tag == item_type,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AcceptedType::Any => ANY_TYPE,
            AcceptedType::Only(tag) => tag,
        }
    }
}

impl From<String> for AcceptedType {
    fn from(tag: String) -> Self {
        if tag == ANY_TYPE {
            AcceptedType::Any
        } else {
            AcceptedType::Only(tag)
        }
    }
}

impl From<AcceptedType> for String {
    fn from(accepted: AcceptedType) -> Self {
        match accepted {
            AcceptedType::Any => ANY_TYPE.to_string(),
            AcceptedType::Only(tag) => tag,
        }
    }
}

impl fmt::Display for AcceptedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// アイテムを置ける場所 (すみか、おなかペコペコの動物、パズルの枠…) 🏠
///
/// `highlighted` は描画専用のフラグ。ドラッグ中に「ここに置けるよ！」って光らせる時に true になる。
/// `dropped_items` には、このゾーンに置かれたアイテムが置かれた順に入っていくよ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    pub id: ZoneId,
    pub title: String,
    pub accepted: AcceptedType,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub dropped_items: Vec<ItemId>,
}

impl DropZone {
    pub fn new(id: ZoneId, title: impl Into<String>, accepted: AcceptedType) -> Self {
        Self {
            id,
            title: title.into(),
            accepted,
            highlighted: false,
            dropped_items: Vec::new(),
        }
    }
}
