// src/components/position.rs

// serde を使う宣言！状態スナップショットを JSON にする時に使うよ。
use serde::{Serialize, Deserialize};

/// 画面 (ビューポート) 上の位置を表す構造体だよ！ (x, y) 座標を持つ。📍
///
/// ポインター (マウス or タッチ) の座標も、ドラッグ中のクローンの左上座標も、
/// ぜんぶこの型で扱うよ。`clientX` / `clientY` と同じ座標系！
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `size` の半分だけ左上にずらした位置を返すよ。
    /// ポインターがクローンの真ん中に来るようにするためのヘルパー！
    pub fn centered_on(self, size: Size) -> Self {
        Self {
            x: self.x - size.width / 2.0,
            y: self.y - size.height / 2.0,
        }
    }
}

/// 描画されたアイテムの大きさ (幅と高さ)。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 矩形 (左上 + 大きさ)。ドロップゾーンの当たり判定に使うよ。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Position,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { origin: Position::new(x, y), size: Size::new(width, height) }
    }

    /// 点が矩形の中にあるかチェック！ 右端と下端は含まない (半開区間) よ。
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.origin.x
            && point.x < self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y < self.origin.y + self.size.height
    }
}
