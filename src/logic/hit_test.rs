// src/logic/hit_test.rs
//! 座標からドロップゾーンを探す当たり判定。

use crate::components::{Position, Rect, ZoneId};

/// `point` を含むゾーンを探すよ。
///
/// ゾーンが重なっている時は、リストの後ろにあるもの (= 後から描画された、手前にあるもの) が勝ち！
/// どこにも当たらなければ `None`。
pub fn find_zone_at(zone_rects: &[(ZoneId, Rect)], point: Position) -> Option<ZoneId> {
    zone_rects
        .iter()
        .rev()
        .find(|(_, rect)| rect.contains(point))
        .map(|(zone_id, _)| *zone_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> Vec<(ZoneId, Rect)> {
        vec![
            (ZoneId(0), Rect::new(0.0, 0.0, 100.0, 100.0)),
            (ZoneId(1), Rect::new(150.0, 0.0, 100.0, 100.0)),
            // ZoneId(0) の右下に重なっているゾーン
            (ZoneId(2), Rect::new(50.0, 50.0, 100.0, 100.0)),
        ]
    }

    #[test]
    fn finds_zone_under_point() {
        assert_eq!(find_zone_at(&rects(), Position::new(10.0, 10.0)), Some(ZoneId(0)));
        assert_eq!(find_zone_at(&rects(), Position::new(200.0, 50.0)), Some(ZoneId(1)));
    }

    #[test]
    fn topmost_zone_wins_when_overlapping() {
        assert_eq!(find_zone_at(&rects(), Position::new(75.0, 75.0)), Some(ZoneId(2)));
    }

    #[test]
    fn empty_space_has_no_zone() {
        assert_eq!(find_zone_at(&rects(), Position::new(400.0, 400.0)), None);
        assert_eq!(find_zone_at(&[], Position::new(0.0, 0.0)), None);
    }
}
