// src/drag/controller_tests.rs
// DragDropController のユニットテスト！

use super::*;
use crate::components::{AcceptedType, DraggableItem, DropZone, ItemId, Position, Rect, Size, ZoneId};
use crate::logic::hit_test::find_zone_at;

// --- テスト用の偽物の描画面 ---

/// 画面に対して何が起きたかを記録するだけの描画面。
/// ゾーンの当たり判定は矩形のリストで、時計は手で進める。
#[derive(Default)]
struct FakeSurface {
    now: f64,
    zone_rects: Vec<(ZoneId, Rect)>,
    next_clone: usize,
    live_clones: Vec<usize>,
    clone_positions: Vec<(usize, Position)>,
    dragging: Vec<ItemId>,
    highlighted: Vec<ZoneId>,
    attached: Vec<(ItemId, ZoneId)>,
    flashed: Vec<ZoneId>,
    shaken: Vec<ItemId>,
    zone_lookups: usize,
}

impl DragSurface for FakeSurface {
    type CloneHandle = usize;

    fn now_ms(&self) -> f64 {
        self.now
    }

    fn item_size(&self, _item: &DraggableItem) -> Size {
        Size::new(40.0, 20.0)
    }

    fn create_clone(&mut self, _item: &DraggableItem, top_left: Position) -> usize {
        let handle = self.next_clone;
        self.next_clone += 1;
        self.live_clones.push(handle);
        self.clone_positions.push((handle, top_left));
        handle
    }

    fn move_clone(&mut self, clone: &usize, top_left: Position) {
        self.clone_positions.push((*clone, top_left));
    }

    fn remove_clone(&mut self, clone: usize) {
        self.live_clones.retain(|live| *live != clone);
    }

    fn set_dragging(&mut self, item: &DraggableItem, dragging: bool) {
        if dragging {
            self.dragging.push(item.id);
        } else {
            self.dragging.retain(|id| *id != item.id);
        }
    }

    fn set_zone_highlight(&mut self, zone: &DropZone, highlighted: bool) {
        if highlighted {
            self.highlighted.push(zone.id);
        } else {
            self.highlighted.retain(|id| *id != zone.id);
        }
    }

    fn zone_at(&mut self, point: Position) -> Option<ZoneId> {
        self.zone_lookups += 1;
        find_zone_at(&self.zone_rects, point)
    }

    fn attach_item(&mut self, item: &DraggableItem, zone: &DropZone) {
        self.attached.push((item.id, zone.id));
    }

    fn flash_success(&mut self, zone: &DropZone) {
        self.flashed.push(zone.id);
    }

    fn shake(&mut self, item: &DraggableItem) {
        self.shaken.push(item.id);
    }
}

/// コールバックの呼ばれ方を記録するリスナー
#[derive(Default)]
struct RecordingListener {
    successes: Vec<(ItemId, ZoneId)>,
    failures: Vec<ItemId>,
    score: u32,
}

impl DropListener for RecordingListener {
    fn on_success(&mut self, item: &DraggableItem, zone: &DropZone) {
        self.successes.push((item.id, zone.id));
        self.score += 10;
    }

    fn on_failure(&mut self, item: &DraggableItem) {
        self.failures.push(item.id);
    }
}

// --- ボードのセットアップ ---

const LION: ItemId = ItemId(0);
const BEAR: ItemId = ItemId(1);
const SAVANNA: ZoneId = ZoneId(0);
const OCEAN: ZoneId = ZoneId(1);
const ANYWHERE: ZoneId = ZoneId(2);

// ゾーンの真ん中あたりの座標
const IN_SAVANNA: Position = Position { x: 50.0, y: 50.0 };
const IN_OCEAN: Position = Position { x: 250.0, y: 50.0 };
const IN_ANYWHERE: Position = Position { x: 450.0, y: 50.0 };
const NOWHERE: Position = Position { x: 900.0, y: 900.0 };

fn setup() -> DragDropController<FakeSurface> {
    let surface = FakeSurface {
        zone_rects: vec![
            (SAVANNA, Rect::new(0.0, 0.0, 100.0, 100.0)),
            (OCEAN, Rect::new(200.0, 0.0, 100.0, 100.0)),
            (ANYWHERE, Rect::new(400.0, 0.0, 100.0, 100.0)),
        ],
        ..FakeSurface::default()
    };
    let mut controller = DragDropController::new(surface, 100.0);
    controller.load_board(
        vec![
            DraggableItem::new(LION, "savanna", "Lion"),
            DraggableItem::new(BEAR, "forest", "Bear"),
        ],
        vec![
            DropZone::new(SAVANNA, "Savanna", AcceptedType::only("savanna")),
            DropZone::new(OCEAN, "Ocean", AcceptedType::only("ocean")),
            DropZone::new(ANYWHERE, "Anything", AcceptedType::Any),
        ],
    );
    controller
}

/// Idle に戻っていて、画面に何も残っていないことを確認するヘルパー
fn assert_idle(controller: &DragDropController<FakeSurface>) {
    assert!(!controller.is_dragging(), "ジェスチャーが残っている");
    assert!(controller.surface().live_clones.is_empty(), "クローンが残っている");
    assert!(controller.surface().dragging.is_empty(), "dragging の印が残っている");
    assert!(controller.surface().highlighted.is_empty(), "ハイライトが残っている");
    assert!(controller.zones().iter().all(|zone| !zone.highlighted));
}

// --- テスト関数たち ---

#[test]
fn scenario_a_matching_drop_succeeds() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    controller.begin_drag(LION, Position::new(10.0, 300.0)).expect("begin_drag");
    controller.update_drag(IN_SAVANNA);
    let outcome = controller.end_drag(IN_SAVANNA, &mut listener);

    assert_eq!(outcome, Some(DropOutcome::Placed { item: LION, zone: SAVANNA }));
    assert_eq!(listener.successes, vec![(LION, SAVANNA)]);
    assert_eq!(listener.score, 10);
    assert_eq!(controller.zone(SAVANNA).map(|zone| zone.dropped_items.clone()), Some(vec![LION]));
    assert_eq!(controller.surface().attached, vec![(LION, SAVANNA)]);
    assert_eq!(controller.surface().flashed, vec![SAVANNA]);
    assert_eq!(controller.placed_zone(LION), Some(SAVANNA));
    assert_idle(&controller);
    println!("シナリオ A: 正しいすみかにドロップ、成功！🎉");
}

#[test]
fn scenario_b_wrong_zone_fails_and_item_stays_in_pool() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    controller.begin_drag(BEAR, IN_SAVANNA).expect("begin_drag");
    let outcome = controller.end_drag(IN_OCEAN, &mut listener);

    assert_eq!(outcome, Some(DropOutcome::Missed { item: BEAR, zone: Some(OCEAN) }));
    assert_eq!(listener.failures, vec![BEAR]);
    assert_eq!(listener.score, 0, "失敗ではスコアは増えない");
    assert!(controller.zones().iter().all(|zone| zone.dropped_items.is_empty()));
    assert!(controller.pool().any(|item| item.id == BEAR), "クマはプールに残るはず");
    assert_eq!(controller.surface().shaken, vec![BEAR]);
    assert_idle(&controller);
}

#[test]
fn scenario_c_wildcard_zone_accepts_anything() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    for item in [LION, BEAR] {
        controller.begin_drag(item, IN_SAVANNA).expect("begin_drag");
        let outcome = controller.end_drag(IN_ANYWHERE, &mut listener);
        assert_eq!(outcome, Some(DropOutcome::Placed { item, zone: ANYWHERE }));
    }

    assert_eq!(controller.zone(ANYWHERE).map(|zone| zone.dropped_items.len()), Some(2));
    assert_eq!(controller.pool().count(), 0);
    assert_idle(&controller);
}

#[test]
fn scenario_d_release_over_empty_space_fails_cleanly() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    controller.begin_drag(LION, NOWHERE).expect("begin_drag");
    let outcome = controller.end_drag(NOWHERE, &mut listener);

    assert_eq!(outcome, Some(DropOutcome::Missed { item: LION, zone: None }));
    assert_eq!(listener.failures, vec![LION]);
    assert_idle(&controller);
}

#[test]
fn end_drag_without_gesture_is_a_no_op() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    assert_eq!(controller.end_drag(IN_SAVANNA, &mut listener), None);
    assert_eq!(controller.end_drag(NOWHERE, &mut listener), None);

    assert!(listener.successes.is_empty() && listener.failures.is_empty());
    assert_eq!(controller.surface().zone_lookups, 0);
    assert_idle(&controller);
}

#[test]
fn update_drag_without_gesture_is_a_no_op() {
    let mut controller = setup();
    controller.update_drag(IN_SAVANNA);
    assert!(controller.surface().clone_positions.is_empty());
    assert_eq!(controller.surface().zone_lookups, 0);
    assert_idle(&controller);
}

#[test]
fn second_begin_drag_is_rejected() {
    let mut controller = setup();

    controller.begin_drag(LION, IN_SAVANNA).expect("first begin_drag");
    let second = controller.begin_drag(BEAR, IN_OCEAN);

    assert_eq!(second, Err(DragError::GestureActive(LION)));
    assert_eq!(controller.dragged_item(), Some(LION), "最初のジェスチャーが生き残るはず");
    assert_eq!(controller.surface().live_clones.len(), 1, "クローンは 1 個だけ");
}

#[test]
fn unknown_or_placed_items_cannot_be_dragged() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    assert_eq!(controller.begin_drag(ItemId(99), IN_SAVANNA), Err(DragError::UnknownItem(ItemId(99))));

    controller.begin_drag(LION, IN_SAVANNA).expect("begin_drag");
    controller.end_drag(IN_SAVANNA, &mut listener);
    assert_eq!(controller.begin_drag(LION, IN_SAVANNA), Err(DragError::AlreadyPlaced(LION, SAVANNA)));
    assert_idle(&controller);
}

#[test]
fn clone_is_centered_on_pointer() {
    let mut controller = setup();
    controller.begin_drag(LION, Position::new(100.0, 100.0)).expect("begin_drag");
    controller.update_drag(Position::new(120.0, 110.0));

    // アイテムの大きさは 40x20 なので、半分の (20, 10) だけずれる
    assert_eq!(
        controller.surface().clone_positions,
        vec![(0, Position::new(80.0, 90.0)), (0, Position::new(100.0, 100.0))]
    );
}

#[test]
fn only_valid_zone_under_pointer_is_highlighted() {
    let mut controller = setup();
    controller.begin_drag(LION, NOWHERE).expect("begin_drag");

    controller.surface_mut().now = 0.0;
    controller.update_drag(IN_SAVANNA);
    assert_eq!(controller.highlighted_zone(), Some(SAVANNA));
    assert_eq!(controller.surface().highlighted, vec![SAVANNA]);

    // 置けないゾーンの上ではハイライトなし
    controller.surface_mut().now = 200.0;
    controller.update_drag(IN_OCEAN);
    assert_eq!(controller.highlighted_zone(), None);
    assert!(controller.surface().highlighted.is_empty());

    // ワイルドカードのゾーンは光る
    controller.surface_mut().now = 400.0;
    controller.update_drag(IN_ANYWHERE);
    assert_eq!(controller.surface().highlighted, vec![ANYWHERE]);
    assert_eq!(controller.zones().iter().filter(|zone| zone.highlighted).count(), 1);
}

#[test]
fn zone_lookup_is_throttled_but_clone_always_moves() {
    let mut controller = setup();
    controller.begin_drag(LION, NOWHERE).expect("begin_drag");

    controller.surface_mut().now = 1000.0;
    controller.update_drag(IN_OCEAN);
    controller.surface_mut().now = 1050.0;
    controller.update_drag(IN_SAVANNA);

    // 2 回目は間引かれるので、まだサバンナは光らない
    assert_eq!(controller.surface().zone_lookups, 1);
    assert_eq!(controller.highlighted_zone(), None);
    assert_eq!(controller.surface().clone_positions.len(), 3);

    controller.surface_mut().now = 1200.0;
    controller.update_drag(IN_SAVANNA);
    assert_eq!(controller.surface().zone_lookups, 2);
    assert_eq!(controller.highlighted_zone(), Some(SAVANNA));
}

#[test]
fn end_drag_clears_highlight_even_on_failure() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    controller.begin_drag(LION, NOWHERE).expect("begin_drag");
    controller.update_drag(IN_SAVANNA);
    assert_eq!(controller.highlighted_zone(), Some(SAVANNA));

    controller.end_drag(NOWHERE, &mut listener);
    assert_eq!(listener.failures, vec![LION]);
    assert_idle(&controller);
}

#[test]
fn cancel_drag_cleans_up_without_callbacks() {
    let mut controller = setup();
    let mut listener = RecordingListener::default();

    controller.begin_drag(LION, NOWHERE).expect("begin_drag");
    controller.update_drag(IN_SAVANNA);
    controller.cancel_drag();

    assert_idle(&controller);
    assert_eq!(controller.end_drag(IN_SAVANNA, &mut listener), None);
    assert!(listener.successes.is_empty() && listener.failures.is_empty());
}

#[test]
fn load_board_cancels_active_gesture() {
    let mut controller = setup();
    controller.begin_drag(LION, NOWHERE).expect("begin_drag");

    controller.load_board(
        vec![DraggableItem::new(ItemId(7), "ocean", "Dolphin")],
        vec![DropZone::new(OCEAN, "Ocean", AcceptedType::only("ocean"))],
    );

    assert_idle(&controller);
    assert!(controller.item(LION).is_none());
    assert_eq!(controller.pool().count(), 1);
}

#[test]
fn random_sequences_keep_single_gesture_invariant() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut controller = setup();
    let mut listener = RecordingListener::default();
    let mut rng = StdRng::seed_from_u64(7);
    let points = [IN_SAVANNA, IN_OCEAN, IN_ANYWHERE, NOWHERE];

    for step in 0..500 {
        let point = points[rng.gen_range(0..points.len())];
        controller.surface_mut().now = step as f64 * 30.0;
        match rng.gen_range(0..3) {
            0 => {
                let item = if rng.gen_bool(0.5) { LION } else { BEAR };
                let _ = controller.begin_drag(item, point);
            }
            1 => controller.update_drag(point),
            _ => {
                controller.end_drag(point, &mut listener);
                assert_idle(&controller);
            }
        }
        assert!(controller.surface().live_clones.len() <= 1, "クローンは最大 1 個");
        assert!(controller.zones().iter().filter(|zone| zone.highlighted).count() <= 1);
    }
    println!("ランダム操作 500 回でも不変条件キープ！✅");
}
