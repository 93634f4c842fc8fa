// src/logic/score.rs
//! スコア管理。足し算と、表示係への「更新したよ！」通知だけ。

use log::debug;

/// スコアを表示してくれる係のトレイト。
///
/// `bump` が true の時は「ポンッ」と跳ねるアニメーションを付けてね、って合図だよ。
/// DOM 版は `app::score_display::DomScoreDisplay`。
pub trait ScoreDisplay {
    fn show(&mut self, total: u32, bump: bool);
}

/// ゲーム中の合計スコアを持つ構造体。ページを再読み込みしたら 0 に戻る (保存しない)。
#[derive(Default)]
pub struct ScoreTracker {
    total: u32,
    displays: Vec<Box<dyn ScoreDisplay>>,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示係を登録する。登録した時点のスコアをすぐに表示してもらうよ。
    pub fn add_display(&mut self, mut display: Box<dyn ScoreDisplay>) {
        display.show(self.total, false);
        self.displays.push(display);
    }

    /// `points` 点を足す。u32 なのでマイナスにはならないし、あふれる時は上限で止まる。
    pub fn increment(&mut self, points: u32) {
        self.total = self.total.saturating_add(points);
        debug!("Score: +{} -> {}", points, self.total);
        self.notify(true);
    }

    pub fn current(&self) -> u32 {
        self.total
    }

    /// 0 に戻す (ゲームをやり直す時に使う)。
    pub fn reset(&mut self) {
        self.total = 0;
        self.notify(false);
    }

    fn notify(&mut self, bump: bool) {
        let total = self.total;
        for display in self.displays.iter_mut() {
            display.show(total, bump);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 呼ばれた内容を記録するだけのテスト用表示係
    struct RecordingDisplay(Rc<RefCell<Vec<(u32, bool)>>>);

    impl ScoreDisplay for RecordingDisplay {
        fn show(&mut self, total: u32, bump: bool) {
            self.0.borrow_mut().push((total, bump));
        }
    }

    #[test]
    fn score_is_monotonic_under_increments() {
        let mut tracker = ScoreTracker::new();
        let mut previous = tracker.current();
        for points in [0, 10, 10, 0, 5, 1000] {
            tracker.increment(points);
            assert!(tracker.current() >= previous, "スコアが減ってはいけない");
            previous = tracker.current();
        }
        assert_eq!(tracker.current(), 1025);
    }

    #[test]
    fn reset_always_goes_to_zero() {
        let mut tracker = ScoreTracker::new();
        tracker.reset();
        assert_eq!(tracker.current(), 0);

        tracker.increment(30);
        tracker.reset();
        assert_eq!(tracker.current(), 0);
    }

    #[test]
    fn increment_saturates() {
        let mut tracker = ScoreTracker::new();
        tracker.increment(u32::MAX);
        tracker.increment(10);
        assert_eq!(tracker.current(), u32::MAX);
    }

    #[test]
    fn displays_get_bump_on_increment_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ScoreTracker::new();
        tracker.add_display(Box::new(RecordingDisplay(Rc::clone(&log))));

        tracker.increment(10);
        tracker.increment(10);
        tracker.reset();

        assert_eq!(*log.borrow(), vec![(0, false), (10, true), (20, true), (0, false)]);
        println!("スコア表示通知テスト、成功！🎉");
    }
}
