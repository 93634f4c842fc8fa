// src/logic/throttle.rs
//! 時間ベースの間引き (スロットル)。

/// 「前回から `interval_ms` より長くたったら OK」を判定するだけの小さな構造体だよ。
/// ちょうど `interval_ms` の時はまだダメ (厳密に `>`)。
///
/// pointer-move は 1 秒に何十回も来るから、ゾーンの探し直しはこれで間引く！
/// 時刻はミリ秒の `f64` (`performance.now()` と同じ単位) で外から渡してもらう。
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    last_fired_ms: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms: interval_ms.max(0.0), last_fired_ms: None }
    }

    /// 今実行していいなら true を返して、時刻を記録するよ。
    /// 一回目は必ず true！
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let ready = match self.last_fired_ms {
            None => true,
            Some(last) => now_ms - last > self.interval_ms || now_ms < last,
        };
        if ready {
            self.last_fired_ms = Some(now_ms);
        }
        ready
    }

    /// 記録を消して、次の `ready` を必ず通すようにする。
    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}
