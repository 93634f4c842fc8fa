// src/logic/mod.rs
//! ブラウザに依存しないゲームロジックを置く場所だよ！ ここはホストの `cargo test` でそのまま動く。

pub mod animals;
pub mod drop_rules;
pub mod hit_test;
pub mod score;
pub mod throttle;

pub use drop_rules::is_valid_drop;
pub use score::{ScoreDisplay, ScoreTracker};
pub use throttle::Throttle;
