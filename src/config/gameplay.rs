// src/config/gameplay.rs
//! ゲームの進行や演出のタイミングに関する定数と、JS から渡せる設定 (`GameConfig`) を定義するよ！

use serde::{Deserialize, Serialize};

use crate::error::GameError;

// --- ドラッグ＆ドロップ ---
pub const DRAG_Z_INDEX: i32 = 1000; // ドラッグ中のクローンの z-index
pub const HIGHLIGHT_THROTTLE_MS: f64 = 100.0; // ゾーンのハイライト再計算の最短間隔

// --- スコア & 演出 (ミリ秒) ---
pub const SCORE_INCREMENT: u32 = 10; // 正解 1 回あたりの点数
pub const SUCCESS_FLASH_MS: u32 = 1000; // drop-success クラスを付けておく時間
pub const FEEDBACK_MS: u32 = 500; // shake アニメーションの時間
pub const SCORE_BUMP_MS: u32 = 300; // score-bump アニメーションの時間
pub const NEXT_ROUND_DELAY_MS: u32 = 2000; // 次のラウンドに進むまでの待ち時間

// --- クイズ ---
pub const QUIZ_ROUNDS: u32 = 5; // 1 ゲームの問題数
pub const QUIZ_OPTION_COUNT: usize = 4; // 選択肢の数 (正解 1 + ハズレ 3)
pub const PASSING_SCORE_PERCENTAGE: u32 = 80; // 「すごい！」になるライン
pub const GOOD_SCORE_PERCENTAGE: u32 = 60; // 「よくできました」になるライン

// --- エサやり ---
pub const FEEDING_ROUNDS: u32 = 5; // 何匹にエサをあげたら終わりか

// --- 音声 ---
pub const SPEECH_RATE: f32 = 0.8;
pub const SPEECH_PITCH: f32 = 1.1;
pub const SPEECH_VOLUME: f32 = 0.8;
pub const SPEECH_TIMEOUT_MS: u32 = 5000; // 読み上げが終わらない時に諦めるまでの時間
pub const CLIP_TIMEOUT_MS: u32 = 5000; // 音声ファイルの再生を待つ最大時間
pub const MASTER_VOLUME: f32 = 0.8;
pub const SOUND_CLIP_DIR: &str = "audio/sounds";

/// JS 側から JSON で上書きできるゲーム設定だよ。
///
/// 書かなかった項目は上の定数がそのまま使われる (`#[serde(default)]`)。
/// 例: `{"score_increment": 5, "quiz_rounds": 3}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub highlight_throttle_ms: f64,
    pub score_increment: u32,
    pub success_flash_ms: u32,
    pub feedback_ms: u32,
    pub score_bump_ms: u32,
    pub next_round_delay_ms: u32,
    pub quiz_rounds: u32,
    pub feeding_rounds: u32,
    pub passing_score_percentage: u32,
    /// 正しく置けた時にアイテムの名前を読み上げるか
    pub pronounce_on_drop: bool,
    pub speech_rate: f32,
    pub speech_pitch: f32,
    pub speech_volume: f32,
    pub speech_timeout_ms: u32,
    pub clip_timeout_ms: u32,
    pub master_volume: f32,
    pub sound_clip_dir: String,
    /// 音声ファイルが無い時、読み上げの前に合成音 (ピコピコ音) を試すか
    pub tone_fallback: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            highlight_throttle_ms: HIGHLIGHT_THROTTLE_MS,
            score_increment: SCORE_INCREMENT,
            success_flash_ms: SUCCESS_FLASH_MS,
            feedback_ms: FEEDBACK_MS,
            score_bump_ms: SCORE_BUMP_MS,
            next_round_delay_ms: NEXT_ROUND_DELAY_MS,
            quiz_rounds: QUIZ_ROUNDS,
            feeding_rounds: FEEDING_ROUNDS,
            passing_score_percentage: PASSING_SCORE_PERCENTAGE,
            pronounce_on_drop: true,
            speech_rate: SPEECH_RATE,
            speech_pitch: SPEECH_PITCH,
            speech_volume: SPEECH_VOLUME,
            speech_timeout_ms: SPEECH_TIMEOUT_MS,
            clip_timeout_ms: CLIP_TIMEOUT_MS,
            master_volume: MASTER_VOLUME,
            sound_clip_dir: SOUND_CLIP_DIR.to_string(),
            tone_fallback: true,
        }
    }
}

impl GameConfig {
    /// JSON 文字列から設定を読み込む。空文字ならデフォルト設定！
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: GameConfig = serde_json::from_str(json)?;
        // 音量は 0.0 ~ 1.0 に収める
        config.master_volume = config.master_volume.clamp(0.0, 1.0);
        config.speech_volume = config.speech_volume.clamp(0.0, 1.0);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = GameConfig::from_json("  ").expect("empty config");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.score_increment, 10);
        assert_eq!(config.highlight_throttle_ms, 100.0);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = GameConfig::from_json(r#"{"score_increment": 5, "quiz_rounds": 3}"#)
            .expect("partial config");
        assert_eq!(config.score_increment, 5);
        assert_eq!(config.quiz_rounds, 3);
        assert_eq!(config.feedback_ms, FEEDBACK_MS, "書いてない項目はデフォルトのはず");
    }

    #[test]
    fn volume_is_clamped() {
        let config = GameConfig::from_json(r#"{"master_volume": 3.5}"#).expect("config");
        assert_eq!(config.master_volume, 1.0);
    }

    #[test]
    fn broken_json_is_an_error() {
        let result = GameConfig::from_json("{ not json");
        assert!(matches!(result, Err(GameError::Config(_))));
        println!("設定読み込みテスト、成功！🎉");
    }
}
