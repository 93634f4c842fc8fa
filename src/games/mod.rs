// src/games/mod.rs
//! ミニゲームたち (すみか合わせ / エサやり / 鳴き声クイズ / パズル)。
//!
//! どのゲームも `Game` トレイトを実装していて、`start_game(kind, config)` 1 つで切り替えられる。
//! ゲームはボード (アイテムとゾーン) を作って、置かれた結果に点数と進み具合を返すだけ。
//! 画面やドラッグのことは何も知らないよ！

pub mod feeding;
pub mod habitat;
pub mod puzzle;
pub mod sound_quiz;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::components::{DraggableItem, DropZone};
use crate::config::GameConfig;
use crate::error::GameError;

pub use feeding::FeedingGame;
pub use habitat::HabitatGame;
pub use puzzle::PuzzleGame;
pub use sound_quiz::SoundQuizGame;

/// ゲームの種類。JS からは "habitat" / "feeding" / "sounds" / "puzzle" で指定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Habitat,
    Feeding,
    Sounds,
    Puzzle,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [GameKind::Habitat, GameKind::Feeding, GameKind::Sounds, GameKind::Puzzle];

    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Habitat => "habitat",
            GameKind::Feeding => "feeding",
            GameKind::Sounds => "sounds",
            GameKind::Puzzle => "puzzle",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownGame(s.to_string()))
    }
}

/// 画面に並べる 1 ラウンド分のボード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameBoard {
    pub title: String,
    /// 「おなかすいた！」みたいな一言
    pub prompt: Option<String>,
    /// このラウンドの主役の動物 (クイズなら鳴き声を鳴らす動物)
    pub featured_animal: Option<String>,
    pub items: Vec<DraggableItem>,
    pub zones: Vec<DropZone>,
}

/// ゲームクリアの画面に出す内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub headline: String,
    pub detail: String,
    pub stars: u8,
}

/// 1 回置いた後、ゲームがどうなったか
#[derive(Debug, Clone, PartialEq)]
pub enum GameProgress {
    /// 同じボードのまま続ける
    Continue,
    /// 少し待ってから次のボードに切り替える
    NextRound(GameBoard),
    /// おしまい！
    Complete(Completion),
}

/// 受け入れOKのゾーンに置かれた時の結果
///
/// `correct` は点数とは別に持っておく (点数 0 の設定でも正解は正解)。
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub points: u32,
    pub correct: bool,
    pub feedback: Option<String>,
    pub progress: GameProgress,
}

impl Placement {
    /// 正解！ `points` 点
    pub fn scored(points: u32) -> Self {
        Self { points, correct: true, feedback: None, progress: GameProgress::Continue }
    }

    /// 置けたけど答えとしてはハズレ (クイズ)。0 点
    pub fn wrong_answer() -> Self {
        Self { points: 0, correct: false, feedback: None, progress: GameProgress::Continue }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    pub fn with_progress(mut self, progress: GameProgress) -> Self {
        self.progress = progress;
        self
    }
}

/// ミニゲーム共通のふるまい
pub trait Game {
    fn kind(&self) -> GameKind;

    /// 最初からやり直して、最初のボードを返す
    fn start(&mut self, rng: &mut dyn RngCore) -> GameBoard;

    /// アイテムが受け入れOKなゾーンに置かれた時に呼ばれる
    fn on_item_placed(&mut self, item: &DraggableItem, zone: &DropZone, rng: &mut dyn RngCore) -> Placement;

    fn is_complete(&self) -> bool;

    /// 「Round 2/5」みたいな進み具合の表示
    fn progress_label(&self) -> String;

    /// ヒント (ヒントのないゲームは None)
    fn hint(&self) -> Option<String> {
        None
    }
}

/// 種類を指定してゲームを作る
pub fn start_game(kind: GameKind, config: &GameConfig) -> Box<dyn Game> {
    match kind {
        GameKind::Habitat => Box::new(HabitatGame::new(config.score_increment)),
        GameKind::Feeding => Box::new(FeedingGame::new(config.score_increment, config.feeding_rounds)),
        GameKind::Sounds => Box::new(SoundQuizGame::new(
            config.score_increment,
            config.quiz_rounds,
            config.passing_score_percentage,
        )),
        GameKind::Puzzle => Box::new(PuzzleGame::new(config.score_increment)),
    }
}

/// "savanna" → "Savanna"
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
