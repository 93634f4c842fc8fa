// src/session.rs
//! 1 回分の遊び (セッション) をまとめる係。
//!
//! ドラッグのコントローラー、スコア、今遊んでいるゲームを持っていて、
//! ドロップの成功 / 失敗をスコアとゲームの進行につなげるよ。
//! 画面側 (`app`) は、ドロップの後に `take_events()` で「何が起きたか」を受け取って
//! 読み上げや次のラウンドの予約をする。

use log::{debug, info, warn};
use rand::RngCore;
use serde::Serialize;

use crate::components::{AcceptedType, DraggableItem, DropZone, ItemId, Position, ZoneId};
use crate::config::GameConfig;
use crate::drag::{DragDropController, DragSurface, DropListener, DropOutcome};
use crate::error::GameError;
use crate::games::{self, Completion, Game, GameBoard, GameKind, GameProgress};
use crate::logic::{ScoreDisplay, ScoreTracker};

/// ドロップの後に画面側へ伝える出来事
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// 受け入れOKのゾーンに置けた
    Placed {
        item: DraggableItem,
        zone: ZoneId,
        points: u32,
        /// 答えとして正しかったか (クイズのハズレだけ false)
        correct: bool,
        feedback: Option<String>,
    },
    /// 置けなかった
    Missed { item: DraggableItem },
    /// このラウンドはおしまい。`advance_round_from(round)` で次のボードへ
    RoundOver { round: u64 },
    /// ゲームクリア！
    Completed(Completion),
}

/// ドロップのコールバックを受け取る側。コントローラーとは別の値にしておくと、
/// `controller.end_drag(.., &mut play)` みたいに同時に借りられる。
struct PlayState {
    score: ScoreTracker,
    game: Option<Box<dyn Game>>,
    rng: Box<dyn RngCore>,
    points_without_game: u32,
    misses: u32,
    pending_board: Option<GameBoard>,
    /// ラウンドの通し番号。次のボードを待ち始めた時と、ボードを丸ごと入れ替えた時に進む
    round: u64,
    completion: Option<Completion>,
    events: Vec<SessionEvent>,
}

impl DropListener for PlayState {
    fn on_success(&mut self, item: &DraggableItem, zone: &DropZone) {
        let Some(game) = self.game.as_mut() else {
            // ゲームなしのフリー練習ボードは、置けたら毎回同じ点数
            self.score.increment(self.points_without_game);
            self.events.push(SessionEvent::Placed {
                item: item.clone(),
                zone: zone.id,
                points: self.points_without_game,
                correct: true,
                feedback: None,
            });
            return;
        };

        let placement = game.on_item_placed(item, zone, self.rng.as_mut());
        if placement.points > 0 {
            self.score.increment(placement.points);
        }
        self.events.push(SessionEvent::Placed {
            item: item.clone(),
            zone: zone.id,
            points: placement.points,
            correct: placement.correct,
            feedback: placement.feedback,
        });

        match placement.progress {
            GameProgress::Continue => {}
            GameProgress::NextRound(board) => {
                self.pending_board = Some(board);
                self.round += 1;
                self.events.push(SessionEvent::RoundOver { round: self.round });
            }
            GameProgress::Complete(completion) => {
                info!("Game complete: {}", completion.headline);
                self.completion = Some(completion.clone());
                self.events.push(SessionEvent::Completed(completion));
            }
        }
    }

    fn on_failure(&mut self, item: &DraggableItem) {
        self.misses += 1;
        self.events.push(SessionEvent::Missed { item: item.clone() });
    }
}

/// JS に渡す今の状態 (`GameApp::get_state_json`)
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub game: Option<GameKind>,
    pub title: String,
    pub prompt: Option<String>,
    pub featured_animal: Option<String>,
    pub score: u32,
    pub misses: u32,
    pub progress: Option<String>,
    pub dragging: Option<ItemId>,
    pub pool: Vec<DraggableItem>,
    pub zones: Vec<ZoneSnapshot>,
    pub round_over: bool,
    pub completion: Option<Completion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneSnapshot {
    pub id: ZoneId,
    pub title: String,
    pub accepts: AcceptedType,
    pub dropped: Vec<ItemId>,
}

pub struct GameSession<S: DragSurface> {
    controller: DragDropController<S>,
    play: PlayState,
    board: Option<GameBoard>,
    config: GameConfig,
}

impl<S: DragSurface> GameSession<S> {
    pub fn new(surface: S, config: GameConfig, rng: Box<dyn RngCore>) -> Self {
        Self {
            controller: DragDropController::new(surface, config.highlight_throttle_ms),
            play: PlayState {
                score: ScoreTracker::new(),
                game: None,
                rng,
                points_without_game: config.score_increment,
                misses: 0,
                pending_board: None,
                round: 0,
                completion: None,
                events: Vec::new(),
            },
            board: None,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn controller(&self) -> &DragDropController<S> {
        &self.controller
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.controller.surface_mut()
    }

    pub fn board(&self) -> Option<&GameBoard> {
        self.board.as_ref()
    }

    pub fn game_kind(&self) -> Option<GameKind> {
        self.play.game.as_ref().map(|game| game.kind())
    }

    // --- スコア ---

    pub fn score(&self) -> u32 {
        self.play.score.current()
    }

    pub fn add_score_display(&mut self, display: Box<dyn ScoreDisplay>) {
        self.play.score.add_display(display);
    }

    pub fn reset_score(&mut self) {
        self.play.score.reset();
    }

    // --- ゲームの切り替え ---

    /// ゲームを (最初から) 始める。ドラッグ中ならそれは取り消して、新しいボードを並べる。
    pub fn start_game(&mut self, kind: GameKind) -> &GameBoard {
        info!("Starting game: {}", kind);
        let mut game = games::start_game(kind, &self.config);
        let board = game.start(self.play.rng.as_mut());
        self.play.game = Some(game);
        self.play.misses = 0;
        self.play.pending_board = None;
        self.play.round += 1;
        self.play.completion = None;
        self.play.events.clear();
        self.show_board(board)
    }

    /// ゲームなしで、好きなアイテムとゾーンを並べる (置けたら毎回 `score_increment` 点)
    pub fn load_free_board(&mut self, board: GameBoard) -> &GameBoard {
        self.play.game = None;
        self.play.pending_board = None;
        self.play.round += 1;
        self.play.completion = None;
        self.show_board(board)
    }

    /// 待っていた次のボードに切り替える。待っているボードがなければ `None`。
    pub fn advance_round(&mut self) -> Option<&GameBoard> {
        let board = self.play.pending_board.take()?;
        Some(self.show_board(board))
    }

    /// `RoundOver { round }` で予約された切り替え。その後にゲームがやり直されていたら
    /// (番号がずれていたら) 古い予約なので何もしない。
    pub fn advance_round_from(&mut self, round: u64) -> Option<&GameBoard> {
        if round != self.play.round {
            debug!("advance_round_from: stale round {} (now {})", round, self.play.round);
            return None;
        }
        self.advance_round()
    }

    fn show_board(&mut self, board: GameBoard) -> &GameBoard {
        self.controller.load_board(board.items.clone(), board.zones.clone());
        self.board.insert(board)
    }

    pub fn is_round_over(&self) -> bool {
        self.play.pending_board.is_some() || self.play.completion.is_some()
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.play.completion.as_ref()
    }

    pub fn hint(&self) -> Option<String> {
        self.play.game.as_ref().and_then(|game| game.hint())
    }

    pub fn progress_label(&self) -> Option<String> {
        self.play.game.as_ref().map(|game| game.progress_label())
    }

    pub fn featured_animal(&self) -> Option<&str> {
        self.board.as_ref().and_then(|board| board.featured_animal.as_deref())
    }

    // --- ドラッグ ---

    /// ドラッグ開始。ラウンドが終わって次のボード待ちの間は受け付けない。
    pub fn begin_drag(&mut self, item: ItemId, pointer: Position) -> Result<(), GameError> {
        if self.is_round_over() {
            return Err(GameError::RoundOver);
        }
        self.controller.begin_drag(item, pointer)?;
        Ok(())
    }

    pub fn update_drag(&mut self, pointer: Position) {
        self.controller.update_drag(pointer);
    }

    pub fn end_drag(&mut self, pointer: Position) -> Option<DropOutcome> {
        let outcome = self.controller.end_drag(pointer, &mut self.play);
        if let Some(DropOutcome::Missed { item, zone: Some(zone) }) = outcome {
            warn!("Item {:?} does not belong in zone {:?}", item, zone);
        }
        outcome
    }

    pub fn cancel_drag(&mut self) {
        self.controller.cancel_drag();
    }

    /// たまった出来事を全部取り出す
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.play.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let board = self.board.as_ref();
        SessionSnapshot {
            game: self.game_kind(),
            title: board.map(|board| board.title.clone()).unwrap_or_default(),
            prompt: board.and_then(|board| board.prompt.clone()),
            featured_animal: self.featured_animal().map(str::to_string),
            score: self.score(),
            misses: self.play.misses,
            progress: self.progress_label(),
            dragging: self.controller.dragged_item(),
            pool: self.controller.pool().cloned().collect(),
            zones: self
                .controller
                .zones()
                .iter()
                .map(|zone| ZoneSnapshot {
                    id: zone.id,
                    title: zone.title.clone(),
                    accepts: zone.accepted.clone(),
                    dropped: zone.dropped_items.clone(),
                })
                .collect(),
            round_over: self.play.pending_board.is_some(),
            completion: self.play.completion.clone(),
        }
    }
}
