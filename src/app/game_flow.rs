// src/app/game_flow.rs
//! ゲームの流れ (開始 → ドロップ → 次のラウンド → クリア) を画面と音につなげる係。
//! イベントリスナーからも `GameApp` のメソッドからも、ここの関数を呼ぶよ。

use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::audio::PronunciationService;
use crate::error::GameError;
use crate::games::{GameBoard, GameKind};
use crate::logic::animals;
use crate::session::{GameSession, SessionEvent};
use super::dom_surface::DomSurface;
use super::renderer;

pub(crate) type SharedSession = Arc<Mutex<GameSession<DomSurface>>>;

/// イベントのクロージャに持たせる共有データ一式
#[derive(Clone)]
pub(crate) struct AppContext {
    pub session: SharedSession,
    pub sound: Rc<PronunciationService>,
    /// ゲーム画面を描く場所
    pub root: Element,
}

impl AppContext {
    /// イベントの中から呼ばれるので、ロックは待たない (取れなければ Busy)
    pub fn lock(&self) -> Result<MutexGuard<'_, GameSession<DomSurface>>, GameError> {
        self.session.try_lock().map_err(|e| {
            warn!("Failed to lock session: {}", e);
            GameError::Busy
        })
    }

    /// 読み上げはバックグラウンドで。終わるのを待つ人はいない
    pub fn speak(&self, text: String) {
        let sound = Rc::clone(&self.sound);
        spawn_local(async move { sound.speak(&text).await });
    }

    pub fn pronounce(&self, animal: String) {
        let sound = Rc::clone(&self.sound);
        spawn_local(async move { sound.pronounce_animal(&animal).await });
    }

    pub fn play_animal_sound(&self, animal: String) {
        let sound = Rc::clone(&self.sound);
        spawn_local(async move { sound.play_animal_sound(&animal).await });
    }
}

/// ゲームを始めて (やり直して)、最初のボードを描く
pub(crate) fn start_game(ctx: &AppContext, kind: GameKind) -> Result<(), GameError> {
    let (board, progress) = {
        let mut session = ctx.lock()?;
        let board = session.start_game(kind).clone();
        (board, session.progress_label())
    };
    show_board(ctx, &board, Some(kind), progress.as_deref());
    Ok(())
}

fn show_board(ctx: &AppContext, board: &GameBoard, kind: Option<GameKind>, progress: Option<&str>) {
    renderer::render_board(&ctx.root, board, kind);
    if let Some(progress) = progress {
        renderer::render_progress(&ctx.root, progress);
    }
    announce_board(ctx, board, kind);
}

/// 新しいボードが出た時のひとこと
fn announce_board(ctx: &AppContext, board: &GameBoard, kind: Option<GameKind>) {
    let Some(animal) = board.featured_animal.clone() else {
        return;
    };
    match kind {
        Some(GameKind::Sounds) => ctx.play_animal_sound(animal),
        Some(GameKind::Feeding) => ctx.speak(format!("{} is hungry!", animal)),
        Some(GameKind::Puzzle) => ctx.speak(format!("Let's build the {}!", animal)),
        _ => {}
    }
}

/// ドロップが終わった後、セッションにたまった出来事を画面と音に反映する
pub(crate) fn handle_session_events(ctx: &AppContext) {
    let (events, kind, progress, pronounce_on_drop, delay_ms) = match ctx.lock() {
        Ok(mut session) => (
            session.take_events(),
            session.game_kind(),
            session.progress_label(),
            session.config().pronounce_on_drop,
            session.config().next_round_delay_ms,
        ),
        Err(_) => return,
    };

    for event in events {
        match event {
            SessionEvent::Placed { item, correct, feedback, .. } => {
                if let Some(feedback) = feedback {
                    renderer::render_feedback(&ctx.root, &feedback, feedback_mood(correct));
                }
                // クイズでハズレた時は名前を読まない (正解の動物と混ざっちゃう)
                if pronounce_on_drop && correct && animals::find(&item.label).is_some() {
                    ctx.pronounce(item.label);
                }
            }
            SessionEvent::Missed { item } => {
                debug!("Missed drop for {}", item.label);
                renderer::render_feedback(&ctx.root, "Try again! 😊", "incorrect");
            }
            SessionEvent::RoundOver { round } => schedule_next_round(ctx, delay_ms, round),
            SessionEvent::Completed(completion) => {
                if let Err(e) = renderer::render_completion(&ctx.root, &completion, kind) {
                    warn!("Failed to render completion screen: {:?}", e);
                }
                ctx.speak(completion.detail);
            }
        }
    }

    if let Some(progress) = progress {
        renderer::render_progress(&ctx.root, &progress);
    }
}

/// フィードバック欄に付けるクラス
pub(crate) fn feedback_mood(correct: bool) -> &'static str {
    if correct {
        "correct"
    } else {
        "incorrect"
    }
}

/// `delay_ms` 後に次のボードへ (その間にフィードバックを見てもらう)。
/// その間にゲームがやり直されたら、`round` がずれるので何も起きない。
fn schedule_next_round(ctx: &AppContext, delay_ms: u32, round: u64) {
    let ctx = ctx.clone();
    Timeout::new(delay_ms, move || {
        if let Err(e) = advance_round(&ctx, round) {
            warn!("Failed to advance to the next round: {}", e);
        }
    })
    .forget();
}

fn advance_round(ctx: &AppContext, round: u64) -> Result<(), GameError> {
    let next = {
        let mut session = ctx.lock()?;
        let board = session.advance_round_from(round).cloned();
        board.map(|board| (board, session.game_kind(), session.progress_label()))
    };
    match next {
        Some((board, kind, progress)) => {
            info!("Next round: {}", board.title);
            show_board(ctx, &board, kind, progress.as_deref());
        }
        None => debug!("advance_round: nothing to show for round {}", round),
    }
    Ok(())
}

/// 今の問題の鳴き声をもう一度
pub(crate) fn play_featured_sound(ctx: &AppContext) -> Result<(), GameError> {
    let animal = ctx.lock()?.featured_animal().map(str::to_string);
    match animal {
        Some(animal) => ctx.play_animal_sound(animal),
        None => debug!("play_featured_sound: no featured animal on this board"),
    }
    Ok(())
}

pub(crate) fn show_hint(ctx: &AppContext) -> Result<(), GameError> {
    if let Some(hint) = ctx.lock()?.hint() {
        renderer::render_feedback(&ctx.root, &hint, "hint");
    }
    Ok(())
}
