// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app;
pub mod audio;
pub mod components;
pub mod config;
pub mod drag;
pub mod error;
pub mod games;
pub mod logic;
pub mod session;

pub use app::GameApp;
pub use audio::PronunciationService;
pub use drag::{DragDropController, DragSurface, DropListener, DropOutcome};
pub use error::GameError;
pub use games::{Game, GameKind};
pub use logic::ScoreTracker;
pub use session::GameSession;

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
// パニックをコンソールに出す準備と、log マクロの出力先 (console) の設定をする。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // 2 回目以降の初期化はエラーになるけど、ログはもう使えるので気にしない
        log::debug!("Logger was already initialized");
    }
    log::info!("Panic hook and logger set!");
}
