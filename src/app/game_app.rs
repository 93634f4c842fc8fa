// src/app/game_app.rs

use std::sync::{Arc, Mutex};

use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::GameConfig;
use crate::games::GameKind;
use super::browser_event_manager::{self, ListenerList};
use super::game_flow::{self, AppContext};
use super::init_handler;
use super::state_getter;

/// JS から触るゲーム全体の窓口だよ！
///
/// ```js
/// const app = new GameApp('{"quiz_rounds": 3}');
/// app.start_game("habitat");
/// ```
#[wasm_bindgen]
pub struct GameApp {
    ctx: AppContext,
    document: Document,
    // document に付けたリスナーのクロージャ (Drop で外す)
    listeners: ListenerList,
}

#[wasm_bindgen]
impl GameApp {
    /// `config_json` は省略OK。書いた項目だけデフォルトを上書きする。
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GameApp, JsValue> {
        info!("GameApp: 初期化中...");
        let config = GameConfig::from_json(config_json.as_deref().unwrap_or_default())?;
        let (document, ctx) = init_handler::initialize_context(config)?;

        let listeners: ListenerList = Arc::new(Mutex::new(Vec::new()));
        browser_event_manager::attach_listeners(&document, &ctx, &listeners)?;

        info!("GameApp: 初期化完了。");
        Ok(Self { ctx, document, listeners })
    }

    /// "habitat" / "feeding" / "sounds" / "puzzle" のどれかを始める (やり直しもこれ)
    pub fn start_game(&self, kind: &str) -> Result<(), JsValue> {
        let kind: GameKind = kind.parse()?;
        game_flow::start_game(&self.ctx, kind)?;
        Ok(())
    }

    pub fn score(&self) -> u32 {
        match self.ctx.lock() {
            Ok(session) => session.score(),
            Err(_) => 0,
        }
    }

    pub fn reset_score(&self) -> Result<(), JsValue> {
        self.ctx.lock()?.reset_score();
        Ok(())
    }

    /// クイズの鳴き声をもう一回鳴らす
    pub fn play_quiz_sound(&self) -> Result<(), JsValue> {
        game_flow::play_featured_sound(&self.ctx)?;
        Ok(())
    }

    /// 「Lion says roar」を読み上げる
    pub fn pronounce(&self, name: String) {
        self.ctx.pronounce(name);
    }

    /// 好きな文を読み上げる
    pub fn speak(&self, text: String) {
        self.ctx.speak(text);
    }

    /// 音のオン / オフ。切り替えた後の状態を返す
    pub fn toggle_sound(&self) -> bool {
        self.ctx.sound.toggle()
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.ctx.sound.is_enabled()
    }

    /// パズルのヒント (ヒントがなければ undefined)
    pub fn hint(&self) -> Option<String> {
        self.ctx.lock().ok().and_then(|session| session.hint())
    }

    /// 今の状態を JSON 文字列で返す (デバッグや JS 側の表示用)
    pub fn get_state_json(&self) -> Result<JsValue, JsValue> {
        state_getter::get_state_json(&self.ctx.session)
    }

    /// リスナーを外して、ドラッグ中ならそれも片付ける
    pub fn dispose(&self) -> Result<(), JsValue> {
        if let Ok(mut session) = self.ctx.lock() {
            session.cancel_drag();
        }
        self.ctx.sound.stop_all();
        browser_event_manager::detach_listeners(&self.document, &self.listeners)
    }
}

impl Drop for GameApp {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            error!("GameApp: failed to clean up on drop: {:?}", e);
        } else {
            info!("GameApp: dropped, listeners detached");
        }
    }
}
