// src/app/init_handler.rs
//! GameApp の初期化 (画面の要素探し、セッションと音の準備) に関するロジック。

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use log::info;
use web_sys::{Document, Element};

use crate::audio::PronunciationService;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::session::GameSession;
use super::dom_surface::DomSurface;
use super::game_flow::{AppContext, SharedSession};
use super::score_display::{DomScoreDisplay, SCORE_ELEMENT_IDS};

/// ゲームを描く場所の候補 (上から順に探す)
const ROOT_SELECTORS: &[&str] = &["#game-area", ".game-area"];

pub(crate) fn document() -> Result<Document, GameError> {
    let window = web_sys::window().ok_or(GameError::NoWindow)?;
    window.document().ok_or(GameError::NoDocument)
}

/// ゲーム画面の置き場所を探す。どこにもなければ `<body>` に描く。
pub(crate) fn find_root(document: &Document) -> Result<Element, GameError> {
    for selector in ROOT_SELECTORS {
        if let Some(element) = document.query_selector(selector)? {
            return Ok(element);
        }
    }
    document
        .body()
        .map(Element::from)
        .ok_or_else(|| GameError::MissingElement(ROOT_SELECTORS.join(" / ")))
}

/// セッションを作って、スコアの表示係をつなぐ
pub(crate) fn initialize_session(document: &Document, config: GameConfig) -> SharedSession {
    let surface = DomSurface::new(document.clone(), config.success_flash_ms, config.feedback_ms);
    let bump_ms = config.score_bump_ms;
    let mut session = GameSession::new(surface, config, Box::new(rand::thread_rng()));
    for id in SCORE_ELEMENT_IDS {
        session.add_score_display(Box::new(DomScoreDisplay::new(document.clone(), *id, bump_ms)));
    }
    Arc::new(Mutex::new(session))
}

pub(crate) fn initialize_context(config: GameConfig) -> Result<(Document, AppContext), GameError> {
    let document = document()?;
    let root = find_root(&document)?;
    let sound = Rc::new(PronunciationService::for_browser(&config));
    let session = initialize_session(&document, config);
    info!("App::Init: session ready");
    Ok((document, AppContext { session, sound, root }))
}
