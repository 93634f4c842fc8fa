// src/error.rs
//! クレート全体で使うエラー型だよ。
//! JS との境界 (`#[wasm_bindgen]` のメソッド) で `JsValue` に変換して返す！

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::drag::DragError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("unknown game kind: {0}")]
    UnknownGame(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Drag(#[from] DragError),
    #[error("the round is over, wait for the next board")]
    RoundOver,
    #[error("state is busy (lock failed)")]
    Busy,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(format!("{:?}", value))
    }
}

impl From<GameError> for JsValue {
    fn from(error: GameError) -> Self {
        JsValue::from(js_sys::Error::new(&error.to_string()))
    }
}
