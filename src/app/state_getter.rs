//! Gets the current session state and converts it to JSON for JavaScript.

use log::{debug, error};
use wasm_bindgen::JsValue;

use super::game_flow::SharedSession;

/// セッションの状態を JSON 文字列にして返します。
/// (GameApp::get_state_json の中身)
pub(crate) fn get_state_json(session: &SharedSession) -> Result<JsValue, JsValue> {
    let snapshot = match session.try_lock() {
        Ok(session) => session.snapshot(),
        Err(e) => {
            let error_msg = format!("Failed to lock session for getting state: {}", e);
            error!("{}", error_msg);
            return Err(JsValue::from_str(&error_msg));
        }
    };

    match serde_json::to_string(&snapshot) {
        Ok(json_string) => {
            debug!("State snapshot: {} pool items, {} zones", snapshot.pool.len(), snapshot.zones.len());
            Ok(JsValue::from_str(&json_string))
        }
        Err(e) => {
            let error_msg = format!("Failed to serialize session state: {}", e);
            error!("{}", error_msg);
            Err(JsValue::from_str(&error_msg))
        }
    }
}
