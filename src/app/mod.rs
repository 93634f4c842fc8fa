// src/app/mod.rs
//! ブラウザ側の処理 (DOM、イベント、JS への窓口) を役割ごとに分割して置くモジュールだよ！

pub mod browser_event_manager;
pub mod dom_surface;
pub mod game_app;
pub mod game_flow;
pub mod init_handler;
pub mod renderer;
pub mod score_display;
pub mod state_getter;

pub use game_app::GameApp;
