// src/config/mod.rs
//! ゲーム全体の設定値をまとめるモジュール。

pub mod gameplay;

pub use gameplay::GameConfig;
