// src/app/score_display.rs
//! スコアを DOM の要素に書き出す表示係。増えた時は score-bump でポンッと跳ねる！

use web_sys::{Document, Element};

use crate::logic::ScoreDisplay;
use super::dom_surface::flash_class;

pub const SCORE_BUMP_CLASS: &str = "score-bump";
/// スコアを書き出す要素の id (メイン画面用とクイズ画面用)
pub const SCORE_ELEMENT_IDS: &[&str] = &["interactive-score", "sound-score"];

pub struct DomScoreDisplay {
    document: Document,
    element_id: &'static str,
    bump_ms: u32,
}

impl DomScoreDisplay {
    pub fn new(document: Document, element_id: &'static str, bump_ms: u32) -> Self {
        Self { document, element_id, bump_ms }
    }

    /// ボードを描き直すと要素が入れ替わるので、毎回探し直す
    fn element(&self) -> Option<Element> {
        self.document.get_element_by_id(self.element_id)
    }
}

impl ScoreDisplay for DomScoreDisplay {
    fn show(&mut self, total: u32, bump: bool) {
        let Some(element) = self.element() else {
            return;
        };
        element.set_text_content(Some(&total.to_string()));
        if bump {
            flash_class(&element, SCORE_BUMP_CLASS, self.bump_ms);
        }
    }
}
