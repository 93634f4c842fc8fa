// src/audio/mod.rs
//! 動物の名前の読み上げと鳴き声の再生。
//!
//! 音の出し方 (音声ファイル → 合成音 → 読み上げ) は `SoundProvider` の並びとして持っていて、
//! 前から順に試して、最初に「鳴らせた！」と返したところで止まるよ。
//! どの段で失敗しても呼び出し側にはエラーを返さない。音が出ないだけでゲームは続く！

pub mod clip;
pub mod speech;
pub mod tone;

use std::borrow::Cow;
use std::cell::Cell;
use std::future::Future;

use futures::future::{self, Either, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use log::{debug, info};

use crate::config::GameConfig;
use crate::logic::animals;

pub use clip::AudioClipProvider;
pub use speech::SpeechProvider;
pub use tone::TonePatternProvider;

/// 鳴らしたい音の中身。
///
/// `animal` があれば音声ファイルや合成音の手がかりになる。
/// `text` は最後の手段 (読み上げ) でしゃべる文。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundCue<'a> {
    pub animal: Option<&'a str>,
    pub text: Cow<'a, str>,
}

impl<'a> SoundCue<'a> {
    /// ただの文章を読み上げる
    pub fn speech(text: &'a str) -> Self {
        Self { animal: None, text: Cow::Borrowed(text) }
    }

    /// 動物の鳴き声 (最後の手段では鳴き声の言葉を読み上げる)
    pub fn animal(name: &'a str) -> Self {
        Self { animal: Some(name), text: Cow::Borrowed(animals::sound_for(name)) }
    }
}

/// 音を出す手段 1 つ分。
///
/// `try_play` は鳴らし終わったら (または諦めたら) 完了する Future を返す。
/// 鳴らせたら true、この手段では無理だったら false。エラーは中で飲み込むこと！
pub trait SoundProvider {
    fn name(&self) -> &'static str;

    fn try_play<'a>(&'a self, cue: &'a SoundCue<'a>) -> LocalBoxFuture<'a, bool>;

    /// 鳴っている音を止める
    fn stop(&self) {}
}

/// 読み上げサービス本体。`Rc` に包んで、ゲーム画面のあちこちから使い回すよ。
pub struct PronunciationService {
    providers: Vec<Box<dyn SoundProvider>>,
    enabled: Cell<bool>,
}

impl PronunciationService {
    pub fn new(providers: Vec<Box<dyn SoundProvider>>) -> Self {
        Self { providers, enabled: Cell::new(true) }
    }

    /// ブラウザ用のいつもの並び: 音声ファイル → 合成音 → 読み上げ
    pub fn for_browser(config: &GameConfig) -> Self {
        let mut providers: Vec<Box<dyn SoundProvider>> = vec![Box::new(AudioClipProvider::new(
            &config.sound_clip_dir,
            config.master_volume,
            config.clip_timeout_ms,
        ))];
        if config.tone_fallback {
            providers.push(Box::new(TonePatternProvider::new(config.master_volume)));
        }
        providers.push(Box::new(SpeechProvider::new(
            config.speech_rate,
            config.speech_pitch,
            config.speech_volume,
            config.speech_timeout_ms,
        )));
        Self::new(providers)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// オン / オフを切り替える。オフにした時は鳴っている音も止めるよ。
    pub fn toggle(&self) -> bool {
        let enabled = !self.enabled.get();
        self.enabled.set(enabled);
        if !enabled {
            self.stop_all();
        }
        info!("PronunciationService: sound {}", if enabled { "on" } else { "off" });
        enabled
    }

    pub fn stop_all(&self) {
        for provider in &self.providers {
            provider.stop();
        }
    }

    /// 文章を読み上げる。しゃべり終わったら完了。失敗しても使えなくても、必ず `()` で完了する。
    pub async fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.play(&SoundCue::speech(text)).await;
    }

    /// 「Lion says roar」みたいに名前と鳴き声を読み上げる
    pub async fn pronounce_animal(&self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.speak(&animals::pronunciation_text(name)).await;
    }

    /// 動物の鳴き声を鳴らす (音声ファイル → 合成音 → 鳴き声の読み上げ)
    pub async fn play_animal_sound(&self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.play(&SoundCue::animal(name)).await;
    }

    /// 前から順に試して、鳴らせた手段の名前を返す。全滅なら `None`。
    pub async fn play(&self, cue: &SoundCue<'_>) -> Option<&'static str> {
        if !self.enabled.get() {
            return None;
        }
        for provider in &self.providers {
            if provider.try_play(cue).await {
                debug!("PronunciationService: {:?} played by {}", cue.text, provider.name());
                return Some(provider.name());
            }
            debug!("PronunciationService: {} could not play {:?}", provider.name(), cue.text);
        }
        info!("PronunciationService: no provider could play {:?}", cue.text);
        None
    }
}

/// `future` を最大 `timeout_ms` だけ待つ。時間切れなら `None`。
pub(crate) async fn with_timeout<F: Future>(future: F, timeout_ms: u32) -> Option<F::Output> {
    let future = Box::pin(future);
    let timeout = Box::pin(TimeoutFuture::new(timeout_ms));
    match future::select(future, timeout).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn with_timeout_gives_up_on_a_stalled_future() {
        // 終わらない Promise (読み込みが詰まった play() とか) でも時間が来たら戻ってくる
        assert_eq!(with_timeout(future::pending::<bool>(), 20).await, None);
        assert_eq!(with_timeout(async { 7 }, 20).await, Some(7));
    }
}
