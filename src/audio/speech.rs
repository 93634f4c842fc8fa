// src/audio/speech.rs
//! ブラウザの読み上げ機能 (`speechSynthesis`) を使う手段。並びのいちばん最後！

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

use super::{with_timeout, SoundCue, SoundProvider};

pub struct SpeechProvider {
    rate: f32,
    pitch: f32,
    volume: f32,
    timeout_ms: u32,
}

impl SpeechProvider {
    pub fn new(rate: f32, pitch: f32, volume: f32, timeout_ms: u32) -> Self {
        Self { rate, pitch, volume, timeout_ms }
    }

    fn synth() -> Option<SpeechSynthesis> {
        web_sys::window().and_then(|window| window.speech_synthesis().ok())
    }

    async fn speak(&self, text: &str) -> bool {
        let Some(synth) = Self::synth() else {
            debug!("SpeechProvider: speechSynthesis is not available");
            return false;
        };
        let utterance = match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => utterance,
            Err(e) => {
                warn!("SpeechProvider: failed to create utterance: {:?}", e);
                return false;
            }
        };
        utterance.set_rate(self.rate);
        utterance.set_pitch(self.pitch);
        utterance.set_volume(self.volume);

        // しゃべってる途中なら止めてから
        if synth.speaking() {
            synth.cancel();
        }

        // onend / onerror のどっちか早い方で 1 回だけ結果を送る
        let (tx, rx) = oneshot::channel::<bool>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let on_end = {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(true);
                }
            })
        };
        let on_error = {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                warn!("SpeechProvider: speech error: {:?}", event);
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(false);
                }
            })
        };
        utterance.set_onend(Some(on_end.as_ref().unchecked_ref()));
        utterance.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        synth.speak(&utterance);

        let spoken = match with_timeout(rx, self.timeout_ms).await {
            Some(Ok(spoken)) => spoken,
            Some(Err(_canceled)) => false,
            None => {
                // 終わりの合図が来ない。止めて「しゃべった」ことにする
                warn!("SpeechProvider: gave up waiting after {} ms", self.timeout_ms);
                synth.cancel();
                true
            }
        };

        // クロージャを捨てる前にハンドラを外しておく
        utterance.set_onend(None);
        utterance.set_onerror(None);
        spoken
    }
}

impl SoundProvider for SpeechProvider {
    fn name(&self) -> &'static str {
        "speech"
    }

    fn try_play<'a>(&'a self, cue: &'a SoundCue<'a>) -> LocalBoxFuture<'a, bool> {
        self.speak(&cue.text).boxed_local()
    }

    fn stop(&self) {
        if let Some(synth) = Self::synth() {
            synth.cancel();
        }
    }
}
