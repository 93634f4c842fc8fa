// src/audio/clip.rs
//! 録音された鳴き声 (`audio/sounds/<clip>.mp3`) を鳴らす手段。
//! 一度読めた `<audio>` は使い回して、読めなかったファイルは覚えておいて二度と取りに行かない。

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::logic::animals;
use super::{with_timeout, SoundCue, SoundProvider};

/// `play()` を呼んだ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipStart {
    Playing,
    /// Promise が reject された (ファイルが無い、形式が読めない…)
    Rejected,
    /// 時間内に始まらなかった
    TimedOut,
}

impl ClipStart {
    /// `with_timeout` で待った `play()` の結果から
    fn from_wait<T, E>(wait: Option<Result<T, E>>) -> Self {
        match wait {
            Some(Ok(_)) => ClipStart::Playing,
            Some(Err(_)) => ClipStart::Rejected,
            None => ClipStart::TimedOut,
        }
    }

    /// 時間切れはネットワークが一時的に遅いだけかもしれないので、次はまた試す
    fn remember_missing(self) -> bool {
        self == ClipStart::Rejected
    }
}

pub struct AudioClipProvider {
    dir: String,
    volume: f32,
    timeout_ms: u32,
    cache: RefCell<HashMap<String, HtmlAudioElement>>,
    missing: RefCell<HashSet<String>>,
    playing: RefCell<Option<HtmlAudioElement>>,
}

impl AudioClipProvider {
    pub fn new(dir: &str, volume: f32, timeout_ms: u32) -> Self {
        Self {
            dir: dir.trim_end_matches('/').to_string(),
            volume,
            timeout_ms,
            cache: RefCell::new(HashMap::new()),
            missing: RefCell::new(HashSet::new()),
            playing: RefCell::new(None),
        }
    }

    pub fn clip_url(&self, clip: &str) -> String {
        format!("{}/{}.mp3", self.dir, clip)
    }

    fn element_for(&self, clip: &str) -> Result<HtmlAudioElement, JsValue> {
        if let Some(element) = self.cache.borrow().get(clip) {
            return Ok(element.clone());
        }
        let element = HtmlAudioElement::new_with_src(&self.clip_url(clip))?;
        self.cache.borrow_mut().insert(clip.to_string(), element.clone());
        Ok(element)
    }

    async fn play_clip(&self, clip: String) -> bool {
        if self.missing.borrow().contains(&clip) {
            return false;
        }
        let element = match self.element_for(&clip) {
            Ok(element) => element,
            Err(e) => {
                debug!("AudioClipProvider: cannot create <audio> for {}: {:?}", clip, e);
                return false;
            }
        };
        element.set_volume(self.volume as f64);
        element.set_current_time(0.0);

        // 再生が終わったら知らせてもらう
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let on_ended = Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        });
        element.set_onended(Some(on_ended.as_ref().unchecked_ref()));

        // ファイルの読み込みが詰まると play() の Promise がずっと終わらないので、ここも時間制限付き
        let start = match element.play() {
            Ok(promise) => ClipStart::from_wait(with_timeout(JsFuture::from(promise), self.timeout_ms).await),
            Err(_) => ClipStart::Rejected,
        };
        if start != ClipStart::Playing {
            info!("AudioClipProvider: {} did not start ({:?}), falling back", self.clip_url(&clip), start);
            let _ = element.pause();
            element.set_onended(None);
            if start.remember_missing() {
                self.cache.borrow_mut().remove(&clip);
                self.missing.borrow_mut().insert(clip);
            }
            return false;
        }

        *self.playing.borrow_mut() = Some(element.clone());
        if with_timeout(rx, self.timeout_ms).await.is_none() {
            debug!("AudioClipProvider: {} still playing after {} ms", clip, self.timeout_ms);
        }
        element.set_onended(None);
        self.playing.borrow_mut().take();
        true
    }
}

impl SoundProvider for AudioClipProvider {
    fn name(&self) -> &'static str {
        "clip"
    }

    fn try_play<'a>(&'a self, cue: &'a SoundCue<'a>) -> LocalBoxFuture<'a, bool> {
        match cue.animal {
            Some(animal) => self.play_clip(animals::clip_name_for(animal)).boxed_local(),
            None => async { false }.boxed_local(),
        }
    }

    fn stop(&self) {
        if let Some(element) = self.playing.borrow_mut().take() {
            let _ = element.pause();
        }
    }
}
