// src/audio/tone.rs
//! 音声ファイルが無い動物のために、Web Audio のオシレーターで「それっぽい」音の模様を鳴らす手段。
//! 鳴き声の言葉 1 語につき 1 音。低い声の動物は低く、小鳥っぽいのは高く！

use std::cell::RefCell;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, OscillatorType};

use crate::logic::animals;
use super::{SoundCue, SoundProvider};

const LOW_SOUNDS: &[&str] = &["roar", "growl", "grunt", "snort", "groan", "snore", "trumpet", "hum", "hoo", "howl"];
const HIGH_SOUNDS: &[&str] = &["screech", "chirp", "squawk", "yip", "click", "ribbit", "buzz", "chatter", "sniff"];

const LOW_BASE_HZ: f32 = 160.0;
const MID_BASE_HZ: f32 = 380.0;
const HIGH_BASE_HZ: f32 = 720.0;
const TONE_MS: u32 = 180;
const GAP_MS: u32 = 40;

/// 1 音分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration_ms: u32,
}

fn base_frequency(word: &str) -> f32 {
    if LOW_SOUNDS.contains(&word) {
        LOW_BASE_HZ
    } else if HIGH_SOUNDS.contains(&word) {
        HIGH_BASE_HZ
    } else {
        MID_BASE_HZ
    }
}

/// 鳴き声の言葉から音の並びを作る。同じ言葉からはいつも同じ模様。
pub fn tone_pattern(sound: &str) -> Vec<Tone> {
    sound
        .split_whitespace()
        .map(|word| {
            let word = word.to_lowercase();
            // 語の長さで少しだけ高さをずらす
            let wobble = (word.chars().count() as f32 * 37.0) % 120.0;
            Tone {
                frequency: base_frequency(&word) + wobble,
                duration_ms: if word.chars().count() > 5 { TONE_MS * 2 } else { TONE_MS },
            }
        })
        .collect()
}

pub struct TonePatternProvider {
    volume: f32,
    context: RefCell<Option<AudioContext>>,
}

impl TonePatternProvider {
    pub fn new(volume: f32) -> Self {
        Self { volume, context: RefCell::new(None) }
    }

    /// AudioContext は最初に使う時に 1 回だけ作る
    fn context(&self) -> Result<AudioContext, JsValue> {
        if let Some(context) = self.context.borrow().as_ref() {
            return Ok(context.clone());
        }
        let context = AudioContext::new()?;
        *self.context.borrow_mut() = Some(context.clone());
        Ok(context)
    }

    async fn play_pattern(&self, pattern: Vec<Tone>) -> Result<(), JsValue> {
        let context = self.context()?;
        // ユーザー操作の前に作られると suspended のままなので起こしておく
        JsFuture::from(context.resume()?).await?;

        for tone in pattern {
            let oscillator = context.create_oscillator()?;
            let gain = context.create_gain()?;
            oscillator.set_type(OscillatorType::Triangle);
            oscillator.frequency().set_value(tone.frequency);
            gain.gain().set_value(self.volume * 0.3);
            oscillator.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&context.destination())?;

            oscillator.start()?;
            TimeoutFuture::new(tone.duration_ms).await;
            oscillator.stop()?;
            TimeoutFuture::new(GAP_MS).await;
        }
        Ok(())
    }
}

impl SoundProvider for TonePatternProvider {
    fn name(&self) -> &'static str {
        "tone"
    }

    fn try_play<'a>(&'a self, cue: &'a SoundCue<'a>) -> LocalBoxFuture<'a, bool> {
        let pattern = match cue.animal.filter(|animal| animals::find(animal).is_some()) {
            Some(animal) => tone_pattern(animals::sound_for(animal)),
            None => Vec::new(),
        };
        async move {
            if pattern.is_empty() {
                return false;
            }
            match self.play_pattern(pattern).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("TonePatternProvider: Web Audio failed: {:?}", e);
                    false
                }
            }
        }
        .boxed_local()
    }

    fn stop(&self) {
        // 1 音が短いので、次の音から鳴らないようにコンテキストごと止める
        if let Some(context) = self.context.borrow().as_ref() {
            if context.suspend().is_err() {
                debug!("TonePatternProvider: suspend failed");
            }
        }
    }
}
