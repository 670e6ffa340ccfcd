//! Spoken announcements of today's date.
//!
//! The synthesis service and the key-value store are outside this crate;
//! callers plug them in through [`Synthesizer`] and [`KeyValueStore`].
//! Audio is cached per day, so each announcement is synthesized at most
//! once a day.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::VoiceConfig;
use crate::date::SolarDate;
use crate::error::{Error, Result};
use crate::lunar;

/// Request body of a text-to-speech call.
///
/// ```
/// use amlich::config::VoiceConfig;
/// use amlich::speech::SynthesisRequest;
///
/// let req = SynthesisRequest::new("Xin chào", &VoiceConfig::default());
/// assert_eq!(
///     r#"{"input":{"text":"Xin chào"},"voice":{"languageCode":"vi-VN","name":"vi-VN-Wavenet-A"},"audioConfig":{"audioEncoding":"MP3"}}"#,
///     req.to_json().unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelection,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: String,
}

impl SynthesisRequest {
    pub fn new(text: &str, voice: &VoiceConfig) -> Self {
        Self {
            input: SynthesisInput {
                text: text.to_owned(),
            },
            voice: VoiceSelection {
                language_code: voice.language_code.clone(),
                name: voice.name.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: voice.audio_encoding.clone(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Response body of a text-to-speech call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResponse {
    /// Base64-encoded audio.
    #[serde(default)]
    pub audio_content: Option<String>,
}

impl SynthesisResponse {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// A text-to-speech backend.
pub trait Synthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResponse>;
}

/// String storage surviving between runs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// A [`KeyValueStore`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Which announcement.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SpeechKind {
    Solar,
    Lunar,
}

impl fmt::Display for SpeechKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpeechKind::Solar => "solar",
            SpeechKind::Lunar => "lunar",
        })
    }
}

/// Store key of the audio for `kind` on `date`, e.g. `voice_solar_2024-09-17`.
/// The day it was recorded for is kept under the same key suffixed `_date`.
pub fn cache_key(kind: SpeechKind, date: SolarDate) -> String {
    format!("voice_{}_{}", kind, date.iso_gregorian())
}

/// Synthesizes announcements, reusing audio already stored for the day.
pub struct SpeechCache<S, T> {
    store: S,
    synthesizer: T,
    voice: VoiceConfig,
}

impl<S: KeyValueStore, T: Synthesizer> SpeechCache<S, T> {
    pub fn new(store: S, synthesizer: T, voice: VoiceConfig) -> Self {
        Self {
            store,
            synthesizer,
            voice,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Base64 audio of `text` as the `kind` announcement for `date`.
    pub fn speak(&mut self, kind: SpeechKind, date: SolarDate, text: &str) -> Result<String> {
        let key = cache_key(kind, date);
        let date_key = format!("{key}_date");
        let day = date.iso_gregorian();
        if let Some(audio) = self.store.get(&key)? {
            if self.store.get(&date_key)?.as_deref() == Some(day.as_str()) {
                debug!(%kind, %date, "using cached audio");
                return Ok(audio);
            }
        }

        let request = SynthesisRequest::new(text, &self.voice);
        let audio = match self.synthesizer.synthesize(&request)?.audio_content {
            Some(audio) if !audio.is_empty() => audio,
            _ => {
                error!(%kind, %date, "synthesizer returned no audio");
                return Err(Error::Synthesis("no audio content".to_owned()));
            }
        };
        self.store.set(&key, &audio)?;
        self.store.set(&date_key, &day)?;
        Ok(audio)
    }

    /// Announces the Gregorian date.
    pub fn speak_solar(&mut self, date: SolarDate) -> Result<String> {
        let text = lunar::fmt::spoken_solar(date);
        self.speak(SpeechKind::Solar, date, &text)
    }

    /// Announces the lunar date of `date`.
    pub fn speak_lunar(&mut self, date: SolarDate) -> Result<String> {
        let text = lunar::fmt::spoken_lunar(lunar::solar_to_lunar(date)?);
        self.speak(SpeechKind::Lunar, date, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        texts: RefCell<Vec<String>>,
        silent: bool,
    }

    impl Synthesizer for &Recorder {
        fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResponse> {
            self.texts.borrow_mut().push(request.input.text.clone());
            Ok(SynthesisResponse {
                audio_content: (!self.silent).then(|| format!("audio:{}", request.input.text)),
            })
        }
    }

    fn ymd(y: i32, m: i32, d: i32) -> SolarDate {
        SolarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn caches_per_day() {
        let recorder = Recorder::default();
        let mut cache = SpeechCache::new(MemoryStore::new(), &recorder, VoiceConfig::default());
        let date = ymd(2024, 9, 17);
        let first = cache.speak_lunar(date).unwrap();
        let second = cache.speak_lunar(date).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            vec!["Âm lịch hôm nay là ngày 15 Tháng Tám năm Giáp Thìn".to_owned()],
            *recorder.texts.borrow()
        );
        assert_eq!(
            Some("2024-09-17".to_owned()),
            cache.store().get("voice_lunar_2024-09-17_date").unwrap()
        );

        cache.speak_solar(date).unwrap();
        cache.speak_lunar(date + 1).unwrap();
        assert_eq!(3, recorder.texts.borrow().len());
        assert_eq!(6, cache.store().len());
    }

    #[test]
    fn stale_date_is_refreshed() {
        let recorder = Recorder::default();
        let mut store = MemoryStore::new();
        let date = ymd(2024, 9, 17);
        let key = cache_key(SpeechKind::Solar, date);
        store.set(&key, "old").unwrap();
        store.set(&format!("{key}_date"), "2024-09-16").unwrap();
        let mut cache = SpeechCache::new(store, &recorder, VoiceConfig::default());
        let audio = cache.speak(SpeechKind::Solar, date, "xin chào").unwrap();
        assert_eq!("audio:xin chào", audio);
        assert_eq!(Some("audio:xin chào".to_owned()), cache.store().get(&key).unwrap());
    }

    #[test]
    fn missing_audio() {
        let recorder = Recorder {
            silent: true,
            ..Default::default()
        };
        let mut cache = SpeechCache::new(MemoryStore::new(), &recorder, VoiceConfig::default());
        let err = cache.speak_solar(ymd(2024, 9, 17)).unwrap_err();
        assert!(matches!(err, Error::Synthesis(_)));
        assert!(cache.store().is_empty());
    }

    #[test]
    fn response_json() {
        let resp = SynthesisResponse::from_json(r#"{"audioContent": "SUQz"}"#).unwrap();
        assert_eq!(Some("SUQz".to_owned()), resp.audio_content);
        assert_eq!(None, SynthesisResponse::from_json("{}").unwrap().audio_content);
        assert!(SynthesisResponse::from_json("[").is_err());
    }

    #[test]
    fn lunar_out_of_range() {
        let recorder = Recorder::default();
        let mut cache = SpeechCache::new(MemoryStore::new(), &recorder, VoiceConfig::default());
        let err = cache.speak_lunar(ymd(2200, 1, 1)).unwrap_err();
        assert_eq!(Error::OutOfRange { year: 2200 }, err);
    }
}
