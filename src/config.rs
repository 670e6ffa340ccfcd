//! Runtime configuration.

use std::path::Path;

use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::SolarDate;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Offset of local civil time from UTC, minutes east.
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_minutes: i32,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

fn default_timezone_offset() -> i32 {
    crate::lunar::TIMEZONE_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone_offset_minutes: default_timezone_offset(),
            events: EventsConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Config(format!("{}: {}", path.display(), e))),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Wall-clock time at the configured offset.
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc() + Duration::minutes(self.timezone_offset_minutes as i64)
    }

    /// Today's date at the configured offset.
    pub fn today(&self) -> SolarDate {
        self.now().date().into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// How far ahead upcoming events are listed, in days.
    #[serde(default = "default_max_days")]
    pub max_days: i32,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_max_days() -> i32 {
    30
}
fn default_limit() -> usize {
    10
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default = "default_voice_name")]
    pub name: String,
    #[serde(default = "default_audio_encoding")]
    pub audio_encoding: String,
}

fn default_language_code() -> String {
    "vi-VN".to_string()
}
fn default_voice_name() -> String {
    "vi-VN-Wavenet-A".to_string()
}
fn default_audio_encoding() -> String {
    "MP3".to_string()
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            name: default_voice_name(),
            audio_encoding: default_audio_encoding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(Config::default(), config);
        assert_eq!(420, config.timezone_offset_minutes);
        assert_eq!(30, config.events.max_days);
        assert_eq!(10, config.events.limit);
        assert_eq!("vi-VN-Wavenet-A", config.voice.name);
    }

    #[test]
    fn partial_override() {
        let config = Config::from_toml_str(
            r#"
            timezone_offset_minutes = 480

            [events]
            limit = 3

            [voice]
            name = "vi-VN-Standard-B"
            "#,
        )
        .unwrap();
        assert_eq!(480, config.timezone_offset_minutes);
        assert_eq!(3, config.events.limit);
        assert_eq!(30, config.events.max_days);
        assert_eq!("vi-VN-Standard-B", config.voice.name);
        assert_eq!("MP3", config.voice.audio_encoding);
    }

    #[test]
    fn bad_toml() {
        let err = Config::from_toml_str("timezone_offset_minutes = \"seven\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn round_trip_and_missing_file() {
        let config = Config::default();
        let s = config.to_toml_string().unwrap();
        assert_eq!(config, Config::from_toml_str(&s).unwrap());
        let missing = Config::load("/nonexistent/amlich/config.toml").unwrap();
        assert_eq!(Config::default(), missing);
    }
}
