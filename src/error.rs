//! Error type shared by the whole crate.
//!
//! Dates that simply do not exist in the lunar calendar are not errors;
//! they come back as `None` from the conversion functions.

use thiserror::Error;

use crate::sexagenary::Branch;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The year lies outside the range the converter supports.
    #[error("year {year} outside supported range 1900..=2100")]
    OutOfRange { year: i32 },

    /// The triple is not a Gregorian calendar date.
    #[error("invalid solar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: i32, day: i32 },

    /// The string is not an ISO 8601 `YYYY-MM-DD` date.
    #[error("not an ISO date: {input:?}")]
    ParseDate { input: String },

    /// No deity is assigned to this day branch and lunar month.
    #[error("no deity for day branch {branch} in lunar month {month}")]
    NoDeity { branch: Branch, month: u32 },

    #[error("config error: {0}")]
    Config(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    /// Reported by [`KeyValueStore`](crate::speech::KeyValueStore)
    /// implementations backed by real storage.
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Synthesis(e.to_string())
    }
}
