//! The Vietnamese lunar calendar (âm lịch).
//!
//! Converts between Gregorian dates and the lunar calendar as reckoned at
//! UTC+7, names days, months and years by their Can Chi, and annotates days
//! with the traditional almanac entries: solar terms, the presiding deity,
//! Trực, good hours and conflicting ages. Conversion covers the years 1900
//! through 2100, with new moons and solar longitudes computed on the fly.
//!
//! # Examples
//!
//! Basic usage with [`SolarDate`]:
//!
//! ```
//! use amlich::SolarDate;
//!
//! let date = SolarDate::from_ymd(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Lunar calendar and Can Chi:
//!
//! ```
//! use amlich::{lunar, sexagenary, SolarDate};
//!
//! let date = SolarDate::from_ymd(2024, 2, 10).unwrap();
//! let lunar = lunar::solar_to_lunar(date).unwrap();
//!
//! assert_eq!((1, 1, 2024), (lunar.day, lunar.month, lunar.year));
//! assert_eq!("Giáp Thìn", sexagenary::year_name(lunar.year));
//! assert_eq!(Some(date), lunar::lunar_to_solar(1, 1, 2024, false));
//! ```
//!
//! Day annotations:
//!
//! ```
//! use amlich::{day_quality, hours, sexagenary, SolarDate};
//!
//! let date = SolarDate::from_ymd(2024, 9, 17).unwrap();
//! let branch = sexagenary::day_stem_branch(date).branch;
//! let info = day_quality::detailed_day_info(date, branch, 8).unwrap();
//!
//! assert_eq!("Bạch Hổ", info.deity.name());
//! assert!(info.is_inauspicious());
//! assert_eq!(6, hours::good_hours_for_day_branch(branch).iter().filter(|h| h.is_auspicious).count());
//! ```
//!
//! The crate logs through [`tracing`] and never installs a subscriber.

pub mod config;
pub mod date;
pub mod day_quality;
pub mod error;
pub mod events;
pub mod hours;
pub mod lunar;
pub mod navigator;
pub mod sexagenary;
pub mod solar_terms;
pub mod speech;
pub mod time_scales;

pub use config::Config;
pub use date::{SolarDate, YearType};
pub use error::{Error, Result};
pub use lunar::{LunarDate, Month};
pub use sexagenary::{Branch, Stem, StemBranch};
