//! Gregorian civil dates backed by a Julian day number.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A proleptic Gregorian date.
///
/// Stored as a Julian day number (JDN), so a `SolarDate` is always a real,
/// normalized calendar day: there is no way to build "February 30".
/// Serializes as an ISO 8601 string.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SolarDate {
    jdn: u32,
}

impl SolarDate {
    /// Creates a `SolarDate` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `SolarDate` from a Gregorian year, month and day.
    ///
    /// Returns `None` unless the triple names an existing day, i.e. the date
    /// converts back to exactly the same `(year, month, day)`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::SolarDate;
    ///
    /// let date = SolarDate::from_ymd(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(SolarDate::from_ymd(2023, 2, 29).is_none());
    /// ```
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let date = u32::try_from(jdn_from_gregorian(year, month, day))
            .map(Self::from_jdn)
            .ok()?;
        (date.gregorian() == (year, month, day)).then_some(date)
    }

    /// Like [`SolarDate::from_ymd`], reporting the rejected triple.
    pub fn try_from_ymd(year: i32, month: i32, day: i32) -> Result<Self, Error> {
        Self::from_ymd(year, month, day).ok_or(Error::InvalidDate { year, month, day })
    }

    /// Represents the date in Gregorian calendar, in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::SolarDate;
    ///
    /// let date = SolarDate::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }

    pub fn year(&self) -> i32 {
        self.gregorian().0
    }
    pub fn month(&self) -> i32 {
        self.gregorian().1
    }
    pub fn day(&self) -> i32 {
        self.gregorian().2
    }

    /// Formats the date in ISO 8601 format.
    ///
    /// ```
    /// use amlich::SolarDate;
    ///
    /// let date = SolarDate::from_ymd(2024, 2, 10).unwrap();
    /// assert_eq!("2024-02-10", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// ```
    /// use amlich::SolarDate;
    ///
    /// let date = SolarDate::from_ymd(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        (self.jdn % 7 + 1) as i32
    }

    /// Number of days in the month this date falls in.
    pub fn days_in_month(&self) -> i32 {
        let (y, m, _) = self.gregorian();
        days_in_month(y, m)
    }

    /// First day of the month `offset` months away from this date's month.
    pub fn first_of_month_offset(&self, offset: i32) -> Option<Self> {
        let (y, m, _) = self.gregorian();
        let idx = y * 12 + (m - 1) + offset;
        Self::from_ymd(idx.div_euclid(12), idx.rem_euclid(12) + 1, 1)
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.gregorian();
        NaiveDate::from_ymd_opt(y, m as u32, d as u32)
    }
}

fn jdn_from_gregorian(y: i32, m: i32, d: i32) -> i64 {
    let (y, m, d) = (y as i64, m as i64, d as i64);
    (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
        - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
        + d
        - 32075
}

/// Days in `month` of Gregorian `year`.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        _ => panic!("month {} not in 1..=12", month),
    }
}

/// # Panics
///
/// Panics if the result falls before JDN 0 or past `u32::MAX`.
impl Add<i32> for SolarDate {
    type Output = SolarDate;
    fn add(self, rhs: i32) -> Self::Output {
        match self.jdn.checked_add_signed(rhs) {
            Some(jdn) => SolarDate::from_jdn(jdn),
            None => panic!("JDN {} + {} out of range", self.jdn, rhs),
        }
    }
}
impl Sub<i32> for SolarDate {
    type Output = SolarDate;
    fn sub(self, rhs: i32) -> Self::Output {
        self + rhs.wrapping_neg()
    }
}
impl Sub<SolarDate> for SolarDate {
    type Output = i32;
    fn sub(self, rhs: SolarDate) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

impl From<SolarDate> for String {
    fn from(date: SolarDate) -> String {
        date.iso_gregorian()
    }
}

impl TryFrom<String> for SolarDate {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Error> {
        let date = NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| Error::ParseDate { input: s.clone() })?;
        Ok(date.into())
    }
}

/// Dates before JDN 0 (November 24, 4714 BC) saturate to JDN 0.
impl From<NaiveDate> for SolarDate {
    fn from(date: NaiveDate) -> Self {
        let jdn = jdn_from_gregorian(date.year(), date.month() as i32, date.day() as i32);
        SolarDate::from_jdn(u32::try_from(jdn).unwrap_or(0))
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}
