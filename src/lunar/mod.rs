//! Vietnamese lunar calendar
//!
//! A lunar month starts on the civil day, at UTC+7, of a new moon. Month 11
//! is the month containing the December solstice. When thirteen new moons
//! separate two month-11 starts, the first month in between that contains
//! no principal term (sun longitude a multiple of 30°) is the leap month and
//! repeats the number of the month before it.
//!
//! New moons and solar longitudes are computed on the fly, see
//! [`astronomy`].

use std::fmt as sfmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::date::SolarDate;
use crate::error::{Error, Result};

pub mod astronomy;
pub mod fmt;

/// Offset of the reference meridian (UTC+7) in minutes.
pub const TIMEZONE_MINUTES: i32 = 420;
/// First Gregorian year the converter supports.
pub const MIN_YEAR: i32 = 1900;
/// Last Gregorian year the converter supports.
pub const MAX_YEAR: i32 = 2100;
/// Half-width of the window scanned when direct inversion fails.
pub const FALLBACK_WINDOW_DAYS: i32 = 45;

/// Month name, `Common` for a regular month, `Leap` for a leap month.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// Month number, regular or leap.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// `true` for a leap month.
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    fn new(num: u32, is_leap: bool) -> Self {
        if is_leap {
            Month::Leap(num)
        } else {
            Month::Common(num)
        }
    }
}

/// A date in the lunar calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    pub fn new(day: u32, month: u32, year: i32, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }
    pub fn month_name(&self) -> Month {
        Month::new(self.month, self.is_leap_month)
    }
}

impl sfmt::Display for LunarDate {
    fn fmt(&self, f: &mut sfmt::Formatter<'_>) -> sfmt::Result {
        let leap = if self.is_leap_month { " nhuận" } else { "" };
        write!(f, "{}/{}{}/{}", self.day, self.month, leap, self.year)
    }
}

/// First day of a lunar month.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    pub month: Month,
    pub date: SolarDate,
}

/// The months from one month 11 up to the next, i.e. the period between two
/// December solstices on which the leap rule operates.
///
/// `year` is the Gregorian year holding most of the period; months 11 and 12
/// at its start belong to lunar year `year - 1`.
///
/// ```
/// use amlich::SolarDate;
/// use amlich::lunar::{SolsticeYear, Month::*};
///
/// let sy = SolsticeYear::new(2025).unwrap();
/// assert_eq!(Some(Leap(6)), sy.leap_month());
/// let date = SolarDate::from_ymd(2025, 7, 25).unwrap();
/// assert_eq!((2025, Leap(6), 1), sy.ymd_for(date).map(|l| (l.year, l.month_name(), l.day)).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct SolsticeYear {
    pub year: i32,
    /// Every month start, plus the next month 11 marking the end.
    pub months: Vec<NewMoon>,
}

/// The date lies outside this solstice year, before or after it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherYear {
    Before,
    After,
}

impl SolsticeYear {
    /// Builds the months for `year` at the Vietnamese meridian.
    ///
    /// Returns `None` if `year` is outside the supported range.
    pub fn new(year: i32) -> Option<Self> {
        Self::with_timezone(year, TIMEZONE_MINUTES)
    }

    /// Builds the months for `year` with month starts taken in a timezone
    /// `tz_offset_minutes` east of UTC.
    pub fn with_timezone(year: i32, tz_offset_minutes: i32) -> Option<Self> {
        use Month::*;

        if !(MIN_YEAR..=MAX_YEAR + 1).contains(&year) {
            return None;
        }
        let a11 = astronomy::month11_start(year - 1, tz_offset_minutes)?;
        let b11 = astronomy::month11_start(year, tz_offset_minutes)?;
        let k0 = astronomy::lunation_index(a11).round() as i64;
        let count = ((b11 - a11) as f64 / astronomy::SYNODIC_MONTH).round() as usize;
        let starts: Vec<_> = (0..=count as i64)
            .map(|i| astronomy::new_moon_day(k0 + i, tz_offset_minutes))
            .collect();
        if starts.first() != Some(&a11) || starts.last() != Some(&b11) {
            error!(year, %a11, %b11, "new moons do not line up with month 11");
            return None;
        }

        let sector = |i: usize| astronomy::sun_sector(starts[i], tz_offset_minutes);
        let leap = match count {
            12 => None,
            13 => match (1..count).find(|&i| sector(i) == sector(i + 1)) {
                Some(i) => Some(i),
                None => {
                    error!(year, "13 months between solstices but none lacks a principal term");
                    return None;
                }
            },
            _ => {
                error!(year, count, "unexpected number of months between solstices");
                return None;
            }
        };

        let mut months = Vec::with_capacity(starts.len());
        let mut month = 10;
        for (i, &date) in starts.iter().enumerate() {
            if leap == Some(i) {
                months.push(NewMoon {
                    month: Leap(month),
                    date,
                });
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Common(month),
                date,
            });
        }

        Some(SolsticeYear { year, months })
    }

    /// Finds the solstice year containing `date`.
    ///
    /// Returns `None` outside the supported range.
    ///
    /// ```
    /// use amlich::SolarDate;
    /// use amlich::lunar::SolsticeYear;
    ///
    /// let date = SolarDate::from_ymd(2024, 12, 31).unwrap();
    /// assert_eq!(2025, SolsticeYear::from_date(date).unwrap().year);
    /// ```
    pub fn from_date(date: SolarDate) -> Option<Self> {
        let mut y = date.year();
        loop {
            let sy = Self::new(y)?;
            match sy.ymd_for(date) {
                Ok(_) => return Some(sy),
                Err(OtherYear::Before) => y -= 1,
                Err(OtherYear::After) => y += 1,
            }
        }
    }

    /// The lunar date of `date`, or on which side of this solstice year the
    /// date lies.
    pub fn ymd_for(&self, date: SolarDate) -> Result<LunarDate, OtherYear> {
        let (Some(first), Some(last)) = (self.months.first(), self.months.last()) else {
            return Err(OtherYear::After);
        };
        if date < first.date {
            return Err(OtherYear::Before);
        } else if date >= last.date {
            return Err(OtherYear::After);
        }

        let m = self
            .months
            .iter()
            .take_while(|m| m.date <= date)
            .last()
            .unwrap_or(first);
        let day = (date - m.date + 1) as u32;
        let year = if m.month.num() >= 11 {
            self.year - 1
        } else {
            self.year
        };
        Ok(LunarDate::new(day, m.month.num(), year, m.month.is_leap()))
    }

    /// The leap month of this solstice year, if it has one.
    pub fn leap_month(&self) -> Option<Month> {
        self.months[..self.months.len().saturating_sub(1)]
            .iter()
            .map(|m| m.month)
            .find(Month::is_leap)
    }

    /// First day of `month`, excluding the end marker.
    pub fn month_start(&self, month: Month) -> Option<SolarDate> {
        self.position(month).map(|i| self.months[i].date)
    }

    /// Length of `month` in days, 29 or 30.
    pub fn month_length(&self, month: Month) -> Option<u32> {
        let i = self.position(month)?;
        Some((self.months[i + 1].date - self.months[i].date) as u32)
    }

    fn position(&self, month: Month) -> Option<usize> {
        let n = self.months.len().checked_sub(1)?;
        self.months[..n].iter().position(|m| m.month == month)
    }
}

/// Converts a Gregorian date into the lunar calendar.
///
/// Total over 1900-01-01 through 2100-12-31; other years give
/// [`Error::OutOfRange`].
///
/// ```
/// use amlich::SolarDate;
/// use amlich::lunar::{solar_to_lunar, LunarDate};
///
/// let date = SolarDate::from_ymd(2024, 2, 10).unwrap();
/// assert_eq!(LunarDate::new(1, 1, 2024, false), solar_to_lunar(date).unwrap());
/// ```
pub fn solar_to_lunar(date: SolarDate) -> Result<LunarDate> {
    let year = date.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::OutOfRange { year });
    }
    SolsticeYear::from_date(date)
        .and_then(|sy| sy.ymd_for(date).ok())
        .ok_or_else(|| {
            error!(%date, "no solstice year covers an in-range date");
            Error::OutOfRange { year }
        })
}

/// Converts a lunar date into the Gregorian calendar.
///
/// Returns `None` if no such lunar date exists: a leap month the year does
/// not have, day 30 of a 29-day month, or a date outside the supported
/// range. Callers unsure whether a month is leap should retry with
/// `is_leap_month` set.
///
/// Months 11 and 12 of lunar year 1899 are accepted too, since January 1900
/// falls in them; only their days on or after 1900-01-01 convert.
///
/// ```
/// use amlich::lunar::lunar_to_solar;
///
/// let date = lunar_to_solar(15, 8, 2024, false).unwrap();
/// assert_eq!("2024-09-17", date.iso_gregorian());
/// assert_eq!(None, lunar_to_solar(1, 8, 2024, true));
/// assert_eq!("1900-01-01", lunar_to_solar(1, 12, 1899, false).unwrap().iso_gregorian());
/// ```
pub fn lunar_to_solar(day: u32, month: u32, year: i32, is_leap_month: bool) -> Option<SolarDate> {
    let tail_of_1899 = year == MIN_YEAR - 1 && month >= 11;
    if !is_valid_lunar_date(day, month, if tail_of_1899 { MIN_YEAR } else { year }) {
        return None;
    }
    let wanted = LunarDate::new(day, month, year, is_leap_month);
    let candidate = direct_inverse(wanted, TIMEZONE_MINUTES);
    if let Some(date) = candidate {
        if solar_to_lunar(date).ok() == Some(wanted) {
            return Some(date);
        }
    }

    let around = candidate.or_else(|| estimate(wanted))?;
    warn!(%wanted, %around, "direct inversion unverified, scanning nearby days");
    let found = fallback_search(wanted, around);
    debug!(%wanted, ?found, "fallback search finished");
    found
}

/// Coarse bounds check: day `1..=30`, month `1..=12`, year `1900..=2100`.
///
/// Month lengths vary by year, so passing this check does not mean the date
/// exists; [`lunar_to_solar`] decides that.
pub fn is_valid_lunar_date(day: u32, month: u32, year: i32) -> bool {
    (1..=30).contains(&day) && (1..=12).contains(&month) && (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// `true` if `(day, month, year)` names an existing Gregorian day.
pub fn is_valid_solar_date(day: i32, month: i32, year: i32) -> bool {
    SolarDate::from_ymd(year, month, day).is_some()
}

/// The leap month of lunar year `lunar_year`, if it has one.
///
/// ```
/// use amlich::lunar::leap_month;
///
/// assert_eq!(Some(6), leap_month(2025));
/// assert_eq!(None, leap_month(2024));
/// ```
pub fn leap_month(lunar_year: i32) -> Option<u32> {
    let own = SolsticeYear::new(lunar_year)
        .and_then(|sy| sy.leap_month())
        .filter(|m| m.num() < 11);
    let tail = || {
        SolsticeYear::new(lunar_year + 1)
            .and_then(|sy| sy.leap_month())
            .filter(|m| m.num() >= 11)
    };
    own.or_else(tail).map(|m| m.num())
}

/// Lunation arithmetic: counts new moons from the month 11 preceding the
/// wanted month, skipping over the leap month when there is one.
fn direct_inverse(wanted: LunarDate, tz: i32) -> Option<SolarDate> {
    let LunarDate {
        year,
        month,
        day,
        is_leap_month,
    } = wanted;
    let (a11, b11) = if month < 11 {
        (
            astronomy::month11_start(year - 1, tz)?,
            astronomy::month11_start(year, tz)?,
        )
    } else {
        (
            astronomy::month11_start(year, tz)?,
            astronomy::month11_start(year + 1, tz)?,
        )
    };
    let k = astronomy::lunation_index(a11).round() as i64;
    let mut off = (month as i64 + 1) % 12;
    if b11 - a11 > 365 {
        let leap_off = leap_month_offset(k, tz);
        let leap_month = ((leap_off + 9) % 12 + 1) as u32;
        if is_leap_month && month != leap_month {
            return None;
        }
        if is_leap_month || off >= leap_off {
            off += 1;
        }
    } else if is_leap_month {
        return None;
    }
    Some(astronomy::new_moon_day(k + off, tz) + (day as i32 - 1))
}

/// Offset, from the month 11 starting at lunation `k`, of the first month
/// without a principal term.
fn leap_month_offset(k: i64, tz: i32) -> i64 {
    let sector = |i: i64| astronomy::sun_sector(astronomy::new_moon_day(k + i, tz), tz);
    let mut last = sector(1);
    for i in 2..14 {
        let arc = sector(i);
        if arc == last {
            return i - 1;
        }
        last = arc;
    }
    13
}

/// Rough solar date of a lunar date: the lunar new year falls between
/// January 21 and February 20.
fn estimate(wanted: LunarDate) -> Option<SolarDate> {
    let new_year = SolarDate::from_ymd(wanted.year, 1, 21)? + 15;
    let months = ((wanted.month - 1) as f64 * astronomy::SYNODIC_MONTH) as i32;
    Some(new_year + months + (wanted.day as i32 - 1))
}

/// Scans `around ± FALLBACK_WINDOW_DAYS`, nearest days first, for a day
/// converting exactly to `wanted`.
fn fallback_search(wanted: LunarDate, around: SolarDate) -> Option<SolarDate> {
    (0..=FALLBACK_WINDOW_DAYS)
        .flat_map(|off| {
            let later = Some(around + off);
            let earlier = (off > 0).then(|| around - off);
            later.into_iter().chain(earlier)
        })
        .find(|&date| solar_to_lunar(date).ok() == Some(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: i32, d: i32) -> SolarDate {
        SolarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn from_date() {
        let dataset = [
            (2024, (2024, 1, 1)),
            (2024, (2024, 11, 30)),
            (2025, (2024, 12, 1)),
            (2025, (2025, 12, 19)),
            (2026, (2025, 12, 20)),
        ];
        for (std, (y, m, d)) in dataset {
            assert_eq!(
                Some(std),
                SolsticeYear::from_date(date(y, m, d)).map(|sy| sy.year),
                "{y:04}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn months() {
        let sy = SolsticeYear::new(2024).unwrap();
        let stds = [
            (11, "2023-12-13"),
            (12, "2024-01-11"),
            (1, "2024-02-10"),
            (2, "2024-03-10"),
            (3, "2024-04-09"),
            (4, "2024-05-08"),
            (5, "2024-06-06"),
            (6, "2024-07-06"),
            (7, "2024-08-04"),
            (8, "2024-09-03"),
            (9, "2024-10-03"),
            (10, "2024-11-01"),
            (11, "2024-12-01"),
        ];
        assert_eq!(stds.len(), sy.months.len());
        for (std, month) in stds.iter().zip(&sy.months) {
            assert_eq!(
                (Month::Common(std.0), std.1.to_owned()),
                (month.month, month.date.iso_gregorian())
            );
        }
        assert_eq!(None, sy.leap_month());
    }

    #[test]
    fn leap_months() {
        let stds = [
            (11, "2016-11-29"),
            (12, "2016-12-29"),
            (1, "2017-01-28"),
            (2, "2017-02-26"),
            (3, "2017-03-28"),
            (4, "2017-04-26"),
            (5, "2017-05-26"),
            (6, "2017-06-24"),
            (-6, "2017-07-23"),
            (7, "2017-08-22"),
            (8, "2017-09-20"),
            (9, "2017-10-20"),
            (10, "2017-11-18"),
            (11, "2017-12-18"),
        ];
        let sy = SolsticeYear::new(2017).unwrap();
        for (std, month) in stds.iter().zip(&sy.months) {
            let std_month = if std.0 > 0 {
                Month::Common(std.0 as u32)
            } else {
                Month::Leap(-std.0 as u32)
            };
            assert_eq!(
                (std_month, std.1.to_owned()),
                (month.month, month.date.iso_gregorian())
            );
        }
        assert_eq!(stds.len(), sy.months.len());
        assert_eq!(Some(Month::Leap(6)), sy.leap_month());
        assert_eq!(Some(29), sy.month_length(Month::Common(6)));
        assert_eq!(Some(30), sy.month_length(Month::Leap(6)));
        assert_eq!(None, sy.month_length(Month::Leap(7)));
    }

    #[test]
    fn dates() {
        use OtherYear::*;
        let data = [
            ((2016, 11, 29), Ok(LunarDate::new(1, 11, 2016, false))),
            ((2017, 1, 27), Ok(LunarDate::new(30, 12, 2016, false))),
            ((2017, 1, 28), Ok(LunarDate::new(1, 1, 2017, false))),
            ((2017, 7, 22), Ok(LunarDate::new(29, 6, 2017, false))),
            ((2017, 7, 23), Ok(LunarDate::new(1, 6, 2017, true))),
            ((2017, 12, 17), Ok(LunarDate::new(30, 10, 2017, false))),
            ((2016, 11, 28), Err(Before)),
            ((2017, 12, 18), Err(After)),
        ];
        let sy = SolsticeYear::new(2017).unwrap();
        for ((y, m, d), std) in data {
            assert_eq!(std, sy.ymd_for(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn solar_to_lunar_known_dates() {
        let data = [
            ((2024, 2, 10), LunarDate::new(1, 1, 2024, false)),
            ((2024, 9, 17), LunarDate::new(15, 8, 2024, false)),
            ((2000, 1, 1), LunarDate::new(25, 11, 1999, false)),
            ((2024, 12, 31), LunarDate::new(1, 12, 2024, false)),
            ((2025, 1, 28), LunarDate::new(29, 12, 2024, false)),
            ((2025, 1, 29), LunarDate::new(1, 1, 2025, false)),
            ((2025, 7, 24), LunarDate::new(30, 6, 2025, false)),
            ((2025, 7, 25), LunarDate::new(1, 6, 2025, true)),
            ((2025, 8, 23), LunarDate::new(1, 7, 2025, false)),
            ((2026, 2, 17), LunarDate::new(1, 1, 2026, false)),
            ((2007, 2, 17), LunarDate::new(1, 1, 2007, false)),
            // Chinese New Year fell a month later, on 1985-02-20
            ((1985, 1, 21), LunarDate::new(1, 1, 1985, false)),
            ((1985, 3, 21), LunarDate::new(1, 2, 1985, true)),
            ((1900, 1, 1), LunarDate::new(1, 12, 1899, false)),
        ];
        for ((y, m, d), std) in data {
            assert_eq!(Ok(std), solar_to_lunar(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            Err(Error::OutOfRange { year: 1899 }),
            solar_to_lunar(date(1899, 12, 31))
        );
        assert_eq!(
            Err(Error::OutOfRange { year: 2101 }),
            solar_to_lunar(date(2101, 1, 1))
        );
        assert!(solar_to_lunar(date(1900, 1, 1)).is_ok());
        assert!(solar_to_lunar(date(2100, 12, 31)).is_ok());
    }

    #[test]
    fn first_days_of_1900() {
        for d in 1..=31 {
            let day = date(1900, 1, d);
            let l = solar_to_lunar(day).unwrap();
            assert_eq!(
                Some(day),
                lunar_to_solar(l.day, l.month, l.year, l.is_leap_month),
                "{l}"
            );
        }
        let l = solar_to_lunar(date(1900, 1, 1)).unwrap();
        assert_eq!(
            Some(date(1900, 1, 1)),
            direct_inverse(l, TIMEZONE_MINUTES)
        );
    }

    #[test]
    fn lunar_to_solar_known_dates() {
        let data = [
            ((15, 8, 2024, false), Some("2024-09-17")),
            ((1, 1, 2025, false), Some("2025-01-29")),
            ((1, 6, 2025, true), Some("2025-07-25")),
            ((30, 6, 2025, false), Some("2025-07-24")),
            ((29, 1, 2024, false), Some("2024-03-09")),
            ((1, 11, 2024, false), Some("2024-12-01")),
            ((1, 12, 2024, false), Some("2024-12-31")),
            // no such dates
            ((1, 6, 2024, true), None),
            ((1, 5, 2025, true), None),
            ((30, 1, 2024, false), None),
            ((30, 12, 2024, false), None),
            ((31, 1, 2024, false), None),
            ((1, 13, 2024, false), None),
            ((1, 1, 1899, false), None),
            ((1, 10, 1899, false), None),
            // January 1900 lies in lunar 1899
            ((1, 12, 1899, false), Some("1900-01-01")),
            ((30, 12, 1899, false), Some("1900-01-30")),
            ((1, 1, 1900, false), Some("1900-01-31")),
            ((1, 11, 1899, false), None),
        ];
        for ((d, m, y, leap), std) in data {
            assert_eq!(
                std.map(str::to_owned),
                lunar_to_solar(d, m, y, leap).map(|s| s.iso_gregorian()),
                "{d}/{m}/{y} leap={leap}"
            );
        }
    }

    #[test]
    fn direct_inverse_agrees_with_table() {
        let sy = SolsticeYear::new(2017).unwrap();
        for nm in &sy.months[..sy.months.len() - 1] {
            let lunar = sy.ymd_for(nm.date).unwrap();
            assert_eq!(Some(nm.date), direct_inverse(lunar, TIMEZONE_MINUTES), "{lunar}");
        }
    }

    #[test]
    fn fallback_finds_dates_far_from_guess() {
        let wanted = LunarDate::new(15, 8, 2024, false);
        let around = date(2024, 8, 10);
        assert_eq!(Some(date(2024, 9, 17)), fallback_search(wanted, around));
        let missing = LunarDate::new(30, 1, 2024, false);
        assert_eq!(None, fallback_search(missing, date(2024, 3, 10)));
    }

    #[test]
    fn leap_month_by_lunar_year() {
        for (year, std) in [(2017, Some(6)), (2020, Some(4)), (2023, Some(2)), (2024, None), (2025, Some(6)), (1984, None), (1985, Some(2))] {
            assert_eq!(std, leap_month(year), "{year}");
        }
    }

    #[test]
    fn validators() {
        assert!(is_valid_lunar_date(30, 12, 2100));
        assert!(!is_valid_lunar_date(0, 1, 2000));
        assert!(!is_valid_lunar_date(1, 13, 2000));
        assert!(!is_valid_lunar_date(1, 1, 1899));
        assert!(is_valid_solar_date(29, 2, 2024));
        assert!(!is_valid_solar_date(30, 2, 2024));
        assert!(!is_valid_solar_date(31, 4, 2024));
    }

    #[test]
    fn display() {
        assert_eq!("1/6 nhuận/2025", LunarDate::new(1, 6, 2025, true).to_string());
        assert_eq!("15/8/2024", LunarDate::new(15, 8, 2024, false).to_string());
    }
}
