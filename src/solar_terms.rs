//! The 24 solar terms (tiết khí).
//!
//! [`solar_terms_in_year`] is the almanac rule of thumb: Lập xuân on
//! February 4, then one term every 15.2 days. It is only accurate to a day
//! in spring: the terms are not evenly spaced, so the rule runs up to four
//! days early from August through November.
//! [`astronomical_terms_in_year`] finds the actual day the sun crosses each
//! 15° boundary.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::date::SolarDate;
use crate::lunar::astronomy;
use crate::lunar::fmt::SOLAR_TERMS;

/// Average length of a term, in days.
const TERM_DAYS: f64 = 15.2;
/// Sun longitude of Lập xuân.
const FIRST_TERM_LONGITUDE: f64 = 315.0;
const SEARCH_WINDOW_DAYS: i32 = 7;

/// Tiết (sectional) terms are the even ones starting from Lập xuân, khí
/// (principal) terms the odd ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum TermKind {
    Tiet,
    Khi,
}

impl TermKind {
    fn of_index(i: usize) -> Self {
        if i % 2 == 0 { TermKind::Tiet } else { TermKind::Khi }
    }
    pub fn name(&self) -> &'static str {
        match self {
            TermKind::Tiet => "tiết",
            TermKind::Khi => "khí",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct SolarTerm {
    /// Position in the year, `0` being Lập xuân.
    pub index: usize,
    pub name: &'static str,
    pub date: SolarDate,
    pub kind: TermKind,
}

impl SolarTerm {
    fn new(index: usize, date: SolarDate) -> Self {
        Self {
            index,
            name: SOLAR_TERMS[index],
            date,
            kind: TermKind::of_index(index),
        }
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date)
    }
}

fn spring_start(year: i32) -> Option<SolarDate> {
    SolarDate::from_ymd(year, 2, 4)
}

fn approximate_date(spring: SolarDate, index: usize) -> SolarDate {
    spring + (index as f64 * TERM_DAYS).trunc() as i32
}

/// The 24 terms beginning in `year`, Lập xuân first. The last two terms
/// fall in January of the following year.
///
/// Returns `None` only for years without a representable February 4.
///
/// # Example
///
/// ```
/// use amlich::solar_terms;
///
/// let terms = solar_terms::solar_terms_in_year(2024).unwrap();
/// assert_eq!("Lập xuân", terms[0].name);
/// assert_eq!("2024-02-04", terms[0].date.iso_gregorian());
/// assert_eq!("2024-03-20", terms[3].date.iso_gregorian());
/// ```
pub fn solar_terms_in_year(year: i32) -> Option<[SolarTerm; 24]> {
    let spring = spring_start(year)?;
    Some(std::array::from_fn(|i| {
        SolarTerm::new(i, approximate_date(spring, i))
    }))
}

/// The term in effect on `date`: the latest term of `date`'s year that has
/// already begun. Before Lập xuân this is the previous year's Đại hàn.
pub fn current_or_next_term(date: SolarDate) -> Option<SolarTerm> {
    let year = date.year();
    let terms = solar_terms_in_year(year)?;
    if let Some(term) = terms.iter().rev().find(|t| t.date <= date) {
        return Some(*term);
    }
    trace!(%date, "before Lập xuân, using last term of {}", year - 1);
    solar_terms_in_year(year - 1).map(|terms| terms[23])
}

/// The term starting exactly on `date`, if any.
///
/// ```
/// use amlich::{solar_terms, SolarDate};
///
/// let date = SolarDate::from_ymd(2024, 2, 4).unwrap();
/// assert_eq!("Lập xuân", solar_terms::is_term_day(date).unwrap().name);
/// assert!(solar_terms::is_term_day(date + 1).is_none());
/// ```
pub fn is_term_day(date: SolarDate) -> Option<SolarTerm> {
    let year = date.year();
    [year, year - 1]
        .into_iter()
        .filter_map(solar_terms_in_year)
        .flat_map(|terms| terms.into_iter())
        .find(|t| t.date == date)
}

/// Like [`solar_terms_in_year`], but with each term on the day (UTC+7)
/// during which the apparent sun longitude reaches its boundary.
pub fn astronomical_terms_in_year(year: i32) -> Option<Vec<SolarTerm>> {
    astronomical_terms_with_timezone(year, crate::lunar::TIMEZONE_MINUTES)
}

pub fn astronomical_terms_with_timezone(year: i32, tz_offset_minutes: i32) -> Option<Vec<SolarTerm>> {
    let spring = spring_start(year)?;
    (0..24)
        .map(|i| {
            let target = (FIRST_TERM_LONGITUDE + 15.0 * i as f64).rem_euclid(360.0);
            let around = approximate_date(spring, i);
            astronomy::crossing_day(target, around, SEARCH_WINDOW_DAYS, tz_offset_minutes)
                .map(|date| SolarTerm::new(i, date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: i32, d: i32) -> SolarDate {
        SolarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn approximate_terms() {
        let terms = solar_terms_in_year(2024).unwrap();
        assert_eq!(24, terms.len());
        for (i, term) in terms.iter().enumerate() {
            assert_eq!(i, term.index);
            assert_eq!(TermKind::of_index(i), term.kind);
        }
        assert_eq!(TermKind::Tiet, terms[0].kind);
        assert_eq!(TermKind::Khi, terms[1].kind);
        assert_eq!("Đông chí", terms[21].name);
        assert_eq!(ymd(2024, 12, 19), terms[21].date);
        assert_eq!(ymd(2025, 1, 18), terms[23].date);
        assert!(terms.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn current_term() {
        let term = current_or_next_term(ymd(2024, 3, 25)).unwrap();
        assert_eq!("Xuân phân", term.name);
        let term = current_or_next_term(ymd(2024, 2, 4)).unwrap();
        assert_eq!("Lập xuân", term.name);
        let term = current_or_next_term(ymd(2024, 1, 10)).unwrap();
        assert_eq!("Đại hàn", term.name);
        assert_eq!(2024, term.date.year());
    }

    #[test]
    fn term_days() {
        assert_eq!("Xuân phân", is_term_day(ymd(2024, 3, 20)).unwrap().name);
        assert_eq!("Đại hàn", is_term_day(ymd(2025, 1, 18)).unwrap().name);
        assert!(is_term_day(ymd(2024, 3, 21)).is_none());
    }

    #[test]
    fn astronomical_terms() {
        let terms = astronomical_terms_in_year(2024).unwrap();
        assert_eq!(24, terms.len());
        assert_eq!(ymd(2024, 2, 4), terms[0].date);
        assert_eq!(ymd(2024, 3, 20), terms[3].date);
        assert_eq!(ymd(2024, 9, 7), terms[14].date);
        assert_eq!(ymd(2024, 12, 21), terms[21].date);
        let approx = solar_terms_in_year(2024).unwrap();
        for (a, b) in terms.iter().zip(approx.iter()) {
            assert!((a.date - b.date).abs() <= 4, "{} vs {}", a, b);
        }
        for (a, b) in terms[..5].iter().zip(&approx[..5]) {
            assert!((a.date - b.date).abs() <= 1, "{} vs {}", a, b);
        }
        assert_eq!(4, terms[14].date - approx[14].date);
    }
}
