//! Giờ hoàng đạo: the six auspicious two-hour periods of each day.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::date::SolarDate;
use crate::sexagenary::{self, Branch, Branch::*};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct GoodHour {
    pub branch: Branch,
    /// Civil time span, e.g. `"23:00–01:00"`.
    pub time_range: &'static str,
    /// Hour the period starts; 23 for Tý, which begins the evening before.
    pub start_hour: u32,
    pub is_auspicious: bool,
}

const TIME_RANGES: [&str; 12] = [
    "23:00–01:00",
    "01:00–03:00",
    "03:00–05:00",
    "05:00–07:00",
    "07:00–09:00",
    "09:00–11:00",
    "11:00–13:00",
    "13:00–15:00",
    "15:00–17:00",
    "17:00–19:00",
    "19:00–21:00",
    "21:00–23:00",
];

/// Auspicious hour branches, by day branch. Opposite day branches share a row.
#[rustfmt::skip]
const GOOD_HOURS: [[Branch; 6]; 12] = [
    /* Tý   */ [Ty, Suu, Mao, Ngo, Than, Dau],
    /* Sửu  */ [Dan, Mao, Ti, Than, Tuat, Hoi],
    /* Dần  */ [Ty, Suu, Thin, Ti, Mui, Tuat],
    /* Mão  */ [Ty, Dan, Mao, Ngo, Mui, Dau],
    /* Thìn */ [Dan, Thin, Ti, Than, Dau, Hoi],
    /* Tỵ   */ [Suu, Thin, Ngo, Mui, Tuat, Hoi],
    /* Ngọ  */ [Ty, Suu, Mao, Ngo, Than, Dau],
    /* Mùi  */ [Dan, Mao, Ti, Than, Tuat, Hoi],
    /* Thân */ [Ty, Suu, Thin, Ti, Mui, Tuat],
    /* Dậu  */ [Ty, Dan, Mao, Ngo, Mui, Dau],
    /* Tuất */ [Dan, Thin, Ti, Than, Dau, Hoi],
    /* Hợi  */ [Suu, Thin, Ngo, Mui, Tuat, Hoi],
];

/// All twelve periods of a day with branch `day_branch`, Tý first.
///
/// # Example
///
/// ```
/// use amlich::hours;
/// use amlich::sexagenary::Branch;
///
/// let hours = hours::good_hours_for_day_branch(Branch::Ty);
/// assert_eq!("23:00–01:00", hours[0].time_range);
/// assert!(hours[0].is_auspicious);
/// assert!(!hours[2].is_auspicious);
/// ```
pub fn good_hours_for_day_branch(day_branch: Branch) -> [GoodHour; 12] {
    let good = &GOOD_HOURS[day_branch.index()];
    std::array::from_fn(|i| {
        let branch = Branch::ALL[i];
        GoodHour {
            branch,
            time_range: TIME_RANGES[i],
            start_hour: (i as u32 * 2 + 23) % 24,
            is_auspicious: good.contains(&branch),
        }
    })
}

/// Like [`good_hours_for_day_branch`], taking the day's Can Chi as text,
/// e.g. `"Giáp Tý"`. `None` unless the text is a stem followed by a branch.
pub fn good_hours_from_can_chi(can_chi: &str) -> Option<[GoodHour; 12]> {
    let mut parts = can_chi.split_whitespace();
    let (_stem, branch, None) = (parts.next()?, parts.next()?, parts.next()) else {
        return None;
    };
    Branch::from_name(branch).map(good_hours_for_day_branch)
}

/// Second of `date`'s civil day at which `hour` begins; Tý is negative.
fn start_second(hour: &GoodHour) -> i64 {
    let start = hour.start_hour as i64;
    let start = if start == 23 { -1 } else { start };
    start * 3600
}

/// The next auspicious period of `date` as seen at `now`.
///
/// When `date` is `now`'s day, the first auspicious period that has not yet
/// started; otherwise the first auspicious period of the day.
pub fn best_upcoming_hour(date: SolarDate, now: NaiveDateTime) -> Option<GoodHour> {
    let branch = sexagenary::day_stem_branch(date).branch;
    let hours = good_hours_for_day_branch(branch);
    let is_today = SolarDate::from(now.date()) == date;
    let elapsed = now.num_seconds_from_midnight() as i64;
    let best = hours
        .into_iter()
        .filter(|h| h.is_auspicious)
        .find(|h| !is_today || start_second(h) > elapsed);
    debug!(%date, %now, ?best, "best upcoming hour");
    best
}

/// [`best_upcoming_hour`] against the wall clock.
pub fn best_upcoming_hour_now(date: SolarDate, config: &Config) -> Option<GoodHour> {
    best_upcoming_hour(date, config.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn six_of_twelve() {
        for b in Branch::ALL {
            let hours = good_hours_for_day_branch(b);
            assert_eq!(6, hours.iter().filter(|h| h.is_auspicious).count(), "{b}");
            assert_eq!(hours, good_hours_for_day_branch(b.opposite()));
        }
    }

    #[test]
    fn slots() {
        let hours = good_hours_for_day_branch(Ti);
        assert_eq!(Branch::ALL.to_vec(), hours.iter().map(|h| h.branch).collect::<Vec<_>>());
        assert_eq!(23, hours[0].start_hour);
        assert_eq!(1, hours[1].start_hour);
        assert_eq!(21, hours[11].start_hour);
        assert_eq!("21:00–23:00", hours[11].time_range);
        assert!(hours[4].is_auspicious);
    }

    #[test]
    fn from_can_chi() {
        assert_eq!(
            Some(good_hours_for_day_branch(Thin)),
            good_hours_from_can_chi("Nhâm Thìn")
        );
        assert_eq!(None, good_hours_from_can_chi("Thìn"));
        assert_eq!(None, good_hours_from_can_chi("Nhâm Rồng"));
        assert_eq!(None, good_hours_from_can_chi("Nhâm Thìn Thìn"));
    }

    #[test]
    fn upcoming() {
        // 2024-09-17 is a Giáp Thân day: Tý Sửu Thìn Tỵ Mùi Tuất.
        let date = SolarDate::from_ymd(2024, 9, 17).unwrap();
        let best = best_upcoming_hour(date, at(2024, 9, 17, 8, 30)).unwrap();
        assert_eq!(Ti, best.branch);
        let best = best_upcoming_hour(date, at(2024, 9, 17, 9, 0)).unwrap();
        assert_eq!(Mui, best.branch);
        let best = best_upcoming_hour(date, at(2024, 9, 17, 0, 30)).unwrap();
        assert_eq!(Suu, best.branch);
        assert!(best_upcoming_hour(date, at(2024, 9, 17, 19, 30)).is_none());
        let best = best_upcoming_hour(date, at(2024, 9, 16, 19, 30)).unwrap();
        assert_eq!(Ty, best.branch);
    }
}
