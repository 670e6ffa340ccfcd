//! New moons and apparent solar longitude.
//!
//! Both are computed from truncated analytic series (after Meeus,
//! *Astronomical Algorithms*), accurate to a few minutes for new moons and
//! about 0.01° for the sun over 1900–2100. That is enough to place every
//! lunation and principal term on the correct civil day at UTC+7, except for
//! the rare event falling within minutes of midnight.

use std::f64::consts::PI;

use crate::date::SolarDate;
use crate::time_scales::{Tt, Ut};

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH: f64 = 29.530588853;
/// Julian date of the mean new moon numbered `k = 0` (1900-01-01).
pub const NEW_MOON_EPOCH: f64 = 2415021.076998695;

const DR: f64 = PI / 180.0;

/// Instant of the `k`-th new moon counted from 1900-01-01, in TT.
pub fn new_moon(k: i64) -> Tt {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;

    let mut jd = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * DR).sin();

    // sun's mean anomaly, moon's mean anomaly, moon's argument of latitude
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;

    let sin = |deg: f64| (deg * DR).sin();
    let c = (0.1734 - 0.000393 * t) * sin(m) + 0.0021 * sin(2.0 * m)
        - 0.4068 * sin(mpr)
        + 0.0161 * sin(2.0 * mpr)
        - 0.0004 * sin(3.0 * mpr)
        + 0.0104 * sin(2.0 * f)
        - 0.0051 * sin(m + mpr)
        - 0.0074 * sin(m - mpr)
        + 0.0004 * sin(2.0 * f + m)
        - 0.0004 * sin(2.0 * f - m)
        - 0.0006 * sin(2.0 * f + mpr)
        + 0.0010 * sin(2.0 * f - mpr)
        + 0.0005 * sin(2.0 * mpr + m);

    Tt(jd + c)
}

/// Local civil day of the `k`-th new moon.
pub fn new_moon_day(k: i64, tz_offset_minutes: i32) -> SolarDate {
    Ut::from(new_moon(k)).date_in_timezone(tz_offset_minutes)
}

/// Fractional count of mean lunations from the epoch to `date`; its floor is
/// the last mean new moon before the day, its rounding the nearest one.
pub fn lunation_index(date: SolarDate) -> f64 {
    (date.jdn() as f64 - NEW_MOON_EPOCH) / SYNODIC_MONTH
}

/// Apparent geometric longitude of the sun in degrees, `0.0..360.0`.
pub fn sun_longitude(ut: Ut) -> f64 {
    let t = (ut.0 - 2451545.0) / 36525.0;
    let t2 = t * t;
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * (DR * m).sin()
        + (0.019993 - 0.000101 * t) * (DR * 2.0 * m).sin()
        + 0.000290 * (DR * 3.0 * m).sin();
    (l0 + dl).rem_euclid(360.0)
}

/// Sun longitude at the local midnight that starts `date`.
pub fn sun_longitude_at_midnight(date: SolarDate, tz_offset_minutes: i32) -> f64 {
    sun_longitude(Ut::local_midnight(date, tz_offset_minutes))
}

/// The 30° sector (`0..12`, sector 0 starting at the vernal equinox) the
/// sun occupies at the start of `date`.
///
/// Two consecutive new moons in the same sector bound a month containing no
/// principal term.
pub fn sun_sector(date: SolarDate, tz_offset_minutes: i32) -> u32 {
    (sun_longitude_at_midnight(date, tz_offset_minutes) / 30.0) as u32 % 12
}

/// Start of lunar month 11 of `year`: the last new moon on or before the
/// December solstice.
pub fn month11_start(year: i32, tz_offset_minutes: i32) -> Option<SolarDate> {
    let dec31 = SolarDate::from_ymd(year, 12, 31)?;
    let k = ((dec31.jdn() as f64 - 2415021.0) / SYNODIC_MONTH).floor() as i64;
    let nm = new_moon_day(k, tz_offset_minutes);
    // Sector 9 begins at 270°: the solstice is already behind this new moon.
    if sun_sector(nm, tz_offset_minutes) >= 9 {
        Some(new_moon_day(k - 1, tz_offset_minutes))
    } else {
        Some(nm)
    }
}

/// Day (local) during which the sun reaches `target` degrees of longitude,
/// searching `window` days either side of `around`.
pub fn crossing_day(
    target: f64,
    around: SolarDate,
    window: i32,
    tz_offset_minutes: i32,
) -> Option<SolarDate> {
    let mut day = around - window;
    let mut lon = sun_longitude_at_midnight(day, tz_offset_minutes);
    for _ in 0..=2 * window {
        let next = sun_longitude_at_midnight(day + 1, tz_offset_minutes);
        let step = (next - lon).rem_euclid(360.0);
        if (target - lon).rem_euclid(360.0) < step {
            return Some(day);
        }
        day = day + 1;
        lon = next;
    }
    None
}
