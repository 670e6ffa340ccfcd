//! Vietnamese names for dates, and the sentences read aloud for today.

use super::{LunarDate, Month};
use crate::date::SolarDate;
use crate::sexagenary;

/// Traditional lunar month names, index 0 is month 1.
const LUNAR_MONTHS: [&str; 12] = [
    "Giêng", "Hai", "Ba", "Tư", "Năm", "Sáu", "Bảy", "Tám", "Chín", "Mười", "Mười Một", "Chạp",
];

/// Weekday names in ISO order, index 0 is Monday.
const WEEKDAYS: [&str; 7] = [
    "Thứ Hai", "Thứ Ba", "Thứ Tư", "Thứ Năm", "Thứ Sáu", "Thứ Bảy", "Chủ Nhật",
];

/// Names of the 24 solar terms, index 0 is Lập xuân.
pub const SOLAR_TERMS: [&str; 24] = [
    "Lập xuân",
    "Vũ thủy",
    "Kinh trập",
    "Xuân phân",
    "Thanh minh",
    "Cốc vũ",
    "Lập hạ",
    "Tiểu mãn",
    "Mang chủng",
    "Hạ chí",
    "Tiểu thử",
    "Đại thử",
    "Lập thu",
    "Xử thử",
    "Bạch lộ",
    "Thu phân",
    "Hàn lộ",
    "Sương giáng",
    "Lập đông",
    "Tiểu tuyết",
    "Đại tuyết",
    "Đông chí",
    "Tiểu hàn",
    "Đại hàn",
];

/// Lunar month name; month 1 is "Tháng Giêng", month 12 "Tháng Chạp".
///
/// # Example
///
/// ```
/// use amlich::lunar::{self, Month::*};
///
/// assert_eq!("Tháng Chạp", lunar::fmt::lunar_month_name(Common(12)));
/// assert_eq!("Tháng Sáu nhuận", lunar::fmt::lunar_month_name(Leap(6)));
/// ```
///
/// # Panics
///
/// Panics if the month number is not in `1..=12`.
pub fn lunar_month_name(m: Month) -> String {
    let num = m.num();
    let name = match num {
        1..=12 => LUNAR_MONTHS[num as usize - 1],
        _ => panic!("month {} not in 1..=12", num),
    };
    let mut rt = format!("Tháng {}", name);
    if m.is_leap() {
        rt += " nhuận";
    }
    rt
}

/// Lunar day name: "Mùng 1" through "Mùng 10", then the bare number.
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("Mùng 5", lunar::fmt::lunar_day_name(5));
/// assert_eq!("25", lunar::fmt::lunar_day_name(25));
/// ```
///
/// # Panics
///
/// Panics if the day is not in `1..=30`.
pub fn lunar_day_name(d: u32) -> String {
    match d {
        1..=10 => format!("Mùng {}", d),
        11..=30 => d.to_string(),
        _ => panic!("day {} not in 1..=30", d),
    }
}

/// Gregorian month name, "Tháng 1" through "Tháng 12".
pub fn solar_month_name(month: i32) -> String {
    format!("Tháng {}", month)
}

/// Name of the weekday `date` falls on.
pub fn weekday_name(date: SolarDate) -> &'static str {
    WEEKDAYS[(date.day_of_week() - 1) as usize]
}

/// Solar term name by index, `0` being Lập xuân. Wraps modulo 24.
pub fn solar_term_name(index: usize) -> &'static str {
    SOLAR_TERMS[index % 24]
}

/// Sentence announcing a Gregorian date.
///
/// ```
/// use amlich::SolarDate;
/// use amlich::lunar;
///
/// let date = SolarDate::from_ymd(2026, 10, 19).unwrap();
/// assert_eq!(
///     "Lịch dương hôm nay là Thứ Hai, ngày 19 tháng 10 năm 2026",
///     lunar::fmt::spoken_solar(date)
/// );
/// ```
pub fn spoken_solar(date: SolarDate) -> String {
    let (y, m, d) = date.gregorian();
    format!(
        "Lịch dương hôm nay là {}, ngày {:02} tháng {:02} năm {}",
        weekday_name(date),
        d,
        m,
        y
    )
}

/// Sentence announcing a lunar date, naming the year by its Can Chi.
///
/// ```
/// use amlich::lunar::{self, LunarDate};
///
/// let date = LunarDate::new(15, 8, 2024, false);
/// assert_eq!(
///     "Âm lịch hôm nay là ngày 15 Tháng Tám năm Giáp Thìn",
///     lunar::fmt::spoken_lunar(date)
/// );
/// ```
pub fn spoken_lunar(date: LunarDate) -> String {
    format!(
        "Âm lịch hôm nay là ngày {} {} năm {}",
        date.day,
        lunar_month_name(date.month_name()),
        sexagenary::year_name(date.year)
    )
}
