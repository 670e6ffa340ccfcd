use amlich::day_quality::{self, Truc};
use amlich::lunar::{self, LunarDate, SolsticeYear};
use amlich::sexagenary::{self, Branch};
use amlich::{hours, SolarDate};
use proptest::prelude::*;

fn ymd(y: i32, m: i32, d: i32) -> SolarDate {
    SolarDate::from_ymd(y, m, d).unwrap()
}

/// Every supported day, 1900-01-01 through 2100-12-31.
fn convertible_date() -> impl Strategy<Value = SolarDate> {
    let first = ymd(1900, 1, 1).jdn();
    let last = ymd(2100, 12, 31).jdn();
    (first..=last).prop_map(SolarDate::from_jdn)
}

fn branch() -> impl Strategy<Value = Branch> {
    (0usize..12).prop_map(|i| Branch::ALL[i])
}

proptest! {
    #[test]
    fn solar_lunar_round_trip(date in convertible_date()) {
        let l = lunar::solar_to_lunar(date).unwrap();
        prop_assert!((1..=30).contains(&l.day));
        prop_assert!((1..=12).contains(&l.month));
        prop_assert_eq!(Some(date), lunar::lunar_to_solar(l.day, l.month, l.year, l.is_leap_month));
    }

    #[test]
    fn inverse_is_stable(day in 1u32..=30, month in 1u32..=12, year in 1900i32..=2100, leap: bool) {
        if let Some(date) = lunar::lunar_to_solar(day, month, year, leap) {
            prop_assert_eq!(
                LunarDate::new(day, month, year, leap),
                lunar::solar_to_lunar(date).unwrap()
            );
        }
    }

    #[test]
    fn consecutive_days(date in convertible_date()) {
        let today = lunar::solar_to_lunar(date).unwrap();
        let Ok(tomorrow) = lunar::solar_to_lunar(date + 1) else {
            return Ok(());
        };
        if tomorrow.day == 1 {
            prop_assert!(today.day == 29 || today.day == 30);
        } else {
            prop_assert_eq!(today.day + 1, tomorrow.day);
            prop_assert_eq!(today.month_name(), tomorrow.month_name());
        }
    }

    #[test]
    fn sixty_day_cycle(date in convertible_date(), k in 1i32..60) {
        let name = sexagenary::day_stem_branch(date);
        prop_assert_eq!(name, sexagenary::day_stem_branch(date + 60));
        prop_assert_ne!(name, sexagenary::day_stem_branch(date + k));
    }

    #[test]
    fn truc_formula(day in 1u32..=30, month in 1u32..=12) {
        let truc = day_quality::day_truc(day, month);
        prop_assert_eq!(Truc::ALL[((day + month - 2) % 12) as usize], truc);
        prop_assert_eq!(truc, day_quality::day_truc(day + 12, month));
    }

    #[test]
    fn every_day_has_a_deity(date in convertible_date()) {
        let l = lunar::solar_to_lunar(date).unwrap();
        let branch = sexagenary::day_stem_branch(date).branch;
        let info = day_quality::detailed_day_info(date, branch, l.month).unwrap();
        prop_assert_ne!(info.is_auspicious(), info.is_inauspicious());
        prop_assert_eq!(info.is_auspicious(), day_quality::is_auspicious_day(branch, l.month));
    }

    #[test]
    fn conflict_is_symmetric(b in branch()) {
        let opposite = day_quality::conflict_ages(b);
        prop_assert_eq!(1, opposite.len());
        prop_assert_ne!(b, opposite[0]);
        prop_assert_eq!(vec![b], day_quality::conflict_ages(opposite[0]));
    }

    #[test]
    fn six_good_hours(b in branch()) {
        let hours = hours::good_hours_for_day_branch(b);
        prop_assert_eq!(6, hours.iter().filter(|h| h.is_auspicious).count());
    }
}

#[test]
fn at_most_one_leap_month() {
    for year in 1900..=2100 {
        let sy = SolsticeYear::new(year).unwrap();
        let leaps = sy.months[..sy.months.len() - 1]
            .iter()
            .filter(|m| m.month.is_leap())
            .count();
        assert!(leaps <= 1, "{year}");
        assert_eq!(sy.months.len() == 14, leaps == 1, "{year}");
    }
}

#[test]
fn leap_month_dates_exist_only_in_leap_years() {
    // Non-leap lookups go through the fallback scan, so sample the years.
    for year in (1900..=2099).step_by(7).chain([2017, 2020, 2023, 2025]) {
        let leap = lunar::leap_month(year);
        for month in 1..=12 {
            let found = lunar::lunar_to_solar(1, month, year, true);
            assert_eq!(leap == Some(month), found.is_some(), "{year}, month {month}");
        }
    }
}

#[test]
fn every_branch_and_month_has_a_deity() {
    for month in 1..=12 {
        for b in Branch::ALL {
            assert!(day_quality::god_for_branch_and_month(b, month).is_some());
        }
    }
}

#[test]
fn every_deity_has_a_record() {
    for month in 1..=12 {
        for b in Branch::ALL {
            let deity = day_quality::god_for_branch_and_month(b, month).unwrap();
            let record = deity.record();
            assert!(!record.description.is_empty(), "{}", deity.name());
            assert!(!record.favorable.is_empty(), "{}", deity.name());
        }
    }
}

#[test]
fn january_1900_round_trips() {
    let first = ymd(1900, 1, 1);
    let l = lunar::solar_to_lunar(first).unwrap();
    assert_eq!(LunarDate::new(1, 12, 1899, false), l);
    assert_eq!(Some(first), lunar::lunar_to_solar(1, 12, 1899, false));
}

#[test]
fn lunar_new_year_2024() {
    let date = ymd(2024, 2, 10);
    let l = lunar::solar_to_lunar(date).unwrap();
    assert_eq!(LunarDate::new(1, 1, 2024, false), l);
    assert_eq!("Giáp Thìn", sexagenary::year_name(l.year));
}

#[test]
fn mid_autumn_2024() {
    assert_eq!(Some(ymd(2024, 9, 17)), lunar::lunar_to_solar(15, 8, 2024, false));
}
