//! Month-grid navigation state for a calendar view.

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::date::SolarDate;
use crate::lunar::{self, LunarDate};

/// Cells in a month grid: six weeks.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: SolarDate,
    /// `None` outside the convertible range.
    pub lunar: Option<LunarDate>,
    pub is_today: bool,
    pub is_selected: bool,
    /// Whether the day belongs to the displayed month rather than a
    /// neighbouring one.
    pub is_current_month: bool,
}

/// The displayed month and the selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    today: SolarDate,
    current: SolarDate,
    selected: SolarDate,
}

impl Navigator {
    pub fn new(today: SolarDate) -> Self {
        Self {
            today,
            current: today,
            selected: today,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.today())
    }

    pub fn today(&self) -> SolarDate {
        self.today
    }
    /// A day in the displayed month.
    pub fn current(&self) -> SolarDate {
        self.current
    }
    pub fn selected(&self) -> SolarDate {
        self.selected
    }

    pub fn select(&mut self, date: SolarDate) {
        self.selected = date;
    }

    pub fn previous_month(&mut self) {
        self.shift_month(-1);
    }

    pub fn next_month(&mut self) {
        self.shift_month(1);
    }

    fn shift_month(&mut self, offset: i32) {
        if let Some(first) = self.current.first_of_month_offset(offset) {
            self.current = first;
        }
    }

    /// The displayed month as 42 days, Sunday first, padded with days of
    /// the previous and next months.
    pub fn month_days(&self) -> Vec<CalendarDay> {
        let (year, month, _) = self.current.gregorian();
        let Some(first) = self.current.first_of_month_offset(0) else {
            return Vec::new();
        };
        let leading = first.day_of_week() % 7;
        let start = first - leading;
        (0..GRID_CELLS as i32)
            .map(|i| {
                let date = start + i;
                let (y, m, _) = date.gregorian();
                CalendarDay {
                    date,
                    lunar: lunar::solar_to_lunar(date).ok(),
                    is_today: date == self.today,
                    is_selected: date == self.selected,
                    is_current_month: (y, m) == (year, month),
                }
            })
            .collect()
    }

    /// Jumps to a Gregorian date. Returns `false`, leaving the state alone,
    /// if it does not exist.
    pub fn search_solar(&mut self, day: i32, month: i32, year: i32) -> bool {
        match SolarDate::from_ymd(year, month, day) {
            Some(date) => {
                self.go_to(date);
                true
            }
            None => false,
        }
    }

    /// Jumps to a lunar date, trying the leap month when the regular month
    /// has no such day.
    pub fn search_lunar(&mut self, day: u32, month: u32, year: i32) -> bool {
        let found = lunar::lunar_to_solar(day, month, year, false)
            .or_else(|| lunar::lunar_to_solar(day, month, year, true));
        match found {
            Some(date) => {
                self.go_to(date);
                true
            }
            None => {
                debug!(day, month, year, "lunar date not found");
                false
            }
        }
    }

    fn go_to(&mut self, date: SolarDate) {
        self.current = date;
        self.selected = date;
    }
}
