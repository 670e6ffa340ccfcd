//! Festivals and memorial days falling within the next few weeks.
//!
//! The event tables themselves are supplied by the caller.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::Config;
use crate::date::SolarDate;
use crate::lunar;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Festival,
    Memorial,
}

/// A yearly event, on a fixed solar or lunar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub day: u32,
    pub month: u32,
    pub is_lunar: bool,
    pub kind: EventKind,
}

impl Event {
    pub fn solar(name: &str, day: u32, month: u32, kind: EventKind) -> Self {
        Self::new(name, day, month, false, kind)
    }
    pub fn lunar(name: &str, day: u32, month: u32, kind: EventKind) -> Self {
        Self::new(name, day, month, true, kind)
    }
    fn new(name: &str, day: u32, month: u32, is_lunar: bool, kind: EventKind) -> Self {
        Self {
            name: name.to_owned(),
            description: String::new(),
            day,
            month,
            is_lunar,
            kind,
        }
    }

    /// First day on or after `today` this event falls on.
    ///
    /// Lunar events are looked up in the current lunar year, then the next;
    /// when the regular month has no such day, the leap month is tried the
    /// same way.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::SolarDate;
    /// use amlich::events::{Event, EventKind};
    ///
    /// let tet = Event::lunar("Tết Nguyên Đán", 1, 1, EventKind::Festival);
    /// let today = SolarDate::from_ymd(2024, 9, 17).unwrap();
    /// assert_eq!("2025-01-29", tet.next_occurrence(today).unwrap().iso_gregorian());
    /// ```
    pub fn next_occurrence(&self, today: SolarDate) -> Option<SolarDate> {
        if self.is_lunar {
            let year = lunar::solar_to_lunar(today)
                .map(|l| l.year)
                .unwrap_or_else(|_| today.year());
            self.lunar_occurrence(today, year, false)
                .or_else(|| self.lunar_occurrence(today, year, true))
        } else {
            let year = today.year();
            let on = |y| SolarDate::from_ymd(y, self.month as i32, self.day as i32);
            on(year).filter(|d| *d >= today).or_else(|| on(year + 1))
        }
    }

    fn lunar_occurrence(&self, today: SolarDate, year: i32, leap: bool) -> Option<SolarDate> {
        let on = |y| lunar::lunar_to_solar(self.day, self.month, y, leap);
        on(year).filter(|d| *d >= today).or_else(|| on(year + 1))
    }
}

/// An event resolved to a concrete day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEvent<'a> {
    pub event: &'a Event,
    pub date: SolarDate,
    pub days_until: i32,
    pub display_text: String,
}

/// "Hôm nay", "Ngày mai", or "Còn N ngày".
pub fn display_text(days_until: i32) -> String {
    match days_until {
        0 => "Hôm nay".to_owned(),
        1 => "Ngày mai".to_owned(),
        n => format!("Còn {} ngày", n),
    }
}

/// Events occurring within `max_days` of `today` (inclusive), soonest first,
/// at most `limit` of them.
pub fn upcoming(events: &[Event], today: SolarDate, max_days: i32, limit: usize) -> Vec<UpcomingEvent<'_>> {
    let mut found: Vec<_> = events
        .iter()
        .filter_map(|event| {
            let date = event.next_occurrence(today)?;
            let days_until = date - today;
            trace!(name = %event.name, %date, days_until);
            (0..=max_days).contains(&days_until).then(|| UpcomingEvent {
                event,
                date,
                days_until,
                display_text: display_text(days_until),
            })
        })
        .collect();
    found.sort_by_key(|e| e.days_until);
    found.truncate(limit);
    found
}

/// [`upcoming`] from today, with the window and limit from `config`.
pub fn upcoming_today<'a>(events: &'a [Event], config: &Config) -> Vec<UpcomingEvent<'a>> {
    upcoming(events, config.today(), config.events.max_days, config.events.limit)
}
