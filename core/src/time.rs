use std::cell::Cell;
use std::fmt;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical identifier of a local calendar day.
///
/// Two instants on the same local calendar day collapse to the same key,
/// and keys order chronologically, so `DayKey` doubles as the map key for
/// per-day statistics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn of(instant: DateTime<Local>) -> Self {
        DayKey(instant.date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// First and last calendar day (inclusive) of the month containing `reference`.
pub fn month_bounds(reference: DateTime<Local>) -> (DayKey, DayKey) {
    let date = reference.date_naive();
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap();
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1).unwrap()
    };
    let last = next_month - Duration::days(1);
    (DayKey(first), DayKey(last))
}

/// Source of "now", injected into the store so tests can pin time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A settable clock for tests and demos.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Local>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn same_day_instants_share_a_key() {
        let morning = DayKey::of(local(2024, 3, 15, 0, 0));
        let noon = DayKey::of(local(2024, 3, 15, 12, 30));
        let night = DayKey::of(local(2024, 3, 15, 23, 59));
        assert_eq!(morning, noon);
        assert_eq!(noon, night);
    }

    #[test]
    fn keys_order_chronologically() {
        let a = DayKey::of(local(2024, 3, 14, 23, 59));
        let b = DayKey::of(local(2024, 3, 15, 0, 0));
        assert!(a < b);
    }

    #[test]
    fn month_bounds_regular_month() {
        let (first, last) = month_bounds(local(2024, 4, 17, 9, 0));
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(last.date(), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn month_bounds_december_wraps_year() {
        let (first, last) = month_bounds(local(2023, 12, 31, 23, 0));
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(last.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn month_bounds_leap_february() {
        let (_, last) = month_bounds(local(2024, 2, 10, 8, 0));
        assert_eq!(last.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn fixed_clock_is_settable() {
        let clock = FixedClock::at(local(2024, 3, 15, 22, 0));
        assert_eq!(DayKey::of(clock.now()), DayKey::of(local(2024, 3, 15, 1, 0)));
        clock.advance(Duration::hours(3));
        assert_eq!(DayKey::of(clock.now()), DayKey::of(local(2024, 3, 16, 1, 0)));
    }
}
