//! Day arithmetic for deadline computation.
//!
//! Two addition modes exist: a flat calendar-day offset with no calendar
//! awareness at all, and a business-day walk that skips weekends and tenant
//! holidays. The walk never counts the start date itself, and
//! [`count_business_days`] retraces the same steps so the two are exact
//! inverses.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Tenant holiday calendar: dates excluded from business-day counting.
///
/// Serializes as a plain list of ISO dates so tenants can ship their
/// public-holiday list alongside the SLA config. Empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Empty calendar: every weekday is a business day
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any collection of dates
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Add one holiday
    pub fn add(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    /// Whether `date` is a configured holiday
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// A weekday that is not a configured holiday
pub fn is_business_day(date: NaiveDate, holidays: &HolidayCalendar) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(date)
}

/// Flat calendar-day offset, no weekend or holiday awareness
pub fn add_calendar_days(start: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    start + Duration::days(days)
}

/// Walk forward one day at a time until exactly `days` business days have
/// been counted.
///
/// The start date itself is never counted; `days <= 0` returns `start`
/// unchanged. The time of day is preserved.
pub fn add_business_days(
    start: DateTime<Utc>,
    days: i64,
    holidays: &HolidayCalendar,
) -> DateTime<Utc> {
    let mut cursor = start;
    let mut counted = 0;
    while counted < days {
        cursor = cursor + Duration::days(1);
        if is_business_day(cursor.date_naive(), holidays) {
            counted += 1;
        }
    }
    cursor
}

/// Business days from `start` (exclusive) to `end` (inclusive).
///
/// Walks the same one-day steps as [`add_business_days`], so for any `n > 0`
/// `count_business_days(start, add_business_days(start, n)) == n`. Used for
/// audit display; `end <= start` counts zero.
pub fn count_business_days(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    holidays: &HolidayCalendar,
) -> i64 {
    let mut cursor = start;
    let mut counted = 0;
    while cursor < end {
        cursor = cursor + Duration::days(1);
        if is_business_day(cursor.date_naive(), holidays) {
            counted += 1;
        }
    }
    counted
}
