//! Due-date arithmetic over one tenant's SLA configuration.

use chrono::{DateTime, Duration, Utc};

use crate::config::SlaConfig;
use crate::deadline::calendar::{add_business_days, add_calendar_days, HolidayCalendar};
use crate::error::{CaseworkError, CaseworkResult};

/// Milliseconds in one day, the unit for remaining/paused-day ceilings
const MS_PER_DAY: i64 = 86_400_000;

/// Computes legal and effective due dates, remaining days and pause credits
/// for one tenant.
///
/// Pure arithmetic: every timestamp, including `now`, comes from the caller,
/// so identical inputs always produce identical outputs. Whether days are
/// calendar or business days is decided by the config; weekday and holiday
/// membership is evaluated on the UTC calendar date.
#[derive(Debug, Clone)]
pub struct DeadlineCalculator {
    config: SlaConfig,
    holidays: HolidayCalendar,
}

impl DeadlineCalculator {
    /// Build from tenant config; the holiday list embedded in the config
    /// seeds the calendar
    pub fn new(config: SlaConfig) -> Self {
        let holidays = HolidayCalendar::from_dates(config.holidays.iter().copied());
        Self { config, holidays }
    }

    /// Replace the holiday calendar, e.g. with a shared national one
    pub fn with_calendar(mut self, holidays: HolidayCalendar) -> Self {
        self.holidays = holidays;
        self
    }

    /// The tenant configuration this calculator was built from
    pub fn config(&self) -> &SlaConfig {
        &self.config
    }

    /// Statutory due date: `received_at` plus the initial response window
    pub fn legal_due_date(&self, received_at: DateTime<Utc>) -> DateTime<Utc> {
        self.add_days(received_at, self.config.initial_deadline_days)
    }

    /// Due date after extensions and pause credits, applied in that order
    /// with the same day-addition mode as the legal due date.
    ///
    /// Never earlier than `legal_due_at`; negative inputs count as zero.
    pub fn effective_due_date(
        &self,
        legal_due_at: DateTime<Utc>,
        extension_days: i64,
        total_paused_days: i64,
    ) -> DateTime<Utc> {
        let extended = self.add_days(legal_due_at, extension_days.max(0));
        self.add_days(extended, total_paused_days.max(0))
    }

    /// Whole days until `effective_due_at`, rounded up.
    ///
    /// Negative when overdue: `-3` means three days past due.
    pub fn days_remaining(&self, effective_due_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        ceil_days(effective_due_at - now)
    }

    /// Whole days spent paused, rounded up, never negative.
    ///
    /// An open pause (no `resumed_at`) is measured up to `now`.
    pub fn paused_days(
        &self,
        paused_at: DateTime<Utc>,
        resumed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> i64 {
        let end = resumed_at.unwrap_or(now);
        ceil_days(end - paused_at).max(0)
    }

    /// Gate an extension request against the statutory cap.
    ///
    /// Rejects non-positive requests and any cumulative total beyond
    /// `max_days`; landing exactly on the cap is allowed. The error carries
    /// all three numbers for exact messaging.
    pub fn validate_extension(
        requested_days: i64,
        existing_days: i64,
        max_days: i64,
    ) -> CaseworkResult<()> {
        if requested_days <= 0 || existing_days + requested_days > max_days {
            return Err(CaseworkError::invalid_extension(
                requested_days,
                existing_days,
                max_days,
            ));
        }
        Ok(())
    }

    fn add_days(&self, start: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        if self.config.use_business_days {
            add_business_days(start, days, &self.holidays)
        } else {
            add_calendar_days(start, days)
        }
    }
}

/// Ceiling of `delta` in whole days
fn ceil_days(delta: Duration) -> i64 {
    (delta.num_milliseconds() + MS_PER_DAY - 1).div_euclid(MS_PER_DAY)
}
