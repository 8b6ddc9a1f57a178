//! Deadline arithmetic: legal and effective due dates, business-day walking,
//! holiday calendars, and the legal mutations of a case deadline record.

pub mod calculator;
pub mod calendar;
pub mod mutations;

pub use calculator::DeadlineCalculator;
pub use calendar::{
    add_business_days, add_calendar_days, count_business_days, is_business_day, HolidayCalendar,
};
