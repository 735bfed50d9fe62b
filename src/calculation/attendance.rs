//! Attendance enumeration.
//!
//! This module derives the days of a month a child attends from their weekly
//! schedule and the holiday calendar.

use chrono::Datelike;

use crate::error::BillingResult;
use crate::models::{BillingMonth, HolidaySet, WeeklySchedule};

/// Enumerates the days of a month a child attends.
///
/// Every date from the 1st through the last day of the month is checked; a
/// day is attended iff its weekday is in `schedule` and it is not one of the
/// month's holidays.
///
/// # Arguments
///
/// * `year` - The calendar year
/// * `month` - The month number (1 = January)
/// * `schedule` - The weekdays the child attends
/// * `holidays` - The holiday calendar
///
/// # Returns
///
/// The attended days of the month in ascending order, or
/// [`BillingError::InvalidMonth`](crate::error::BillingError::InvalidMonth)
/// if `month` is outside 1..=12.
///
/// # Example
///
/// ```
/// use daycare_billing::calculation::attended_days;
/// use daycare_billing::models::{HolidaySet, WeeklySchedule};
///
/// // Mondays, Wednesdays and Fridays in August 2024
/// let schedule = WeeklySchedule::from_indices([0, 2, 4]).unwrap();
/// let days = attended_days(2024, 8, &schedule, &HolidaySet::new()).unwrap();
/// assert_eq!(days, vec![2, 5, 7, 9, 12, 14, 16, 19, 21, 23, 26, 28, 30]);
///
/// assert!(attended_days(2024, 13, &schedule, &HolidaySet::new()).is_err());
/// ```
pub fn attended_days(
    year: i32,
    month: u32,
    schedule: &WeeklySchedule,
    holidays: &HolidaySet,
) -> BillingResult<Vec<u32>> {
    let period = BillingMonth::new(year, month)?;
    Ok(attended_days_in(&period, schedule, holidays))
}

/// Enumerates attended days for an already validated month.
pub fn attended_days_in(
    period: &BillingMonth,
    schedule: &WeeklySchedule,
    holidays: &HolidaySet,
) -> Vec<u32> {
    if schedule.is_empty() {
        return Vec::new();
    }

    let month_holidays = holidays.holidays_in_month(period);

    period
        .days()
        .filter(|date| !month_holidays.contains(date))
        .filter(|date| schedule.includes_date(*date))
        .map(|date| date.day())
        .collect()
}
