//! Billing month model.
//!
//! This module contains the [`BillingMonth`] type, the validated (year, month)
//! pair every attendance and invoice calculation is scoped to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};

/// A calendar month that invoices are generated for.
///
/// Construction validates the month number and precomputes the first and
/// last calendar day, so every accessor is infallible. The last day is
/// derived as "first day of the next month minus one day", which handles
/// 30/31-day months, leap-year February and the December to January rollover.
///
/// # Example
///
/// ```
/// use daycare_billing::models::BillingMonth;
/// use chrono::NaiveDate;
///
/// let february = BillingMonth::new(2024, 2).unwrap();
/// assert_eq!(february.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
///
/// let december = BillingMonth::new(2024, 12).unwrap();
/// assert_eq!(december.last_day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
///
/// assert!(BillingMonth::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BillingMonthFields", into = "BillingMonthFields")]
pub struct BillingMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

/// Wire representation of a [`BillingMonth`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BillingMonthFields {
    year: i32,
    month: u32,
}

impl BillingMonth {
    /// Creates a billing month, rejecting months outside 1..=12 and years
    /// outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> BillingResult<Self> {
        let invalid = || BillingError::InvalidMonth {
            year: year.into(),
            month: month.into(),
        };

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|next_first| next_first.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// Like [`BillingMonth::new`], but accepts the wide integers that arrive
    /// in request bodies and paths. Values that do not fit the calendar's
    /// types are rejected as [`BillingError::InvalidMonth`].
    pub fn from_parts(year: i64, month: i64) -> BillingResult<Self> {
        let invalid = || BillingError::InvalidMonth { year, month };
        let year = i32::try_from(year).map_err(|_| invalid())?;
        let month = u32::try_from(month).map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1 = January).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Returns the number of days in the month.
    pub fn num_days(&self) -> u32 {
        (self.last_day - self.first_day).num_days() as u32 + 1
    }

    /// Iterates every date of the month in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last_day = self.last_day;
        self.first_day
            .iter_days()
            .take_while(move |date| *date <= last_day)
    }

    /// Checks whether a date falls within this month (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }
}

impl TryFrom<BillingMonthFields> for BillingMonth {
    type Error = BillingError;

    fn try_from(fields: BillingMonthFields) -> Result<Self, Self::Error> {
        Self::new(fields.year, fields.month)
    }
}

impl From<BillingMonth> for BillingMonthFields {
    fn from(month: BillingMonth) -> Self {
        Self {
            year: month.year,
            month: month.month,
        }
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}
