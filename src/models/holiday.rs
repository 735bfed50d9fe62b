//! Public holiday calendar.
//!
//! This module contains the [`HolidaySet`] type: an immutable, deduplicated
//! set of holiday dates that answers month-scoped membership queries.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BillingMonth;
use crate::error::{BillingError, BillingResult};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A set of public holidays on which no attendance is billed.
///
/// The set is never mutated after construction, so a single instance can be
/// shared read-only across concurrent invoice generations.
///
/// # Example
///
/// ```
/// use daycare_billing::models::{BillingMonth, HolidaySet};
///
/// let holidays = HolidaySet::from_iso_strings(["2024-08-15", "2024-12-25"]).unwrap();
/// let august = BillingMonth::new(2024, 8).unwrap();
///
/// assert_eq!(holidays.holidays_in_month(&august).len(), 1);
/// assert!(HolidaySet::from_iso_strings(["2024-13-01"]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HolidaySet {
    dates: HashSet<NaiveDate>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a holiday set from ISO `YYYY-MM-DD` strings.
    ///
    /// Duplicates collapse into one entry. Any string that is not a valid
    /// calendar date rejects the whole set with [`BillingError::InvalidHolidayDate`].
    pub fn from_iso_strings<I, S>(values: I) -> BillingResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dates = values
            .into_iter()
            .map(|value| parse_iso_date(value.as_ref()))
            .collect::<BillingResult<HashSet<_>>>()?;

        Ok(Self { dates })
    }

    /// Checks whether the given date is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns the holidays falling between the first and last calendar day
    /// of the given month.
    pub fn holidays_in_month(&self, month: &BillingMonth) -> BTreeSet<NaiveDate> {
        self.dates
            .iter()
            .copied()
            .filter(|date| month.contains(*date))
            .collect()
    }

    /// Returns the number of distinct holidays.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the set holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterates all holidays in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied().collect::<BTreeSet<_>>().into_iter()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<String>> for HolidaySet {
    type Error = BillingError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_iso_strings(values)
    }
}

impl From<HolidaySet> for Vec<String> {
    fn from(holidays: HolidaySet) -> Self {
        holidays
            .iter()
            .map(|date| date.format(ISO_DATE_FORMAT).to_string())
            .collect()
    }
}

fn parse_iso_date(value: &str) -> BillingResult<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|e| {
        BillingError::InvalidHolidayDate {
            value: value.to_string(),
            message: e.to_string(),
        }
    })
}
