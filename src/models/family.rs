//! Daycare, parent and child records.
//!
//! This module defines the plain records consumed by the billing engine:
//! the [`DayCare`] itself, [`Parent`]s and [`Child`]ren linked by id, and the
//! [`WeeklySchedule`] describing which weekdays a child attends.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};

/// The set of weekdays a child attends, recurring every week.
///
/// Weekdays are indexed 0 (Monday) through 6 (Sunday) and serialize as a
/// sorted list of indices.
///
/// # Example
///
/// ```
/// use daycare_billing::models::WeeklySchedule;
/// use chrono::Weekday;
///
/// let schedule = WeeklySchedule::from_indices([0, 2, 4]).unwrap();
/// assert!(schedule.contains(Weekday::Wed));
/// assert!(!schedule.contains(Weekday::Thu));
/// assert!(WeeklySchedule::from_indices([7]).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeeklySchedule {
    mask: u8,
}

impl WeeklySchedule {
    /// A schedule with no attendance days.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self { mask: 0b0001_1111 }
    }

    /// Builds a schedule from weekday indices, rejecting anything outside 0..=6.
    pub fn from_indices<I>(indices: I) -> BillingResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let mut mask = 0u8;
        for index in indices {
            let index = index.into();
            if !(0..=6).contains(&index) {
                return Err(BillingError::InvalidWeekday { index });
            }
            mask |= 1u8 << index;
        }
        Ok(Self { mask })
    }

    /// Returns true if the child attends on the given weekday.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.mask & (1 << weekday.num_days_from_monday()) != 0
    }

    /// Returns true if the child is scheduled on the weekday of `date`.
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    /// Returns true if no weekday is scheduled.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Returns the scheduled weekday indices in ascending order.
    pub fn indices(&self) -> Vec<u8> {
        (0..7).filter(|index| self.mask & (1 << index) != 0).collect()
    }
}

impl TryFrom<Vec<u8>> for WeeklySchedule {
    type Error = BillingError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(indices)
    }
}

impl From<WeeklySchedule> for Vec<u8> {
    fn from(schedule: WeeklySchedule) -> Self {
        schedule.indices()
    }
}

/// The daycare issuing invoices.
///
/// Carries only the letterhead details a presentation layer prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCare {
    /// The daycare's trading name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Town, state and zip line.
    pub town_state_zip: String,
    /// Contact phone number.
    pub phone: String,
    /// Employer identification number.
    pub ein: String,
    /// Path to the letterhead logo.
    #[serde(default)]
    pub logo: Option<String>,
}

/// A parent (billing party) enrolled at the daycare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    /// Unique identifier for the parent.
    pub id: String,
    /// The parent's full name.
    pub name: String,
    /// Contact email for invoices.
    #[serde(default)]
    pub email: String,
    /// Ids of the parent's children, in enrolment order.
    #[serde(default)]
    pub child_ids: Vec<String>,
}

impl Parent {
    /// Creates a parent with no children.
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            child_ids: Vec::new(),
        }
    }
}

/// A child enrolled at the daycare.
///
/// The child refers to its parent by id; there is no back-reference to the
/// parent record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Unique identifier for the child.
    pub id: String,
    /// The child's full name.
    pub name: String,
    /// The child's date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// The weekdays the child attends.
    pub schedule: WeeklySchedule,
    /// The fee charged per attended day.
    pub day_rate: Decimal,
    /// The id of the parent billed for this child.
    pub parent_id: String,
}
