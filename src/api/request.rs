//! Request types for the daycare billing API.
//!
//! This module defines the JSON request structures for the `/invoice` endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BillingResult;
use crate::models::{BillingMonth, Child, HolidaySet, Parent, Registry, WeeklySchedule};

/// Request body for the `/invoice` endpoint.
///
/// Carries everything needed to bill one parent for one month without
/// relying on the server's enrolled families. Numeric fields are wide so
/// out-of-range values reach validation instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// The calendar year being billed.
    pub year: i64,
    /// The month being billed (1 = January).
    pub month: i64,
    /// The parent being billed.
    pub parent: ParentRequest,
    /// The parent's children, in invoice order.
    #[serde(default)]
    pub children: Vec<ChildRequest>,
    /// Public holidays as ISO `YYYY-MM-DD` strings.
    #[serde(default)]
    pub holidays: Vec<String>,
}

/// Parent information in an invoice request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentRequest {
    /// Unique identifier for the parent.
    pub id: String,
    /// The parent's full name.
    pub name: String,
    /// Contact email for invoices.
    #[serde(default)]
    pub email: String,
}

/// Child information in an invoice request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRequest {
    /// Unique identifier for the child.
    pub id: String,
    /// The child's full name.
    pub name: String,
    /// The child's date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Weekday indices attended (0 = Monday ... 6 = Sunday).
    #[serde(default)]
    pub schedule: Vec<i64>,
    /// The fee charged per attended day.
    pub day_rate: Decimal,
}

impl From<ParentRequest> for Parent {
    fn from(req: ParentRequest) -> Self {
        Parent::new(req.id, req.name, req.email)
    }
}

impl ChildRequest {
    /// Converts the request into a child of the given parent, validating the
    /// schedule's weekday indices.
    pub fn into_child(self, parent_id: &str) -> BillingResult<Child> {
        Ok(Child {
            id: self.id,
            name: self.name,
            date_of_birth: self.date_of_birth,
            schedule: WeeklySchedule::from_indices(self.schedule)?,
            day_rate: self.day_rate,
            parent_id: parent_id.to_string(),
        })
    }
}

impl InvoiceRequest {
    /// Validates the requested year and month.
    pub fn billing_month(&self) -> BillingResult<BillingMonth> {
        BillingMonth::from_parts(self.year, self.month)
    }

    /// Parses the holiday strings into a [`HolidaySet`].
    pub fn holiday_set(&self) -> BillingResult<HolidaySet> {
        HolidaySet::from_iso_strings(&self.holidays)
    }

    /// Builds a registry holding just this request's family.
    ///
    /// Returns the parent id alongside the registry.
    pub fn into_registry(self) -> BillingResult<(String, Registry)> {
        let parent_id = self.parent.id.clone();
        let mut registry = Registry::new();

        registry.add_parent(self.parent.into())?;
        for child in self.children {
            registry.enrol_child(child.into_child(&parent_id)?)?;
        }

        Ok((parent_id, registry))
    }
}
