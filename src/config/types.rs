//! Configuration types for the daycare billing engine.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a daycare configuration directory, and the assembled
//! [`DaycareConfig`] they produce.

use serde::Deserialize;

use crate::models::{Child, DayCare, HolidaySet, Parent, Registry};

/// Holiday calendar file structure (`holidays.yaml`).
///
/// Holidays are kept as raw strings here so malformed entries surface as
/// [`BillingError::InvalidHolidayDate`](crate::error::BillingError::InvalidHolidayDate)
/// rather than a generic YAML error.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// ISO `YYYY-MM-DD` holiday dates.
    #[serde(default)]
    pub holidays: Vec<String>,
}

/// Enrolment file structure (`families.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct FamiliesConfig {
    /// Enrolled parents.
    #[serde(default)]
    pub parents: Vec<Parent>,
    /// Enrolled children, each referring to a parent by id.
    #[serde(default)]
    pub children: Vec<Child>,
}

/// The complete daycare configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct DaycareConfig {
    /// Daycare letterhead details.
    daycare: DayCare,
    /// Public holidays on which no attendance is billed.
    holidays: HolidaySet,
    /// Enrolled families.
    registry: Registry,
}

impl DaycareConfig {
    /// Creates a new DaycareConfig from its component parts.
    pub fn new(daycare: DayCare, holidays: HolidaySet, registry: Registry) -> Self {
        Self {
            daycare,
            holidays,
            registry,
        }
    }

    /// Returns the daycare details.
    pub fn daycare(&self) -> &DayCare {
        &self.daycare
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Returns the enrolment registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
