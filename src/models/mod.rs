//! Core data models for the daycare billing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod accounting;
mod billing_month;
mod family;
mod holiday;
mod invoice;
mod registry;

pub use accounting::{AccountingLedger, ChildAccounting};
pub use billing_month::BillingMonth;
pub use family::{Child, DayCare, Parent, WeeklySchedule};
pub use holiday::HolidaySet;
pub use invoice::{
    AuditStep, AuditTrace, AuditWarning, BillingLineItem, InvoiceResult, InvoiceTotals,
};
pub use registry::Registry;
