//! Monthly attendance and billing engine for daycare invoices
//!
//! This crate works out which days of a month each enrolled child attends,
//! given their weekly schedule and the daycare's public holidays, and turns
//! that attendance into per-parent invoices with an audit trace.
//!
//! # Example
//!
//! ```
//! use daycare_billing::calculation::{attended_days, compress_day_ranges};
//! use daycare_billing::models::{HolidaySet, WeeklySchedule};
//!
//! let holidays = HolidaySet::from_iso_strings(["2024-08-15"]).unwrap();
//! let days = attended_days(2024, 8, &WeeklySchedule::weekdays(), &holidays).unwrap();
//!
//! assert_eq!(days.len(), 21);
//! assert_eq!(compress_day_ranges(&days[..2]), vec!["1-2"]);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
