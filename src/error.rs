//! Error types for the daycare billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every rejection the engine can produce: malformed calendar input,
//! invalid rates, unknown registry records and configuration failures.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the daycare billing engine.
///
/// # Example
///
/// ```
/// use daycare_billing::error::BillingError;
///
/// let error = BillingError::InvalidMonth { year: 2024, month: 13 };
/// assert_eq!(error.to_string(), "Invalid billing month 2024-13: month must be between 1 and 12");
/// ```
#[derive(Debug, Error)]
pub enum BillingError {
    /// The requested billing month does not exist on the calendar.
    #[error("Invalid billing month {year}-{month}: month must be between 1 and 12")]
    InvalidMonth {
        /// The requested year.
        year: i64,
        /// The requested month.
        month: i64,
    },

    /// A holiday entry could not be parsed as an ISO date.
    #[error("Invalid holiday date '{value}': {message}")]
    InvalidHolidayDate {
        /// The raw holiday string.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A weekly schedule contained a weekday index outside 0..=6.
    #[error("Invalid weekday index {index}: expected 0 (Monday) through 6 (Sunday)")]
    InvalidWeekday {
        /// The offending index.
        index: i64,
    },

    /// A day-range token was not a day number or an inclusive `start-end` range.
    #[error("Invalid day range '{value}': {message}")]
    InvalidDayRange {
        /// The raw range token.
        value: String,
        /// A description of what made the token invalid.
        message: String,
    },

    /// A child's day rate was negative.
    #[error("Invalid day rate {rate} for child '{child_id}': rate must not be negative")]
    InvalidDayRate {
        /// The child carrying the rate.
        child_id: String,
        /// The rejected rate.
        rate: Decimal,
    },

    /// No parent with the given id is enrolled.
    #[error("Parent not found: {id}")]
    ParentNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// No child with the given id is enrolled.
    #[error("Child not found: {id}")]
    ChildNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A record with the same id is already enrolled.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateRecord {
        /// The record kind ("parent" or "child").
        kind: String,
        /// The duplicated id.
        id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return BillingError.
pub type BillingResult<T> = Result<T, BillingError>;
