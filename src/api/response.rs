//! Response types for the daycare billing API.
//!
//! This module defines the invoice response body, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::compress_day_ranges;
use crate::error::BillingError;
use crate::models::{BillingLineItem, InvoiceResult};

/// One printable invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    /// The ID of the child.
    pub child_id: String,
    /// The child's name.
    pub child_name: String,
    /// Attended days compressed into ranges, e.g. `["1-2", "5-9", "16"]`.
    pub day_ranges: Vec<String>,
    /// Number of attended days.
    pub days_count: u32,
    /// The fee charged per attended day.
    pub day_rate: Decimal,
    /// The fee for the row.
    pub fee: Decimal,
}

impl From<&BillingLineItem> for InvoiceRow {
    fn from(item: &BillingLineItem) -> Self {
        Self {
            child_id: item.child_id.clone(),
            child_name: item.child_name.clone(),
            day_ranges: compress_day_ranges(&item.attended_days),
            days_count: item.days_count(),
            day_rate: item.day_rate,
            fee: item.fee,
        }
    }
}

/// Response body for invoice endpoints: the invoice plus display rows.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    /// The generated invoice.
    #[serde(flatten)]
    pub invoice: InvoiceResult,
    /// One display row per line item.
    pub rows: Vec<InvoiceRow>,
}

impl From<InvoiceResult> for InvoiceResponse {
    fn from(invoice: InvoiceResult) -> Self {
        let rows = invoice.line_items.iter().map(InvoiceRow::from).collect();
        Self { invoice, rows }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<BillingError> for ApiErrorResponse {
    fn from(error: BillingError) -> Self {
        let message = error.to_string();
        match error {
            BillingError::InvalidMonth { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_MONTH",
                    message,
                    "The billing month must be between 1 and 12",
                ),
            ),
            BillingError::InvalidHolidayDate { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_HOLIDAY_DATE",
                    message,
                    "Holidays must be ISO dates in YYYY-MM-DD format",
                ),
            ),
            BillingError::InvalidWeekday { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_WEEKDAY",
                    message,
                    "Schedules use weekday indices 0 (Monday) through 6 (Sunday)",
                ),
            ),
            BillingError::InvalidDayRange { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DAY_RANGE", message),
            ),
            BillingError::InvalidDayRate { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_DAY_RATE",
                    message,
                    "Day rates must be zero or positive",
                ),
            ),
            BillingError::DuplicateRecord { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(message),
            ),
            BillingError::ParentNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("PARENT_NOT_FOUND", message),
            ),
            BillingError::ChildNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("CHILD_NOT_FOUND", message),
            ),
            BillingError::ConfigNotFound { .. } | BillingError::ConfigParseError { .. } => {
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
        }
    }
}
