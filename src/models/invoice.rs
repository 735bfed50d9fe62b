//! Invoice result models for the daycare billing engine.
//!
//! This module contains the [`InvoiceResult`] type and its associated structures
//! that capture all outputs from an invoice generation: per-child line items,
//! totals, and the audit trace of every rule applied.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BillingMonth;

/// One child's attendance and fee for one month.
///
/// # Example
///
/// ```
/// use daycare_billing::models::BillingLineItem;
/// use rust_decimal::Decimal;
///
/// let line_item = BillingLineItem {
///     child_id: "child_001".to_string(),
///     child_name: "Mia Moreno".to_string(),
///     attended_days: vec![1, 2, 5],
///     day_rate: Decimal::new(5000, 2),
///     fee: Decimal::new(15000, 2),
/// };
/// assert_eq!(line_item.days_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingLineItem {
    /// The ID of the child billed on this line.
    pub child_id: String,
    /// The child's name as printed on the invoice.
    pub child_name: String,
    /// Days of the month attended, ascending and without duplicates.
    pub attended_days: Vec<u32>,
    /// The fee charged per attended day.
    pub day_rate: Decimal,
    /// The total fee for this line (days * rate).
    pub fee: Decimal,
}

impl BillingLineItem {
    /// Returns the number of attended days.
    pub fn days_count(&self) -> u32 {
        self.attended_days.len() as u32
    }
}

/// Aggregated totals for an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all line item fees.
    pub fee: Decimal,
    /// Sum of all line item day counts.
    pub days_count: u32,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during invoice generation.
///
/// Warnings flag results that are valid but likely worth a second look,
/// such as a parent with no enrolled children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of generating one parent's invoice for one month.
///
/// The invoice id and timestamp are metadata only; the line items and
/// totals depend solely on the month, the children and the holiday set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResult {
    /// Unique identifier for this invoice.
    pub invoice_id: Uuid,
    /// When the invoice was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that generated the invoice.
    pub engine_version: String,
    /// The ID of the parent being billed.
    pub parent_id: String,
    /// The parent's name as printed on the invoice.
    pub parent_name: String,
    /// The month being billed.
    pub period: BillingMonth,
    /// One line per child, in the parent's enrolment order.
    pub line_items: Vec<BillingLineItem>,
    /// Aggregated totals across all line items.
    pub totals: InvoiceTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
