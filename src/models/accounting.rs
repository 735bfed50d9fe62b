//! Per-child monthly accounting.
//!
//! Invoice generation never writes back onto child records. Callers that
//! need to look up what a child was billed for a month record each fresh
//! [`InvoiceResult`] into an [`AccountingLedger`] instead.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BillingMonth, InvoiceResult};

/// What one child attended and was charged in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildAccounting {
    /// The ID of the child.
    pub child_id: String,
    /// The month this entry covers.
    pub period: BillingMonth,
    /// Days of the month attended.
    pub attended_days: Vec<u32>,
    /// The fee charged for the month.
    pub fee: Decimal,
}

/// Caller-owned cache of child accounting keyed by (child, month).
///
/// # Example
///
/// ```
/// use daycare_billing::models::{AccountingLedger, BillingMonth};
///
/// let ledger = AccountingLedger::new();
/// let august = BillingMonth::new(2024, 8).unwrap();
/// assert!(ledger.get("child_001", august).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccountingLedger {
    entries: HashMap<(String, BillingMonth), ChildAccounting>,
}

impl AccountingLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every line item of an invoice, replacing any entry previously
    /// recorded for the same child and month.
    ///
    /// Returns the number of entries written.
    pub fn record_invoice(&mut self, invoice: &InvoiceResult) -> usize {
        for line_item in &invoice.line_items {
            let entry = ChildAccounting {
                child_id: line_item.child_id.clone(),
                period: invoice.period,
                attended_days: line_item.attended_days.clone(),
                fee: line_item.fee,
            };
            self.entries
                .insert((line_item.child_id.clone(), invoice.period), entry);
        }
        invoice.line_items.len()
    }

    /// Returns the entry for a child and month, if one was recorded.
    pub fn get(&self, child_id: &str, period: BillingMonth) -> Option<&ChildAccounting> {
        self.entries.get(&(child_id.to_string(), period))
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
