//! Calculation logic for the daycare billing engine.
//!
//! This module contains the calculation functions for billing: attendance
//! enumeration against a weekly schedule and holiday calendar, day-rate fee
//! calculation, invoice generation across a parent's children, and
//! day-range compression for display.

mod attendance;
mod date_ranges;
mod fee;
mod invoice;

pub use attendance::{attended_days, attended_days_in};
pub use date_ranges::{compress_day_ranges, expand_day_ranges, format_day_ranges};
pub use fee::{FeeCalculationResult, calculate_fee};
pub use invoice::{
    ENGINE_VERSION, LineItemResult, calculate_line_item, generate_invoice, generate_invoice_for,
    generate_invoices,
};
