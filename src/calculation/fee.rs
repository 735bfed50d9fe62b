//! Day-rate fee calculation.
//!
//! This module turns a child's attended days into a fee at the child's day
//! rate, rejecting negative rates.

use rust_decimal::Decimal;

use crate::error::{BillingError, BillingResult};
use crate::models::{AuditStep, Child};

/// The result of a fee calculation, including the fee and audit step.
#[derive(Debug, Clone)]
pub struct FeeCalculationResult {
    /// The fee for the month (attended days * day rate).
    pub fee: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates a child's fee for the given attended days.
///
/// # Arguments
///
/// * `child` - The child being billed (supplies id and day rate)
/// * `attended_days` - The days of the month the child attended
/// * `step_number` - The audit step number to assign
///
/// # Returns
///
/// The fee and its audit step, or [`BillingError::InvalidDayRate`] if the
/// child's day rate is negative.
///
/// # Example
///
/// ```
/// use daycare_billing::calculation::calculate_fee;
/// use daycare_billing::models::{Child, WeeklySchedule};
/// use rust_decimal::Decimal;
///
/// let child = Child {
///     id: "child_001".to_string(),
///     name: "Mia Moreno".to_string(),
///     date_of_birth: None,
///     schedule: WeeklySchedule::weekdays(),
///     day_rate: Decimal::new(5000, 2),
///     parent_id: "parent_001".to_string(),
/// };
///
/// let result = calculate_fee(&child, &[1, 2, 5], 1).unwrap();
/// assert_eq!(result.fee, Decimal::new(15000, 2));
/// ```
pub fn calculate_fee(
    child: &Child,
    attended_days: &[u32],
    step_number: u32,
) -> BillingResult<FeeCalculationResult> {
    if child.day_rate < Decimal::ZERO {
        return Err(BillingError::InvalidDayRate {
            child_id: child.id.clone(),
            rate: child.day_rate,
        });
    }

    let days_count = Decimal::from(attended_days.len() as u64);
    let fee = days_count * child.day_rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "day_rate_fee".to_string(),
        rule_name: "Day Rate Fee".to_string(),
        input: serde_json::json!({
            "child_id": child.id,
            "days_count": attended_days.len(),
            "day_rate": child.day_rate.to_string()
        }),
        output: serde_json::json!({
            "fee": fee.to_string()
        }),
        reasoning: format!(
            "{} attended day(s) at ${} per day = ${}",
            attended_days.len(),
            child.day_rate,
            fee
        ),
    };

    Ok(FeeCalculationResult { fee, audit_step })
}
