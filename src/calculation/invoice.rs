//! Invoice generation.
//!
//! This module orchestrates attendance enumeration and fee calculation
//! across every child of one parent for one month, producing an
//! [`InvoiceResult`] with per-child line items, totals and an audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::BillingResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, BillingLineItem, BillingMonth, Child, HolidaySet,
    InvoiceResult, InvoiceTotals, Parent, Registry,
};

use super::attendance::attended_days_in;
use super::fee::calculate_fee;

/// The engine version stamped on every invoice.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The result of billing one child, including the audit steps taken.
#[derive(Debug, Clone)]
pub struct LineItemResult {
    /// The child's line item.
    pub line_item: BillingLineItem,
    /// Attendance and fee audit steps, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Bills one child for one month.
///
/// # Arguments
///
/// * `period` - The month being billed
/// * `child` - The child being billed
/// * `holidays` - The holiday calendar
/// * `step_number` - The audit step number of the first step produced
///
/// # Returns
///
/// The line item plus two audit steps (attendance, then fee), or
/// [`BillingError::InvalidDayRate`](crate::error::BillingError::InvalidDayRate)
/// if the child's rate is negative.
pub fn calculate_line_item(
    period: &BillingMonth,
    child: &Child,
    holidays: &HolidaySet,
    step_number: u32,
) -> BillingResult<LineItemResult> {
    let attended_days = attended_days_in(period, &child.schedule, holidays);
    let month_holidays: Vec<String> = holidays
        .holidays_in_month(period)
        .iter()
        .map(|date| date.to_string())
        .collect();

    let attendance_step = AuditStep {
        step_number,
        rule_id: "attendance_enumeration".to_string(),
        rule_name: "Attendance Enumeration".to_string(),
        input: serde_json::json!({
            "child_id": child.id,
            "period": period.to_string(),
            "schedule": child.schedule.indices(),
            "holidays_in_month": month_holidays
        }),
        output: serde_json::json!({
            "attended_days": attended_days,
            "days_count": attended_days.len()
        }),
        reasoning: format!(
            "{} of {} day(s) in {} fall on a scheduled weekday and are not holidays",
            attended_days.len(),
            period.num_days(),
            period
        ),
    };

    let fee_result = calculate_fee(child, &attended_days, step_number + 1)?;

    debug!(
        child_id = %child.id,
        period = %period,
        days_count = attended_days.len(),
        fee = %fee_result.fee,
        "Line item calculated"
    );

    Ok(LineItemResult {
        line_item: BillingLineItem {
            child_id: child.id.clone(),
            child_name: child.name.clone(),
            attended_days,
            day_rate: child.day_rate,
            fee: fee_result.fee,
        },
        audit_steps: vec![attendance_step, fee_result.audit_step],
    })
}

/// Generates a parent's invoice for a month.
///
/// Every child the registry links to `parent` is billed in enrolment order.
/// A parent with no children yields zero totals and a `NO_CHILDREN` warning.
///
/// # Returns
///
/// The invoice, or an error if the month is invalid or any child's day rate
/// is negative. No partial invoice is produced on error.
///
/// # Example
///
/// ```
/// use daycare_billing::calculation::generate_invoice;
/// use daycare_billing::models::{Child, HolidaySet, Parent, Registry, WeeklySchedule};
/// use rust_decimal::Decimal;
///
/// let mut registry = Registry::new();
/// registry.add_parent(Parent::new("parent_001", "Alice Moreno", "alice@example.com")).unwrap();
/// registry.enrol_child(Child {
///     id: "child_001".to_string(),
///     name: "Mia Moreno".to_string(),
///     date_of_birth: None,
///     schedule: WeeklySchedule::weekdays(),
///     day_rate: Decimal::new(50, 0),
///     parent_id: "parent_001".to_string(),
/// }).unwrap();
///
/// let holidays = HolidaySet::from_iso_strings(["2024-08-15"]).unwrap();
/// let parent = registry.parent("parent_001").unwrap();
/// let invoice = generate_invoice(2024, 8, parent, &registry, &holidays).unwrap();
///
/// assert_eq!(invoice.totals.days_count, 21);
/// assert_eq!(invoice.totals.fee, Decimal::new(1050, 0));
/// ```
pub fn generate_invoice(
    year: i32,
    month: u32,
    parent: &Parent,
    registry: &Registry,
    holidays: &HolidaySet,
) -> BillingResult<InvoiceResult> {
    let period = BillingMonth::new(year, month)?;
    generate_invoice_for(&period, parent, registry, holidays)
}

/// Generates a parent's invoice for an already validated month.
pub fn generate_invoice_for(
    period: &BillingMonth,
    parent: &Parent,
    registry: &Registry,
    holidays: &HolidaySet,
) -> BillingResult<InvoiceResult> {
    let start_time = Instant::now();
    let children = registry.children_of(parent);

    let mut line_items: Vec<BillingLineItem> = Vec::with_capacity(children.len());
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    if children.is_empty() {
        warnings.push(AuditWarning {
            code: "NO_CHILDREN".to_string(),
            message: format!("Parent '{}' has no enrolled children", parent.id),
            severity: "low".to_string(),
        });
    }

    for child in children {
        let result = calculate_line_item(period, child, holidays, step_number)?;
        step_number += result.audit_steps.len() as u32;

        if result.line_item.attended_days.is_empty() {
            warnings.push(AuditWarning {
                code: "NO_ATTENDANCE".to_string(),
                message: format!("Child '{}' has no attended days in {}", child.id, period),
                severity: "low".to_string(),
            });
        }

        audit_steps.extend(result.audit_steps);
        line_items.push(result.line_item);
    }

    let totals = InvoiceTotals {
        fee: line_items.iter().map(|item| item.fee).sum::<Decimal>(),
        days_count: line_items.iter().map(BillingLineItem::days_count).sum(),
    };

    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        parent_id = %parent.id,
        period = %period,
        children = line_items.len(),
        total_fee = %totals.fee,
        days_count = totals.days_count,
        duration_us,
        "Invoice generated"
    );

    Ok(InvoiceResult {
        invoice_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        parent_id: parent.id.clone(),
        parent_name: parent.name.clone(),
        period: *period,
        line_items,
        totals,
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us,
        },
    })
}

/// Generates one invoice per enrolled parent, in parent id order.
///
/// Fails on the first parent whose invoice cannot be generated.
pub fn generate_invoices(
    period: &BillingMonth,
    registry: &Registry,
    holidays: &HolidaySet,
) -> BillingResult<Vec<InvoiceResult>> {
    let invoices = registry
        .parents()
        .map(|parent| generate_invoice_for(period, parent, registry, holidays))
        .collect::<BillingResult<Vec<_>>>()?;

    info!(
        period = %period,
        invoices = invoices.len(),
        total_fee = %invoices.iter().map(|invoice| invoice.totals.fee).sum::<Decimal>(),
        "Month billed for all parents"
    );

    Ok(invoices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillingError;
    use crate::models::WeeklySchedule;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_child(id: &str, schedule: &[u8], day_rate: &str, parent_id: &str) -> Child {
        Child {
            id: id.to_string(),
            name: format!("Child {}", id),
            date_of_birth: None,
            schedule: WeeklySchedule::from_indices(schedule.iter().copied()).unwrap(),
            day_rate: dec(day_rate),
            parent_id: parent_id.to_string(),
        }
    }

    fn create_family() -> Registry {
        let mut registry = Registry::new();
        registry
            .add_parent(Parent::new("parent_001", "Alice Moreno", "alice@example.com"))
            .unwrap();
        registry
            .add_parent(Parent::new("parent_002", "Chen Wei", "chen@example.com"))
            .unwrap();
        registry
            .enrol_child(create_child("child_001", &[0, 1, 2, 3, 4], "50.00", "parent_001"))
            .unwrap();
        registry
            .enrol_child(create_child("child_002", &[0, 2, 4], "45.00", "parent_001"))
            .unwrap();
        registry
    }

    fn august_holidays() -> HolidaySet {
        HolidaySet::from_iso_strings(["2024-08-15"]).unwrap()
    }

    #[test]
    fn test_two_children_aggregate() {
        let registry = create_family();
        let parent = registry.parent("parent_001").unwrap();

        let invoice = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();

        assert_eq!(invoice.line_items.len(), 2);
        assert_eq!(invoice.line_items[0].child_id, "child_001");
        assert_eq!(invoice.line_items[0].days_count(), 21);
        assert_eq!(invoice.line_items[0].fee, dec("1050.00"));
        assert_eq!(invoice.line_items[1].child_id, "child_002");
        assert_eq!(invoice.line_items[1].days_count(), 13);
        assert_eq!(invoice.line_items[1].fee, dec("585.00"));

        assert_eq!(invoice.totals.days_count, 34);
        assert_eq!(invoice.totals.fee, dec("1635.00"));
    }

    #[test]
    fn test_totals_equal_sum_of_line_items() {
        let registry = create_family();
        let parent = registry.parent("parent_001").unwrap();
        let invoice = generate_invoice(2024, 12, parent, &registry, &august_holidays()).unwrap();

        let expected_fee: Decimal = invoice
            .line_items
            .iter()
            .map(|item| Decimal::from(item.attended_days.len() as u64) * item.day_rate)
            .sum();
        assert_eq!(invoice.totals.fee, expected_fee);
    }

    #[test]
    fn test_parent_without_children_has_zero_totals() {
        let registry = create_family();
        let parent = registry.parent("parent_002").unwrap();

        let invoice = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();

        assert!(invoice.line_items.is_empty());
        assert_eq!(invoice.totals.fee, Decimal::ZERO);
        assert_eq!(invoice.totals.days_count, 0);
        assert_eq!(invoice.audit_trace.warnings[0].code, "NO_CHILDREN");
    }

    #[test]
    fn test_empty_schedule_child_bills_nothing() {
        let mut registry = Registry::new();
        registry
            .add_parent(Parent::new("parent_001", "Alice Moreno", ""))
            .unwrap();
        registry
            .enrol_child(create_child("child_001", &[], "50.00", "parent_001"))
            .unwrap();
        let parent = registry.parent("parent_001").unwrap();

        let invoice = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();

        assert!(invoice.line_items[0].attended_days.is_empty());
        assert_eq!(invoice.totals.fee, Decimal::ZERO);
        assert_eq!(invoice.audit_trace.warnings[0].code, "NO_ATTENDANCE");
    }

    #[test]
    fn test_negative_rate_fails_whole_invoice() {
        let mut registry = create_family();
        registry
            .enrol_child(create_child("child_003", &[1], "-5.00", "parent_001"))
            .unwrap();
        let parent = registry.parent("parent_001").unwrap();

        let result = generate_invoice(2024, 8, parent, &registry, &august_holidays());
        assert!(matches!(result, Err(BillingError::InvalidDayRate { .. })));
    }

    #[test]
    fn test_invalid_month_rejected() {
        let registry = create_family();
        let parent = registry.parent("parent_001").unwrap();

        let result = generate_invoice(2024, 13, parent, &registry, &august_holidays());
        assert!(matches!(result, Err(BillingError::InvalidMonth { .. })));
    }

    #[test]
    fn test_identical_inputs_give_identical_billing() {
        let registry = create_family();
        let parent = registry.parent("parent_001").unwrap();

        let first = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();
        let second = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();

        assert_eq!(first.line_items, second.line_items);
        assert_eq!(first.totals, second.totals);
        assert_ne!(first.invoice_id, second.invoice_id);
    }

    #[test]
    fn test_previous_month_does_not_leak() {
        let registry = create_family();
        let parent = registry.parent("parent_001").unwrap();

        let august = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();
        let september = generate_invoice(2024, 9, parent, &registry, &august_holidays()).unwrap();
        let august_again =
            generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();

        assert_ne!(august.line_items, september.line_items);
        assert_eq!(august.line_items, august_again.line_items);
    }

    #[test]
    fn test_audit_steps_are_numbered_sequentially() {
        let registry = create_family();
        let parent = registry.parent("parent_001").unwrap();
        let invoice = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();

        let numbers: Vec<u32> = invoice
            .audit_trace
            .steps
            .iter()
            .map(|step| step.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(invoice.audit_trace.steps[0].rule_id, "attendance_enumeration");
        assert_eq!(invoice.audit_trace.steps[1].rule_id, "day_rate_fee");
    }

    #[test]
    fn test_attendance_step_lists_month_holidays() {
        let registry = create_family();
        let child = registry.child("child_001").unwrap();
        let period = BillingMonth::new(2024, 8).unwrap();

        let result = calculate_line_item(&period, child, &august_holidays(), 7).unwrap();
        let step = &result.audit_steps[0];

        assert_eq!(step.step_number, 7);
        assert_eq!(step.input["holidays_in_month"], serde_json::json!(["2024-08-15"]));
        assert_eq!(step.output["days_count"], 21);
        assert_eq!(result.audit_steps[1].step_number, 8);
    }

    #[test]
    fn test_invoice_metadata() {
        let registry = create_family();
        let parent = registry.parent("parent_001").unwrap();
        let invoice = generate_invoice(2024, 8, parent, &registry, &august_holidays()).unwrap();

        assert_eq!(invoice.parent_id, "parent_001");
        assert_eq!(invoice.parent_name, "Alice Moreno");
        assert_eq!(invoice.period, BillingMonth::new(2024, 8).unwrap());
        assert_eq!(invoice.engine_version, ENGINE_VERSION);
    }

    #[test]
    fn test_generate_invoices_bills_every_parent() {
        let registry = create_family();
        let period = BillingMonth::new(2024, 8).unwrap();

        let invoices = generate_invoices(&period, &registry, &august_holidays()).unwrap();

        let parent_ids: Vec<&str> = invoices.iter().map(|i| i.parent_id.as_str()).collect();
        assert_eq!(parent_ids, vec!["parent_001", "parent_002"]);
        assert_eq!(invoices[0].totals.fee, dec("1635.00"));
        assert!(invoices[1].line_items.is_empty());
        assert_eq!(invoices[1].audit_trace.warnings[0].code, "NO_CHILDREN");
    }

    #[test]
    fn test_generate_invoices_fails_on_bad_rate() {
        let mut registry = create_family();
        registry
            .enrol_child(create_child("child_003", &[0], "-1.00", "parent_002"))
            .unwrap();
        let period = BillingMonth::new(2024, 8).unwrap();

        assert!(matches!(
            generate_invoices(&period, &registry, &august_holidays()),
            Err(BillingError::InvalidDayRate { .. })
        ));
    }

    #[test]
    fn test_child_listed_by_another_parent_billed_only_to_owner() {
        let mut registry = create_family();
        let mut intruder = Parent::new("parent_003", "Dana Fox", "");
        intruder.child_ids = vec!["child_001".to_string(), "child_001".to_string()];
        registry.add_parent(intruder).unwrap();
        let period = BillingMonth::new(2024, 8).unwrap();

        let invoices = generate_invoices(&period, &registry, &HolidaySet::new()).unwrap();

        let owner = &invoices[0];
        assert_eq!(owner.line_items.len(), 2);
        assert_eq!(owner.line_items[0].child_id, "child_001");
        assert_eq!(owner.line_items[0].days_count(), 22);
        assert_eq!(owner.line_items[0].fee, dec("1100.00"));
        assert!(invoices[2].line_items.is_empty());
        assert_eq!(invoices[2].totals.fee, Decimal::ZERO);
    }
}
