//! Property-based tests for attendance enumeration, day-range compression,
//! invoice totals and child ownership.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use daycare_billing::calculation::{
    attended_days, compress_day_ranges, expand_day_ranges, generate_invoice, generate_invoices,
};
use daycare_billing::models::{BillingMonth, Child, HolidaySet, Parent, Registry, WeeklySchedule};

// =============================================================================
// Generators
// =============================================================================

fn arb_period() -> impl Strategy<Value = (i32, u32)> {
    (1990i32..=2100, 1u32..=12)
}

fn arb_schedule() -> impl Strategy<Value = WeeklySchedule> {
    prop::collection::vec(0u8..=6, 0..=7)
        .prop_map(|indices| WeeklySchedule::from_indices(indices).unwrap())
}

/// Holiday day-of-month offsets; days past the month end are dropped.
fn arb_holiday_days() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..=31, 0..8)
}

/// Day rates in cents, 0.00 to 200.00.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=20_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn holidays_for(year: i32, month: u32, days: &[u32]) -> HolidaySet {
    days.iter()
        .filter_map(|&day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

fn ascending_days() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1u32..=31, 0..=20).prop_map(|set| set.into_iter().collect())
}

// =============================================================================
// Attendance enumeration
// =============================================================================

proptest! {
    #[test]
    fn attended_days_are_ascending_and_in_month(
        (year, month) in arb_period(),
        schedule in arb_schedule(),
        holiday_days in arb_holiday_days(),
    ) {
        let holidays = holidays_for(year, month, &holiday_days);
        let days = attended_days(year, month, &schedule, &holidays).unwrap();
        let period = BillingMonth::new(year, month).unwrap();

        prop_assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(days.iter().all(|&day| day >= 1 && day <= period.num_days()));
    }

    #[test]
    fn attended_days_match_schedule_and_holidays_exactly(
        (year, month) in arb_period(),
        schedule in arb_schedule(),
        holiday_days in arb_holiday_days(),
    ) {
        let holidays = holidays_for(year, month, &holiday_days);
        let days = attended_days(year, month, &schedule, &holidays).unwrap();
        let period = BillingMonth::new(year, month).unwrap();

        for date in period.days() {
            let expected = schedule.includes_date(date) && !holidays.contains(date);
            prop_assert_eq!(days.contains(&date.day()), expected, "day {}", date);
        }
    }

    #[test]
    fn every_day_schedule_without_holidays_covers_month(
        (year, month) in arb_period(),
    ) {
        let schedule = WeeklySchedule::from_indices(0..=6).unwrap();
        let days = attended_days(year, month, &schedule, &HolidaySet::new()).unwrap();
        let period = BillingMonth::new(year, month).unwrap();

        prop_assert_eq!(days.len() as u32, period.num_days());
    }

    #[test]
    fn out_of_range_months_rejected(year in 1990i32..=2100, month in 13u32..1000) {
        prop_assert!(attended_days(year, month, &WeeklySchedule::weekdays(), &HolidaySet::new()).is_err());
    }
}

// =============================================================================
// Day-range compression
// =============================================================================

proptest! {
    #[test]
    fn compressed_ranges_expand_to_input(days in ascending_days()) {
        let ranges = compress_day_ranges(&days);
        prop_assert_eq!(expand_day_ranges(&ranges).unwrap(), days);
    }

    #[test]
    fn compressed_ranges_never_touch(days in ascending_days()) {
        let ranges = expand_bounds(&compress_day_ranges(&days));
        prop_assert!(ranges.windows(2).all(|pair| pair[1].0 > pair[0].1 + 1));
    }
}

proptest! {
    #[test]
    fn expanded_days_stay_within_a_month(start in 0u32..100, end in 0u32..100) {
        let token = format!("{}-{}", start, end);
        if let Ok(days) = expand_day_ranges(&[token]) {
            prop_assert!(days.iter().all(|&day| (1..=31).contains(&day)));
        }
    }
}

fn expand_bounds(ranges: &[String]) -> Vec<(u32, u32)> {
    ranges
        .iter()
        .map(|token| match token.split_once('-') {
            Some((start, end)) => (start.parse().unwrap(), end.parse().unwrap()),
            None => {
                let day = token.parse().unwrap();
                (day, day)
            }
        })
        .collect()
}

// =============================================================================
// Invoice totals
// =============================================================================

proptest! {
    #[test]
    fn invoice_totals_are_sum_of_line_items(
        (year, month) in arb_period(),
        children in prop::collection::vec((arb_schedule(), arb_rate()), 0..4),
        holiday_days in arb_holiday_days(),
    ) {
        let holidays = holidays_for(year, month, &holiday_days);
        let mut registry = Registry::new();
        registry.add_parent(Parent::new("parent_p", "Prop Parent", "")).unwrap();
        for (i, (schedule, day_rate)) in children.iter().enumerate() {
            registry.enrol_child(Child {
                id: format!("child_{}", i),
                name: format!("Child {}", i),
                date_of_birth: None,
                schedule: *schedule,
                day_rate: *day_rate,
                parent_id: "parent_p".to_string(),
            }).unwrap();
        }

        let parent = registry.parent("parent_p").unwrap();
        let invoice = generate_invoice(year, month, parent, &registry, &holidays).unwrap();

        prop_assert_eq!(invoice.line_items.len(), children.len());
        for item in &invoice.line_items {
            prop_assert_eq!(item.fee, Decimal::from(item.days_count()) * item.day_rate);
        }
        let fee: Decimal = invoice.line_items.iter().map(|item| item.fee).sum();
        let days: u32 = invoice.line_items.iter().map(|item| item.days_count()).sum();
        prop_assert_eq!(invoice.totals.fee, fee);
        prop_assert_eq!(invoice.totals.days_count, days);
    }
}

// =============================================================================
// Child ownership
// =============================================================================

const PARENT_COUNT: usize = 3;
const CHILD_COUNT: usize = 4;

/// Child ids each parent record lists, including repeats and other
/// parents' children.
fn arb_listings() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(
        prop::collection::vec(0..CHILD_COUNT, 0..6),
        PARENT_COUNT,
    )
}

fn arb_owners() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..PARENT_COUNT, CHILD_COUNT)
}

fn owned_child(index: usize, owner: usize) -> Child {
    Child {
        id: format!("child_{}", index),
        name: format!("Child {}", index),
        date_of_birth: None,
        schedule: WeeklySchedule::weekdays(),
        day_rate: Decimal::new(1000, 2),
        parent_id: format!("parent_{}", owner),
    }
}

proptest! {
    #[test]
    fn every_child_billed_once_to_its_owner(
        listings in arb_listings(),
        owners in arb_owners(),
        children_first in any::<bool>(),
    ) {
        let mut registry = Registry::new();
        let parents: Vec<Parent> = listings
            .iter()
            .enumerate()
            .map(|(index, listed)| {
                let mut parent = Parent::new(format!("parent_{}", index), format!("Parent {}", index), "");
                parent.child_ids = listed.iter().map(|child| format!("child_{}", child)).collect();
                parent
            })
            .collect();

        if children_first {
            for (index, &owner) in owners.iter().enumerate() {
                registry.enrol_child(owned_child(index, owner)).unwrap();
            }
        }
        for parent in parents {
            registry.add_parent(parent).unwrap();
        }
        if !children_first {
            for (index, &owner) in owners.iter().enumerate() {
                registry.enrol_child(owned_child(index, owner)).unwrap();
            }
        }

        let period = BillingMonth::new(2024, 8).unwrap();
        let invoices = generate_invoices(&period, &registry, &HolidaySet::new()).unwrap();
        prop_assert_eq!(invoices.len(), PARENT_COUNT);

        let mut billed = HashSet::new();
        for invoice in &invoices {
            for item in &invoice.line_items {
                let child = registry.child(&item.child_id).unwrap();
                prop_assert_eq!(&child.parent_id, &invoice.parent_id);
                prop_assert!(billed.insert(item.child_id.clone()), "{} billed twice", item.child_id);
            }
        }
        prop_assert_eq!(billed.len(), CHILD_COUNT);
    }
}
