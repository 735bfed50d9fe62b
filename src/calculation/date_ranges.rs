//! Day-range compression for display.
//!
//! Invoices print attended days compactly: runs of consecutive days collapse
//! into inclusive ranges such as `"5-9"`, isolated days stay as `"16"`.

use crate::error::{BillingError, BillingResult};

/// Highest day number any month can have.
const MAX_DAY: u32 = 31;

/// Compresses ascending day numbers into single-day and range strings.
///
/// The input must already be sorted ascending, which attendance output
/// always is. A day extends the current run only if it is exactly one more
/// than the run's end; no gaps are inferred.
///
/// # Example
///
/// ```
/// use daycare_billing::calculation::compress_day_ranges;
///
/// assert_eq!(compress_day_ranges(&[1, 2, 4, 5, 6, 9]), vec!["1-2", "4-6", "9"]);
/// assert!(compress_day_ranges(&[]).is_empty());
/// ```
pub fn compress_day_ranges(days: &[u32]) -> Vec<String> {
    let Some((&first, rest)) = days.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let (mut start, mut end) = (first, first);

    for &day in rest {
        if day == end + 1 {
            end = day;
        } else {
            ranges.push(format_range(start, end));
            start = day;
            end = day;
        }
    }
    ranges.push(format_range(start, end));

    ranges
}

/// Expands range strings produced by [`compress_day_ranges`] back into days.
///
/// Each token is either a day number or an inclusive `start-end` range with
/// `start <= end`. Day numbers must lie in 1..=31.
///
/// # Example
///
/// ```
/// use daycare_billing::calculation::expand_day_ranges;
///
/// assert_eq!(expand_day_ranges(&["1-3", "7"]).unwrap(), vec![1, 2, 3, 7]);
/// assert!(expand_day_ranges(&["9-4"]).is_err());
/// assert!(expand_day_ranges(&["1-4000000000"]).is_err());
/// ```
pub fn expand_day_ranges<S: AsRef<str>>(ranges: &[S]) -> BillingResult<Vec<u32>> {
    let mut days = Vec::new();

    for token in ranges {
        let token = token.as_ref();
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_day(token, start)?;
                let end = parse_day(token, end)?;
                if start > end {
                    return Err(BillingError::InvalidDayRange {
                        value: token.to_string(),
                        message: "range start is after range end".to_string(),
                    });
                }
                days.extend(start..=end);
            }
            None => days.push(parse_day(token, token)?),
        }
    }

    Ok(days)
}

/// Formats attended days as the comma-separated list printed on invoices.
///
/// # Example
///
/// ```
/// use daycare_billing::calculation::format_day_ranges;
///
/// assert_eq!(format_day_ranges(&[1, 2, 5, 6, 7, 16]), "1-2,5-7,16");
/// ```
pub fn format_day_ranges(days: &[u32]) -> String {
    compress_day_ranges(days).join(",")
}

fn format_range(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

fn parse_day(token: &str, part: &str) -> BillingResult<u32> {
    let invalid = |message: String| BillingError::InvalidDayRange {
        value: token.to_string(),
        message,
    };

    let day = part
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid(e.to_string()))?;
    if !(1..=MAX_DAY).contains(&day) {
        return Err(invalid(format!("day {} is outside 1..={}", day, MAX_DAY)));
    }
    Ok(day)
}
