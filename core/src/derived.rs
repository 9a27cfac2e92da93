//! Display-only values computed per row, never persisted.
//!
//! A missing input always yields `None`, never a computed zero.

use chrono::NaiveDate;

/// Whole days from `start` to `end`. Negative when the range is inverted.
pub fn duration_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    Some((end? - start?).num_days())
}

/// Parse a decimal string as sent by the backend (`"50000.00"`).
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `days × day_rate`. Absent when either input is absent, the rate does not
/// parse or is zero, or the duration is negative.
pub fn estimated_cost(days: Option<i64>, day_rate: Option<&str>) -> Option<f64> {
    let days = days.filter(|d| *d >= 0)?;
    let rate = day_rate.and_then(parse_decimal).filter(|r| *r != 0.0)?;
    Some(days as f64 * rate)
}
