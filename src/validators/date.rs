//! Date validators.
//!
//! Values are date strings: RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`,
//! the last two read as UTC. The reference date is the first argument, either
//! an [`Arg::Date`] or a date string, and defaults to now.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::arg::Arg;
use crate::assert::Assert;
use crate::error::RuleError;

const DAY_MILLIS: i64 = 24 * 3600 * 1000;

/// Parses a date string into a UTC instant.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Whole days from `reference` to `date`, rounded down.
///
/// Twenty-three hours after the reference is day `0`; one hour before it is
/// day `-1`.
pub fn offset_days(date: DateTime<Utc>, reference: DateTime<Utc>) -> i64 {
    (date - reference).num_milliseconds().div_euclid(DAY_MILLIS)
}

fn reference(arg: Option<&Arg>) -> Option<DateTime<Utc>> {
    match arg {
        None => Some(Utc::now()),
        Some(Arg::Date(d)) => Some(*d),
        Some(other) => other.as_str().and_then(parse_date),
    }
}

fn compare_dates(
    assert: &Assert<'_>,
    value: Option<&Value>,
    args: &[Arg],
    predicate: impl FnOnce(DateTime<Utc>, DateTime<Utc>) -> bool,
) -> Result<bool, RuleError> {
    let Some(date) = value.and_then(Value::as_str).and_then(parse_date) else {
        return assert.expect(false, &["date"]);
    };
    let Some(reference) = reference(args.first()) else {
        return assert.expect_param(false, &["date"], args.first());
    };
    assert.that(predicate(date, reference))
}

pub fn yesterday(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    compare_dates(assert, value, args, |date, reference| offset_days(date, reference) == -1)
}

pub fn today(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    compare_dates(assert, value, args, |date, reference| offset_days(date, reference) == 0)
}

pub fn tomorrow(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    compare_dates(assert, value, args, |date, reference| offset_days(date, reference) == 1)
}

/// Passes when the value is strictly earlier than the reference.
pub fn before(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    compare_dates(assert, value, args, |date, reference| date < reference)
}

/// Passes when the value is strictly later than the reference.
pub fn after(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    compare_dates(assert, value, args, |date, reference| date > reference)
}
