//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an [`Error::invalid_request`] with structured details
//! naming the offending field, so clients can surface the failure next to
//! the right input.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::Error;

/// Default and ceiling for history page sizes.
pub(crate) const DEFAULT_HISTORY_LIMIT: i64 = 100;
pub(crate) const MAX_HISTORY_LIMIT: i64 = 1000;

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Unwrap an optional body field, rejecting absent values.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Reject empty or whitespace-only identifiers.
pub(crate) fn require_non_empty(value: &str, field: &'static str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(missing_field_error(field));
    }
    Ok(())
}

/// Weight must be a finite, non-negative number; zero marks bodyweight.
pub(crate) fn validate_weight(weight: f64) -> Result<(), Error> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(
            Error::invalid_request("weight must not be negative").with_details(json!({
                "field": "weight",
                "value": weight.to_string(),
                "code": "out_of_range",
            })),
        );
    }
    Ok(())
}

/// Reps must be a positive integer.
pub(crate) fn validate_reps(reps: i32) -> Result<(), Error> {
    if reps < 1 {
        return Err(
            Error::invalid_request("reps must be positive").with_details(json!({
                "field": "reps",
                "value": reps,
                "code": "out_of_range",
            })),
        );
    }
    Ok(())
}

/// Workout letters are single ASCII uppercase letters (A, B, C, ...).
pub(crate) fn validate_workout_letter(letter: &str) -> Result<(), Error> {
    let mut chars = letter.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_uppercase() {
            return Ok(());
        }
    }
    Err(
        Error::invalid_request("workout letter must be a single letter A-Z").with_details(json!({
            "field": "workoutLetter",
            "value": letter,
            "code": "invalid_workout_letter",
        })),
    )
}

/// Parse a `YYYY-MM-DD` date field.
pub(crate) fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, Error> {
    value.parse().map_err(|_| {
        Error::invalid_request("invalid date, expected YYYY-MM-DD").with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_date",
        }))
    })
}

/// Clamp a requested history limit into the supported range.
pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn missing_field_names_the_field() {
        let err = missing_field_error("userId");
        assert_eq!(err.message(), "userId is required");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "userId");
    }

    #[rstest]
    #[case(-1.0, false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    #[case(0.0, true)]
    #[case(102.5, true)]
    fn weight_bounds(#[case] weight: f64, #[case] ok: bool) {
        assert_eq!(validate_weight(weight).is_ok(), ok);
    }

    #[rstest]
    #[case(0, false)]
    #[case(-3, false)]
    #[case(1, true)]
    #[case(30, true)]
    fn reps_bounds(#[case] reps: i32, #[case] ok: bool) {
        assert_eq!(validate_reps(reps).is_ok(), ok);
    }

    #[rstest]
    #[case("A", true)]
    #[case("E", true)]
    #[case("a", false)]
    #[case("AB", false)]
    #[case("", false)]
    #[case("1", false)]
    fn workout_letter_shape(#[case] letter: &str, #[case] ok: bool) {
        assert_eq!(validate_workout_letter(letter).is_ok(), ok);
    }

    #[rstest]
    #[case(None, DEFAULT_HISTORY_LIMIT)]
    #[case(Some(5), 5)]
    #[case(Some(0), 1)]
    #[case(Some(10_000), MAX_HISTORY_LIMIT)]
    fn limits_clamp(#[case] requested: Option<i64>, #[case] effective: i64) {
        assert_eq!(clamp_limit(requested), effective);
    }

    #[test]
    fn dates_parse_or_reject() {
        assert!(parse_date("2026-03-14", "date").is_ok());
        assert!(parse_date("14/03/2026", "date").is_err());
    }
}
