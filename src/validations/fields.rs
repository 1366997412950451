use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;
use uuid::Uuid;
use validator::ValidationError;

use crate::utils::{locale_utils::Messages, validation_utils::add_error};

pub fn required<'a>(value: Option<&'a str>, messages: &Messages) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(add_error(
            "field.required",
            messages.get_validation_message("field.required", "This field is required"),
            "",
        )),
    }
}

pub fn parse_uuid(value: Option<&str>, messages: &Messages) -> Result<Uuid, ValidationError> {
    let raw = required(value, messages)?;
    Uuid::parse_str(raw).map_err(|_| {
        add_error(
            "uuid.invalid",
            messages.get_validation_message("uuid.invalid", "Must be a valid UUID"),
            raw,
        )
    })
}

pub fn parse_timestamp(
    value: Option<&str>,
    messages: &Messages,
) -> Result<DateTime<Utc>, ValidationError> {
    let raw = required(value, messages)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            add_error(
                "timestamp.invalid",
                messages.get_validation_message(
                    "timestamp.invalid",
                    "Must be an RFC 3339 timestamp",
                ),
                raw,
            )
        })
}

pub fn parse_date(value: Option<&str>, messages: &Messages) -> Result<NaiveDate, ValidationError> {
    let raw = required(value, messages)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        add_error(
            "date.invalid",
            messages.get_validation_message("date.invalid", "Must be a date formatted YYYY-MM-DD"),
            raw,
        )
    })
}

/// Enumerated values are normalised to lowercase before the exact match.
pub fn parse_enum<T: FromStr>(value: Option<&str>, messages: &Messages) -> Result<T, ValidationError> {
    let raw = required(value, messages)?;
    raw.to_lowercase().parse::<T>().map_err(|_| {
        add_error(
            "enum.invalid",
            messages.get_validation_message("enum.invalid", "Not one of the allowed values"),
            raw,
        )
    })
}

pub fn parse_area(value: Option<f64>, messages: &Messages) -> Result<f64, ValidationError> {
    match value {
        Some(area) if area.is_finite() && area >= 0.0 => Ok(area),
        Some(area) => Err(add_error(
            "area.invalid",
            messages.get_validation_message(
                "area.invalid",
                "Area must be a non-negative number of hectares",
            ),
            &area.to_string(),
        )),
        None => Err(add_error(
            "field.required",
            messages.get_validation_message("field.required", "This field is required"),
            "",
        )),
    }
}
