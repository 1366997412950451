use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use validator::ValidationError;

use crate::{
    types::validations::{Validation, ValidationResult},
    utils::{locale_utils::Messages, validation_utils::add_error},
};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;

static NAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\p{Cc}\p{Cf}\p{Zl}\p{Zp}]+$").expect("name pattern is a valid regex")
});

fn is_not_empty(name: &str, messages: &Messages) -> ValidationResult {
    if name.trim().is_empty() {
        Err(messages.get_validation_message("name.empty", "Name must not be empty"))
    } else {
        Ok(())
    }
}

fn has_min_length(name: &str, messages: &Messages) -> ValidationResult {
    if name.trim().chars().count() < MIN_NAME_LENGTH {
        Err(messages.get_validation_message(
            "name.too_short",
            &format!("Name must be at least {} characters long", MIN_NAME_LENGTH),
        ))
    } else {
        Ok(())
    }
}

fn has_max_length(name: &str, messages: &Messages) -> ValidationResult {
    if name.chars().count() > MAX_NAME_LENGTH {
        Err(messages.get_validation_message(
            "name.too_long",
            &format!("Name must be less than {} characters", MAX_NAME_LENGTH),
        ))
    } else {
        Ok(())
    }
}

fn has_valid_chars(name: &str, messages: &Messages) -> ValidationResult {
    if !name.is_empty() && !NAME_CHARS.is_match(name) {
        Err(messages.get_validation_message(
            "name.invalid_chars",
            "Name must not contain control characters or line breaks",
        ))
    } else {
        Ok(())
    }
}

/// Person names: member full names and farmer names. Any printable text
/// within the length bounds is accepted.
pub fn validate_name(name: &str, messages: &Messages) -> Result<(), ValidationError> {
    let validations: [Validation; 4] = [
        is_not_empty,
        has_min_length,
        has_max_length,
        has_valid_chars,
    ];

    let errors: Vec<String> = validations
        .par_iter()
        .filter_map(|f| f(name, messages).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        let concatenated_errors = errors.join(", ");
        Err(add_error("name.invalid", concatenated_errors, name))
    }
}
