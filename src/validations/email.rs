use email_address::EmailAddress;
use rayon::prelude::*;
use validator::ValidationError;

use crate::{
    types::validations::{Validation, ValidationResult},
    utils::{locale_utils::Messages, validation_utils::add_error},
};

const MIN_EMAIL_LENGTH: usize = 5;
const MAX_EMAIL_LENGTH: usize = 254;

fn has_min_length(email: &str, messages: &Messages) -> ValidationResult {
    if email.len() < MIN_EMAIL_LENGTH {
        return Err(messages.get_validation_message(
            "email.too_short",
            &format!("Email must be at least {} characters", MIN_EMAIL_LENGTH),
        ));
    }
    Ok(())
}

fn has_max_length(email: &str, messages: &Messages) -> ValidationResult {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(messages.get_validation_message(
            "email.too_long",
            &format!("Email must be less than {} characters", MAX_EMAIL_LENGTH),
        ));
    }
    Ok(())
}

fn has_no_invalid_chars(email: &str, messages: &Messages) -> ValidationResult {
    if email.chars().any(|c| c.is_whitespace() || !c.is_ascii()) {
        return Err(messages.get_validation_message(
            "email.invalid_chars",
            "Email must not contain spaces or non-ASCII characters",
        ));
    }
    Ok(())
}

fn has_valid_format(email: &str, messages: &Messages) -> ValidationResult {
    if !EmailAddress::is_valid(email) {
        return Err(messages.get_validation_message("email.invalid_format", "Invalid email format"));
    }
    Ok(())
}

pub fn validate_email(email: &str, messages: &Messages) -> Result<(), ValidationError> {
    let validations: [Validation; 4] = [
        has_min_length,
        has_max_length,
        has_no_invalid_chars,
        has_valid_format,
    ];

    let errors: Vec<String> = validations
        .par_iter()
        .filter_map(|validate_fn| validate_fn(email, messages).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        let concatenated_errors = errors.join(", ");
        Err(add_error("email.invalid", concatenated_errors, email))
    }
}
