use crate::utils::locale_utils::Messages;

pub type ValidationResult = Result<(), String>;

pub type Validation = fn(&str, &Messages) -> ValidationResult;
