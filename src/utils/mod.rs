pub mod locale_utils;
pub mod validation_utils;
