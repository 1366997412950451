pub mod email;
pub mod fields;
pub mod name;
