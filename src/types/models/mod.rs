pub mod harvest;
pub mod member;
