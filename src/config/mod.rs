pub mod cors;
pub mod settings;
