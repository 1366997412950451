pub mod date_range;
pub mod filter_state;
pub mod selection;
