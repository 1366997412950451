pub mod defaults;
pub mod member_status;
pub mod role;
