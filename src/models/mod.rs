pub mod harvest_model;
pub mod member_model;
pub mod user_profile_model;
