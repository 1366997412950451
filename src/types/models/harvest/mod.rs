pub mod assistance_status;
pub mod crop_type;
