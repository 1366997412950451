pub mod filters;
pub mod models;
pub mod requests;
pub mod responses;
pub mod validations;
