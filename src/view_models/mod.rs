pub mod filters;
pub mod list_record;
pub mod list_view_model;
pub mod pagination;
pub mod record_store;
