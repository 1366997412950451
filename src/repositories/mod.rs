pub mod record_repository;
pub mod table_record;
