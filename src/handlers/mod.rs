pub mod list_handler;
