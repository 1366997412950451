pub mod list_routes;
