pub mod auth;
pub mod cell;
pub mod http_client;
pub mod payload;
pub mod spreadsheet_manager;
