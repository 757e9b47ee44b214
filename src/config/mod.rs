pub mod app_config;
pub mod notion_config;
pub mod sheets_config;
