use std::sync::LazyLock;

use config::Config;

use super::{notion_config::NotionConfig, sheets_config::SpreadsheetConfig};

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub notion: NotionConfig,
    pub sheets: SpreadsheetConfig,
}

pub static CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    match Config::builder()
        .add_source(config::File::with_name("Config"))
        .build()
    {
        Ok(config) => config,
        Err(e) => match e {
            config::ConfigError::NotFound(property) => {
                panic!("Missing config property: {:?}", property);
            }
            _ => {
                panic!("Error reading config file: {:?}", e);
            }
        },
    }
    .try_deserialize()
    .expect("Should deserialize built config into struct")
});
