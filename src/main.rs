mod application;
mod config;
mod domain;
mod notion;
mod sheets;

use application::sync_routine::SyncRoutine;
use config::app_config::CONFIG;
use domain::routine::Routine;
use notion::client::NotionClient;
use sheets::spreadsheet_manager::SpreadsheetManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[tokio::main]
async fn main() {
    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("memosheets", tracing::Level::TRACE),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let notion = NotionClient::new(CONFIG.notion.clone());
    let spreadsheet_manager = SpreadsheetManager::new(CONFIG.sheets.clone()).await;
    let routine = SyncRoutine::new(
        notion,
        spreadsheet_manager,
        CONFIG.sheets.spreadsheet_title.clone(),
    );

    match routine.run().await {
        Ok(()) => {
            tracing::info!("✅ {}: OK", routine.name());
        }
        Err(report) => {
            tracing::error!("❌ {}: {:?}", routine.name(), report);
            std::process::exit(1);
        }
    }
}
