use chrono::Local;
use error_stack::ResultExt;
use google_sheets4::api::{EmbeddedChart, Spreadsheet};
use tracing::instrument;

use crate::domain::routine::{Routine, RoutineError};
use crate::notion::client::NotionClient;
use crate::sheets::payload::{EmbeddedChartFactory, SpreadsheetFactory};
use crate::sheets::spreadsheet_manager::SpreadsheetManager;

/// One full export pass: read the memorization times from Notion, create a
/// fresh spreadsheet with them, then attach the chart. Nothing is diffed
/// against previous runs; every invocation produces a new spreadsheet.
pub struct SyncRoutine {
    notion: NotionClient,
    spreadsheet_manager: SpreadsheetManager,
    title: Box<str>,
}

impl SyncRoutine {
    pub fn new(
        notion: NotionClient,
        spreadsheet_manager: SpreadsheetManager,
        title: Box<str>,
    ) -> Self {
        SyncRoutine {
            notion,
            spreadsheet_manager,
            title,
        }
    }
}

#[async_trait::async_trait]
impl Routine for SyncRoutine {
    fn name(&self) -> &str {
        "SyncRoutine"
    }

    #[instrument(skip(self), name = "SyncRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        tracing::info!("Fetching memorization times from Notion");
        let records = self.notion.memorization_records().await.change_context(
            RoutineError::RoutineFailure("failed to fetch memorization times".to_string()),
        )?;
        tracing::info!(count = records.len(), "Normalized memorization records");

        let title = format!("{} {}", self.title, Local::now().format("%Y-%m-%d"));

        let sheet_payload = Spreadsheet::from_records(&title, &records).change_context(
            RoutineError::RoutineFailure("failed to build the sheet payload".to_string()),
        )?;

        let created = self
            .spreadsheet_manager
            .create_spreadsheet(sheet_payload)
            .await
            .change_context(RoutineError::RoutineFailure(
                "failed to create the spreadsheet".to_string(),
            ))?;
        tracing::info!(
            spreadsheet_id = %created.spreadsheet_id,
            sheet_id = created.first_sheet_id,
            "Created spreadsheet"
        );

        // The chart request embeds the sheet id obtained above, so it must
        // run strictly after the spreadsheet exists.
        let chart = EmbeddedChart::line_chart(&title, created.first_sheet_id, records.len() as i32);
        self.spreadsheet_manager
            .add_chart(&created.spreadsheet_id, chart)
            .await
            .change_context(RoutineError::RoutineFailure(
                "failed to add the chart".to_string(),
            ))?;
        tracing::info!("Added chart to spreadsheet");

        Ok(())
    }
}
