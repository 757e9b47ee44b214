use std::fmt::Debug;

use error_stack::{report, Context, Result, ResultExt};
use google_sheets4::{
    api::{AddChartRequest, BatchUpdateSpreadsheetRequest, EmbeddedChart, Request, Spreadsheet},
    Sheets,
};
use tracing::instrument;

use crate::config::sheets_config::SpreadsheetConfig;
use crate::sheets::{auth, http_client};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<
        google_sheets4::hyper_rustls::HttpsConnector<google_sheets4::hyper::client::HttpConnector>,
    >,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Debug)]
pub enum SpreadsheetManagerError {
    FailedToCreateSpreadsheet,
    FailedToAddChart,
    MissingSpreadsheetId,
    MissingFirstSheetId,
}

impl std::fmt::Display for SpreadsheetManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Context for SpreadsheetManagerError {}

/// Identifiers of a freshly created spreadsheet: the spreadsheet itself and
/// the first sheet inside it, which chart requests need to address ranges.
#[derive(Debug, Clone)]
pub struct CreatedSpreadsheet {
    pub spreadsheet_id: String,
    pub first_sheet_id: i32,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(config: SpreadsheetConfig) -> Self {
        let client = http_client::http_client();
        let auth = auth::auth(&config, client.clone()).await;
        let hub: Sheets<
            google_sheets4::hyper_rustls::HttpsConnector<
                google_sheets4::hyper::client::HttpConnector,
            >,
        > = Sheets::new(client.clone(), auth);

        SpreadsheetManager { config, hub }
    }

    #[instrument(skip(payload))]
    pub async fn create_spreadsheet(
        &self,
        payload: Spreadsheet,
    ) -> Result<CreatedSpreadsheet, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .create(payload)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToCreateSpreadsheet)?;

        let spreadsheet = response.1;
        let spreadsheet_id = spreadsheet
            .spreadsheet_id
            .ok_or(report!(SpreadsheetManagerError::MissingSpreadsheetId))?;
        let first_sheet_id = spreadsheet
            .sheets
            .as_ref()
            .and_then(|sheets| sheets.first())
            .and_then(|sheet| sheet.properties.as_ref())
            .and_then(|properties| properties.sheet_id)
            .ok_or(report!(SpreadsheetManagerError::MissingFirstSheetId))?;

        Ok(CreatedSpreadsheet {
            spreadsheet_id,
            first_sheet_id,
        })
    }

    #[instrument(skip(chart))]
    pub async fn add_chart(
        &self,
        spreadsheet_id: &str,
        chart: EmbeddedChart,
    ) -> Result<(), SpreadsheetManagerError> {
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                add_chart: Some(AddChartRequest { chart: Some(chart) }),
                ..Default::default()
            }]),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(request, spreadsheet_id)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToAddChart)?;

        Ok(())
    }
}
