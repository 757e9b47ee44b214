#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub priv_key: Box<str>, // path to the service account key JSON
    pub spreadsheet_title: Box<str>,
}
