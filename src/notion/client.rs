use error_stack::{report, Context, Result, ResultExt};
use tracing::instrument;

use crate::config::notion_config::NotionConfig;
use crate::domain::record::{FormatError, MemorizationRecord};
use crate::notion::models::{MemorizationRow, QueryDatabaseResponse};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug)]
pub enum NotionClientError {
    FailedToQueryDatabase,
    UnexpectedStatus(u16),
    FailedToDecodeResponse,
    InvalidRecord,
}

impl std::fmt::Display for NotionClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Context for NotionClientError {}

#[derive(Debug)]
pub struct NotionClient {
    http: reqwest::Client,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Self {
        NotionClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    #[instrument(skip(self))]
    async fn query_database_page(
        &self,
        cursor: Option<&str>,
    ) -> Result<QueryDatabaseResponse, NotionClientError> {
        let url = format!(
            "{}/databases/{}/query",
            NOTION_API_BASE, self.config.database_id
        );

        let mut body = serde_json::json!({});
        if let Some(cursor) = cursor {
            body["start_cursor"] = serde_json::Value::String(cursor.to_string());
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_token.as_ref())
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .change_context(NotionClientError::FailedToQueryDatabase)?;

        let status = response.status();
        if !status.is_success() {
            return Err(report!(NotionClientError::UnexpectedStatus(
                status.as_u16()
            )));
        }

        response
            .json()
            .await
            .change_context(NotionClientError::FailedToDecodeResponse)
    }

    /// Fetches every row of the database, following pagination, in the
    /// API's native (reverse-chronological) order.
    #[instrument(skip(self))]
    pub async fn fetch_rows(&self) -> Result<Vec<MemorizationRow>, NotionClientError> {
        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let response = self.query_database_page(cursor.as_deref()).await?;
            for page in &response.results {
                rows.push(MemorizationRow {
                    date: page.plain_text(&self.config.date_property),
                    time: page.plain_text(&self.config.time_property),
                });
            }

            if !response.has_more {
                break;
            }
            cursor = response.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        tracing::debug!(count = rows.len(), "Fetched rows from Notion");
        Ok(rows)
    }

    /// Normalized records with a defined date, in chronological ascending
    /// order. Rows with an empty date are dropped here, exactly once; their
    /// duration is still validated first.
    #[instrument(skip(self))]
    pub async fn memorization_records(
        &self,
    ) -> Result<Vec<MemorizationRecord>, NotionClientError> {
        let rows = self.fetch_rows().await?;
        collect_records(rows).change_context(NotionClientError::InvalidRecord)
    }
}

/// Normalizes every row (duration validated unconditionally), keeps only
/// dated records, and reverses the sequence so the source's most-recent-first
/// order becomes chronological ascending order.
pub fn collect_records(
    rows: Vec<MemorizationRow>,
) -> std::result::Result<Vec<MemorizationRecord>, FormatError> {
    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        let record = MemorizationRecord::parse(&row.date, &row.time)?;
        if record.has_date() {
            records.push(record);
        }
    }
    records.reverse();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, time: &str) -> MemorizationRow {
        MemorizationRow {
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_collect_records_reverses_source_order() {
        let rows = vec![
            row("2023-01-17", "10:00"),
            row("2023-01-16", "125:07"),
            row("2023-01-15", "03:45"),
        ];
        let records = collect_records(rows).unwrap();
        let dates: Vec<String> = records.iter().map(|r| r.formatted_date()).collect();
        assert_eq!(dates, vec!["2023-01-15", "2023-01-16", "2023-01-17"]);
    }

    #[test]
    fn test_collect_records_drops_undated_rows() {
        let rows = vec![
            row("2023-01-16", "10:00"),
            row("", "03:45"),
            row("2023-01-15", "01:00"),
        ];
        let records = collect_records(rows).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.has_date()));
    }

    #[test]
    fn test_collect_records_validates_duration_of_undated_rows() {
        let rows = vec![row("", "bogus")];
        assert!(collect_records(rows).is_err());
    }

    #[test]
    fn test_collect_records_propagates_format_errors() {
        let rows = vec![row("20XX-01-01", "03:45")];
        assert!(matches!(
            collect_records(rows),
            Err(FormatError::NonNumericDateSegment(_, "year"))
        ));
    }
}
