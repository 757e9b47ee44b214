use std::collections::HashMap;

use serde::Deserialize;

/// One raw row of the memorization database, as the source exposes it:
/// a date string (possibly empty, possibly over-length) and a duration
/// string in `"<minutes>:<seconds>"` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorizationRow {
    pub date: String,
    pub time: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QueryDatabaseResponse {
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Page {
    pub id: String,
    pub properties: HashMap<String, PropertyValue>,
}

impl Page {
    /// Plain-text value of a property, or an empty string when the
    /// property is absent, empty or of an unsupported type.
    pub fn plain_text(&self, property: &str) -> String {
        self.properties
            .get(property)
            .map(PropertyValue::as_plain_text)
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Date {
        date: Option<DatePropertyValue>,
    },
    RichText {
        rich_text: Vec<RichText>,
    },
    Title {
        title: Vec<RichText>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    pub fn as_plain_text(&self) -> String {
        match self {
            PropertyValue::Date { date } => date
                .as_ref()
                .map(|date| date.start.clone())
                .unwrap_or_default(),
            PropertyValue::RichText { rich_text } => concat_plain_text(rich_text),
            PropertyValue::Title { title } => concat_plain_text(title),
            PropertyValue::Unsupported => String::new(),
        }
    }
}

fn concat_plain_text(parts: &[RichText]) -> String {
    parts.iter().map(|part| part.plain_text.as_str()).collect()
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatePropertyValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RichText {
    pub plain_text: String,
}
