fn default_date_property() -> Box<str> {
    "Date".into()
}

fn default_time_property() -> Box<str> {
    "Time".into()
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct NotionConfig {
    pub api_token: Box<str>,
    pub database_id: Box<str>,
    #[serde(default = "default_date_property")]
    pub date_property: Box<str>,
    #[serde(default = "default_time_property")]
    pub time_property: Box<str>,
}
