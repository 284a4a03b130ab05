use gambit_core::{Sequence, UrlRecord};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    pub url: String,
    pub custom_sequence: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Lifetime in days.
    pub expires_in: Option<u32>,
    pub max_visits: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub sequence: String,
    pub short_url: String,
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub is_custom: bool,
    pub visit_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_visits: Option<u64>,
}

impl UrlResponse {
    pub fn new(sequence: &Sequence, short_url: String, record: UrlRecord) -> Self {
        Self {
            sequence: sequence.to_string(),
            short_url,
            original_url: record.original_url,
            title: record.title,
            description: record.description,
            created_at: record.created_at,
            expires_at: record.expire_at,
            is_custom: record.custom,
            visit_count: record.visit_count,
            max_visits: record.max_visits,
        }
    }
}
