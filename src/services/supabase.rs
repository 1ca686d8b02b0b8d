use crate::models::ItemRecord;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Item columns plus the embedded sightings, newest sighting first
const ITEM_SELECT: &str = "select=*,sightings(*)&sightings.order=created_at.desc";

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only Supabase REST client for the item listing
///
/// Talks to the PostgREST endpoint of the project:
/// - Fetching the full listing
/// - Fetching a single item by id
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    items_table: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        items_table: String,
        timeout_secs: u64,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            items_table,
            client,
        })
    }

    fn items_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.items_table
        )
    }

    async fn get_rows(&self, url: &str) -> Result<Vec<Value>, SupabaseError> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Supabase request failed: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!("Request failed: {}", status)));
        }

        let json: Value = response.json().await?;
        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(SupabaseError::InvalidResponse("Expected an array of rows".into())),
        }
    }

    /// Fetch the whole listing, newest first
    ///
    /// Rows that do not match the record shape are skipped.
    pub async fn fetch_items(&self) -> Result<Vec<ItemRecord>, SupabaseError> {
        let url = format!("{}?{}&order=created_at.desc", self.items_url(), ITEM_SELECT);

        tracing::debug!("Fetching items from: {}", url);

        let rows = self.get_rows(&url).await?;
        let total = rows.len();

        let records: Vec<ItemRecord> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed item row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} items ({} rows)", records.len(), total);

        Ok(records)
    }

    /// Fetch a single item by id
    pub async fn fetch_item(&self, id: &str) -> Result<ItemRecord, SupabaseError> {
        let filter = format!("eq.{}", id);
        let url = format!(
            "{}?{}&id={}",
            self.items_url(),
            ITEM_SELECT,
            urlencoding::encode(&filter)
        );

        let rows = self.get_rows(&url).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(format!("Item {} not found", id)))?;

        serde_json::from_value(row)
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse item: {}", e)))
    }
}
