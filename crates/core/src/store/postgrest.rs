use async_trait::async_trait;
use mbs_types::ItemCode;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::StoreConfig;
use crate::constants::{FEE_RECORD_COLUMNS, FULL_TEXT_CONFIG, MBS_ITEMS_TABLE};
use crate::lookup::FeeScheduleStore;
use crate::record::FeeScheduleRecord;
use crate::{MbsError, MbsResult};

/// Fee schedule served by a Supabase/PostgREST endpoint.
///
/// Each lookup is a single `GET` against the `mbs_items` table. Failures are reported once;
/// nothing is retried.
pub struct PostgrestStore {
    client: reqwest::Client,
    table_url: String,
    api_key: String,
}

/// Error body returned by PostgREST for rejected queries.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
}

impl PostgrestStore {
    /// Create a new store client for the configured endpoint.
    pub fn new(config: &StoreConfig) -> MbsResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| MbsError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            table_url: config.table_url(MBS_ITEMS_TABLE),
            api_key: config.api_key().to_owned(),
        })
    }

    async fn fetch(&self, params: &[(&str, String)]) -> MbsResult<Vec<FeeScheduleRecord>> {
        let response = self
            .client
            .get(&self.table_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("data store request failed: {}", e);
                MbsError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::error!("data store query error ({}): {}", status, message);
            return Err(MbsError::DataSource(message));
        }

        Ok(response.json::<Vec<FeeScheduleRecord>>().await?)
    }
}

#[async_trait]
impl FeeScheduleStore for PostgrestStore {
    async fn current_by_code(&self, code: &ItemCode) -> MbsResult<Vec<FeeScheduleRecord>> {
        self.fetch(&code_query_params(code)).await
    }

    async fn search_current_descriptions(
        &self,
        terms: &[String],
        limit: usize,
    ) -> MbsResult<Vec<FeeScheduleRecord>> {
        self.fetch(&keyword_query_params(terms, limit)).await
    }
}

/// Query parameters for an exact, current-only item code lookup.
pub fn code_query_params(code: &ItemCode) -> Vec<(&'static str, String)> {
    vec![
        ("select", FEE_RECORD_COLUMNS.to_owned()),
        ("item_code", format!("eq.{}", code.as_str())),
        ("effective_to", "is.null".to_owned()),
        ("order", "item_code".to_owned()),
    ]
}

/// Query parameters for a current-only description search.
pub fn keyword_query_params(terms: &[String], limit: usize) -> Vec<(&'static str, String)> {
    vec![
        ("select", FEE_RECORD_COLUMNS.to_owned()),
        ("description", full_text_filter(terms)),
        ("effective_to", "is.null".to_owned()),
        ("limit", limit.to_string()),
    ]
}

/// PostgREST full-text filter that requires every term.
///
/// Terms must already be free of query operators (see [`crate::lookup::keyword_terms`]).
pub fn full_text_filter(terms: &[String]) -> String {
    let expression = terms
        .iter()
        .map(|t| format!("'{t}'"))
        .collect::<Vec<_>>()
        .join(" & ");
    format!("fts({FULL_TEXT_CONFIG}).{expression}")
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<PostgrestErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_owned)
                .unwrap_or_else(|| status.to_string())
        })
}
