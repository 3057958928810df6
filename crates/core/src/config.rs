//! Data-store configuration.
//!
//! Resolved once at process startup and then passed into the store. Request handling never
//! reads environment variables, which keeps behaviour consistent across threads and tests.

use crate::constants::{DATA_STORE_KEY_ENV, DATA_STORE_URL_ENV};
use crate::{MbsError, MbsResult};
use mbs_types::NonEmptyText;
use reqwest::Url;

/// Connection parameters for the fee-schedule data store.
#[derive(Clone)]
pub struct StoreConfig {
    base_url: Url,
    api_key: NonEmptyText,
}

impl StoreConfig {
    /// Create a new `StoreConfig`.
    ///
    /// The URL must be absolute `http` or `https`; the key must not be blank.
    pub fn new(base_url: &str, api_key: &str) -> MbsResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| MbsError::InvalidConfig(format!("data store URL: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(MbsError::InvalidConfig(format!(
                "data store URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }
        let api_key = NonEmptyText::new(api_key)
            .map_err(|_| MbsError::InvalidConfig("data store key cannot be empty".into()))?;

        Ok(Self { base_url, api_key })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_str()
    }

    /// PostgREST endpoint for `table`, e.g. `https://x.supabase.co/rest/v1/mbs_items`.
    pub fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            table
        )
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Build a `StoreConfig` from optional environment values.
///
/// Missing or blank values are reported by variable name.
pub fn store_config_from_env_values(
    url: Option<String>,
    api_key: Option<String>,
) -> MbsResult<StoreConfig> {
    fn required(value: Option<String>, name: &str) -> MbsResult<String> {
        value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
            MbsError::InvalidConfig(format!("missing environment variable {name}"))
        })
    }

    let url = required(url, DATA_STORE_URL_ENV)?;
    let api_key = required(api_key, DATA_STORE_KEY_ENV)?;
    StoreConfig::new(&url, &api_key)
}
