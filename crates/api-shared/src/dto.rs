//! JSON bodies exchanged with API clients.
//!
//! Estimate requests carry the form fields as the user typed them. Missing fields default to
//! empty strings so that validation, not deserialisation, decides which message to show.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Query string of the search endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// An item code such as `30175`, or keywords to match against item descriptions.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SingleEstimateReq {
    pub item_number: String,
    pub charged_fee: String,
    pub assistant_gap_fee: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MultiEstimateReq {
    /// Each entry may hold several item numbers separated by commas or spaces.
    pub item_numbers: Vec<String>,
    pub total_charged_fee: String,
    pub assistant_gap_fee: Option<String>,
}

/// Error body of the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
