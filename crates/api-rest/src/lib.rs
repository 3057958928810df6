//! # API REST
//!
//! REST API implementation for the MBS estimator.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response bodies and `mbs-core` for everything else.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ErrorRes, HealthRes, HealthService, MultiEstimateReq, SearchParams, SingleEstimateReq,
};
use mbs_core::estimate::multiple::{AssistantEstimate, EstimateTotals, ItemEstimate};
use mbs_core::forms::{validate_multi_form, validate_single_form};
use mbs_core::report::{AssistantNote, ReportLine};
use mbs_core::{
    AssistantItem, EstimateService, FeeScheduleRecord, LookupService, MbsError, MultiEstimate,
    MultiEstimateReport, Outcome, SingleEstimate, SingleEstimateReport,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    lookup: LookupService,
    estimates: EstimateService,
}

impl AppState {
    pub fn new(lookup: LookupService) -> Self {
        Self {
            estimates: EstimateService::new(lookup.clone()),
            lookup,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, search_mbs, estimate_single, estimate_multiple),
    components(schemas(
        HealthRes,
        ErrorRes,
        SingleEstimateReq,
        MultiEstimateReq,
        FeeScheduleRecord,
        SingleEstimateReport,
        SingleEstimate,
        AssistantNote,
        AssistantItem,
        MultiEstimateReport,
        MultiEstimate,
        ItemEstimate,
        AssistantEstimate,
        EstimateTotals,
        ReportLine,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search-mbs", get(search_mbs))
        .route("/api/estimates/single", post(estimate_single))
        .route("/api/estimates/multiple", post(estimate_multiple))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn status_for(error: &MbsError) -> StatusCode {
    match error {
        MbsError::InvalidInput(_) | MbsError::LookupsFailed(_) => StatusCode::BAD_REQUEST,
        MbsError::NotFound(_) => StatusCode::NOT_FOUND,
        MbsError::DataSource(_) | MbsError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Estimate failure, rendered as `{"status": "error", "message": ...}`.
#[derive(Debug)]
pub struct EstimateError(MbsError);

impl From<MbsError> for EstimateError {
    fn from(e: MbsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for EstimateError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!("Estimate error: {:?}", self.0);
        }
        let body: Outcome<()> = Outcome::from(Err(self.0));
        (status, Json(body)).into_response()
    }
}

/// Search failure, rendered as `{"error": ..., "details": ...}`.
#[derive(Debug)]
pub struct SearchError(MbsError);

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = match &self.0 {
            MbsError::InvalidInput(message) | MbsError::LookupsFailed(message) => {
                ErrorRes::new(message.as_str())
            }
            MbsError::DataSource(message) => {
                tracing::error!("Search query error: {}", message);
                ErrorRes::with_details("Error fetching data from Supabase", message.as_str())
            }
            other => {
                tracing::error!("Search error: {:?}", other);
                ErrorRes::with_details("Internal server error", other.to_string())
            }
        };
        (status, Json(body)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Does not contact the data store.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/search-mbs",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching current fee records", body = [FeeScheduleRecord]),
        (status = 400, description = "Missing or empty query", body = ErrorRes),
        (status = 500, description = "Data store failure", body = ErrorRes)
    )
)]
/// Search the current fee schedule
///
/// A query shaped like an item code (`30175`, `105A`) is an exact code lookup. Anything else
/// is a keyword search over item descriptions, capped at 50 results. No match is an empty
/// array, not an error.
///
/// # Errors
/// Returns `400 Bad Request` if the query is missing or blank, and
/// `500 Internal Server Error` if the data store fails.
#[axum::debug_handler]
async fn search_mbs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<FeeScheduleRecord>>, SearchError> {
    let query = params.query.unwrap_or_default();
    if query.is_empty() {
        return Err(SearchError(MbsError::InvalidInput(
            "Query parameter is required".into(),
        )));
    }

    let records = state.lookup.search(&query).await.map_err(SearchError)?;
    tracing::info!("search {:?}: {} record(s)", query, records.len());
    Ok(Json(records))
}

#[utoipa::path(
    post,
    path = "/api/estimates/single",
    request_body = SingleEstimateReq,
    responses(
        (status = 200, description = "Estimate ready, returned with `status: ready`",
            body = SingleEstimateReport),
        (status = 400, description = "Invalid form input"),
        (status = 404, description = "Item not found or not current"),
        (status = 500, description = "Data store failure")
    )
)]
/// Estimate out-of-pocket cost for one MBS item
///
/// # Errors
/// Returns `400 Bad Request` for invalid form input, `404 Not Found` if the item has no
/// current record, and `500 Internal Server Error` if the data store fails.
#[axum::debug_handler]
async fn estimate_single(
    State(state): State<AppState>,
    Json(req): Json<SingleEstimateReq>,
) -> Result<Json<Outcome<SingleEstimateReport>>, EstimateError> {
    let input = validate_single_form(
        &req.item_number,
        &req.charged_fee,
        req.assistant_gap_fee.as_deref(),
    )?;
    let report = state.estimates.estimate_single(&input).await?;
    Ok(Json(Outcome::Ready(report)))
}

#[utoipa::path(
    post,
    path = "/api/estimates/multiple",
    request_body = MultiEstimateReq,
    responses(
        (status = 200, description = "Estimate ready, returned with `status: ready`",
            body = MultiEstimateReport),
        (status = 400, description = "Invalid form input, or no item could be looked up"),
        (status = 500, description = "Data store failure")
    )
)]
/// Estimate out-of-pocket cost for several MBS items performed together
///
/// Items that cannot be looked up are left out and listed under `warnings`.
///
/// # Errors
/// Returns `400 Bad Request` for invalid form input or when every item lookup fails.
#[axum::debug_handler]
async fn estimate_multiple(
    State(state): State<AppState>,
    Json(req): Json<MultiEstimateReq>,
) -> Result<Json<Outcome<MultiEstimateReport>>, EstimateError> {
    let input = validate_multi_form(
        &req.item_numbers,
        &req.total_charged_fee,
        req.assistant_gap_fee.as_deref(),
    )?;
    let report = state.estimates.estimate_multiple(&input).await?;
    Ok(Json(Outcome::Ready(report)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use async_trait::async_trait;
    use mbs_core::{FeeScheduleStore, MbsResult, MemoryStore};
    use mbs_types::ItemCode;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const ROWS: &str = r#"[
        {"item_code": "30175", "description": "Fasciotomy, decompression of a compartment",
         "schedule_fee": 380.90, "benefit_75_percent": 285.70, "benefit_85_percent": 323.80,
         "is_assist_eligible": true, "is_anaes_eligible": true, "effective_from": "2024-07-01"},
        {"item_code": "51300", "description": "Assistance at any operation, fee under $636.05",
         "schedule_fee": 82.90, "benefit_75_percent": 62.20, "benefit_85_percent": 70.50,
         "is_assist_eligible": false, "is_anaes_eligible": false, "effective_from": "2024-07-01"},
        {"item_code": "49558", "description": "Knee, arthroscopic surgery of, major",
         "schedule_fee": 1000.0, "benefit_75_percent": 750.0, "benefit_85_percent": 850.0,
         "is_assist_eligible": true, "is_anaes_eligible": true, "effective_from": "2024-07-01"},
        {"item_code": "49561", "description": "Knee, arthroscopy with meniscectomy",
         "schedule_fee": 800.0, "benefit_75_percent": 600.0, "benefit_85_percent": 680.0,
         "is_assist_eligible": false, "is_anaes_eligible": true, "effective_from": "2024-07-01"},
        {"item_code": "49562", "description": "Knee, arthroscopy and lavage",
         "schedule_fee": 600.0, "benefit_75_percent": 450.0, "benefit_85_percent": 510.0,
         "is_assist_eligible": false, "is_anaes_eligible": true, "effective_from": "2024-07-01"},
        {"item_code": "49500", "description": "Knee, superseded item",
         "schedule_fee": 10.0, "benefit_75_percent": 7.5, "benefit_85_percent": 8.5,
         "is_assist_eligible": false, "is_anaes_eligible": false,
         "effective_from": "2020-07-01", "effective_to": "2021-06-30"}
    ]"#;

    fn app() -> Router {
        let store = MemoryStore::from_json(ROWS).unwrap();
        router(AppState::new(LookupService::new(Arc::new(store))))
    }

    /// A data store that refuses every query.
    struct DownStore;

    #[async_trait]
    impl FeeScheduleStore for DownStore {
        async fn current_by_code(&self, _code: &ItemCode) -> MbsResult<Vec<FeeScheduleRecord>> {
            Err(MbsError::DataSource("connection refused".into()))
        }

        async fn search_current_descriptions(
            &self,
            _terms: &[String],
            _limit: usize,
        ) -> MbsResult<Vec<FeeScheduleRecord>> {
            Err(MbsError::DataSource("connection refused".into()))
        }
    }

    fn down_app() -> Router {
        router(AppState::new(LookupService::new(Arc::new(DownStore))))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        send_to(app(), request).await
    }

    async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    fn post_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(post_request(uri, body)).await
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn search_without_query_is_bad_request() {
        let (status, body) = get_json("/api/search-mbs").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Query parameter is required"}));

        let (status, _) = get_json("/api/search-mbs?query=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_by_item_code_returns_store_columns() {
        let (status, body) = get_json("/api/search-mbs?query=30175").await;
        assert_eq!(status, StatusCode::OK);

        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["item_code"], "30175");
        assert_eq!(records[0]["benefit_75_percent"], 285.70);
        assert!(records[0].get("effective_from").is_none());
    }

    #[tokio::test]
    async fn search_by_keywords_skips_superseded_items() {
        let (status, body) = get_json("/api/search-mbs?query=knee%20arthroscopy").await;
        assert_eq!(status, StatusCode::OK);

        let codes: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["item_code"].as_str().unwrap())
            .collect();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&"49561"));
        assert!(codes.contains(&"49562"));
    }

    #[tokio::test]
    async fn search_with_no_match_is_an_empty_array() {
        let (status, body) = get_json("/api/search-mbs?query=12345").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn single_estimate_for_item_30175() {
        let (status, body) = post_json(
            "/api/estimates/single",
            json!({"item_number": "30175", "charged_fee": "500", "assistant_gap_fee": "100"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");

        let estimate = &body["estimate"];
        assert!((estimate["medicare_rebate"].as_f64().unwrap() - 285.70).abs() < 1e-9);
        assert!((estimate["health_fund_rebate"].as_f64().unwrap() - 95.20).abs() < 1e-9);
        assert!((estimate["out_of_pocket"].as_f64().unwrap() - 119.10).abs() < 1e-9);
        assert_eq!(estimate["assistant_item"], "minor");
        assert_eq!(body["assistant"]["item_code"], "51300");
        assert!((body["total_out_of_pocket"].as_f64().unwrap() - 219.10).abs() < 1e-9);
    }

    #[tokio::test]
    async fn single_estimate_validation_errors() {
        let (status, body) = post_json(
            "/api/estimates/single",
            json!({"item_number": "30175", "charged_fee": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "status": "error",
                "message": "Please enter both MBS Item Number and Your Charged Fee."
            })
        );

        let (status, body) = post_json(
            "/api/estimates/single",
            json!({"item_number": "30175", "charged_fee": "-1"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Please enter a valid positive number for Your Charged Fee."
        );
    }

    #[tokio::test]
    async fn single_estimate_unknown_item_is_not_found() {
        let (status, body) = post_json(
            "/api/estimates/single",
            json!({"item_number": "49500", "charged_fee": "50"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "MBS Item 49500 not found or is not current.");
    }

    #[tokio::test]
    async fn multiple_estimate_scales_items() {
        let (status, body) = post_json(
            "/api/estimates/multiple",
            json!({
                "item_numbers": ["49562, 49558", "49561"],
                "total_charged_fee": "2500",
                "assistant_gap_fee": "40"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");

        let estimate = &body["estimate"];
        let fees: Vec<f64> = estimate["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["effective_fee"].as_f64().unwrap())
            .collect();
        assert_eq!(fees, [1000.0, 400.0, 150.0]);
        assert_eq!(estimate["total_effective_fee"], 1550.0);
        assert_eq!(estimate["assistant"]["item_code"], "51303");
        assert_eq!(body["warnings"], json!([]));
    }

    #[tokio::test]
    async fn multiple_estimate_with_only_invalid_codes_fails() {
        let (status, body) = post_json(
            "/api/estimates/multiple",
            json!({"item_numbers": ["12345", "knee"], "total_charged_fee": "100"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("MBS Item 12345 not found or is not current."));
        assert!(message.contains("knee"));
    }

    #[tokio::test]
    async fn search_reports_data_store_failure() {
        let request = Request::builder()
            .uri("/api/search-mbs?query=knee")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send_to(down_app(), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Error fetching data from Supabase", "details": "connection refused"})
        );
    }

    #[tokio::test]
    async fn single_estimate_reports_data_store_failure() {
        let request = post_request(
            "/api/estimates/single",
            json!({"item_number": "30175", "charged_fee": "500"}),
        );
        let (status, body) = send_to(down_app(), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"status": "error", "message": "connection refused"}));
    }

    #[tokio::test]
    async fn multiple_estimate_with_store_down_lists_every_failure() {
        let request = post_request(
            "/api/estimates/multiple",
            json!({"item_numbers": ["30175", "23"], "total_charged_fee": "500"}),
        );
        let (status, body) = send_to(down_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "status": "error",
                "message": "Failed to look up MBS Item 30175: connection refused; \
                            Failed to look up MBS Item 23: connection refused"
            })
        );
    }

    #[tokio::test]
    async fn openapi_document_lists_endpoints() {
        let (status, body) = get_json("/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/search-mbs"));
        assert!(paths.contains_key("/api/estimates/single"));
        assert!(paths.contains_key("/api/estimates/multiple"));
    }
}
