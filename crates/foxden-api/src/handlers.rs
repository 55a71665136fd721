//! REST API handlers.
//!
//! Each handler drives the ledger and maps its error taxonomy onto HTTP:
//! validation failures are 400, an absent fox is 404, and backend errors
//! surface as 500 with the error text.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use foxden_core::Season;
use foxden_health::{check_all, ProviderEndpoint};
use foxden_ledger::{generate_fox_id, LedgerError, RecordRef};

use crate::data_url::parse_data_url;
use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> axum::response::Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
        .into_response()
}

fn ledger_error_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::Validation(msg) => error_response(&msg, StatusCode::BAD_REQUEST),
        other => {
            warn!(error = %other, "ledger operation failed");
            error_response(&other.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `?season=YYYY-MM`, defaulting to the current calendar month.
#[derive(Deserialize)]
pub struct SeasonQuery {
    season: Option<String>,
}

impl SeasonQuery {
    fn resolve(&self) -> Result<Season, axum::response::Response> {
        match &self.season {
            Some(raw) => raw
                .parse()
                .map_err(|_| error_response(&format!("invalid season {raw:?}"), StatusCode::BAD_REQUEST)),
            None => Ok(Season::current()),
        }
    }
}

// ── Foxes ──────────────────────────────────────────────────────────

/// GET /api/fox?season=YYYY-MM
pub async fn list_foxes(
    State(state): State<ApiState>,
    Query(query): Query<SeasonQuery>,
) -> impl IntoResponse {
    let season = match query.resolve() {
        Ok(season) => season,
        Err(resp) => return resp,
    };
    match state.ledger.list_foxes(&season).await {
        Ok(foxes) => ApiResponse::ok(serde_json::json!({
            "season": season,
            "foxes": foxes,
        }))
        .into_response(),
        Err(e) => ledger_error_response(e),
    }
}

/// GET /api/fox/{fox_id}?season=YYYY-MM
pub async fn get_fox(
    State(state): State<ApiState>,
    Path(fox_id): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> impl IntoResponse {
    let season = match query.resolve() {
        Ok(season) => season,
        Err(resp) => return resp,
    };
    match state.ledger.reduce(&fox_id, &season).await {
        Ok(Some(view)) => ApiResponse::ok(view).into_response(),
        Ok(None) => error_response("fox not found", StatusCode::NOT_FOUND),
        Err(e) => ledger_error_response(e),
    }
}

/// Create request body.
#[derive(Deserialize)]
pub struct CreateFoxRequest {
    pub name: String,
    /// `data:image/...;base64,...`
    pub image_data_url: String,
    pub owner: Option<String>,
}

/// Create response body.
#[derive(Serialize, Deserialize)]
pub struct CreateFoxResponse {
    pub fox_id: String,
    pub name: String,
    pub owner: String,
    pub season: Season,
    pub record: RecordRef,
}

/// POST /api/fox
pub async fn create_fox(
    State(state): State<ApiState>,
    Json(req): Json<CreateFoxRequest>,
) -> impl IntoResponse {
    if req.name.is_empty() {
        return error_response("name is required", StatusCode::BAD_REQUEST);
    }
    let image = match parse_data_url(&req.image_data_url) {
        Ok(image) => image,
        Err(msg) => return error_response(&msg, StatusCode::BAD_REQUEST),
    };

    let owner = req
        .owner
        .unwrap_or_else(|| state.ledger.config().app.owner.clone());
    let season = Season::current();
    let fox_id = generate_fox_id(&owner);

    match state
        .ledger
        .write_profile(&fox_id, &req.name, &owner, &season, &image.bytes)
        .await
    {
        Ok(record) => (
            StatusCode::CREATED,
            ApiResponse::ok(CreateFoxResponse {
                fox_id,
                name: req.name,
                owner,
                season,
                record,
            }),
        )
            .into_response(),
        Err(e) => ledger_error_response(e),
    }
}

/// Feed request body.
#[derive(Deserialize)]
pub struct FeedRequest {
    pub owner: Option<String>,
    /// Defaults to -1 (one credit consumed).
    pub credits_delta: Option<i64>,
}

/// Feed response body.
#[derive(Serialize, Deserialize)]
pub struct FeedResponse {
    pub fox_id: String,
    pub owner: String,
    pub season: Season,
    pub credits_delta: i64,
    pub record: RecordRef,
}

/// POST /api/fox/{fox_id}/feed
pub async fn feed_fox(
    State(state): State<ApiState>,
    Path(fox_id): Path<String>,
    Json(req): Json<FeedRequest>,
) -> impl IntoResponse {
    let owner = req
        .owner
        .unwrap_or_else(|| state.ledger.config().app.owner.clone());
    let credits_delta = req.credits_delta.unwrap_or(-1);
    let season = Season::current();

    match state
        .ledger
        .write_event(&fox_id, &owner, &season, credits_delta)
        .await
    {
        Ok(record) => (
            StatusCode::CREATED,
            ApiResponse::ok(FeedResponse {
                fox_id,
                owner,
                season,
                credits_delta,
                record,
            }),
        )
            .into_response(),
        Err(e) => ledger_error_response(e),
    }
}

/// GET /api/fox/{fox_id}/image?season=YYYY-MM
pub async fn fox_image(
    State(state): State<ApiState>,
    Path(fox_id): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> impl IntoResponse {
    let season = match query.resolve() {
        Ok(season) => season,
        Err(resp) => return resp,
    };
    match state.ledger.profile_image(&fox_id, &season).await {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [("content-type", "application/octet-stream")],
            bytes,
        )
            .into_response(),
        Ok(None) => error_response("fox not found", StatusCode::NOT_FOUND),
        Err(e) => ledger_error_response(e),
    }
}

// ── Season debugging ───────────────────────────────────────────────

/// GET /api/fox/season/{season}
pub async fn inspect_season(
    State(state): State<ApiState>,
    Path(season): Path<String>,
) -> impl IntoResponse {
    let season: Season = match season.parse() {
        Ok(season) => season,
        Err(_) => {
            return error_response(&format!("invalid season {season:?}"), StatusCode::BAD_REQUEST)
        }
    };
    match state.ledger.inspect_season(&season).await {
        Ok(Some(inspection)) => ApiResponse::ok(inspection).into_response(),
        Ok(None) => error_response("no container for season", StatusCode::NOT_FOUND),
        Err(e) => ledger_error_response(e),
    }
}

// ── Providers ──────────────────────────────────────────────────────

/// GET /api/providers
pub async fn check_providers(State(state): State<ApiState>) -> impl IntoResponse {
    let providers: Vec<ProviderEndpoint> = state
        .ledger
        .config()
        .providers
        .iter()
        .map(|p| ProviderEndpoint {
            address: p.address.clone(),
            endpoint_url: p.endpoint_url.clone(),
        })
        .collect();

    let report = check_all(&providers).await;
    ApiResponse::ok(report).into_response()
}
