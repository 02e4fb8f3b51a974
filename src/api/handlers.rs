use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::burn::error::BurnError;
use crate::burn::types::BurnParams;
use crate::pipeline::BurnReport;
use crate::price::trend::PriceTrend;

use super::types::*;
use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn api_error(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: msg.into(),
        }),
    )
}

/// Upstream trouble is a gateway problem; a missing price means the data
/// cannot be produced right now.
pub(crate) fn error_status(e: &eyre::Report) -> StatusCode {
    match e.downcast_ref::<BurnError>() {
        Some(BurnError::MissingPrice) => StatusCode::SERVICE_UNAVAILABLE,
        Some(BurnError::MalformedRecord { .. }) | None => StatusCode::BAD_GATEWAY,
    }
}

fn refresh_error(e: eyre::Report) -> (StatusCode, Json<ErrorResponse>) {
    let status = error_status(&e);
    tracing::warn!(status = %status, error = %e, "Request failed");
    api_error(status, format!("{:#}", e))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        token: state.pipeline.symbol().to_string(),
        contract_address: state.pipeline.contract_address().to_string(),
    })
}

/// Parameters for one request: the configured ones, with the matching
/// policy replaced when the caller asked for a specific one.
pub(crate) fn effective_params(configured: &BurnParams, case_sensitive: Option<bool>) -> BurnParams {
    match case_sensitive {
        Some(case_sensitive_match) => BurnParams {
            case_sensitive_match,
            ..configured.clone()
        },
        None => configured.clone(),
    }
}

pub async fn burns(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BurnsParams>,
) -> ApiResult<BurnReport> {
    let params = effective_params(state.pipeline.params(), params.case_sensitive);
    state
        .pipeline
        .refresh_with(&params)
        .await
        .map(Json)
        .map_err(refresh_error)
}

pub async fn price(State(state): State<Arc<AppState>>) -> ApiResult<PriceTrend> {
    state
        .pipeline
        .price_trend()
        .await
        .map(Json)
        .map_err(refresh_error)
}
