//! `/promo_codes` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bikeshop_core::validation::{parse_amount, parse_id};
use bikeshop_core::{CreatePromo, PromoCode, PromoListResponse, PromoQuote, UpdatePromo};
use serde::Deserialize;
use tracing::info;

use super::ListParams;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::AppState;

/// `?total=` on `GET /promo_codes/{id}/discount`.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteParams {
    pub total: Option<String>,
}

async fn load(state: &AppState, promo_id: i64) -> ApiResult<PromoCode> {
    state
        .db
        .promo_codes()
        .get_by_id(promo_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Promo code", promo_id))
}

/// `POST /promo_codes`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreatePromo>, JsonRejection>,
) -> ApiResult<ApiResponse<PromoCode>> {
    let Json(req) = payload?;

    let promo_id = state.db.promo_codes().create(&req).await?;
    info!(promo_id, "Promo code created");

    Ok(ApiResponse::created("create promo code", load(&state, promo_id).await?))
}

/// `GET /promo_codes/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<PromoCode>> {
    let promo_id = parse_id("promo_id", &id)?;

    Ok(ApiResponse::ok("get promo code by id", load(&state, promo_id).await?))
}

/// `GET /promo_codes?offset=&limit=&search=`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<ApiResponse<PromoListResponse>> {
    let req = params.into_request()?;

    let page = state.db.promo_codes().list(&req).await?;
    Ok(ApiResponse::ok("get list promo codes", page))
}

/// `PUT /promo_codes/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePromo>, JsonRejection>,
) -> ApiResult<ApiResponse<PromoCode>> {
    let promo_id = parse_id("promo_id", &id)?;
    let Json(mut req) = payload?;
    req.promo_id = promo_id;

    state.db.promo_codes().update(&req).await?;
    info!(promo_id, "Promo code updated");

    Ok(ApiResponse::ok("update promo code", load(&state, promo_id).await?))
}

/// `DELETE /promo_codes/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let promo_id = parse_id("promo_id", &id)?;

    state.db.promo_codes().delete(promo_id).await?;
    info!(promo_id, "Promo code deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /promo_codes/{id}/discount?total=`
///
/// Prices an order total (cents) with the code.
pub async fn discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<QuoteParams>,
) -> ApiResult<ApiResponse<PromoQuote>> {
    let promo_id = parse_id("promo_id", &id)?;
    let total = parse_amount("total", params.total.as_deref())?;

    let quote = load(&state, promo_id).await?.quote(total);
    Ok(ApiResponse::ok("get promo code discount", quote))
}
