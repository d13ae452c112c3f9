//! `/stock` handlers, including the transfer endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bikeshop_core::validation::parse_id;
use bikeshop_core::{
    CreateStock, StockListResponse, StockPrimaryKey, StockRecord, StoreStock, TransferRequest,
    UpdateStock,
};
use serde::Deserialize;
use tracing::info;

use super::ListParams;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::AppState;

/// `?product_id=` on `DELETE /stock/{store_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub product_id: Option<String>,
}

/// `POST /stock`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateStock>, JsonRejection>,
) -> ApiResult<ApiResponse<StockRecord>> {
    let Json(req) = payload?;

    let record = state.db.stock().create(&req).await?;
    info!(
        store_id = record.store_id,
        product_id = record.product_id,
        "Stock created"
    );

    Ok(ApiResponse::created("create stock", record))
}

/// `GET /stock/{store_id}`
pub async fn get_by_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<StoreStock>> {
    let store_id = parse_id("store_id", &id)?;

    let summary = state
        .db
        .stock()
        .get_by_store(store_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock for store", store_id))?;

    Ok(ApiResponse::ok("get stock by store", summary))
}

/// `GET /stock?offset=&limit=&search=`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<ApiResponse<StockListResponse>> {
    let req = params.into_request()?;

    let page = state.db.stock().list(&req).await?;
    Ok(ApiResponse::ok("get list stock", page))
}

/// `PUT /stock`
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStock>, JsonRejection>,
) -> ApiResult<ApiResponse<StockRecord>> {
    let Json(req) = payload?;

    let repo = state.db.stock();
    repo.update(&req).await?;

    let record = repo
        .get_record(req.store_id, req.product_id)
        .await?
        .ok_or_else(|| {
            let id = format!("store {} product {}", req.store_id, req.product_id);
            ApiError::not_found("Stock", id)
        })?;

    Ok(ApiResponse::ok("update stock", record))
}

/// `DELETE /stock/{store_id}?product_id=`
///
/// Without `product_id` every record of the store is removed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<StatusCode> {
    let key = StockPrimaryKey {
        store_id: parse_id("store_id", &id)?,
        product_id: match params.product_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_id("product_id", raw)?),
        },
    };

    let deleted = state.db.stock().delete(&key).await?;
    info!(store_id = key.store_id, product_id = ?key.product_id, deleted, "Stock deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /stock/transfer`
///
/// Echoes the applied transfer. Failures leave both stores untouched.
pub async fn transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<TransferRequest>> {
    let Json(req) = payload?;

    state.db.stock().transfer(&req).await?;
    info!(
        from_store_id = req.from_store_id,
        to_store_id = req.to_store_id,
        product_id = req.product_id,
        quantity = req.quantity,
        "Stock transferred"
    );

    Ok(ApiResponse::ok("transfer stock", req))
}
