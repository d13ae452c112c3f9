//! `/staff` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bikeshop_core::validation::parse_id;
use bikeshop_core::{CreateStaff, Staff, StaffListResponse, UpdateStaff};
use tracing::info;

use super::ListParams;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::AppState;

async fn load(state: &AppState, staff_id: i64) -> ApiResult<Staff> {
    state
        .db
        .staff()
        .get_by_id(staff_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Staff", staff_id))
}

/// `POST /staff`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateStaff>, JsonRejection>,
) -> ApiResult<ApiResponse<Staff>> {
    let Json(req) = payload?;

    let staff_id = state.db.staff().create(&req).await?;
    info!(staff_id, "Staff created");

    Ok(ApiResponse::created("create staff", load(&state, staff_id).await?))
}

/// `GET /staff/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Staff>> {
    let staff_id = parse_id("staff_id", &id)?;

    Ok(ApiResponse::ok("get staff by id", load(&state, staff_id).await?))
}

/// `GET /staff?offset=&limit=&search=`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<ApiResponse<StaffListResponse>> {
    let req = params.into_request()?;

    let page = state.db.staff().list(&req).await?;
    Ok(ApiResponse::ok("get list staff", page))
}

/// `PUT /staff/{id}`
///
/// The id in the path wins over any `staff_id` in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStaff>, JsonRejection>,
) -> ApiResult<ApiResponse<Staff>> {
    let staff_id = parse_id("staff_id", &id)?;
    let Json(mut req) = payload?;
    req.staff_id = staff_id;

    state.db.staff().update(&req).await?;
    info!(staff_id, "Staff updated");

    Ok(ApiResponse::ok("update staff", load(&state, staff_id).await?))
}

/// `DELETE /staff/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let staff_id = parse_id("staff_id", &id)?;

    state.db.staff().delete(staff_id).await?;
    info!(staff_id, "Staff deleted");

    Ok(StatusCode::NO_CONTENT)
}
