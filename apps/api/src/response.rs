//! Success envelope.
//!
//! Every successful response with a body has the shape
//! `{"status": <http code>, "description": "<operation>", "data": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// A successful handler result.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    description: &'static str,
    data: T,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    status: u16,
    description: &'a str,
    data: T,
}

impl<T> ApiResponse<T> {
    /// 200 OK.
    pub fn ok(description: &'static str, data: T) -> Self {
        ApiResponse {
            status: StatusCode::OK,
            description,
            data,
        }
    }

    /// 201 Created.
    pub fn created(description: &'static str, data: T) -> Self {
        ApiResponse {
            status: StatusCode::CREATED,
            description,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            status: self.status.as_u16(),
            description: self.description,
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}
