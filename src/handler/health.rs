//! Liveness/readiness endpoint

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
}

/// Accepts every method and always answers 200
pub fn handle() -> Response<Full<Bytes>> {
    http::json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "ok",
            time: http::now_rfc3339_nano(),
        },
    )
}
