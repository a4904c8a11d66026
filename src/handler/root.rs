//! Root informational endpoint

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use crate::http;

pub const SERVICE_NAME: &str = "serverless-rs";
const GREETING: &str = "Hello from Cloud Run (Rust)!";
const DOCS: &str = "Set PROJECT_ID/REGION and deploy using gcloud run deploy";

/// Static service description; fields are kept in alphabetical order
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub docs: &'static str,
    pub message: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

pub fn handle(method: &Method) -> Response<Full<Bytes>> {
    if *method != Method::GET {
        return http::build_405_response();
    }

    http::json_response(
        StatusCode::OK,
        &RootResponse {
            docs: DOCS,
            message: GREETING,
            service: SERVICE_NAME,
            timestamp: http::now_rfc3339_nano(),
        },
    )
}
