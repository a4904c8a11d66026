//! Echo endpoint
//!
//! Reflects the `message` field of a JSON body back with a server timestamp.

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::http;
use crate::logger;

pub const INVALID_BODY: &str = "invalid json body";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct EchoRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub message: String,
    pub timestamp: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode the first JSON document in `bytes`
///
/// Anything after the first document is ignored. The document must be an
/// object or `null`; `null` decodes to an empty request. Repeated keys keep
/// the last value.
pub fn decode_request(bytes: &[u8]) -> Result<EchoRequest, serde_json::Error> {
    let mut documents = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
    match documents.next() {
        Some(Ok(Value::Null)) => Ok(EchoRequest::default()),
        Some(Ok(document @ Value::Object(_))) => serde_json::from_value(document),
        Some(Ok(other)) => Err(serde_json::Error::custom(format!(
            "expected an object, found {}",
            json_kind(&other)
        ))),
        Some(Err(e)) => Err(e),
        None => Err(serde_json::Error::custom("empty body")),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Handle `/echo`
///
/// The request is taken by value, so its body is dropped on every return path.
pub async fn handle<B>(req: Request<B>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Display,
{
    if *req.method() != Method::POST {
        return http::build_405_response();
    }

    let bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read echo body: {e}"));
            return http::build_400_response(INVALID_BODY);
        }
    };

    let request = match decode_request(&bytes) {
        Ok(request) => request,
        Err(_) => return http::build_400_response(INVALID_BODY),
    };

    http::json_response(
        StatusCode::OK,
        &EchoResponse {
            message: request.message,
            timestamp: http::now_rfc3339_nano(),
        },
    )
}
