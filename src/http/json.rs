//! JSON envelope module
//!
//! Every success response goes through [`json_response`], and every response
//! timestamp through [`now_rfc3339_nano`].

use chrono::{DateTime, SecondsFormat, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::response::log_build_error;
use crate::logger;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Build a JSON response
///
/// The body is the serialized value followed by a newline. A value that
/// fails to serialize still gets its status and headers; the body is left
/// empty and the failure is only logged.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let payload = match serde_json::to_vec(body) {
        Ok(mut json) => {
            json.push(b'\n');
            Bytes::from(json)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            Bytes::new()
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Full::new(payload.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(payload))
        })
}

/// Current time in UTC as RFC 3339 with nanosecond precision
pub fn now_rfc3339_nano() -> String {
    format_rfc3339_nano(Utc::now())
}

/// Format a UTC time as RFC 3339 with up to nine fractional digits
///
/// Trailing zeros of the fraction are dropped, and so is the dot when the
/// fraction is zero: `2024-05-01T12:00:00.1234Z`, `2024-05-01T12:00:00Z`.
pub fn format_rfc3339_nano(time: DateTime<Utc>) -> String {
    let full = time.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let Some(stamp) = full.strip_suffix('Z') else {
        return full;
    };
    let stamp = match stamp.split_once('.') {
        Some((seconds, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                seconds.to_string()
            } else {
                format!("{seconds}.{fraction}")
            }
        }
        None => stamp.to_string(),
    };
    format!("{stamp}Z")
}
