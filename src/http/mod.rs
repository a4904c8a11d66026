//! HTTP protocol layer module
//!
//! Provides response builders and the JSON envelope, decoupled from the handlers.

pub mod json;
pub mod response;

// Re-export commonly used items
pub use json::{json_response, now_rfc3339_nano};
pub use response::{build_400_response, build_404_response, build_405_response};
