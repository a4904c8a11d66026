//! Request handler module
//!
//! Responsible for request routing dispatch and the three endpoints.

pub mod echo;
pub mod health;
pub mod root;
pub mod router;

// Re-export main entry point
pub use router::Router;
