//! Logger module
//!
//! Provides logging utilities for the service:
//! - Server lifecycle logging
//! - Access logging in combined format
//! - Error and warning logging
//!
//! Info and access lines go to stdout, warnings and errors to stderr.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

/// Write to info/access log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(service: &str, addr: &SocketAddr) {
    write_info(&format!("[INFO] {service} listening on :{}", addr.port()));
}

/// Header read timeouts also close idle keep-alive connections, so they
/// are routine and logged at info level
pub fn log_connection_error(err: &hyper::Error) {
    let line = format_connection_error(err);
    if err.is_timeout() {
        write_info(&line);
    } else {
        write_error(&line);
    }
}

fn format_connection_error(err: &hyper::Error) -> String {
    if err.is_timeout() {
        format!("[INFO] Connection closed: {err}")
    } else {
        format!("[WARN] Failed to serve connection: {err}")
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_fatal(message: &str) {
    write_error(&format!("[FATAL] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format_combined());
}
