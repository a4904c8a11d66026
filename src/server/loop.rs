// Server loop module
// Accepts connections and hands each one to its own task

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::handler::Router;
use crate::logger;

/// First pause after a failed `accept`
const ACCEPT_BACKOFF_MIN: Duration = Duration::from_millis(5);
/// Longest pause between failed `accept` calls
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Configuration for server loop behavior
#[derive(Debug, Clone, Copy)]
pub struct ServerLoopConfig {
    pub header_read_timeout: Duration,
}

impl Default for ServerLoopConfig {
    fn default() -> Self {
        Self {
            header_read_timeout: super::READ_HEADER_TIMEOUT,
        }
    }
}

/// Accept connections forever
///
/// A failed `accept` (for example when the process runs out of file
/// descriptors) is logged and retried after a pause that doubles up to
/// one second; the pause resets after the next successful accept.
pub async fn start_server_loop(listener: TcpListener, router: Arc<Router>, config: ServerLoopConfig) {
    let mut backoff: Option<Duration> = None;

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                backoff = None;
                handle_connection(stream, peer_addr, Arc::clone(&router), config.header_read_timeout);
            }
            Err(e) => {
                let delay = backoff.map_or(ACCEPT_BACKOFF_MIN, |d| (d * 2).min(ACCEPT_BACKOFF_MAX));
                logger::log_error(&format!(
                    "Failed to accept connection: {e}; retrying in {delay:?}"
                ));
                backoff = Some(delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}
