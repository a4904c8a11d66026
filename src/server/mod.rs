// Server module entry point
// Binds the listener and runs the accept loop

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module is exposed as server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::handler::Router;
use crate::handler::root::SERVICE_NAME;
use crate::logger;

pub use listener::create_listener;
pub use server_loop::{start_server_loop, ServerLoopConfig};

/// Bound on how long a client may take to send its request headers
pub const READ_HEADER_TIMEOUT: Duration = Duration::from_secs(5);

/// Bind `addr` and serve until the process is stopped
///
/// When `addr` cannot be bound for any reason other than the port being
/// taken (typically a host without IPv6), `fallback` is tried instead.
/// Only a bind failure returns; once listening, the loop never exits.
pub async fn run(
    addr: SocketAddr,
    fallback: Option<SocketAddr>,
    router: Arc<Router>,
) -> std::io::Result<()> {
    let (listener, bound) = bind_with_fallback(addr, fallback)?;
    logger::log_server_start(SERVICE_NAME, &bound);
    start_server_loop(listener, router, ServerLoopConfig::default()).await;
    Ok(())
}

fn bind_with_fallback(
    addr: SocketAddr,
    fallback: Option<SocketAddr>,
) -> std::io::Result<(tokio::net::TcpListener, SocketAddr)> {
    match (create_listener(addr), fallback) {
        (Ok(listener), _) => Ok((listener, addr)),
        (Err(e), Some(fallback)) if e.kind() != std::io::ErrorKind::AddrInUse => {
            logger::log_warning(&format!("Cannot bind {addr} ({e}), falling back to {fallback}"));
            Ok((create_listener(fallback)?, fallback))
        }
        (Err(e), _) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn spawn_server(config: ServerLoopConfig) -> SocketAddr {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(start_server_loop(listener, Arc::new(Router::new()), config));
        addr
    }

    async fn raw_request(addr: SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8(response).unwrap()
    }

    #[tokio::test]
    async fn test_health_over_tcp() {
        let addr = spawn_server(ServerLoopConfig::default()).await;
        let response = raw_request(
            addr,
            "GET /healthz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {response}");
        assert!(response.to_ascii_lowercase().contains("content-type: application/json; charset=utf-8"));
        assert!(response.contains(r#""status":"ok""#));
    }

    #[tokio::test]
    async fn test_echo_over_tcp() {
        let addr = spawn_server(ServerLoopConfig::default()).await;
        let body = r#"{"message":"over the wire"}"#;
        let request = format!(
            "POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let response = raw_request(addr, &request).await;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {response}");
        assert!(response.contains(r#""message":"over the wire""#));
    }

    #[tokio::test]
    async fn test_unknown_path_over_tcp() {
        let addr = spawn_server(ServerLoopConfig::default()).await;
        let response = raw_request(
            addr,
            "GET /missing HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"), "got: {response}");
        assert!(response.ends_with("404 page not found\n"));
    }

    #[tokio::test]
    async fn test_slow_headers_are_cut_off() {
        let addr = spawn_server(ServerLoopConfig {
            header_read_timeout: Duration::from_millis(200),
        })
        .await;

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(b"GET /healthz HTTP/1.1\r\nHost: loc").await.unwrap();

        let mut response = Vec::new();
        let closed = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response)).await;
        assert!(closed.is_ok(), "connection stayed open past the header timeout");
        assert!(!String::from_utf8_lossy(&response).contains("200 OK"));
    }

    #[tokio::test]
    async fn test_idle_keep_alive_closed_after_header_timeout() {
        let addr = spawn_server(ServerLoopConfig {
            header_read_timeout: Duration::from_millis(200),
        })
        .await;

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /healthz HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();

        let mut response = Vec::new();
        let mut chunk = [0u8; 1024];
        while !response.ends_with(b"}\n") {
            let n = stream.read(&mut chunk).await.unwrap();
            assert_ne!(n, 0, "closed before the first response completed");
            response.extend_from_slice(&chunk[..n]);
        }
        assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));

        tokio::time::sleep(Duration::from_millis(600)).await;
        let read = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut chunk)).await;
        match read {
            Ok(Ok(n)) => assert_eq!(n, 0, "idle connection should be closed"),
            Ok(Err(_)) => {}
            Err(_) => panic!("idle connection stayed open past the header timeout"),
        }
    }

    #[tokio::test]
    async fn test_bind_falls_back_when_primary_unavailable() {
        // 192.0.2.0/24 is reserved for documentation and never local
        let unavailable: SocketAddr = "192.0.2.1:0".parse().unwrap();
        let (listener, bound) =
            bind_with_fallback(unavailable, Some("127.0.0.1:0".parse().unwrap())).unwrap();
        assert!(bound.ip().is_loopback());
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_port_in_use_does_not_fall_back() {
        let taken = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = taken.local_addr().unwrap();
        let result = bind_with_fallback(addr, Some("127.0.0.1:0".parse().unwrap()));
        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::AddrInUse);
    }
}
