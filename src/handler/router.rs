//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: exact-path lookup, dispatch, and access logging.

use crate::handler::{echo, health, root};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::Display;
use std::net::SocketAddr;
use std::time::Instant;

/// Endpoint a path is registered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    Health,
    Echo,
}

/// Exact-path routing table
#[derive(Debug, Clone)]
pub struct Router {
    routes: HashMap<&'static str, Endpoint>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        let routes = HashMap::from([
            ("/", Endpoint::Root),
            ("/healthz", Endpoint::Health),
            ("/echo", Endpoint::Echo),
        ]);
        Self { routes }
    }

    /// Look up the endpoint registered for `path`
    pub fn resolve(&self, path: &str) -> Option<Endpoint> {
        self.routes.get(path).copied()
    }

    /// Main entry point for HTTP request handling
    pub async fn handle_request<B>(
        &self,
        req: Request<B>,
        peer_addr: SocketAddr,
    ) -> Result<Response<Full<Bytes>>, Infallible>
    where
        B: Body,
        B::Error: Display,
    {
        let started = Instant::now();
        let mut entry = AccessLogEntry::from_request(&req, peer_addr);

        let response = self.route_request(req).await;

        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.set_elapsed(started.elapsed());
        logger::log_access(&entry);

        Ok(response)
    }

    /// Route request based on its path
    async fn route_request<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Display,
    {
        match self.resolve(req.uri().path()) {
            Some(endpoint) => dispatch(endpoint, req).await,
            None => http::build_404_response(),
        }
    }
}

/// Dispatch to the endpoint's handler
async fn dispatch<B>(endpoint: Endpoint, req: Request<B>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Display,
{
    match endpoint {
        Endpoint::Root => root::handle(req.method()),
        Endpoint::Health => health::handle(),
        Endpoint::Echo => echo::handle(req).await,
    }
}
