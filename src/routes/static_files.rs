//! Front-end bundle hosting
//!
//! Serves the static directory for every path no API route matches. Hidden
//! files (any path segment starting with `.`) are never served: the working
//! directory usually holds the `.env` with both upstream secrets.

use std::convert::Infallible;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower::{Service, ServiceBuilder};
use tower_http::services::ServeDir;
use tracing::warn;

/// Static file service with hidden paths rejected
pub fn service(
    static_dir: &str,
) -> impl Service<Request, Response = Response, Error = Infallible, Future = impl Send + 'static>
       + Clone
       + Send
       + 'static {
    ServiceBuilder::new()
        .layer(middleware::from_fn(reject_hidden_paths))
        .service(ServeDir::new(static_dir))
}

async fn reject_hidden_paths(request: Request, next: Next) -> Response {
    if is_hidden_path(request.uri().path()) {
        warn!(path = %request.uri().path(), "Refusing to serve hidden path");
        return StatusCode::NOT_FOUND.into_response();
    }

    next.run(request).await
}

/// True when any segment, after percent-decoding, starts with `.`.
/// Undecodable paths count as hidden.
pub fn is_hidden_path(path: &str) -> bool {
    match urlencoding::decode(path) {
        Ok(decoded) => decoded
            .split(['/', '\\'])
            .any(|segment| segment.starts_with('.')),
        Err(_) => true,
    }
}
