//! OPTIONS passthrough middleware.
//!
//! Browsers send bare `OPTIONS` requests ahead of API calls. Under the API
//! prefix these are answered with an empty `200 OK` and never reach a handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

/// Path prefix whose `OPTIONS` requests are short-circuited.
#[derive(Debug, Clone)]
pub struct OptionsPrefix(Arc<str>);

impl OptionsPrefix {
    /// Creates a prefix matcher. An empty prefix matches every path.
    pub fn new(prefix: &str) -> Self {
        Self(Arc::from(prefix.trim_end_matches('/')))
    }

    /// Returns true when `path` is the prefix itself or lies beneath it.
    pub fn matches(&self, path: &str) -> bool {
        let prefix = self.0.as_ref();
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.is_empty(),
            None => false,
        }
    }
}

/// Middleware answering `OPTIONS` under the prefix.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn options_passthrough(
    State(prefix): State<OptionsPrefix>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS && prefix.matches(request.uri().path()) {
        debug!(path = %request.uri().path(), "Answering OPTIONS request");
        return StatusCode::OK.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches() {
        let prefix = OptionsPrefix::new("/api");
        assert!(prefix.matches("/api"));
        assert!(prefix.matches("/api/rentals"));
        assert!(prefix.matches("/api/rentals/7"));
        assert!(!prefix.matches("/apis"));
        assert!(!prefix.matches("/health"));
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let prefix = OptionsPrefix::new("/api/");
        assert!(prefix.matches("/api/rentals"));
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let prefix = OptionsPrefix::new("");
        assert!(prefix.matches("/rentals"));
        assert!(prefix.matches("/health"));
    }
}
