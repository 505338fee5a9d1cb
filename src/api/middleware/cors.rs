// Cross-origin middleware
// Outermost layer: answers every OPTIONS itself and stamps the same three
// headers on every response

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// The configured origin cannot be sent as a header value
#[derive(Debug, Error)]
#[error("invalid CORS origin: {0:?}")]
pub struct InvalidOrigin(pub String);

/// Cross-origin policy applied identically to every response
///
/// # Invariants
/// - Exactly one allowed origin
/// - Immutable after construction
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    /// Creates a policy allowing `origin`
    ///
    /// # Example
    /// ```
    /// use storefront_api::api::middleware::cors::CorsPolicy;
    ///
    /// let policy = CorsPolicy::new("http://localhost:5173").expect("valid origin");
    /// assert_eq!(policy.origin(), "http://localhost:5173");
    /// assert!(CorsPolicy::new("bad\norigin").is_err());
    /// ```
    pub fn new(origin: &str) -> Result<Self, InvalidOrigin> {
        let allow_origin =
            HeaderValue::from_str(origin).map_err(|_| InvalidOrigin(origin.to_string()))?;

        Ok(Self { allow_origin })
    }

    /// The allowed origin
    pub fn origin(&self) -> &str {
        self.allow_origin.to_str().unwrap_or_default()
    }

    /// Writes the three CORS headers, replacing any set downstream
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}

/// What the middleware does with a request, decided by method alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsDecision {
    /// Answer 200 with an empty body; the router is never reached
    Preflight,
    /// Hand the request to the router
    Forward,
}

impl CorsDecision {
    pub fn for_method(method: &Method) -> Self {
        if *method == Method::OPTIONS {
            Self::Preflight
        } else {
            Self::Forward
        }
    }
}

/// CORS middleware
///
/// Install with `axum::middleware::from_fn_with_state(Arc<CorsPolicy>, cors)`
/// as the outermost layer so error responses and the 404 fallback carry the
/// headers too.
pub async fn cors(State(policy): State<Arc<CorsPolicy>>, request: Request, next: Next) -> Response {
    let mut response = match CorsDecision::for_method(request.method()) {
        CorsDecision::Preflight => StatusCode::OK.into_response(),
        CorsDecision::Forward => next.run(request).await,
    };

    policy.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware::from_fn_with_state, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::util::ServiceExt;

    const ORIGIN: &str = "http://localhost:5173";

    fn app(hits: Arc<AtomicUsize>) -> Router {
        let policy = Arc::new(CorsPolicy::new(ORIGIN).unwrap());

        Router::new()
            .route(
                "/items",
                get(move || {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        "items"
                    }
                }),
            )
            .layer(from_fn_with_state(policy, cors))
    }

    fn assert_cors_headers(headers: &HeaderMap) {
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
    }

    #[test]
    fn decision_depends_only_on_method() {
        assert_eq!(CorsDecision::for_method(&Method::OPTIONS), CorsDecision::Preflight);
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            assert_eq!(CorsDecision::for_method(&method), CorsDecision::Forward);
        }
    }

    #[tokio::test]
    async fn preflight_short_circuits() {
        let hits = Arc::new(AtomicUsize::new(0));

        let response = app(hits.clone())
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/items")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(response.headers());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forwarded_response_carries_headers() {
        let hits = Arc::new(AtomicUsize::new(0));

        let response = app(hits.clone())
            .oneshot(Request::builder().uri("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(response.headers());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn method_not_allowed_carries_headers() {
        let response = app(Arc::new(AtomicUsize::new(0)))
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/items")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_cors_headers(response.headers());
    }
}
