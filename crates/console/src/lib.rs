//! Tavola console library.
//!
//! Server-rendered restaurant operations console. Every page restores the
//! caller's session, probes the operations API once, and renders live data
//! when it can or the built-in demo dataset when it cannot.
//!
//! The crate is a library so the router can be driven in-process by tests
//! (`tower::ServiceExt::oneshot`) and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod fallback;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the console router with session and tracing layers.
///
/// Sentry layers are added by the binary so tests do not need a client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the console is running. Does not probe the operations API.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ConsoleConfig, parse_api_url};

    fn test_app() -> Router {
        let config = ConsoleConfig::local(parse_api_url("http://127.0.0.1:9").unwrap());
        app(AppState::new(config))
    }

    #[tokio::test]
    async fn test_health_does_not_need_backend() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"ok");
    }

    #[tokio::test]
    async fn test_pages_redirect_anonymous_callers() {
        for path in [
            "/",
            "/inventory",
            "/staff",
            "/payroll",
            "/expenses",
            "/ops/fallbacks",
        ] {
            let response = test_app()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/auth/login",
                "{path}"
            );
        }
    }

    #[tokio::test]
    async fn test_login_page_offers_demo_roles() {
        let response = test_app()
            .oneshot(Request::get("/auth/login").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("pos_user"));
    }
}
