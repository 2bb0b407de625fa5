//! Unified error handling for the console.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tavola_core::AmountOverflow;
use thiserror::Error;

use crate::session::StorageError;

/// Application-level error type for console handlers.
///
/// Backend fetch failures never reach this type: pages fall back to demo data
/// instead. Access refusals are answered by the session extractors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session storage read or write failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// A page summary could not be computed from already-checked data.
    #[error("Summary error: {0}")]
    Amounts(#[from] AmountOverflow),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every variant is a server fault; log it with Sentry
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Console request error"
        );

        // Don't expose internal error details to clients
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Attach the acting staff member to Sentry events.
pub fn set_sentry_user(email: &str, role: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
        scope.set_tag("role", role);
    });
}
